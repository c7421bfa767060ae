pub mod flight;
pub mod models;
pub mod rules;
pub mod stats;

pub use flight::{
    plan_flight, plan_flight_cancellable, plan_flight_with, CutoffPolicy, FlightPath, FlightPlan,
    PlotVisit,
};
pub use models::{
    CreateEstateRequest, CreateTreeRequest, Estate, HeightMap, Plot, Tree, ValidationError,
};
pub use stats::{compute_stats, EstateStats};
