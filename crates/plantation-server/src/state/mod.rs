//! Shared server state and the estate/tree data providers behind it.

pub mod memory;
pub mod provider;
pub mod store;

pub use memory::MemoryProvider;
pub use provider::{AddTreeOutcome, EstateProvider, SqliteProvider};
pub use store::AppState;
