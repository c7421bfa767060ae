//! Plantation CLI - command line tools for the plantation estate service.
//!
//! - `client`: blocking HTTP client for the REST API
//! - `snapshot`: offline estate snapshots for local flight simulation

pub mod client;
pub mod snapshot;

pub use client::EstateClient;
pub use snapshot::EstateSnapshot;
