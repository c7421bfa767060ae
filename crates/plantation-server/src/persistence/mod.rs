//! Persistence layer for the plantation server.
//!
//! SQLite-backed storage for estates and trees. The schema is created from the
//! embedded migration when the pool is opened.

pub mod db;
pub mod estates;
pub mod trees;

pub use db::{init_database, Database};
