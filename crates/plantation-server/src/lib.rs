//! Shared library surface for the plantation server and its tests.

pub mod api;
pub mod config;
pub mod error;
pub mod persistence;
pub mod state;
