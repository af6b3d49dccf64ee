//! Lunch Glance library
//!
//! Exposes the aggregation pipeline and its stores for integration tests.

pub mod aggregate;
pub mod cache;
pub mod cli;
pub mod credentials;
pub mod data;
