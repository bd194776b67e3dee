//! Domain layer - Pure computational logic
//!
//! This module contains pure functions and algorithms without shared state.

pub mod chain;
pub mod charset;
pub mod coverage;
pub mod hash;
pub mod keyspace;
pub mod params;
pub mod strength;
