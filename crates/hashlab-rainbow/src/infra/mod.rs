//! Infrastructure layer - Shared state
//!
//! This module holds state that outlives a single request.

pub mod table_cache;
