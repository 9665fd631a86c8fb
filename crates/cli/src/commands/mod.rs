//! CLI command implementations.

pub mod search;
pub mod seed;
pub mod serve;
