//! # Uniform 1D cell hierarchy
//!
//! Domains, per-level uniform grids and reverse point indices over which the
//! expansion and translation operators are defined.
pub mod types;

mod domain;
pub mod helpers;
mod single_node;
