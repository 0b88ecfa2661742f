//! A fast multipole method for the one dimensional Cauchy kernel.
mod builder;
pub mod constants;
pub mod helpers;
pub mod kernel;
pub mod types;

mod eval;
mod field_translation;
