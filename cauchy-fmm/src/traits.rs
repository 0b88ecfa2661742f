//! Trait interfaces for the Cauchy FMM.
pub mod fmm;
pub mod general;
pub mod types;
