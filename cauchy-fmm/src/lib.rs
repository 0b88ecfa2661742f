//! # 1D Cauchy Fast Multipole Method
//!
//! A fast multipole method for the one dimensional Cauchy kernel,
//!
//! ```text
//! f_i = sum_j g_j / (t_i - s_j)
//! ```
//!
//! evaluated for `n` source points `s`, target points `t` and charges `g` in
//! asymptotically better than `O(n^2)` time, following the classical
//! expansion/translation scheme over a uniform binary cell hierarchy \[1\].
//!
//! Notable features of this library are:
//! * Multipole and local expansions with exact moment-to-moment (M2M) translation
//!   carried bottom-up through the level hierarchy.
//! * Near-field interactions evaluated directly at the finest level, far-field
//!   interactions via truncated Laurent series between well separated cells.
//! * An `O(n^2)` direct evaluator, always available as a correctness oracle.
//!
//! ## References
//! \[1\] Strain, J. Fast multipole methods in one dimension, Math 128B course
//! notes, UC Berkeley (2020).
#![cfg_attr(feature = "strict", deny(warnings))]
#![warn(missing_docs)]

pub mod fmm;
pub mod traits;
pub mod tree;

// Public API
#[doc(inline)]
pub use fmm::types::CauchyFmm;
#[doc(inline)]
pub use fmm::types::CauchyFmmBuilder;
#[doc(inline)]
pub use traits::fmm::Evaluate;
