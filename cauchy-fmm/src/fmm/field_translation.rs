//! Implementations of the FMM translation operators.
mod source;
mod source_to_target;
mod target;
