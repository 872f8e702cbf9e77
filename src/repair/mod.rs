//! Repair recommendations
//!
//! Recommendations are produced by an upstream error-detection and
//! repair-generation stage; this crate only consumes them.

mod recommendation;

pub use recommendation::Recommendation;
