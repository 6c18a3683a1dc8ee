//! Graph tests
//!
//! Reference graphs built from a second pass over reference sites, and the
//! rules/tokens heterogeneous view.

pub mod tests_hetero;
pub mod tests_references;
