//! Interval store tests
//!
//! Public-API behaviour of `IntervalStore`:
//! - Point queries against every offset of every interval
//! - Rejected insertions leave the builder untouched
//! - Navigation, outermost iteration and edits

pub mod tests_containment;
pub mod tests_insertion_order;
