//! Mesh operators.
//!
//! Every operator is a small struct built with `new(..)` and run with
//! `execute(&mut Mesh)`. Operators given a stale handle or degenerate
//! geometry do nothing and report it through their return value.

pub mod creation;
pub mod query;
pub mod shaping;
pub mod transform;
