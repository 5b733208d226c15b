//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `topsis` - Pure decision-matrix ranking (validation, scoring, ranks)

pub mod foundation;
pub mod topsis;
