//! TOPSIS Engine - Multi-criteria decision ranking
//!
//! This crate ranks alternatives in a decision table by their relative
//! closeness to an ideal solution (TOPSIS), reading tables through ports and
//! writing the augmented result back out.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
