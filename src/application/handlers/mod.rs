//! Application handlers.
//!
//! Command handlers that orchestrate domain operations through ports.

pub mod ranking;

pub use ranking::{
    DeliveryOutcome, RankTableCommand, RankTableError, RankTableHandler, RankTableResult,
};
