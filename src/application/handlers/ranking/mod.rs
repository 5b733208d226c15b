//! Ranking handlers.

mod rank_table;

pub use rank_table::{
    DeliveryOutcome, RankTableCommand, RankTableError, RankTableHandler, RankTableResult,
};
