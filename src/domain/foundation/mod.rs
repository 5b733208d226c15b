//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that the ranking engine and its collaborators share.

mod email;
mod errors;
mod ids;
mod impact;
mod timestamp;

pub use email::EmailAddress;
pub use errors::ValidationError;
pub use ids::{DeliveryId, RankingRunId};
pub use impact::Impact;
pub use timestamp::Timestamp;
