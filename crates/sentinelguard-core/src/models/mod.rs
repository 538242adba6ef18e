//! Data models for SentinelGuard

mod alert;
mod query;

pub use alert::*;
pub use query::*;
