//! Per-client request throttling
//!
//! Clients are bucketed by a one-way hash of their network address and
//! admitted through a fixed-window counter. Stale buckets are swept as a side
//! effect of admission, so there is no background cleanup task.

mod fixed_window;
mod identity;

pub use fixed_window::{Admission, RateLimitEntry, RateLimiter};
pub use identity::{hash_identity, IdentityKey};
