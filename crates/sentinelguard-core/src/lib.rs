//! # SentinelGuard
//!
//! Minimal intake service for security alerts.
//!
//! Clients submit alert records over HTTP; the service throttles submissions
//! per client, validates them, stamps them with the server time and appends
//! them to a JSON file. Everything stored can be listed back.
//!
//! ## Architecture
//!
//! - **Limiter**: fixed-window throttle keyed on a hash of the client address
//! - **Store**: JSON array on disk, rewritten on every append
//! - **Service**: the submit pipeline (gate, validate, stamp, persist)
//! - **API**: axum router with a static-file fallback
//!
//! ## Quick Start
//!
//! ```bash
//! # Start the server on the default port (4000)
//! sentinelguard serve
//!
//! # Print what has been collected so far
//! sentinelguard alerts list
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod api;
pub mod config;
pub mod error;
pub mod limiter;
pub mod models;
pub mod service;
pub mod store;

pub use crate::config::Config;
pub use crate::error::{Error, Result};

/// Re-exports for convenience
pub mod prelude {
    pub use crate::api::HttpServer;
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::limiter::{hash_identity, Admission, RateLimiter};
    pub use crate::models::*;
    pub use crate::service::AlertService;
    pub use crate::store::AlertStore;
}
