//! Alert intake service
//!
//! Sits between the HTTP layer and the limiter/store pair: every submission
//! passes the rate-limit gate, then validation, then the store.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::limiter::{hash_identity, RateLimiter};
use crate::models::{Alert, AlertInput};
use crate::store::AlertStore;

/// Validates, stamps and persists submitted alerts
#[derive(Clone)]
pub struct AlertService {
    limiter: Arc<RateLimiter>,
    store: AlertStore,
}

impl AlertService {
    /// Create a service from its collaborators
    pub fn new(limiter: Arc<RateLimiter>, store: AlertStore) -> Self {
        Self { limiter, store }
    }

    /// Create a service wired from configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(RateLimiter::new(config.rate_limit)),
            AlertStore::new(config.storage.data_file.clone()),
        )
    }

    /// Submit a raw alert body on behalf of `client_address`
    pub async fn submit(&self, raw_body: &[u8], client_address: &str) -> Result<Alert> {
        self.submit_at(raw_body, client_address, Utc::now()).await
    }

    /// Submit with an explicit clock reading, used both for admission and
    /// for stamping the alert
    pub async fn submit_at(
        &self,
        raw_body: &[u8],
        client_address: &str,
        now: DateTime<Utc>,
    ) -> Result<Alert> {
        let identity = hash_identity(client_address);
        if !self.limiter.admit(&identity, now).is_allowed() {
            warn!(identity = %identity, "Alert submission rate limited");
            return Err(Error::RateLimit);
        }

        let input = AlertInput::from_json(raw_body).map_err(|e| {
            debug!(identity = %identity, error = %e, "Rejected alert submission");
            e
        })?;

        let alert = input.into_alert(now);
        self.store.append_one(alert.clone()).await?;

        info!(
            alert_type = %alert.alert_type,
            severity = %alert.severity,
            "Alert accepted"
        );
        Ok(alert)
    }

    /// Every stored alert, in acceptance order
    pub async fn list_all(&self) -> Vec<Alert> {
        self.store.read_all().await
    }

    /// The backing store
    pub fn store(&self) -> &AlertStore {
        &self.store
    }

    /// The submission rate limiter
    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }
}
