//! JSON file backed alert store

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::error::{Error, Result};
use crate::models::Alert;

/// Alert collection persisted as a JSON array on local disk
///
/// Readers share a lock; an append holds it exclusively for the whole
/// read-modify-write cycle, so concurrent submissions cannot lose updates and
/// readers never observe a partially written file.
#[derive(Clone)]
pub struct AlertStore {
    path: Arc<PathBuf>,
    lock: Arc<RwLock<()>>,
}

impl AlertStore {
    /// Create a store backed by `path`. Nothing touches the disk until
    /// [`AlertStore::initialize`] is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
            lock: Arc::new(RwLock::new(())),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure the backing file exists and holds a valid alert array.
    ///
    /// A missing file is created empty. A file that does not parse as an
    /// array of alerts, or holds an alert with an empty `type` or `message`,
    /// is replaced by an empty array. Failures are logged
    /// and startup carries on.
    pub async fn initialize(&self) {
        let _guard = self.lock.write().await;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(e) = fs::create_dir_all(parent).await {
                error!(dir = %parent.display(), error = %e, "Failed to create data directory");
            }
        }

        match self.load().await {
            Ok(alerts) => {
                info!(path = %self.path.display(), count = alerts.len(), "Alert store loaded");
            }
            Err(Error::Io(e)) if e.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "Creating empty alert store");
                self.reset().await;
            }
            Err(e @ (Error::Serialization(_) | Error::Validation(_))) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Alert store is corrupt, resetting to an empty collection"
                );
                self.reset().await;
            }
            Err(e) => {
                error!(path = %self.path.display(), error = %e, "Failed to read alert store");
            }
        }
    }

    /// All stored alerts in acceptance order. Read or parse failures are
    /// logged and yield an empty collection.
    pub async fn read_all(&self) -> Vec<Alert> {
        let _guard = self.lock.read().await;
        self.load_or_empty().await
    }

    /// Append one alert by rewriting the whole collection
    pub async fn append_one(&self, alert: Alert) -> Result<()> {
        let _guard = self.lock.write().await;

        let mut alerts = self.load_or_empty().await;
        alerts.push(alert);

        self.persist(&alerts).await.map_err(|e| {
            error!(path = %self.path.display(), error = %e, "Failed to write alert store");
            Error::storage(format!("failed to write {}: {e}", self.path.display()))
        })?;

        debug!(count = alerts.len(), "Alert appended");
        Ok(())
    }

    async fn load(&self) -> Result<Vec<Alert>> {
        let bytes = fs::read(self.path.as_path()).await?;
        let alerts: Vec<Alert> = serde_json::from_slice(&bytes)?;
        alerts.iter().try_for_each(Alert::validate)?;
        Ok(alerts)
    }

    async fn load_or_empty(&self) -> Vec<Alert> {
        match self.load().await {
            Ok(alerts) => alerts,
            Err(Error::Io(e)) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Alert store not created yet");
                Vec::new()
            }
            Err(e) => {
                error!(path = %self.path.display(), error = %e, "Failed to read alerts");
                Vec::new()
            }
        }
    }

    async fn persist(&self, alerts: &[Alert]) -> Result<()> {
        let json = serde_json::to_vec_pretty(alerts)?;
        fs::write(self.path.as_path(), json).await?;
        Ok(())
    }

    async fn reset(&self) {
        if let Err(e) = self.persist(&[]).await {
            error!(path = %self.path.display(), error = %e, "Failed to reset alert store");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample(alert_type: &str, severity: Severity) -> Alert {
        Alert {
            alert_type: alert_type.to_string(),
            message: format!("{alert_type} detected"),
            severity,
            time: Utc::now(),
        }
    }

    async fn store_in(dir: &TempDir) -> AlertStore {
        let store = AlertStore::new(dir.path().join("alerts.json"));
        store.initialize().await;
        store
    }

    #[tokio::test]
    async fn test_initialize_creates_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("data").join("alerts.json");
        let store = AlertStore::new(&path);

        store.initialize().await;

        let contents = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(value, serde_json::json!([]));
        assert!(store.read_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_initialize_keeps_valid_collection() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir).await;
        let alert = sample("port-scan", Severity::High);
        store.append_one(alert.clone()).await.unwrap();

        store.initialize().await;

        assert_eq!(store.read_all().await, vec![alert]);
    }

    #[tokio::test]
    async fn test_append_then_read_preserves_order() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir).await;
        let first = sample("port-scan", Severity::High);
        let second = sample("brute-force", Severity::Low);

        store.append_one(first.clone()).await.unwrap();
        store.append_one(second.clone()).await.unwrap();

        let alerts = store.read_all().await;
        assert_eq!(alerts, vec![first, second.clone()]);
        assert_eq!(alerts.last(), Some(&second));
    }

    #[tokio::test]
    async fn test_read_all_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir).await;
        store.append_one(sample("malware", Severity::Medium)).await.unwrap();

        assert_eq!(store.read_all().await, store.read_all().await);
    }

    #[tokio::test]
    async fn test_recovers_from_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("alerts.json");
        std::fs::write(&path, "{ not json").unwrap();
        let store = AlertStore::new(&path);

        store.initialize().await;
        assert!(store.read_all().await.is_empty());

        store.append_one(sample("port-scan", Severity::High)).await.unwrap();
        assert_eq!(store.read_all().await.len(), 1);
    }

    #[tokio::test]
    async fn test_recovers_from_non_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("alerts.json");
        std::fs::write(&path, r#"{"alerts": []}"#).unwrap();
        let store = AlertStore::new(&path);

        store.initialize().await;
        assert!(store.read_all().await.is_empty());

        store.append_one(sample("port-scan", Severity::High)).await.unwrap();
        assert_eq!(store.read_all().await.len(), 1);
    }

    #[tokio::test]
    async fn test_recovers_from_malformed_records() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("alerts.json");
        std::fs::write(&path, r#"[{"type":"x","message":"y","severity":"BOGUS"}]"#).unwrap();
        let store = AlertStore::new(&path);

        store.initialize().await;

        assert!(store.read_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_resets_records_with_empty_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("alerts.json");
        std::fs::write(
            &path,
            r#"[{"type":"","message":"","severity":"LOW","time":"2024-01-01T00:00:00Z"}]"#,
        )
        .unwrap();
        let store = AlertStore::new(&path);

        store.initialize().await;

        assert!(store.read_all().await.is_empty());
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_read_before_initialize_yields_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("never-created.json");
        let store = AlertStore::new(&path);

        assert_eq!(store.path(), path.as_path());
        assert!(store.read_all().await.is_empty());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_write_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        // A directory in place of the file makes every write fail.
        let path = dir.path().join("alerts.json");
        std::fs::create_dir(&path).unwrap();
        let store = AlertStore::new(&path);

        store.initialize().await;
        let err = store.append_one(sample("port-scan", Severity::High)).await.unwrap_err();

        assert!(matches!(err, Error::Storage(_)));
        assert!(store.read_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_appends_are_not_lost() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir).await;

        let tasks: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .append_one(sample(&format!("event-{i}"), Severity::Low))
                        .await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(store.read_all().await.len(), 16);
    }
}
