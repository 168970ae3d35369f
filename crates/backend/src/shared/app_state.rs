use contracts::dashboards::d400_sales_performance::SalesPerformanceResponse;
use once_cell::sync::OnceCell;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::RwLock;

use crate::shared::config::Config;
use crate::shared::data::snapshot::{load_snapshot, DataSnapshot};
use crate::shared::remote::SheetSource;
use crate::system::auth::jwt;
use crate::system::auth::sessions::SessionStore;

/// Memo key of a computed performance report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformanceKey {
    pub generation: u64,
    pub month: String,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub team: Option<String>,
}

/// Application state shared by all handlers
///
/// Built once in `main` and handed to axum as `State<Arc<AppState>>`. Mutable
/// parts change only through the methods below.
pub struct AppState {
    pub config: Config,
    pub sessions: SessionStore,
    source: Arc<dyn SheetSource>,
    jwt_secret: String,
    snapshot: RwLock<Option<Arc<DataSnapshot>>>,
    generation: AtomicU64,
    performance: Mutex<Option<(PerformanceKey, Arc<SalesPerformanceResponse>)>>,
    feature_names: OnceCell<Arc<Vec<String>>>,
}

impl AppState {
    pub fn new(config: Config, source: Arc<dyn SheetSource>) -> Self {
        let jwt_secret = match config.auth.jwt_secret.as_deref().map(str::trim) {
            Some(secret) if !secret.is_empty() => secret.to_string(),
            _ => {
                tracing::warn!("auth.jwt_secret is not set, generating a temporary secret");
                jwt::generate_jwt_secret()
            }
        };

        Self {
            config,
            sessions: SessionStore::new(),
            source,
            jwt_secret,
            snapshot: RwLock::new(None),
            generation: AtomicU64::new(0),
            performance: Mutex::new(None),
            feature_names: OnceCell::new(),
        }
    }

    pub fn source(&self) -> &dyn SheetSource {
        self.source.as_ref()
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    fn snapshot_ttl(&self) -> Duration {
        Duration::from_secs(self.config.remote.snapshot_ttl_secs)
    }

    /// Current data snapshot, fetched again when stale or when `force` is set
    pub async fn snapshot(&self, force: bool) -> anyhow::Result<Arc<DataSnapshot>> {
        if !force {
            if let Some(current) = self.snapshot.read().await.as_ref() {
                if current.is_fresh(self.snapshot_ttl()) {
                    return Ok(current.clone());
                }
            }
        }

        let mut slot = self.snapshot.write().await;
        // another request may have refreshed it while we waited for the lock
        if !force {
            if let Some(current) = slot.as_ref() {
                if current.is_fresh(self.snapshot_ttl()) {
                    return Ok(current.clone());
                }
            }
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let fresh = Arc::new(load_snapshot(self.source(), generation).await?);
        *slot = Some(fresh.clone());
        Ok(fresh)
    }

    /// Drop the cached snapshot so the next read goes to the remote backend
    pub async fn invalidate_snapshot(&self) {
        *self.snapshot.write().await = None;
        self.clear_performance();
    }

    pub fn cached_performance(&self, key: &PerformanceKey) -> Option<Arc<SalesPerformanceResponse>> {
        let guard = self.performance.lock().ok()?;
        guard
            .as_ref()
            .filter(|(cached_key, _)| cached_key == key)
            .map(|(_, report)| report.clone())
    }

    pub fn store_performance(&self, key: PerformanceKey, report: Arc<SalesPerformanceResponse>) {
        if let Ok(mut guard) = self.performance.lock() {
            *guard = Some((key, report));
        }
    }

    fn clear_performance(&self) {
        if let Ok(mut guard) = self.performance.lock() {
            *guard = None;
        }
    }

    /// Feature names of the province boundary file, read once
    pub fn feature_names(
        &self,
        load: impl FnOnce() -> anyhow::Result<Vec<String>>,
    ) -> anyhow::Result<Arc<Vec<String>>> {
        self.feature_names
            .get_or_try_init(|| load().map(Arc::new))
            .cloned()
    }
}

#[cfg(test)]
pub mod test_support {
    use super::*;
    use crate::shared::remote::memory::InMemorySheets;

    pub fn test_config() -> Config {
        toml::from_str(
            r#"
            [server]
            host = "127.0.0.1"
            port = 0

            [remote]
            base_url = "http://remote.invalid"
            snapshot_ttl_secs = 300

            [auth]
            jwt_secret = "test-secret"
            "#,
        )
        .expect("test config")
    }

    pub fn test_state(source: InMemorySheets) -> (Arc<AppState>, Arc<InMemorySheets>) {
        let source = Arc::new(source);
        let state = Arc::new(AppState::new(test_config(), source.clone()));
        (state, source)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::test_state;
    use super::*;
    use crate::shared::data::snapshot::{ORDERS_SHEET, TARGETS_SHEET, USERS_SHEET};
    use crate::shared::remote::memory::InMemorySheets;
    use serde_json::json;

    fn sheets() -> InMemorySheets {
        InMemorySheets::new()
            .with_sheet(ORDERS_SHEET, json!([]))
            .with_sheet(USERS_SHEET, json!([]))
            .with_sheet(TARGETS_SHEET, json!([]))
    }

    #[tokio::test]
    async fn test_snapshot_is_reused_until_forced() {
        let (state, source) = test_state(sheets());

        let first = state.snapshot(false).await.unwrap();
        let second = state.snapshot(false).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(source.fetch_count(), 3);

        let forced = state.snapshot(true).await.unwrap();
        assert_eq!(forced.generation, first.generation + 1);
        assert_eq!(source.fetch_count(), 6);
    }

    #[tokio::test]
    async fn test_invalidate_clears_snapshot_and_memo() {
        let (state, _) = test_state(sheets());
        let snapshot = state.snapshot(false).await.unwrap();

        let key = PerformanceKey {
            generation: snapshot.generation,
            month: "2024-03".into(),
            date_from: None,
            date_to: None,
            team: None,
        };
        state.store_performance(key.clone(), Arc::new(SalesPerformanceResponse::default()));
        assert!(state.cached_performance(&key).is_some());

        state.invalidate_snapshot().await;
        assert!(state.cached_performance(&key).is_none());

        let reloaded = state.snapshot(false).await.unwrap();
        assert_ne!(reloaded.generation, snapshot.generation);
    }

    #[test]
    fn test_configured_secret_is_used() {
        let (state, _) = test_state(InMemorySheets::new());
        assert_eq!(state.jwt_secret(), "test-secret");
    }

    #[test]
    fn test_feature_names_load_once() {
        let (state, _) = test_state(InMemorySheets::new());
        assert!(state.feature_names(|| anyhow::bail!("missing file")).is_err());
        let names = state.feature_names(|| Ok(vec!["Hà Nội".to_string()])).unwrap();
        assert_eq!(names.len(), 1);
        let again = state
            .feature_names(|| Ok(vec!["other".to_string(), "x".to_string()]))
            .unwrap();
        assert_eq!(again.len(), 1);
    }
}
