use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::offline::snapshot::{CacheSnapshot, CachedBody, SnapshotStore};

/// Explicit cache configuration, passed in at construction rather than read
/// from ambient constants
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Version identifier that names the snapshot, e.g. `pontos-bh-v1`
    pub version: String,
    /// Absolute URLs that must all be fetchable at install time
    pub manifest: Vec<String>,
    pub fetch_timeout: Duration,
}

/// Lifecycle of the interception worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Uninstalled,
    Installing,
    WaitingActivation,
    Active,
}

/// Errors surfaced by the offline cache
#[derive(Debug, Error)]
pub enum OfflineCacheError {
    #[error("install of version {version} failed fetching {url}: {reason}")]
    InstallFailed {
        version: String,
        url: String,
        reason: String,
    },

    #[error("network fetch for {url} failed: {source}")]
    NetworkFetchFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Where an intercepted response was resolved from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseSource {
    Cache,
    Network,
}

/// Response handed back to the requesting page
#[derive(Debug, Clone)]
pub struct InterceptedResponse {
    pub body: Vec<u8>,
    pub content_type: Option<String>,
    pub source: ResponseSource,
}

/// Offline-first interception worker
///
/// Runs in its own context, isolated from the page: it only ever sees
/// outgoing fetches. Install populates a versioned snapshot from the manifest
/// all-or-nothing; steady-state interception is cache-first with a network
/// fallthrough for anything not in the active snapshot.
pub struct OfflineCache {
    config: RwLock<CacheConfig>,
    client: Client,
    snapshots: RwLock<SnapshotStore>,
    state: RwLock<WorkerState>,
}

impl OfflineCache {
    pub fn new(config: CacheConfig) -> Self {
        let client = Client::builder()
            .timeout(config.fetch_timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config: RwLock::new(config),
            client,
            snapshots: RwLock::new(SnapshotStore::new()),
            state: RwLock::new(WorkerState::Uninstalled),
        }
    }

    pub async fn state(&self) -> WorkerState {
        *self.state.read().await
    }

    pub async fn active_version(&self) -> Option<String> {
        self.snapshots
            .read()
            .await
            .active_version()
            .map(str::to_string)
    }

    /// Whether a committed snapshot exists for `version`; housekeeping hook
    /// for verifying that superseded snapshots were pruned
    pub async fn has_snapshot(&self, version: &str) -> bool {
        self.snapshots.read().await.contains_version(version)
    }

    /// Swap in a newly deployed version's configuration
    ///
    /// Takes effect on the next `on_install`; the currently active snapshot
    /// keeps serving until then.
    pub async fn deploy(&self, config: CacheConfig) {
        info!(version = %config.version, "New cache version deployed");
        *self.config.write().await = config;
    }

    /// Install the configured version
    ///
    /// Fetches every manifest URL; if any single fetch fails the whole
    /// install fails, nothing is committed, and the worker returns to its
    /// previous state so an earlier snapshot keeps serving. On success the
    /// snapshot is committed and the worker skips the waiting period,
    /// activating the new version immediately.
    pub async fn on_install(&self) -> Result<(), OfflineCacheError> {
        let config = self.config.read().await.clone();

        let previous = {
            let mut state = self.state.write().await;
            let previous = *state;
            *state = WorkerState::Installing;
            previous
        };

        info!(
            version = %config.version,
            assets = config.manifest.len(),
            "Installing offline cache"
        );

        let mut entries = HashMap::with_capacity(config.manifest.len());
        for url in &config.manifest {
            match self.fetch_asset(url).await {
                Ok(cached) => {
                    entries.insert(url.clone(), cached);
                }
                Err(reason) => {
                    // All-or-nothing: a partial snapshot is never committed
                    *self.state.write().await = previous;
                    warn!(
                        version = %config.version,
                        url = %url,
                        %reason,
                        "Install aborted, previous snapshot keeps serving"
                    );
                    return Err(OfflineCacheError::InstallFailed {
                        version: config.version,
                        url: url.clone(),
                        reason,
                    });
                }
            }
        }

        self.snapshots
            .write()
            .await
            .commit(CacheSnapshot::new(config.version.clone(), entries));
        *self.state.write().await = WorkerState::WaitingActivation;

        // Skip the waiting period so the new version takes over without
        // requiring all pages to close first
        self.activate().await;
        Ok(())
    }

    /// Make the configured version active and prune superseded snapshots
    pub async fn activate(&self) {
        let version = self.config.read().await.version.clone();

        self.snapshots.write().await.activate(&version);
        *self.state.write().await = WorkerState::Active;

        info!(version = %version, "Offline cache active");
    }

    /// Serve one outgoing request: active snapshot first, network on miss
    ///
    /// A hit never touches the network. A miss goes to the network every
    /// time and the response is returned as-is; misses are not written back
    /// into the snapshot, and failures are surfaced without retry.
    pub async fn on_intercept(
        &self,
        request_key: &str,
    ) -> Result<InterceptedResponse, OfflineCacheError> {
        {
            let snapshots = self.snapshots.read().await;
            if let Some(cached) = snapshots.active().and_then(|s| s.get(request_key)) {
                debug!(request_key, "Serving from snapshot");
                return Ok(InterceptedResponse {
                    body: cached.body.clone(),
                    content_type: cached.content_type.clone(),
                    source: ResponseSource::Cache,
                });
            }
        }

        debug!(request_key, "Snapshot miss, falling through to network");

        let response = self.client.get(request_key).send().await.map_err(|e| {
            OfflineCacheError::NetworkFetchFailed {
                url: request_key.to_string(),
                source: e,
            }
        })?;

        let content_type = content_type_of(&response);
        let body = response
            .bytes()
            .await
            .map_err(|e| OfflineCacheError::NetworkFetchFailed {
                url: request_key.to_string(),
                source: e,
            })?
            .to_vec();

        Ok(InterceptedResponse {
            body,
            content_type,
            source: ResponseSource::Network,
        })
    }

    /// Fetch one manifest asset; a non-success status fails the install just
    /// like a transport error
    async fn fetch_asset(&self, url: &str) -> Result<CachedBody, String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            return Err(format!("unexpected status {}", response.status()));
        }

        let content_type = content_type_of(&response);
        let body = response.bytes().await.map_err(|e| e.to_string())?.to_vec();

        Ok(CachedBody { body, content_type })
    }
}

fn content_type_of(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
