//! Cluster view controller
//!
//! Two independent operations:
//! - **Refresh** on mount and whenever the observed refresh token changes.
//!   The cluster list is replaced wholesale; on failure the previous list
//!   stays visible next to the error.
//! - **Run clustering** on explicit request, followed by a refresh on success.
//!
//! Sharing a set of clusters with recipients also lives here since it acts
//! on the displayed list.

use faceflow_common::models::{Cluster, ShareBundle, ShareBundleRequest};
use tracing::{debug, info, warn};

use crate::api::FaceflowApi;
use crate::events::RefreshToken;

/// Shown when the album summary cannot be loaded
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load clusters";

/// Shown when the clustering trigger fails
pub const NO_EMBEDDINGS_MESSAGE: &str = "No embeddings available. Upload photos first.";

/// Shown after a successful fetch that returned no clusters
pub const EMPTY_MESSAGE: &str = "No clusters yet. Upload photos with embeddings and run clustering.";

/// Shown when a share request names no clusters or no recipients
pub const SHARE_SELECTION_MESSAGE: &str = "Select at least one cluster and recipient";

/// Shown when the backend rejects a share request
pub const SHARE_FAILED_MESSAGE: &str = "Failed to create share bundle";

/// Cluster list for one album
#[derive(Debug, Clone)]
pub struct ClusterView {
    album_id: String,
    clusters: Vec<Cluster>,
    /// Whether the most recent summary fetch succeeded
    last_fetch_ok: bool,
    error: Option<String>,
    observed: Option<RefreshToken>,
    share_bundle: Option<ShareBundle>,
}

impl ClusterView {
    /// Create an unloaded view; the first `sync` fetches
    pub fn mount(album_id: impl Into<String>) -> Self {
        Self {
            album_id: album_id.into(),
            clusters: Vec::new(),
            last_fetch_ok: false,
            error: None,
            observed: None,
            share_bundle: None,
        }
    }

    pub fn album_id(&self) -> &str {
        &self.album_id
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn share_bundle(&self) -> Option<&ShareBundle> {
        self.share_bundle.as_ref()
    }

    /// True only when the latest fetch succeeded and returned zero clusters
    pub fn shows_empty_placeholder(&self) -> bool {
        self.last_fetch_ok && self.clusters.is_empty()
    }

    /// Whether `token` differs from the last one this view reacted to
    pub fn needs_refresh(&self, token: RefreshToken) -> bool {
        self.observed != Some(token)
    }

    /// Refresh if `token` changed since the last sync; returns whether a fetch ran
    pub async fn sync(&mut self, api: &dyn FaceflowApi, token: RefreshToken) -> bool {
        if !self.needs_refresh(token) {
            return false;
        }
        self.observed = Some(token);
        self.refresh(api).await;
        true
    }

    /// Fetch the album summary and replace the cluster list
    ///
    /// Returns whether the fetch succeeded.
    pub async fn refresh(&mut self, api: &dyn FaceflowApi) -> bool {
        match api.get_album_summary(&self.album_id).await {
            Ok(summary) => {
                debug!(
                    album_id = %self.album_id,
                    clusters = summary.clusters.len(),
                    "Cluster list refreshed"
                );
                self.clusters = summary.clusters;
                self.last_fetch_ok = true;
                self.error = None;
                true
            }
            Err(e) => {
                warn!(album_id = %self.album_id, error = %e, "Failed to load clusters");
                self.last_fetch_ok = false;
                self.error = Some(LOAD_FAILED_MESSAGE.to_string());
                false
            }
        }
    }

    /// Trigger clustering on the backend, then refresh
    pub async fn run_clustering(&mut self, api: &dyn FaceflowApi) {
        self.error = None;

        if let Err(e) = api.run_clustering(&self.album_id).await {
            warn!(album_id = %self.album_id, error = %e, "Clustering trigger failed");
            self.error = Some(NO_EMBEDDINGS_MESSAGE.to_string());
            return;
        }

        info!(album_id = %self.album_id, "Clustering complete");
        self.refresh(api).await;
    }

    /// Create a share bundle for `cluster_ids` addressed to `recipients`
    ///
    /// An empty `cluster_ids` shares every displayed cluster.
    pub async fn share(
        &mut self,
        api: &dyn FaceflowApi,
        cluster_ids: Vec<String>,
        recipients: Vec<String>,
    ) {
        self.error = None;

        let cluster_ids = if cluster_ids.is_empty() {
            self.clusters.iter().map(|c| c.id.clone()).collect()
        } else {
            cluster_ids
        };

        if cluster_ids.is_empty() || recipients.is_empty() {
            self.error = Some(SHARE_SELECTION_MESSAGE.to_string());
            return;
        }

        let request = ShareBundleRequest {
            album_id: self.album_id.clone(),
            cluster_ids,
            recipients,
        };

        match api.create_share_bundle(&request).await {
            Ok(bundle) => {
                info!(album_id = %self.album_id, bundle_id = %bundle.id, "Share bundle created");
                self.share_bundle = Some(bundle);
            }
            Err(e) => {
                warn!(album_id = %self.album_id, error = %e, "Share bundle creation failed");
                self.error = Some(SHARE_FAILED_MESSAGE.to_string());
            }
        }
    }
}
