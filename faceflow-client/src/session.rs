//! Album/session controller
//!
//! Owns the album list, the active album, and the refresh token. Children
//! (upload form, cluster view) report back through `SessionEvent`s; the
//! session is the only writer of shared state.
//!
//! Actions that talk to the backend finish by syncing the cluster view so a
//! freshly mounted view loads and a changed token triggers a refetch.
//! `select_album` is the exception: it only swaps local state, and the caller
//! runs `sync_views` when it is ready to fetch.

use faceflow_common::models::Album;
use faceflow_common::{Error, Result};
use tracing::{debug, info, warn};

use crate::api::FaceflowApi;
use crate::clusters::ClusterView;
use crate::events::{RefreshToken, SessionEvent};
use crate::upload::UploadForm;

/// Initial contents of the album name field
pub const DEFAULT_ALBUM_NAME: &str = "Demo Album";

/// Shown when the album list cannot be loaded
pub const LOAD_ALBUMS_FAILED_MESSAGE: &str = "Failed to load albums";

/// Shown when album creation fails
pub const CREATE_ALBUM_FAILED_MESSAGE: &str = "Failed to create album";

/// Page state for one client session
#[derive(Debug, Clone)]
pub struct Session {
    albums: Vec<Album>,
    active_album_id: Option<String>,
    refresh_token: RefreshToken,
    album_name: String,
    error: Option<String>,
    upload: UploadForm,
    cluster_view: Option<ClusterView>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            albums: Vec::new(),
            active_album_id: None,
            refresh_token: RefreshToken::new(),
            album_name: DEFAULT_ALBUM_NAME.to_string(),
            error: None,
            upload: UploadForm::new(),
            cluster_view: None,
        }
    }

    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    pub fn active_album_id(&self) -> Option<&str> {
        self.active_album_id.as_deref()
    }

    pub fn active_album(&self) -> Option<&Album> {
        let id = self.active_album_id.as_deref()?;
        self.albums.iter().find(|a| a.id == id)
    }

    pub fn refresh_token(&self) -> RefreshToken {
        self.refresh_token
    }

    pub fn album_name(&self) -> &str {
        &self.album_name
    }

    pub fn set_album_name(&mut self, name: impl Into<String>) {
        self.album_name = name.into();
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn upload_form(&self) -> &UploadForm {
        &self.upload
    }

    pub fn upload_form_mut(&mut self) -> &mut UploadForm {
        &mut self.upload
    }

    /// Cluster view for the active album, if any
    pub fn cluster_view(&self) -> Option<&ClusterView> {
        self.cluster_view.as_ref()
    }

    /// Initial load: fetch albums, pick a default, load the active album's clusters
    pub async fn mount(&mut self, api: &dyn FaceflowApi) {
        self.refresh_albums(api).await;
        self.sync_views(api).await;
    }

    /// Refetch the album list
    ///
    /// An active album that is no longer listed is dropped. The first album
    /// (backend order) is then selected when nothing is selected.
    /// Returns whether the fetch succeeded.
    pub async fn refresh_albums(&mut self, api: &dyn FaceflowApi) -> bool {
        match api.list_albums().await {
            Ok(albums) => {
                debug!(count = albums.len(), "Album list loaded");
                self.albums = albums;
                if let Some(active) = self.active_album_id.as_deref() {
                    if !self.albums.iter().any(|a| a.id == active) {
                        warn!(album_id = %active, "Active album no longer listed");
                        self.active_album_id = None;
                        self.cluster_view = None;
                    }
                }
                if self.active_album_id.is_none() {
                    if let Some(first) = self.albums.first().map(|a| a.id.clone()) {
                        self.activate(first);
                    }
                }
                true
            }
            Err(e) => {
                warn!(error = %e, "Failed to load albums");
                self.error = Some(LOAD_ALBUMS_FAILED_MESSAGE.to_string());
                false
            }
        }
    }

    /// Create an album from the name field, refetch the list, select it
    pub async fn create_album(&mut self, api: &dyn FaceflowApi) {
        let created = match api.create_album(&self.album_name).await {
            Ok(album) => album,
            Err(e) => {
                warn!(album_name = %self.album_name, error = %e, "Failed to create album");
                self.error = Some(CREATE_ALBUM_FAILED_MESSAGE.to_string());
                return;
            }
        };

        info!(album_id = %created.id, album_name = %created.name, "Album created");
        self.error = None;
        self.album_name.clear();

        self.refresh_albums(api).await;
        if self.albums.iter().any(|a| a.id == created.id) {
            self.activate(created.id);
        } else {
            warn!(
                album_id = %created.id,
                "Created album missing from refreshed list; keeping current selection"
            );
        }

        self.sync_views(api).await;
    }

    /// Make `album_id` the active album without contacting the backend
    pub fn select_album(&mut self, album_id: &str) -> Result<()> {
        if !self.albums.iter().any(|a| a.id == album_id) {
            return Err(Error::NotFound(format!("album {}", album_id)));
        }
        self.activate(album_id.to_string());
        Ok(())
    }

    fn activate(&mut self, album_id: String) {
        if self.active_album_id.as_deref() == Some(album_id.as_str()) {
            return;
        }
        debug!(album_id = %album_id, "Active album changed");
        self.cluster_view = Some(ClusterView::mount(album_id.clone()));
        self.active_album_id = Some(album_id);
    }

    /// Apply a notification from a child controller
    pub fn handle(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::PhotoUploaded { album_id, filename } => {
                self.refresh_token.bump();
                debug!(
                    album_id = %album_id,
                    filename = %filename,
                    token = self.refresh_token.value(),
                    "Refresh token bumped"
                );
            }
        }
    }

    /// Let the cluster view react to a changed refresh token (or its first mount)
    pub async fn sync_views(&mut self, api: &dyn FaceflowApi) {
        let token = self.refresh_token;
        if let Some(view) = self.cluster_view.as_mut() {
            view.sync(api, token).await;
        }
    }

    /// Submit the upload form for the active album
    ///
    /// Without an active album nothing is sent.
    pub async fn upload_photo(&mut self, api: &dyn FaceflowApi) {
        let Some(album_id) = self.active_album_id.clone() else {
            debug!("Upload ignored: no active album");
            return;
        };

        if let Some(event) = self.upload.submit(api, &album_id).await {
            self.handle(event);
        }
        self.sync_views(api).await;
    }

    /// Trigger clustering for the active album
    pub async fn run_clustering(&mut self, api: &dyn FaceflowApi) {
        if let Some(view) = self.cluster_view.as_mut() {
            view.run_clustering(api).await;
        }
    }

    /// Explicitly refetch the active album's clusters
    pub async fn refresh_clusters(&mut self, api: &dyn FaceflowApi) {
        if let Some(view) = self.cluster_view.as_mut() {
            view.refresh(api).await;
        }
    }

    /// Share clusters of the active album
    pub async fn share(
        &mut self,
        api: &dyn FaceflowApi,
        cluster_ids: Vec<String>,
        recipients: Vec<String>,
    ) {
        if let Some(view) = self.cluster_view.as_mut() {
            view.share(api, cluster_ids, recipients).await;
        }
    }
}
