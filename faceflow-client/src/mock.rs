//! In-memory `FaceflowApi` double for controller unit tests
//!
//! Albums get sequential ids (`a1`, `a2`, ...). Clustering puts every photo
//! uploaded to the album into one cluster named `c1` with photo ids
//! `p1`, `p2`, ... in upload order. Operations listed through `fail` return
//! a 500 until `recover` is called.

use async_trait::async_trait;
use faceflow_common::models::{
    Album, AlbumSummary, Cluster, PhotoUpload, ShareBundle, ShareBundleRequest,
};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::api::FaceflowApi;
use crate::error::{FetchError, FetchResult};

#[derive(Default)]
struct MockState {
    albums: Vec<Album>,
    clusters: HashMap<String, Vec<Cluster>>,
    uploads: Vec<(String, PhotoUpload)>,
    bundles: Vec<ShareBundle>,
    failing: HashSet<&'static str>,
    calls: Vec<&'static str>,
}

#[derive(Default)]
pub(crate) struct MockApi {
    state: Mutex<MockState>,
}

impl MockApi {
    pub(crate) fn with_albums(albums: Vec<Album>) -> Self {
        let api = Self::default();
        api.state.lock().unwrap().albums = albums;
        api
    }

    pub(crate) fn set_clusters(&self, album_id: &str, clusters: Vec<Cluster>) {
        self.state
            .lock()
            .unwrap()
            .clusters
            .insert(album_id.to_string(), clusters);
    }

    pub(crate) fn remove_album(&self, album_id: &str) {
        self.state.lock().unwrap().albums.retain(|a| a.id != album_id);
    }

    pub(crate) fn fail(&self, operation: &'static str) {
        self.state.lock().unwrap().failing.insert(operation);
    }

    pub(crate) fn recover(&self, operation: &'static str) {
        self.state.lock().unwrap().failing.remove(operation);
    }

    pub(crate) fn uploads(&self) -> Vec<(String, PhotoUpload)> {
        self.state.lock().unwrap().uploads.clone()
    }

    pub(crate) fn calls(&self, operation: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| **c == operation)
            .count()
    }

    /// Record the call and report an injected failure
    fn enter(&self, operation: &'static str) -> FetchResult<std::sync::MutexGuard<'_, MockState>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(operation);
        if state.failing.contains(operation) {
            return Err(FetchError::Status {
                status: 500,
                body: format!("{} failed", operation),
            });
        }
        Ok(state)
    }
}

#[async_trait]
impl FaceflowApi for MockApi {
    async fn list_albums(&self) -> FetchResult<Vec<Album>> {
        let state = self.enter("list_albums")?;
        Ok(state.albums.clone())
    }

    async fn create_album(&self, name: &str) -> FetchResult<Album> {
        let mut state = self.enter("create_album")?;
        let album = Album::new(format!("a{}", state.albums.len() + 1), name);
        state.albums.push(album.clone());
        Ok(album)
    }

    async fn get_album_summary(&self, album_id: &str) -> FetchResult<AlbumSummary> {
        let state = self.enter("get_album_summary")?;
        let album = state
            .albums
            .iter()
            .find(|a| a.id == album_id)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                status: 404,
                body: "Album not found".to_string(),
            })?;
        Ok(AlbumSummary {
            album: Some(album),
            photos: Vec::new(),
            clusters: state.clusters.get(album_id).cloned().unwrap_or_default(),
        })
    }

    async fn upload_photo(&self, album_id: &str, upload: &PhotoUpload) -> FetchResult<()> {
        let mut state = self.enter("upload_photo")?;
        state.uploads.push((album_id.to_string(), upload.clone()));
        Ok(())
    }

    async fn run_clustering(&self, album_id: &str) -> FetchResult<()> {
        let mut state = self.enter("run_clustering")?;
        let photo_ids: Vec<String> = state
            .uploads
            .iter()
            .filter(|(album, upload)| album == album_id && !upload.embedding.is_empty())
            .enumerate()
            .map(|(i, _)| format!("p{}", i + 1))
            .collect();
        if photo_ids.is_empty() {
            return Err(FetchError::Status {
                status: 400,
                body: "No embeddings available for clustering".to_string(),
            });
        }
        state
            .clusters
            .insert(album_id.to_string(), vec![Cluster::new("c1", photo_ids)]);
        Ok(())
    }

    async fn create_share_bundle(&self, request: &ShareBundleRequest) -> FetchResult<ShareBundle> {
        let mut state = self.enter("create_share_bundle")?;
        let bundle = ShareBundle {
            id: format!("b{}", state.bundles.len() + 1),
            album_id: request.album_id.clone(),
            cluster_ids: request.cluster_ids.clone(),
            recipients: request.recipients.clone(),
            download_url: format!("https://share.faceflow.local/{}/bundle", request.album_id),
            created_at: None,
        };
        state.bundles.push(bundle.clone());
        Ok(bundle)
    }

    async fn get_share_bundle(&self, bundle_id: &str) -> FetchResult<ShareBundle> {
        let state = self.enter("get_share_bundle")?;
        state
            .bundles
            .iter()
            .find(|b| b.id == bundle_id)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                status: 404,
                body: "Share bundle not found".to_string(),
            })
    }
}
