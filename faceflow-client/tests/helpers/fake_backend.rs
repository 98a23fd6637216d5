//! In-process fake Faceflow backend for integration tests
//!
//! Serves the album/photo/cluster/share contract from memory on a random
//! local port. Clustering is canned: every photo with a non-empty embedding
//! lands in a single `cluster-1`, in upload order. `set_failing(true)` makes
//! every route answer 500 until cleared.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use faceflow_common::models::{
    Album, AlbumCreate, AlbumSummary, Cluster, Photo, PhotoUpload, ShareBundle, ShareBundleRequest,
};
use serde_json::json;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

#[derive(Default)]
struct BackendState {
    albums: Vec<Album>,
    photos: HashMap<String, Vec<Photo>>,
    clusters: HashMap<String, Vec<Cluster>>,
    bundles: Vec<ShareBundle>,
    failing: bool,
    requests: Vec<String>,
}

type Shared = Arc<Mutex<BackendState>>;

/// Running fake backend
pub struct FakeBackend {
    addr: SocketAddr,
    state: Shared,
}

impl FakeBackend {
    /// Bind to 127.0.0.1:0 and serve in a background task
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(BackendState::default()));

        let router = Router::new()
            .route("/albums", get(list_albums).post(create_album))
            .route("/albums/:album_id", get(album_summary))
            .route("/albums/:album_id/photos", post(add_photo))
            .route("/albums/:album_id/cluster", post(run_clustering))
            .route("/share", post(create_bundle))
            .route("/share/:bundle_id", get(get_bundle))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake backend");
        let addr = listener.local_addr().expect("Failed to read local address");

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Fake backend crashed");
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn set_failing(&self, failing: bool) {
        self.state.lock().unwrap().failing = failing;
    }

    /// Insert an album directly, bypassing the HTTP surface
    pub fn seed_album(&self, id: &str, name: &str) {
        let mut state = self.state.lock().unwrap();
        state.albums.push(Album::new(id, name));
        state.photos.entry(id.to_string()).or_default();
        state.clusters.entry(id.to_string()).or_default();
    }

    /// Replace an album's clusters directly
    pub fn seed_clusters(&self, album_id: &str, clusters: Vec<Cluster>) {
        self.state
            .lock()
            .unwrap()
            .clusters
            .insert(album_id.to_string(), clusters);
    }

    pub fn photos(&self, album_id: &str) -> Vec<Photo> {
        self.state
            .lock()
            .unwrap()
            .photos
            .get(album_id)
            .cloned()
            .unwrap_or_default()
    }

    /// `"METHOD /path"` for every request received, in order
    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }
}

fn error(status: StatusCode, detail: &str) -> Response {
    (status, Json(json!({ "detail": detail }))).into_response()
}

/// Record the request; `Err` carries the injected failure
fn enter(state: &Shared, label: String) -> Result<std::sync::MutexGuard<'_, BackendState>, Response> {
    let mut guard = state.lock().unwrap();
    guard.requests.push(label);
    if guard.failing {
        return Err(error(StatusCode::INTERNAL_SERVER_ERROR, "injected failure"));
    }
    Ok(guard)
}

async fn list_albums(State(state): State<Shared>) -> Response {
    match enter(&state, "GET /albums".to_string()) {
        Ok(guard) => Json(guard.albums.clone()).into_response(),
        Err(response) => response,
    }
}

async fn create_album(State(state): State<Shared>, Json(payload): Json<AlbumCreate>) -> Response {
    let mut guard = match enter(&state, "POST /albums".to_string()) {
        Ok(guard) => guard,
        Err(response) => return response,
    };
    let album = Album {
        id: Uuid::new_v4().to_string(),
        name: payload.name,
        created_at: Some(Utc::now()),
    };
    guard.albums.push(album.clone());
    guard.photos.entry(album.id.clone()).or_default();
    guard.clusters.entry(album.id.clone()).or_default();
    (StatusCode::CREATED, Json(album)).into_response()
}

async fn album_summary(State(state): State<Shared>, Path(album_id): Path<String>) -> Response {
    let guard = match enter(&state, format!("GET /albums/{}", album_id)) {
        Ok(guard) => guard,
        Err(response) => return response,
    };
    let Some(album) = guard.albums.iter().find(|a| a.id == album_id).cloned() else {
        return error(StatusCode::NOT_FOUND, "Album not found");
    };
    Json(AlbumSummary {
        album: Some(album),
        photos: guard.photos.get(&album_id).cloned().unwrap_or_default(),
        clusters: guard.clusters.get(&album_id).cloned().unwrap_or_default(),
    })
    .into_response()
}

async fn add_photo(
    State(state): State<Shared>,
    Path(album_id): Path<String>,
    Json(payload): Json<PhotoUpload>,
) -> Response {
    let mut guard = match enter(&state, format!("POST /albums/{}/photos", album_id)) {
        Ok(guard) => guard,
        Err(response) => return response,
    };
    if !guard.albums.iter().any(|a| a.id == album_id) {
        return error(StatusCode::NOT_FOUND, "Album not found");
    }
    if payload.filename.is_empty() {
        return error(StatusCode::UNPROCESSABLE_ENTITY, "filename must not be empty");
    }
    let photo = Photo {
        id: Uuid::new_v4().to_string(),
        album_id: Some(album_id.clone()),
        filename: Some(payload.filename),
        embedding: payload.embedding,
        metadata: payload.metadata,
        uploaded_at: Some(Utc::now()),
    };
    guard.photos.entry(album_id).or_default().push(photo.clone());
    (StatusCode::CREATED, Json(photo)).into_response()
}

async fn run_clustering(State(state): State<Shared>, Path(album_id): Path<String>) -> Response {
    let mut guard = match enter(&state, format!("POST /albums/{}/cluster", album_id)) {
        Ok(guard) => guard,
        Err(response) => return response,
    };
    if !guard.albums.iter().any(|a| a.id == album_id) {
        return error(StatusCode::NOT_FOUND, "Album not found");
    }
    let photo_ids: Vec<String> = guard
        .photos
        .get(&album_id)
        .map(|photos| {
            photos
                .iter()
                .filter(|p| !p.embedding.is_empty())
                .map(|p| p.id.clone())
                .collect()
        })
        .unwrap_or_default();
    if photo_ids.is_empty() {
        return error(StatusCode::BAD_REQUEST, "No embeddings available for clustering");
    }
    let mut cluster = Cluster::new("cluster-1", photo_ids);
    cluster.album_id = Some(album_id.clone());
    cluster.created_at = Some(Utc::now());
    let clusters = vec![cluster];
    guard.clusters.insert(album_id, clusters.clone());
    Json(clusters).into_response()
}

async fn create_bundle(
    State(state): State<Shared>,
    Json(payload): Json<ShareBundleRequest>,
) -> Response {
    let mut guard = match enter(&state, "POST /share".to_string()) {
        Ok(guard) => guard,
        Err(response) => return response,
    };
    let Some(clusters) = guard.clusters.get(&payload.album_id) else {
        return error(StatusCode::NOT_FOUND, "Album not found");
    };
    let missing: Vec<&String> = payload
        .cluster_ids
        .iter()
        .filter(|id| !clusters.iter().any(|c| &c.id == *id))
        .collect();
    if !missing.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": { "message": "Unknown clusters", "cluster_ids": missing } })),
        )
            .into_response();
    }
    let bundle = ShareBundle {
        id: Uuid::new_v4().to_string(),
        download_url: format!("https://share.faceflow.local/{}/bundle", payload.album_id),
        album_id: payload.album_id,
        cluster_ids: payload.cluster_ids,
        recipients: payload.recipients,
        created_at: Some(Utc::now()),
    };
    guard.bundles.push(bundle.clone());
    (StatusCode::CREATED, Json(bundle)).into_response()
}

async fn get_bundle(State(state): State<Shared>, Path(bundle_id): Path<String>) -> Response {
    let guard = match enter(&state, format!("GET /share/{}", bundle_id)) {
        Ok(guard) => guard,
        Err(response) => return response,
    };
    match guard.bundles.iter().find(|b| b.id == bundle_id) {
        Some(bundle) => Json(bundle.clone()).into_response(),
        None => error(StatusCode::NOT_FOUND, "Share bundle not found"),
    }
}
