//! HTTP client boundary for the Faceflow backend
//!
//! Each operation issues exactly one request and maps any non-success status
//! to `FetchError`. There are no retries and no caching; the only limit on a
//! request is the client-wide timeout from configuration.
//!
//! # API Reference
//! | Method | Path                   | Body                           |
//! |--------|------------------------|--------------------------------|
//! | GET    | `/albums`              |                                |
//! | POST   | `/albums`              | `{name}`                       |
//! | GET    | `/albums/{id}`         |                                |
//! | POST   | `/albums/{id}/photos`  | `{filename, embedding, ...}`   |
//! | POST   | `/albums/{id}/cluster` |                                |
//! | POST   | `/share`               | `{album_id, cluster_ids, ...}` |
//! | GET    | `/share/{id}`          |                                |

use async_trait::async_trait;
use faceflow_common::config::{parse_api_url, ClientConfig};
use faceflow_common::models::{
    Album, AlbumCreate, AlbumSummary, PhotoUpload, ShareBundle, ShareBundleRequest,
};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{FetchError, FetchResult};

/// User-Agent header sent with every request
const USER_AGENT: &str = concat!("faceflow-client/", env!("CARGO_PKG_VERSION"));

/// Backend operations used by the controllers
///
/// `HttpApi` is the production implementation. Controllers only see this
/// trait so they can run against an in-memory double.
#[async_trait]
pub trait FaceflowApi: Send + Sync {
    /// `GET /albums`
    async fn list_albums(&self) -> FetchResult<Vec<Album>>;

    /// `POST /albums`; the name is not validated
    async fn create_album(&self, name: &str) -> FetchResult<Album>;

    /// `GET /albums/{id}`
    async fn get_album_summary(&self, album_id: &str) -> FetchResult<AlbumSummary>;

    /// `POST /albums/{id}/photos`; the response body is ignored
    async fn upload_photo(&self, album_id: &str, upload: &PhotoUpload) -> FetchResult<()>;

    /// `POST /albums/{id}/cluster`; fails when the album has no embeddings
    async fn run_clustering(&self, album_id: &str) -> FetchResult<()>;

    /// `POST /share`
    async fn create_share_bundle(&self, request: &ShareBundleRequest) -> FetchResult<ShareBundle>;

    /// `GET /share/{id}`
    async fn get_share_bundle(&self, bundle_id: &str) -> FetchResult<ShareBundle>;
}

/// `reqwest`-backed implementation of `FaceflowApi`
#[derive(Debug, Clone)]
pub struct HttpApi {
    http_client: Client,
    base_url: Url,
}

impl HttpApi {
    /// Create a client for `base_url` with a per-request timeout
    pub fn new(base_url: &str, timeout: Duration) -> FetchResult<Self> {
        let base_url =
            parse_api_url(base_url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

        let http_client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn from_config(config: &ClientConfig) -> FetchResult<Self> {
        Self::new(&config.api_url, config.timeout)
    }

    /// Append percent-encoded path segments to the base URL
    fn endpoint(&self, segments: &[&str]) -> FetchResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send a request and reject non-success statuses
    async fn send(&self, request: RequestBuilder, label: &str) -> FetchResult<Response> {
        let response = request.send().await.map_err(|e| {
            warn!(operation = label, error = %e, "Backend request failed");
            FetchError::Network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(operation = label, status = status.as_u16(), body = %body, "Backend returned error");
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!(operation = label, status = status.as_u16(), "Backend request complete");
        Ok(response)
    }

    async fn read_json<T: DeserializeOwned>(response: Response, label: &str) -> FetchResult<T> {
        response.json::<T>().await.map_err(|e| {
            warn!(operation = label, error = %e, "Failed to parse backend response");
            FetchError::Parse(format!("{}: {}", label, e))
        })
    }
}

#[async_trait]
impl FaceflowApi for HttpApi {
    async fn list_albums(&self) -> FetchResult<Vec<Album>> {
        let url = self.endpoint(&["albums"])?;
        debug!(%url, "GET albums");
        let response = self.send(self.http_client.get(url), "list_albums").await?;
        Self::read_json(response, "list_albums").await
    }

    async fn create_album(&self, name: &str) -> FetchResult<Album> {
        let url = self.endpoint(&["albums"])?;
        debug!(%url, album_name = name, "POST album");
        let body = AlbumCreate {
            name: name.to_string(),
        };
        let response = self
            .send(self.http_client.post(url).json(&body), "create_album")
            .await?;
        Self::read_json(response, "create_album").await
    }

    async fn get_album_summary(&self, album_id: &str) -> FetchResult<AlbumSummary> {
        let url = self.endpoint(&["albums", album_id])?;
        debug!(%url, "GET album summary");
        let response = self
            .send(self.http_client.get(url), "get_album_summary")
            .await?;
        Self::read_json(response, "get_album_summary").await
    }

    async fn upload_photo(&self, album_id: &str, upload: &PhotoUpload) -> FetchResult<()> {
        let url = self.endpoint(&["albums", album_id, "photos"])?;
        debug!(
            %url,
            filename = %upload.filename,
            dimensions = upload.embedding.len(),
            "POST photo"
        );
        self.send(self.http_client.post(url).json(upload), "upload_photo")
            .await?;
        Ok(())
    }

    async fn run_clustering(&self, album_id: &str) -> FetchResult<()> {
        let url = self.endpoint(&["albums", album_id, "cluster"])?;
        debug!(%url, "POST cluster");
        self.send(self.http_client.post(url), "run_clustering")
            .await?;
        Ok(())
    }

    async fn create_share_bundle(&self, request: &ShareBundleRequest) -> FetchResult<ShareBundle> {
        let url = self.endpoint(&["share"])?;
        debug!(
            %url,
            album_id = %request.album_id,
            clusters = request.cluster_ids.len(),
            recipients = request.recipients.len(),
            "POST share bundle"
        );
        let response = self
            .send(self.http_client.post(url).json(request), "create_share_bundle")
            .await?;
        Self::read_json(response, "create_share_bundle").await
    }

    async fn get_share_bundle(&self, bundle_id: &str) -> FetchResult<ShareBundle> {
        let url = self.endpoint(&["share", bundle_id])?;
        debug!(%url, "GET share bundle");
        let response = self
            .send(self.http_client.get(url), "get_share_bundle")
            .await?;
        Self::read_json(response, "get_share_bundle").await
    }
}
