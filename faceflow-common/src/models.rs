//! Wire models for the face-grouping backend
//!
//! The backend owns identity and computation; the client only reads these
//! records back and builds request payloads. Fields the client never needs
//! are accepted as optional so older or trimmed responses still decode.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ========================================
// Albums
// ========================================

/// A named collection of photos scoped for clustering
///
/// Identity is assigned by the backend. The client never edits or deletes
/// an album once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Album {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            created_at: None,
        }
    }
}

/// Request body for `POST /albums`
///
/// The name is forwarded as-is; an empty string is not rejected client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumCreate {
    pub name: String,
}

/// Response body for `GET /albums/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlbumSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<Album>,
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub clusters: Vec<Cluster>,
}

// ========================================
// Photos
// ========================================

/// Request body for `POST /albums/{id}/photos`
///
/// Exists only as a payload; the client does not track uploaded photos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoUpload {
    pub filename: String,
    pub embedding: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, String>>,
}

impl PhotoUpload {
    pub fn new(filename: impl Into<String>, embedding: Vec<f64>) -> Self {
        Self {
            filename: filename.into(),
            embedding,
            metadata: None,
        }
    }
}

/// Photo record as returned inside an album summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: String,
    #[serde(default)]
    pub album_id: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub embedding: Vec<f64>,
    #[serde(default)]
    pub metadata: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}

// ========================================
// Clusters
// ========================================

/// Backend-computed grouping of photo ids believed to show the same subject
///
/// Read-only for the client and replaced wholesale on every fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub id: String,
    pub photo_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub centroid: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Cluster {
    pub fn new(id: impl Into<String>, photo_ids: Vec<String>) -> Self {
        Self {
            id: id.into(),
            photo_ids,
            album_id: None,
            centroid: Vec::new(),
            created_at: None,
        }
    }
}

// ========================================
// Share Bundles
// ========================================

/// Request body for `POST /share`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareBundleRequest {
    pub album_id: String,
    pub cluster_ids: Vec<String>,
    pub recipients: Vec<String>,
}

/// Download link granted to recipients for a set of clusters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareBundle {
    pub id: String,
    pub album_id: String,
    pub cluster_ids: Vec<String>,
    pub recipients: Vec<String>,
    pub download_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}
