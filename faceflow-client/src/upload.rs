//! Upload form controller
//!
//! State machine: `Idle -> Uploading -> {Uploaded, Failed}`.
//!
//! The form turns free text into a `PhotoUpload` payload. On success only
//! the filename is cleared. The embedding text stays so the same vector can
//! be reused for several uploads. On failure nothing is cleared.

use faceflow_common::models::PhotoUpload;
use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::api::FaceflowApi;
use crate::embedding::parse_embedding;
use crate::events::SessionEvent;

/// Initial contents of the embedding field
pub const DEFAULT_EMBEDDING_TEXT: &str = "0.9, 0.1, 0.2";

/// Form status shown next to the submit control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    Idle,
    Uploading,
    Uploaded,
    Failed,
}

impl UploadStatus {
    /// Status line text; `None` while idle
    pub fn message(&self) -> Option<&'static str> {
        match self {
            UploadStatus::Idle => None,
            UploadStatus::Uploading => Some("Uploading..."),
            UploadStatus::Uploaded => Some("Uploaded"),
            UploadStatus::Failed => Some("Upload failed"),
        }
    }
}

/// Upload form fields and status
#[derive(Debug, Clone)]
pub struct UploadForm {
    filename: String,
    embedding: String,
    metadata: BTreeMap<String, String>,
    status: UploadStatus,
}

impl Default for UploadForm {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadForm {
    pub fn new() -> Self {
        Self {
            filename: String::new(),
            embedding: DEFAULT_EMBEDDING_TEXT.to_string(),
            metadata: BTreeMap::new(),
            status: UploadStatus::Idle,
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn set_filename(&mut self, filename: impl Into<String>) {
        self.filename = filename.into();
    }

    pub fn embedding_text(&self) -> &str {
        &self.embedding
    }

    pub fn set_embedding_text(&mut self, text: impl Into<String>) {
        self.embedding = text.into();
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    /// Attach a metadata entry sent with every subsequent upload
    pub fn set_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.metadata.insert(key.into(), value.into());
    }

    pub fn clear_metadata(&mut self) {
        self.metadata.clear();
    }

    pub fn status(&self) -> UploadStatus {
        self.status
    }

    /// Build the request payload from the current field values
    pub fn payload(&self) -> PhotoUpload {
        let mut upload = PhotoUpload::new(
            self.filename.clone(),
            parse_embedding(&self.embedding).values,
        );
        if !self.metadata.is_empty() {
            upload.metadata = Some(self.metadata.clone());
        }
        upload
    }

    /// Submit the form for `album_id`
    ///
    /// Returns the event the parent must apply on success; `None` on failure.
    pub async fn submit(&mut self, api: &dyn FaceflowApi, album_id: &str) -> Option<SessionEvent> {
        self.status = UploadStatus::Uploading;
        let upload = self.payload();

        match api.upload_photo(album_id, &upload).await {
            Ok(()) => {
                info!(album_id, filename = %upload.filename, "Photo uploaded");
                self.filename.clear();
                self.status = UploadStatus::Uploaded;
                Some(SessionEvent::PhotoUploaded {
                    album_id: album_id.to_string(),
                    filename: upload.filename,
                })
            }
            Err(e) => {
                warn!(album_id, filename = %upload.filename, error = %e, "Photo upload failed");
                self.status = UploadStatus::Failed;
                None
            }
        }
    }
}
