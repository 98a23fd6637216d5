//! Plain-text rendering of the session views
//!
//! Each wrapper borrows controller state and implements `Display`, so a view
//! is rendered with `to_string()` or written straight to a formatter.

use faceflow_common::models::ShareBundle;
use std::fmt;

use crate::clusters::{ClusterView, EMPTY_MESSAGE};
use crate::session::Session;
use crate::upload::UploadForm;

/// Shown in place of the album panels when nothing is selected
pub const SELECT_ALBUM_PLACEHOLDER: &str = "Select or create an album to get started.";

/// Shown in the album list when the backend has no albums
pub const NO_ALBUMS_MESSAGE: &str = "No albums yet.";

const TITLE: &str = "Faceflow Demo";
const TAGLINE: &str = "Create albums, upload embeddings and cluster faces.";

/// Whole page: header, album form, album list, and the active album panels
pub struct PageView<'a>(pub &'a Session);

impl fmt::Display for PageView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = self.0;

        writeln!(f, "{}", TITLE)?;
        writeln!(f, "{}", TAGLINE)?;
        writeln!(f)?;
        writeln!(f, "Album name: {}", session.album_name())?;
        if let Some(error) = session.error() {
            writeln!(f, "! {}", error)?;
        }
        writeln!(f)?;
        write!(f, "{}", AlbumListView(session))?;
        writeln!(f)?;

        match session.cluster_view() {
            Some(view) => {
                write!(f, "{}", UploadFormView(session.upload_form()))?;
                writeln!(f)?;
                write!(f, "{}", ClusterListView(view))
            }
            None => writeln!(f, "{}", SELECT_ALBUM_PLACEHOLDER),
        }
    }
}

/// Album list with the active album marked `*`
pub struct AlbumListView<'a>(pub &'a Session);

impl fmt::Display for AlbumListView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = self.0;

        writeln!(f, "Albums")?;
        if session.albums().is_empty() {
            return writeln!(f, "  {}", NO_ALBUMS_MESSAGE);
        }
        for album in session.albums() {
            let marker = if session.active_album_id() == Some(album.id.as_str()) {
                '*'
            } else {
                ' '
            };
            writeln!(f, "  {} {} ({})", marker, album.name, album.id)?;
        }
        Ok(())
    }
}

/// Upload form fields and status line
pub struct UploadFormView<'a>(pub &'a UploadForm);

impl fmt::Display for UploadFormView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let form = self.0;

        writeln!(f, "Upload photo")?;
        writeln!(f, "  Filename: {}", form.filename())?;
        writeln!(f, "  Embedding: {}", form.embedding_text())?;
        for (key, value) in form.metadata() {
            writeln!(f, "  Metadata: {}={}", key, value)?;
        }
        if let Some(message) = form.status().message() {
            writeln!(f, "  Status: {}", message)?;
        }
        Ok(())
    }
}

/// Cluster list with photo ids joined by `", "`
pub struct ClusterListView<'a>(pub &'a ClusterView);

impl fmt::Display for ClusterListView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.0;

        writeln!(f, "Clusters")?;
        if let Some(error) = view.error() {
            writeln!(f, "  ! {}", error)?;
        }
        for cluster in view.clusters() {
            writeln!(f, "  - {}", cluster.id)?;
            writeln!(f, "    Photos: {}", cluster.photo_ids.join(", "))?;
        }
        if view.shows_empty_placeholder() {
            writeln!(f, "  {}", EMPTY_MESSAGE)?;
        }
        if let Some(bundle) = view.share_bundle() {
            write!(f, "{}", ShareBundleView(bundle))?;
        }
        Ok(())
    }
}

/// One share bundle
pub struct ShareBundleView<'a>(pub &'a ShareBundle);

impl fmt::Display for ShareBundleView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bundle = self.0;
        writeln!(f, "Share bundle {}: {}", bundle.id, bundle.download_url)?;
        writeln!(f, "  Clusters: {}", bundle.cluster_ids.join(", "))?;
        writeln!(f, "  Recipients: {}", bundle.recipients.join(", "))
    }
}
