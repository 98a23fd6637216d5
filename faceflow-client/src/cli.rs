//! Command-line interface for the `faceflow` binary
//!
//! One-shot commands mount a fresh session, perform a single action, and
//! print the resulting view. `session` hands stdin/stdout to the
//! interactive loop instead.

use clap::{Parser, Subcommand};
use faceflow_common::config::ConfigOverrides;
use std::path::PathBuf;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufReader};

use crate::api::FaceflowApi;
use crate::render::{AlbumListView, ClusterListView, PageView, ShareBundleView};
use crate::repl::{parse_key_value, run_interactive};
use crate::session::{Session, LOAD_ALBUMS_FAILED_MESSAGE};

/// Shown when a share bundle lookup fails
pub const LOAD_BUNDLE_FAILED_MESSAGE: &str = "Failed to load share bundle";

/// Command-line arguments for faceflow
#[derive(Parser, Debug)]
#[command(name = "faceflow")]
#[command(about = "Client for the Faceflow face-grouping service")]
#[command(version)]
pub struct Cli {
    /// Backend base URL (overrides FACEFLOW_API_URL and the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            api_url: self.api_url.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

/// Top-level commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List albums
    Albums,

    /// Create an album and select it
    CreateAlbum {
        /// Album name (may be empty)
        name: String,
    },

    /// Upload a photo embedding to an album
    Upload {
        /// Album id
        #[arg(long)]
        album: String,

        /// Photo filename
        #[arg(long)]
        filename: String,

        /// Comma-separated embedding vector; non-numeric entries are dropped
        #[arg(long)]
        embedding: Option<String>,

        /// Metadata entry as key=value (repeatable)
        #[arg(long = "meta", value_parser = parse_key_value)]
        metadata: Vec<(String, String)>,
    },

    /// Show the clusters of an album
    Clusters {
        /// Album id
        #[arg(long)]
        album: String,
    },

    /// Run clustering for an album and show the result
    Cluster {
        /// Album id
        #[arg(long)]
        album: String,
    },

    /// Share clusters of an album with recipients
    Share {
        /// Album id
        #[arg(long)]
        album: String,

        /// Cluster id (repeatable); all clusters when omitted
        #[arg(long = "cluster")]
        clusters: Vec<String>,

        /// Recipient address (repeatable)
        #[arg(long = "recipient", required = true)]
        recipients: Vec<String>,
    },

    /// Show a share bundle
    Bundle {
        /// Share bundle id
        id: String,
    },

    /// Interactive session on stdin/stdout
    Session,
}

impl Command {
    /// Execute the command, writing the rendered view to `out`
    #[tracing::instrument(name = "Running command", level = "debug", skip(self, api, out))]
    pub async fn run<W>(&self, api: &dyn FaceflowApi, out: &mut W) -> std::io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        if let Command::Session = self {
            let stdin = BufReader::new(tokio::io::stdin());
            return run_interactive(api, stdin, out).await;
        }

        let text = self.render(api).await;
        out.write_all(text.as_bytes()).await?;
        out.flush().await
    }

    /// Execute a one-shot command and return the rendered text
    pub async fn render(&self, api: &dyn FaceflowApi) -> String {
        let mut session = Session::new();

        match self {
            Command::Albums => {
                session.refresh_albums(api).await;
                match session.error() {
                    Some(error) => format!("{}\n", error),
                    None => AlbumListView(&session).to_string(),
                }
            }
            Command::CreateAlbum { name } => {
                session.refresh_albums(api).await;
                session.set_album_name(name.clone());
                session.create_album(api).await;
                PageView(&session).to_string()
            }
            Command::Upload {
                album,
                filename,
                embedding,
                metadata,
            } => {
                if let Err(message) = open_album(&mut session, api, album).await {
                    return message;
                }
                let form = session.upload_form_mut();
                form.set_filename(filename.clone());
                if let Some(text) = embedding {
                    form.set_embedding_text(text.clone());
                }
                for (key, value) in metadata {
                    form.set_metadata(key.clone(), value.clone());
                }
                session.upload_photo(api).await;
                PageView(&session).to_string()
            }
            Command::Clusters { album } => match open_album(&mut session, api, album).await {
                Ok(()) => cluster_text(&session),
                Err(message) => message,
            },
            Command::Cluster { album } => {
                if let Err(message) = open_album(&mut session, api, album).await {
                    return message;
                }
                session.run_clustering(api).await;
                cluster_text(&session)
            }
            Command::Share {
                album,
                clusters,
                recipients,
            } => {
                if let Err(message) = open_album(&mut session, api, album).await {
                    return message;
                }
                session
                    .share(api, clusters.clone(), recipients.clone())
                    .await;
                cluster_text(&session)
            }
            Command::Bundle { id } => match api.get_share_bundle(id).await {
                Ok(bundle) => ShareBundleView(&bundle).to_string(),
                Err(_) => format!("{}\n", LOAD_BUNDLE_FAILED_MESSAGE),
            },
            Command::Session => String::new(),
        }
    }
}

/// Load albums, select `album_id`, and load its clusters
async fn open_album(
    session: &mut Session,
    api: &dyn FaceflowApi,
    album_id: &str,
) -> Result<(), String> {
    if !session.refresh_albums(api).await {
        return Err(format!("{}\n", LOAD_ALBUMS_FAILED_MESSAGE));
    }
    session
        .select_album(album_id)
        .map_err(|_| format!("Unknown album: {}\n", album_id))?;
    session.sync_views(api).await;
    Ok(())
}

fn cluster_text(session: &Session) -> String {
    session
        .cluster_view()
        .map(|view| ClusterListView(view).to_string())
        .unwrap_or_default()
}
