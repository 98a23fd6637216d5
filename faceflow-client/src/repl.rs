//! Interactive session loop
//!
//! Reads one command per line, applies it to a `Session`, and re-renders
//! the page. Action failures are shown inline and never end the loop; only
//! I/O errors on the reader or writer do.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::api::FaceflowApi;
use crate::render::PageView;
use crate::session::Session;

const PROMPT: &str = "faceflow> ";

pub const HELP: &str = "Commands:
  albums                         reload the album list
  name <text>                    set the album name field
  create [name]                  create an album (uses the name field if omitted)
  select <album-id>              switch the active album
  filename <name>                set the upload filename
  embedding <v1, v2, ...>        set the embedding text
  meta <key>=<value>             attach metadata to uploads
  meta clear                     stop sending metadata
  upload                         upload a photo to the active album
  refresh                        reload clusters for the active album
  cluster                        run clustering for the active album
  share <to>[,<to>...] [id ...]  share clusters (all displayed if no ids)
  show                           render the page
  help                           show this help
  quit                           leave the session";

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Albums,
    Name(String),
    Create(Option<String>),
    Select(String),
    Filename(String),
    Embedding(String),
    Meta { key: String, value: String },
    ClearMeta,
    Upload,
    Refresh,
    Cluster,
    Share { recipients: Vec<String>, cluster_ids: Vec<String> },
    Show,
    Help,
    Quit,
}

/// What the loop should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Render,
    Message(String),
    Quit,
}

/// Parse a line; blank lines yield `Ok(None)`
pub fn parse_line(line: &str) -> Result<Option<ReplCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "albums" => ReplCommand::Albums,
        "name" => ReplCommand::Name(rest.to_string()),
        "create" => ReplCommand::Create((!rest.is_empty()).then(|| rest.to_string())),
        "select" => ReplCommand::Select(required(word, rest)?),
        "filename" => ReplCommand::Filename(required(word, rest)?),
        "embedding" => ReplCommand::Embedding(rest.to_string()),
        "meta" if rest == "clear" => ReplCommand::ClearMeta,
        "meta" => {
            let (key, value) = parse_key_value(&required(word, rest)?)?;
            ReplCommand::Meta { key, value }
        }
        "upload" => ReplCommand::Upload,
        "refresh" => ReplCommand::Refresh,
        "cluster" => ReplCommand::Cluster,
        "share" => {
            let mut parts = rest.split_whitespace();
            let recipients: Vec<String> = parts
                .next()
                .map(|r| {
                    r.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default();
            if recipients.is_empty() {
                return Err("share needs at least one recipient".to_string());
            }
            ReplCommand::Share {
                recipients,
                cluster_ids: parts.map(String::from).collect(),
            }
        }
        "show" => ReplCommand::Show,
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" => ReplCommand::Quit,
        other => return Err(format!("Unknown command: {} (try `help`)", other)),
    };

    Ok(Some(command))
}

fn required(word: &str, rest: &str) -> Result<String, String> {
    if rest.is_empty() {
        Err(format!("{} needs an argument", word))
    } else {
        Ok(rest.to_string())
    }
}

/// Split `key=value`; the key must be non-empty
pub fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected key=value, got {:?}", raw)),
    }
}

/// Apply one command to the session
pub async fn apply(session: &mut Session, api: &dyn FaceflowApi, command: ReplCommand) -> Outcome {
    debug!(?command, "Applying session command");

    match command {
        ReplCommand::Albums => {
            session.refresh_albums(api).await;
            session.sync_views(api).await;
        }
        ReplCommand::Name(name) => session.set_album_name(name),
        ReplCommand::Create(name) => {
            if let Some(name) = name {
                session.set_album_name(name);
            }
            session.create_album(api).await;
        }
        ReplCommand::Select(album_id) => {
            if session.select_album(&album_id).is_err() {
                return Outcome::Message(format!("Unknown album: {}", album_id));
            }
            session.sync_views(api).await;
        }
        ReplCommand::Filename(filename) => session.upload_form_mut().set_filename(filename),
        ReplCommand::Embedding(text) => session.upload_form_mut().set_embedding_text(text),
        ReplCommand::Meta { key, value } => session.upload_form_mut().set_metadata(key, value),
        ReplCommand::ClearMeta => session.upload_form_mut().clear_metadata(),
        ReplCommand::Upload => {
            if session.active_album_id().is_none() {
                return Outcome::Message("Select or create an album first.".to_string());
            }
            session.upload_photo(api).await;
        }
        ReplCommand::Refresh => session.refresh_clusters(api).await,
        ReplCommand::Cluster => session.run_clustering(api).await,
        ReplCommand::Share {
            recipients,
            cluster_ids,
        } => session.share(api, cluster_ids, recipients).await,
        ReplCommand::Show => {}
        ReplCommand::Help => return Outcome::Message(HELP.to_string()),
        ReplCommand::Quit => return Outcome::Quit,
    }

    Outcome::Render
}

/// Drive a session from `reader` until EOF or `quit`, writing pages to `writer`
pub async fn run_interactive<R, W>(
    api: &dyn FaceflowApi,
    reader: R,
    writer: &mut W,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut session = Session::new();
    session.mount(api).await;
    writer
        .write_all(PageView(&session).to_string().as_bytes())
        .await?;

    let mut lines = reader.lines();
    loop {
        writer.write_all(PROMPT.as_bytes()).await?;
        writer.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let outcome = match parse_line(&line) {
            Ok(Some(command)) => apply(&mut session, api, command).await,
            Ok(None) => continue,
            Err(message) => Outcome::Message(message),
        };

        let text = match outcome {
            Outcome::Render => PageView(&session).to_string(),
            Outcome::Message(message) => format!("{}\n", message),
            Outcome::Quit => break,
        };
        writer.write_all(b"\n").await?;
        writer.write_all(text.as_bytes()).await?;
    }

    writer.write_all(b"\n").await?;
    writer.flush().await
}
