//! faceflow-client library
//!
//! Client for the Faceflow face-grouping backend: an HTTP boundary plus the
//! album/session, upload form, and cluster view controllers that keep local
//! state in sync with the backend. The `faceflow` binary drives these
//! controllers from the command line or an interactive session.

pub mod api;
pub mod cli;
pub mod clusters;
pub mod embedding;
pub mod error;
pub mod events;
pub mod render;
pub mod repl;
pub mod session;
pub mod upload;

#[cfg(test)]
pub(crate) mod mock;

pub use crate::api::{FaceflowApi, HttpApi};
pub use crate::error::{FetchError, FetchResult};
pub use crate::session::Session;
