//! # Faceflow Common Library
//!
//! Shared code for the Faceflow client crates:
//! - Wire models for the face-grouping backend (albums, photos, clusters, share bundles)
//! - Configuration loading and resolution
//! - Common error type

pub mod config;
pub mod error;
pub mod models;

pub use error::{Error, Result};
