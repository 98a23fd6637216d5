//! Test helper modules for faceflow-client integration tests
//!
//! - FakeBackend: in-memory album/photo/cluster/share server on a random port

#![allow(dead_code)]

pub mod fake_backend;

pub use fake_backend::FakeBackend;
