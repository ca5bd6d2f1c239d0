//! Test doubles for the browser core
//!
//! Scripted [`ApiService`](crate::infra::services::api::ApiService)
//! implementations and image fixtures shared by unit and integration tests.

pub mod fixtures;
pub mod stubs;

pub use fixtures::{encode_test_image, sample_catalog_json};
pub use stubs::{StubApiService, StubReply};
