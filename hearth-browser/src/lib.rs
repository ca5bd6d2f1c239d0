//! Hearth browser library
//!
//! This crate contains the asynchronous core behind the home view: fetching
//! the media catalog, loading the banner image, and merging both results
//! into a single render state that a UI layer reads.
//!
//! Notes
//! - The render layer only ever reads [`domains::view_state::ViewState`];
//!   all mutation goes through [`domains::view_state::ViewStateCoordinator`].
//! - The `hearth-browser` binary is a headless consumer of the same API.

pub mod domains;
pub mod error;
pub mod infra;

pub use domains::banner::{BannerHandle, BannerLoader, BannerPool};
pub use domains::catalog::CatalogFetcher;
pub use domains::view_state::{
    BannerPhase, CatalogPhase, ViewSettings, ViewState, ViewStateCoordinator,
};
pub use error::{LoadError, TransportError};
