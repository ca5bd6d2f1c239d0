//! Core data model definitions shared across Hearth crates.
#![allow(missing_docs)]

pub mod banner;
pub mod card;
pub mod ids;

pub use banner::BannerFormat;
pub use card::{CardViewModel, CatalogItem};
pub use ids::{CardId, LibraryId};
