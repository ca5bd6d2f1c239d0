//! Banner image loading
//!
//! [`BannerLoader`] fetches the banner, checks the declared content type,
//! decodes the payload off the async executor and hands out a
//! [`BannerHandle`] allocated from a [`BannerPool`].

mod loader;
mod pool;

pub use loader::{BannerLoader, validate_content_type};
pub use pool::{BannerHandle, BannerId, BannerPool};
