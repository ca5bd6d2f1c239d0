use std::sync::Arc;

use hearth_model::BannerFormat;
use image::ImageFormat;

use super::pool::{BannerHandle, BannerPool};
use crate::error::LoadError;
use crate::infra::services::api::ApiService;

/// Fetches, validates and decodes the home banner
#[derive(Debug, Clone)]
pub struct BannerLoader {
    service: Arc<dyn ApiService>,
    pool: BannerPool,
}

impl BannerLoader {
    pub fn new(service: Arc<dyn ApiService>, pool: BannerPool) -> Self {
        Self { service, pool }
    }

    pub fn pool(&self) -> &BannerPool {
        &self.pool
    }

    pub async fn fetch_banner(
        &self,
        path: &str,
    ) -> Result<BannerHandle, LoadError> {
        let response = self
            .service
            .get_binary(path)
            .await
            .map_err(|e| LoadError::BannerUnavailable(e.to_string()))?;

        let format = validate_content_type(response.content_type.as_deref())?;
        let bytes = response.bytes;
        log::debug!("Decoding {} banner ({} bytes)", format, bytes.len());

        // Decoding is CPU bound; keep it off the executor thread
        let decoded = tokio::task::spawn_blocking(move || {
            image::load_from_memory_with_format(&bytes, image_format(format))
                .map(|img| img.to_rgba8())
        })
        .await
        .map_err(|e| LoadError::BannerUnavailable(e.to_string()))?
        .map_err(|e| LoadError::InvalidBannerFormat(e.to_string()))?;

        let (width, height) = decoded.dimensions();
        Ok(self.pool.allocate(width, height, decoded.into_raw()))
    }
}

/// Accept only declared image types we can decode
pub fn validate_content_type(
    content_type: Option<&str>,
) -> Result<BannerFormat, LoadError> {
    let Some(value) = content_type else {
        return Err(LoadError::InvalidBannerFormat(
            "missing content-type".to_string(),
        ));
    };
    BannerFormat::from_content_type(value).ok_or_else(|| {
        LoadError::InvalidBannerFormat(format!(
            "expected an image content-type, got {value:?}"
        ))
    })
}

fn image_format(format: BannerFormat) -> ImageFormat {
    match format {
        BannerFormat::Jpeg => ImageFormat::Jpeg,
        BannerFormat::Png => ImageFormat::Png,
        BannerFormat::Webp => ImageFormat::WebP,
        BannerFormat::Gif => ImageFormat::Gif,
        BannerFormat::Bmp => ImageFormat::Bmp,
    }
}
