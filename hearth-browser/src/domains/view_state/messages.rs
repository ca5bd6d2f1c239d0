use hearth_model::CardViewModel;

use crate::domains::banner::BannerHandle;
use crate::error::LoadError;

/// Completion of a loader, tagged with the generation it was started under
#[derive(Debug)]
pub enum LoadEvent {
    CatalogLoaded {
        generation: u64,
        result: Result<Vec<CardViewModel>, LoadError>,
    },
    BannerLoaded {
        generation: u64,
        result: Result<BannerHandle, LoadError>,
    },
}

impl LoadEvent {
    pub fn name(&self) -> &'static str {
        match self {
            LoadEvent::CatalogLoaded { .. } => "CatalogLoaded",
            LoadEvent::BannerLoaded { .. } => "BannerLoaded",
        }
    }
}
