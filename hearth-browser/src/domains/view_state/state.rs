use hearth_model::CardViewModel;

use crate::domains::banner::BannerHandle;
use crate::error::LoadError;

/// What the render layer draws: the card grid and the optional banner.
///
/// `cards` is either empty or the complete result of the latest successful
/// catalog load. `banner` is absent until a banner load succeeds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub(crate) cards: Vec<CardViewModel>,
    pub(crate) banner: Option<BannerHandle>,
}

impl ViewState {
    pub fn cards(&self) -> &[CardViewModel] {
        &self.cards
    }

    pub fn banner(&self) -> Option<&BannerHandle> {
        self.banner.as_ref()
    }

    pub fn has_banner(&self) -> bool {
        self.banner.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogPhase {
    Loading,
    Loaded,
    Failed(LoadError),
}

impl CatalogPhase {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, CatalogPhase::Loading)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BannerPhase {
    /// The view has not been mounted yet
    AwaitingMount,
    Pending,
    Loaded,
    Failed(LoadError),
}

impl BannerPhase {
    pub fn is_resolved(&self) -> bool {
        matches!(self, BannerPhase::Loaded | BannerPhase::Failed(_))
    }
}
