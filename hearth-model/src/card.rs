use crate::ids::CardId;

/// One element of the catalog endpoint's JSON array.
///
/// Only `id` and `poster_path` are read; any other fields the server sends
/// (name, year, backdrop_path, ...) are ignored. Media without artwork
/// arrive with a null or absent `poster_path`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatalogItem {
    pub id: CardId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub poster_path: Option<String>,
}

/// Minimal data needed to render one media item in the recommendation grid.
///
/// `image_path` is `None` when the server has no poster for the item; the
/// grid still shows the card.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CardViewModel {
    pub id: CardId,
    pub image_path: Option<String>,
}

impl CardViewModel {
    pub fn new(id: impl Into<CardId>, image_path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            image_path: Some(image_path.into()),
        }
    }

    pub fn without_poster(id: impl Into<CardId>) -> Self {
        Self {
            id: id.into(),
            image_path: None,
        }
    }

    pub fn image_path(&self) -> Option<&str> {
        self.image_path.as_deref()
    }
}

impl From<CatalogItem> for CardViewModel {
    fn from(item: CatalogItem) -> Self {
        Self {
            id: item.id,
            image_path: item.poster_path,
        }
    }
}
