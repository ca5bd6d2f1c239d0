//! Catalog loading
//!
//! Fetches the media list for one library and maps each entry into a
//! [`CardViewModel`], preserving the server's order.

use std::collections::HashSet;
use std::sync::Arc;

use hearth_model::{CardViewModel, CatalogItem, LibraryId};

use crate::error::LoadError;
use crate::infra::services::api::ApiService;

/// API path of a library's media list, relative to the versioned root
pub fn catalog_endpoint(library_id: LibraryId) -> String {
    format!("library/{}/media", library_id)
}

#[derive(Debug, Clone)]
pub struct CatalogFetcher {
    service: Arc<dyn ApiService>,
}

impl CatalogFetcher {
    pub fn new(service: Arc<dyn ApiService>) -> Self {
        Self { service }
    }

    /// Request the catalog and map it into cards.
    ///
    /// Any transport or shape failure is reported as
    /// [`LoadError::CatalogUnavailable`]; a response is accepted whole or
    /// not at all.
    pub async fn fetch_catalog(
        &self,
        endpoint: &str,
    ) -> Result<Vec<CardViewModel>, LoadError> {
        let body = self
            .service
            .get_json_value(endpoint)
            .await
            .map_err(|e| LoadError::CatalogUnavailable(e.to_string()))?;

        let cards = cards_from_json(body)?;
        log::debug!("Catalog {} returned {} cards", endpoint, cards.len());
        Ok(cards)
    }
}

/// Map a catalog response body into cards
pub fn cards_from_json(
    body: serde_json::Value,
) -> Result<Vec<CardViewModel>, LoadError> {
    let items: Vec<CatalogItem> = serde_json::from_value(body)
        .map_err(|e| LoadError::CatalogUnavailable(e.to_string()))?;

    let mut seen = HashSet::with_capacity(items.len());
    for item in &items {
        if !seen.insert(&item.id) {
            log::warn!("Catalog contains duplicate id {}", item.id);
        }
    }

    Ok(items.into_iter().map(CardViewModel::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_model::CardId;
    use serde_json::json;

    #[test]
    fn maps_items_in_order() {
        let cards = cards_from_json(json!([
            {"id": 2, "poster_path": "/b.jpg"},
            {"id": "x1", "poster_path": "/a.jpg", "year": 1999},
        ]))
        .unwrap();

        assert_eq!(
            cards,
            vec![
                CardViewModel::new(2, "/b.jpg"),
                CardViewModel::new(CardId::from("x1"), "/a.jpg"),
            ]
        );
    }

    #[test]
    fn empty_array_is_an_empty_catalog() {
        assert_eq!(cards_from_json(json!([])).unwrap(), vec![]);
    }

    #[test]
    fn non_array_body_is_unavailable() {
        let err = cards_from_json(json!({"items": []})).unwrap_err();
        assert!(matches!(err, LoadError::CatalogUnavailable(_)));
    }

    #[test]
    fn one_malformed_item_rejects_whole_response() {
        let err = cards_from_json(json!([
            {"id": 1, "poster_path": "/a.jpg"},
            {"poster_path": "/b.jpg"},
        ]))
        .unwrap_err();
        assert!(matches!(err, LoadError::CatalogUnavailable(_)));

        let err = cards_from_json(json!([
            {"id": 1, "poster_path": "/a.jpg"},
            {"id": [2], "poster_path": "/b.jpg"},
        ]))
        .unwrap_err();
        assert!(matches!(err, LoadError::CatalogUnavailable(_)));
    }

    #[test]
    fn item_without_poster_keeps_its_card() {
        let cards = cards_from_json(json!([
            {"id": 1, "poster_path": "/a.jpg"},
            {"id": 2, "poster_path": null},
        ]))
        .unwrap();
        assert_eq!(
            cards,
            vec![
                CardViewModel::new(1, "/a.jpg"),
                CardViewModel::without_poster(2)
            ]
        );
    }

    #[test]
    fn duplicate_ids_are_kept() {
        let cards = cards_from_json(json!([
            {"id": 1, "poster_path": "/a.jpg"},
            {"id": 1, "poster_path": "/b.jpg"},
        ]))
        .unwrap();
        assert_eq!(cards.len(), 2);
    }

    #[test]
    fn endpoint_format() {
        assert_eq!(catalog_endpoint(LibraryId(12)), "library/12/media");
    }
}
