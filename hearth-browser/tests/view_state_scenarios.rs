//! End-to-end ordering scenarios for the ViewStateCoordinator
//!
//! Timing is driven by the stub service's delays on a paused clock, so the
//! completion order of the two loaders is deterministic.

use std::sync::Arc;
use std::time::Duration;

use hearth_browser::infra::BrowserConfig;
use hearth_browser::infra::services::BinaryResponse;
use hearth_browser::infra::testing::{
    StubApiService, StubReply, encode_test_image,
};
use hearth_browser::{
    BannerPhase, CatalogPhase, LoadError, TransportError, ViewSettings,
    ViewStateCoordinator,
};
use hearth_model::CardViewModel;
use image::ImageFormat;
use serde_json::json;

const CATALOG: &str = "library/1/media";
const BANNER: &str = "/static/banner.jpg";

fn settings() -> ViewSettings {
    ViewSettings::from(&BrowserConfig::default())
}

fn two_item_catalog() -> serde_json::Value {
    json!([
        {"id": 1, "poster_path": "/a.jpg"},
        {"id": 2, "poster_path": "/b.jpg"},
    ])
}

fn jpeg_banner() -> BinaryResponse {
    BinaryResponse::new(
        "image/jpeg",
        encode_test_image(ImageFormat::Jpeg, 16, 9).unwrap(),
    )
}

#[tokio::test(start_paused = true)]
async fn catalog_first_then_banner() {
    let service = StubApiService::default()
        .with_json(
            CATALOG,
            StubReply::ok(two_item_catalog()).after(Duration::from_millis(10)),
        )
        .with_binary(
            BANNER,
            StubReply::ok(jpeg_banner()).after(Duration::from_millis(510)),
        );
    let mut coordinator = ViewStateCoordinator::new(Arc::new(service), settings());
    coordinator.mount();

    assert!(coordinator.process_next().await);
    let intermediate = coordinator.snapshot();
    assert_eq!(
        intermediate.cards(),
        &[
            CardViewModel::new(1, "/a.jpg"),
            CardViewModel::new(2, "/b.jpg")
        ]
    );
    assert!(!intermediate.has_banner());
    assert_eq!(coordinator.banner_phase(), &BannerPhase::Pending);

    assert!(coordinator.process_next().await);
    let done = coordinator.current_state();
    assert_eq!(done.cards().len(), 2);
    assert_eq!(done.banner().map(|b| b.dimensions()), Some((16, 9)));
    assert!(coordinator.is_settled());
    assert!(!coordinator.process_next().await);
}

#[tokio::test(start_paused = true)]
async fn banner_fails_first_then_catalog_succeeds() {
    let service = StubApiService::default()
        .with_json(
            CATALOG,
            StubReply::ok(two_item_catalog()).after(Duration::from_millis(300)),
        )
        .with_binary(
            BANNER,
            StubReply::err(TransportError::Request("reset by peer".into()))
                .after(Duration::from_millis(20)),
        );
    let mut coordinator = ViewStateCoordinator::new(Arc::new(service), settings());
    coordinator.mount();

    assert!(coordinator.process_next().await);
    assert!(matches!(
        coordinator.banner_phase(),
        BannerPhase::Failed(LoadError::BannerUnavailable(_))
    ));
    assert!(coordinator.current_state().cards().is_empty());
    assert_eq!(coordinator.catalog_phase(), &CatalogPhase::Loading);

    coordinator.run_until_settled().await;
    let state = coordinator.current_state();
    assert_eq!(state.cards().len(), 2);
    assert!(!state.has_banner());
    assert!(coordinator.is_settled());
}

#[tokio::test(start_paused = true)]
async fn malformed_catalog_leaves_cards_empty() {
    let service = StubApiService::default()
        .with_json(
            CATALOG,
            StubReply::err(TransportError::Decode("trailing garbage".into())),
        )
        .with_binary(BANNER, StubReply::ok(jpeg_banner()));
    let mut coordinator = ViewStateCoordinator::new(Arc::new(service), settings());
    coordinator.mount();
    coordinator.run_until_settled().await;

    let state = coordinator.current_state();
    assert!(state.cards().is_empty());
    assert!(state.has_banner());
    assert!(matches!(
        coordinator.catalog_phase(),
        CatalogPhase::Failed(LoadError::CatalogUnavailable(_))
    ));
}

#[tokio::test(start_paused = true)]
async fn non_image_banner_renders_without_banner() {
    let service = StubApiService::default()
        .with_json(CATALOG, StubReply::ok(two_item_catalog()))
        .with_binary(
            BANNER,
            StubReply::ok(BinaryResponse::new("text/plain", b"hello".to_vec())),
        );
    let mut coordinator = ViewStateCoordinator::new(Arc::new(service), settings());
    coordinator.mount();
    coordinator.run_until_settled().await;

    assert!(!coordinator.current_state().has_banner());
    assert!(matches!(
        coordinator.banner_phase(),
        BannerPhase::Failed(LoadError::InvalidBannerFormat(_))
    ));
    assert_eq!(coordinator.banner_pool().total_allocated(), 0);
}

#[tokio::test(start_paused = true)]
async fn repeated_reads_are_identical() {
    let service = StubApiService::default()
        .with_json(CATALOG, StubReply::ok(two_item_catalog()))
        .with_binary(BANNER, StubReply::ok(jpeg_banner()));
    let mut coordinator = ViewStateCoordinator::new(Arc::new(service), settings());
    coordinator.mount();
    coordinator.run_until_settled().await;

    let first = coordinator.snapshot();
    let second = coordinator.snapshot();
    assert_eq!(first, second);
    assert_eq!(&first, coordinator.current_state());
    assert_eq!(
        first.banner().map(|b| b.id()),
        second.banner().map(|b| b.id())
    );
}

#[tokio::test(start_paused = true)]
async fn subscribers_see_each_applied_update() {
    let service = StubApiService::default()
        .with_json(
            CATALOG,
            StubReply::ok(two_item_catalog()).after(Duration::from_millis(5)),
        )
        .with_binary(
            BANNER,
            StubReply::ok(jpeg_banner()).after(Duration::from_millis(50)),
        );
    let mut coordinator = ViewStateCoordinator::new(Arc::new(service), settings());
    let mut updates = coordinator.subscribe();
    assert!(!updates.has_changed().unwrap());

    coordinator.mount();
    coordinator.process_next().await;
    assert!(updates.has_changed().unwrap());
    {
        let seen = updates.borrow_and_update();
        assert_eq!(seen.cards().len(), 2);
        assert!(!seen.has_banner());
    }

    coordinator.process_next().await;
    assert!(updates.has_changed().unwrap());
    assert!(updates.borrow_and_update().has_banner());
}

#[tokio::test]
async fn dropped_coordinator_releases_late_banner() {
    let service = StubApiService::default()
        .with_json(CATALOG, StubReply::ok(two_item_catalog()))
        .with_binary(
            BANNER,
            StubReply::ok(jpeg_banner()).after(Duration::from_millis(30)),
        );
    let mut coordinator =
        ViewStateCoordinator::new(Arc::new(service.clone()), settings());
    coordinator.mount();
    let pool = coordinator.banner_pool().clone();
    drop(coordinator);

    for _ in 0..200 {
        if pool.total_allocated() == 1 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    assert_eq!(pool.total_allocated(), 1);
    assert_eq!(pool.live_count(), 0);
    assert_eq!(service.call_count(BANNER), 1);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_coordinator_releases_its_banner() {
    let service = StubApiService::default()
        .with_json(CATALOG, StubReply::ok(two_item_catalog()))
        .with_binary(BANNER, StubReply::ok(jpeg_banner()));
    let mut coordinator = ViewStateCoordinator::new(Arc::new(service), settings());
    coordinator.mount();
    coordinator.run_until_settled().await;

    let pool = coordinator.banner_pool().clone();
    assert_eq!(pool.live_count(), 1);

    drop(coordinator);
    assert_eq!(pool.live_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn subscriber_outliving_the_coordinator_does_not_pin_banner() {
    let service = StubApiService::default()
        .with_json(CATALOG, StubReply::ok(two_item_catalog()))
        .with_binary(BANNER, StubReply::ok(jpeg_banner()));
    let mut coordinator = ViewStateCoordinator::new(Arc::new(service), settings());
    let mut updates = coordinator.subscribe();
    coordinator.mount();
    coordinator.run_until_settled().await;

    let pool = coordinator.banner_pool().clone();
    assert!(updates.borrow_and_update().has_banner());
    assert_eq!(pool.live_count(), 1);

    drop(coordinator);

    assert_eq!(pool.live_count(), 0);
    assert!(updates.has_changed().unwrap_or(true));
    let last = updates.borrow_and_update();
    assert!(!last.has_banner());
    assert!(last.cards().is_empty());
}
