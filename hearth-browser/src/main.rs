use std::sync::Arc;

use anyhow::Context;
use env_logger::{Builder, Target};
use hearth_browser::infra::{ApiClient, BrowserConfig};
use hearth_browser::{ViewSettings, ViewState, ViewStateCoordinator};
use log::LevelFilter;
use tokio::task::JoinHandle;

fn init_logger() {
    Builder::new()
        .target(Target::Stdout)
        .filter_level(LevelFilter::Warn)
        .filter_module("hearth_browser", LevelFilter::Debug)
        .init();
}

fn describe(state: &ViewState) -> String {
    match state.banner() {
        Some(banner) => format!(
            "{} cards, banner {}x{}",
            state.cards().len(),
            banner.width(),
            banner.height()
        ),
        None => format!("{} cards, no banner", state.cards().len()),
    }
}

/// Wait for the render task; returns whether it finished cleanly
async fn join_renderer(renderer: JoinHandle<()>) -> bool {
    match renderer.await {
        Ok(()) => true,
        Err(e) => {
            log::warn!("[Render] Render task ended abnormally: {}", e);
            false
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        init_logger();
    } else {
        env_logger::init();
    }

    let config = BrowserConfig::load();
    config.validate().context("invalid browser configuration")?;
    log::info!(
        "Browsing library {} on {}",
        config.library_id,
        config.server_url
    );

    let client =
        ApiClient::from_config(&config).context("failed to build HTTP client")?;
    let mut coordinator =
        ViewStateCoordinator::new(Arc::new(client), ViewSettings::from(&config));

    // Headless render boundary: log every published state
    let mut updates = coordinator.subscribe();
    let renderer = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let line = describe(&updates.borrow_and_update());
            log::info!("[Render] {}", line);
        }
    });

    coordinator.mount();
    coordinator.run_until_settled().await;

    let state = coordinator.snapshot();
    println!("{}", describe(&state));
    for card in state.cards() {
        println!("{}\t{}", card.id, card.image_path().unwrap_or("-"));
    }

    drop(coordinator);
    join_renderer(renderer).await;
    Ok(())
}
