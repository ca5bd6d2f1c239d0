//! ViewStateCoordinator - owns the home view's render state
//!
//! Both loaders run as independent tasks and report back through an
//! unbounded channel. The coordinator applies their results one at a time,
//! so state transitions are strictly sequential even though the loads
//! themselves overlap. After each applied update the new [`ViewState`] is
//! published on a watch channel for the render layer.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use super::messages::LoadEvent;
use super::state::{BannerPhase, CatalogPhase, ViewState};
use crate::domains::banner::{BannerLoader, BannerPool};
use crate::domains::catalog::CatalogFetcher;
use crate::infra::config::BrowserConfig;
use crate::infra::services::api::ApiService;

/// Where the coordinator loads from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSettings {
    /// Versioned API path of the catalog, e.g. `library/1/media`
    pub catalog_endpoint: String,
    /// Unversioned path of the banner asset
    pub banner_path: String,
}

impl From<&BrowserConfig> for ViewSettings {
    fn from(config: &BrowserConfig) -> Self {
        Self {
            catalog_endpoint: config.catalog_endpoint(),
            banner_path: config.banner_path.clone(),
        }
    }
}

#[derive(Debug)]
pub struct ViewStateCoordinator {
    settings: ViewSettings,
    catalog: CatalogFetcher,
    banner: BannerLoader,
    state: ViewState,
    catalog_phase: CatalogPhase,
    banner_phase: BannerPhase,
    catalog_generation: u64,
    banner_generation: u64,
    events_tx: mpsc::UnboundedSender<LoadEvent>,
    events_rx: mpsc::UnboundedReceiver<LoadEvent>,
    publisher: watch::Sender<ViewState>,
}

impl ViewStateCoordinator {
    /// Create the coordinator and start loading the catalog.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(service: Arc<dyn ApiService>, settings: ViewSettings) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (publisher, _) = watch::channel(ViewState::default());

        let mut coordinator = Self {
            settings,
            catalog: CatalogFetcher::new(Arc::clone(&service)),
            banner: BannerLoader::new(service, BannerPool::new()),
            state: ViewState::default(),
            catalog_phase: CatalogPhase::Loading,
            banner_phase: BannerPhase::AwaitingMount,
            catalog_generation: 0,
            banner_generation: 0,
            events_tx,
            events_rx,
            publisher,
        };
        coordinator.start_catalog_load();
        coordinator
    }

    /// The view is attached; start loading the banner.
    ///
    /// Only the first call has an effect.
    pub fn mount(&mut self) {
        if self.banner_phase != BannerPhase::AwaitingMount {
            log::debug!(
                "[Coordinator] Ignoring mount, banner already {:?}",
                self.banner_phase
            );
            return;
        }
        self.start_banner_load();
    }

    pub fn current_state(&self) -> &ViewState {
        &self.state
    }

    pub fn snapshot(&self) -> ViewState {
        self.state.clone()
    }

    /// Receiver that observes every published state
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.publisher.subscribe()
    }

    pub fn catalog_phase(&self) -> &CatalogPhase {
        &self.catalog_phase
    }

    pub fn banner_phase(&self) -> &BannerPhase {
        &self.banner_phase
    }

    /// Pool the banner handles are allocated from
    pub fn banner_pool(&self) -> &BannerPool {
        self.banner.pool()
    }

    pub fn settings(&self) -> &ViewSettings {
        &self.settings
    }

    /// Both loaders have resolved, successfully or not
    pub fn is_settled(&self) -> bool {
        self.catalog_phase.is_resolved() && self.banner_phase.is_resolved()
    }

    pub fn has_pending_loads(&self) -> bool {
        self.catalog_phase == CatalogPhase::Loading
            || self.banner_phase == BannerPhase::Pending
    }

    /// Wait for the next loader result and apply it.
    ///
    /// Returns `false` without waiting when nothing is in flight.
    pub async fn process_next(&mut self) -> bool {
        if !self.has_pending_loads() {
            return false;
        }
        match self.events_rx.recv().await {
            Some(event) => {
                self.apply(event);
                true
            }
            None => false,
        }
    }

    /// Apply loader results until no started load is outstanding
    pub async fn run_until_settled(&mut self) {
        while self.process_next().await {}
    }

    fn start_catalog_load(&mut self) {
        self.catalog_generation += 1;
        self.catalog_phase = CatalogPhase::Loading;

        let generation = self.catalog_generation;
        let fetcher = self.catalog.clone();
        let endpoint = self.settings.catalog_endpoint.clone();
        let tx = self.events_tx.clone();

        log::debug!("[Coordinator] Loading catalog from {}", endpoint);
        tokio::spawn(async move {
            let result = fetcher.fetch_catalog(&endpoint).await;
            if tx
                .send(LoadEvent::CatalogLoaded { generation, result })
                .is_err()
            {
                log::debug!(
                    "[Coordinator] Discarding catalog result, view is gone"
                );
            }
        });
    }

    fn start_banner_load(&mut self) {
        self.banner_generation += 1;
        self.banner_phase = BannerPhase::Pending;

        let generation = self.banner_generation;
        let loader = self.banner.clone();
        let path = self.settings.banner_path.clone();
        let tx = self.events_tx.clone();

        log::debug!("[Coordinator] Loading banner from {}", path);
        tokio::spawn(async move {
            let result = loader.fetch_banner(&path).await;
            // A failed send hands the event back; dropping it releases
            // any banner it carried.
            if tx
                .send(LoadEvent::BannerLoaded { generation, result })
                .is_err()
            {
                log::debug!(
                    "[Coordinator] Discarding banner result, view is gone"
                );
            }
        });
    }

    /// Apply one loader result. Returns whether it was current.
    fn apply(&mut self, event: LoadEvent) -> bool {
        log::trace!("[Coordinator] Applying {}", event.name());
        match event {
            LoadEvent::CatalogLoaded { generation, result } => {
                if generation != self.catalog_generation
                    || self.catalog_phase != CatalogPhase::Loading
                {
                    log::debug!(
                        "[Coordinator] Dropping stale catalog result (gen {})",
                        generation
                    );
                    return false;
                }
                match result {
                    Ok(cards) => {
                        log::info!(
                            "[Coordinator] Catalog loaded with {} cards",
                            cards.len()
                        );
                        self.state.cards = cards;
                        self.catalog_phase = CatalogPhase::Loaded;
                    }
                    Err(err) => {
                        log::warn!("[Coordinator] {}", err);
                        self.catalog_phase = CatalogPhase::Failed(err);
                    }
                }
            }
            LoadEvent::BannerLoaded { generation, result } => {
                if generation != self.banner_generation
                    || self.banner_phase != BannerPhase::Pending
                {
                    log::debug!(
                        "[Coordinator] Dropping stale banner result (gen {})",
                        generation
                    );
                    return false;
                }
                match result {
                    Ok(handle) => {
                        log::info!(
                            "[Coordinator] Banner loaded: {} {}x{}",
                            handle.id(),
                            handle.width(),
                            handle.height()
                        );
                        // Replacing drops the superseded handle
                        self.state.banner = Some(handle);
                        self.banner_phase = BannerPhase::Loaded;
                    }
                    Err(err) => {
                        log::warn!("[Coordinator] {}", err);
                        self.banner_phase = BannerPhase::Failed(err);
                    }
                }
            }
        }

        self.publisher.send_replace(self.state.clone());
        true
    }
}

impl Drop for ViewStateCoordinator {
    fn drop(&mut self) {
        // Receivers may outlive us; clear the published banner so the
        // allocation does not stay pinned by the channel.
        self.state.banner = None;
        self.publisher.send_replace(ViewState::default());
    }
}
