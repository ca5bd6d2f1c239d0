//! Render state of the home view and the coordinator that owns it

pub mod coordinator;
pub mod messages;
pub mod state;

pub use coordinator::{ViewSettings, ViewStateCoordinator};
pub use messages::LoadEvent;
pub use state::{BannerPhase, CatalogPhase, ViewState};
