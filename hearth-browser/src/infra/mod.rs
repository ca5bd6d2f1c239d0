pub mod api_client;
pub mod config;
pub mod services;
pub mod testing;

pub use api_client::ApiClient;
pub use config::{BrowserConfig, ConfigError};
