pub mod bootstrap_models;
pub mod bootstrap_service;
pub mod config_source;

pub use bootstrap_models::{ModelSettings, RuntimeConfig};
pub use bootstrap_service::{BootstrapConfigurator, BootstrapError};
pub use config_source::ConfigSource;
