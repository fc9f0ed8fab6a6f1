pub mod config_manager;
pub mod exporters;
pub mod logging;

pub mod inspector_client;

pub use config_manager::{Config, ConfigLoader};
pub use inspector_client::{InspectorClient, Webhook};
