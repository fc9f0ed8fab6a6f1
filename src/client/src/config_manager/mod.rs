mod config;

pub use self::config::{Config, ConfigLoader, CONFIG_PATH_ENV};
