use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use config::{Config as RConfig, Environment, File, FileFormat};
use inspector_common::constants::{DEFAULT_APP_NAME, DEFAULT_ENVIRONMENT, INSPECTOR_ENDPOINT};
use inspector_common::filter::{parse_name_list, FilterConfig, NameFilter};
use inspector_common::payload::PayloadContext;
use serde::{Deserialize, Deserializer, Serialize};
use typed_builder::TypedBuilder;

/// Environment variable naming an optional TOML config file.
pub const CONFIG_PATH_ENV: &str = "AVO_INSPECTOR_CONFIG";
const ENV_PREFIX: &str = "AVO_INSPECTOR";

#[derive(Clone, Debug, Deserialize, Serialize, TypedBuilder)]
pub struct Config {
    #[builder(setter(into))]
    pub avo_api_key: String,
    #[builder(default = DEFAULT_APP_NAME.to_string(), setter(into))]
    pub app_name: String,
    #[builder(default = DEFAULT_ENVIRONMENT.to_string(), setter(into))]
    pub environment: String,

    #[serde(default, deserialize_with = "deserialize_name_list")]
    #[builder(default)]
    pub include_events: HashSet<String>,
    #[serde(default, deserialize_with = "deserialize_name_list")]
    #[builder(default)]
    pub exclude_events: HashSet<String>,
    #[serde(default, deserialize_with = "deserialize_name_list")]
    #[builder(default)]
    pub include_properties: HashSet<String>,
    #[serde(default, deserialize_with = "deserialize_name_list")]
    #[builder(default)]
    pub exclude_properties: HashSet<String>,

    #[builder(default = INSPECTOR_ENDPOINT.to_string(), setter(into))]
    pub endpoint: String,
}

impl Config {
    pub fn filters(&self) -> FilterConfig {
        FilterConfig {
            events: NameFilter {
                include: self.include_events.clone(),
                exclude: self.exclude_events.clone(),
            },
            properties: NameFilter {
                include: self.include_properties.clone(),
                exclude: self.exclude_properties.clone(),
            },
        }
    }

    pub fn payload_context(&self) -> PayloadContext {
        PayloadContext {
            api_key: self.avo_api_key.clone(),
            env: self.environment.clone(),
            app_name: self.app_name.clone(),
        }
    }
}

// Hosts hand lists over either as "a, b" strings or as arrays.
#[derive(Deserialize)]
#[serde(untagged)]
enum NameList {
    Joined(String),
    Split(Vec<String>),
}

fn deserialize_name_list<'de, D>(deserializer: D) -> Result<HashSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match NameList::deserialize(deserializer)? {
        NameList::Joined(raw) => parse_name_list(&raw),
        NameList::Split(names) => names.iter().flat_map(|name| parse_name_list(name)).collect(),
    })
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Defaults, then the file named by `AVO_INSPECTOR_CONFIG` (if set), then
    /// `AVO_INSPECTOR_*` environment variables.
    pub fn load_default_config() -> Result<Config> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.is_empty() => Self::load(Some(Path::new(&path))),
            _ => Self::load(None),
        }
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        Self::load(Some(path.as_ref()))
    }

    fn load(path: Option<&Path>) -> Result<Config> {
        let mut builder = RConfig::builder();

        // set defaults
        builder = builder
            .set_default("avo_api_key", "")?
            .set_default("app_name", DEFAULT_APP_NAME)?
            .set_default("environment", DEFAULT_ENVIRONMENT)?
            .set_default("endpoint", INSPECTOR_ENDPOINT)?
            .set_default::<&str, Vec<&str>>("include_events", vec![])?
            .set_default::<&str, Vec<&str>>("exclude_events", vec![])?
            .set_default::<&str, Vec<&str>>("include_properties", vec![])?
            .set_default::<&str, Vec<&str>>("exclude_properties", vec![])?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX));

        let config: Config = builder
            .build()
            .with_context(|| format!("failed to read config from {:?}", path))?
            .try_deserialize()
            .context("failed to parse config file")?;

        Ok(config)
    }
}
