use crate::constants::RESERVED_PREFIX;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An analytics event as handed over by the host pipeline.
///
/// The host owns the event; the forwarder only reads it. `properties` keeps the
/// host's key order so the outgoing property list can follow it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct IncomingEvent {
    #[serde(alias = "name")]
    pub event: String,
    pub uuid: String,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

impl IncomingEvent {
    pub fn new(event: impl Into<String>, uuid: impl Into<String>) -> Self {
        IncomingEvent {
            event: event.into(),
            uuid: uuid.into(),
            properties: None,
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.event
    }

    pub fn is_internal(&self) -> bool {
        is_reserved(&self.event)
    }
}

/// True for platform-generated names such as `$pageview` or `$browser`.
pub fn is_reserved(name: &str) -> bool {
    name.starts_with(RESERVED_PREFIX)
}
