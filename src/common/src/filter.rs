use crate::event::is_reserved;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Decide whether a single event or property name is forwarded.
///
/// Reserved names are always dropped. An empty include set means "everything",
/// and the exclude set wins over the include set.
pub fn should_forward(name: &str, include: &HashSet<String>, exclude: &HashSet<String>) -> bool {
    if is_reserved(name) {
        return false;
    }

    let is_included = include.is_empty() || include.contains(name);
    let is_excluded = exclude.contains(name);

    is_included && !is_excluded
}

/// Split a comma-separated list of names into a set, ignoring blanks.
pub fn parse_name_list(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// One include/exclude pair.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct NameFilter {
    #[serde(default)]
    pub include: HashSet<String>,
    #[serde(default)]
    pub exclude: HashSet<String>,
}

impl NameFilter {
    pub fn new<I, E, S, T>(include: I, exclude: E) -> Self
    where
        I: IntoIterator<Item = S>,
        E: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        NameFilter {
            include: include.into_iter().map(Into::into).collect(),
            exclude: exclude.into_iter().map(Into::into).collect(),
        }
    }

    pub fn should_forward(&self, name: &str) -> bool {
        should_forward(name, &self.include, &self.exclude)
    }
}

/// The filter sets loaded once at setup: one pair for event names, one for property names.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct FilterConfig {
    #[serde(default)]
    pub events: NameFilter,
    #[serde(default)]
    pub properties: NameFilter,
}

impl FilterConfig {
    pub fn forwards_event(&self, name: &str) -> bool {
        self.events.should_forward(name)
    }

    pub fn forwards_property(&self, name: &str) -> bool {
        self.properties.should_forward(name)
    }
}
