use crate::filter::NameFilter;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;

/// Type tags understood by the inspector ingestion API.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Null,
    String,
    Int,
    Float,
    Boolean,
    List,
    Object,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Null => "null",
            PropertyType::String => "string",
            PropertyType::Int => "int",
            PropertyType::Float => "float",
            PropertyType::Boolean => "boolean",
            PropertyType::List => "list",
            PropertyType::Object => "object",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a property value into its inspector type tag.
pub fn classify(value: &Value) -> PropertyType {
    match value {
        Value::Null => PropertyType::Null,
        Value::String(_) => PropertyType::String,
        Value::Number(number) => classify_number(number),
        Value::Bool(_) => PropertyType::Boolean,
        Value::Array(_) => PropertyType::List,
        Value::Object(_) => PropertyType::Object,
    }
}

// A number is a float only if its decimal rendering would contain a '.',
// so integral floats such as 3.0 are tagged as ints.
fn classify_number(number: &Number) -> PropertyType {
    if number.is_i64() || number.is_u64() {
        return PropertyType::Int;
    }

    match number.as_f64() {
        Some(value) if value.is_finite() && value.fract() == 0.0 => PropertyType::Int,
        _ => PropertyType::Float,
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventProperty {
    pub property_name: String,
    pub property_type: PropertyType,
}

impl EventProperty {
    pub fn new(property_name: impl Into<String>, value: &Value) -> Self {
        EventProperty {
            property_name: property_name.into(),
            property_type: classify(value),
        }
    }
}

/// Filter and classify every entry of a property map, keeping the map's order.
pub fn convert_properties(properties: &Map<String, Value>, filter: &NameFilter) -> Vec<EventProperty> {
    properties
        .iter()
        .filter(|(name, _)| filter.should_forward(name))
        .map(|(name, value)| EventProperty::new(name.as_str(), value))
        .collect()
}
