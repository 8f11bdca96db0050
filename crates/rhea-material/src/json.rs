//! JSON interchange for materials.
//!
//! ```json
//! {
//!   "id": "…",
//!   "name": "Water",
//!   "state": "liquid",
//!   "properties": [
//!     { "keyType": "var-temperature", "type": "prop-density",
//!       "table": [ { "key": 293.15, "value": 998.0 } ] }
//!   ]
//! }
//! ```
//!
//! Decoding is lenient. Missing fields take defaults, a missing or invalid id
//! is regenerated, and properties of unknown type are dropped.

use rhea_core::{RheaError, ValueTable, VariableKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

use crate::material::{Material, MaterialState};
use crate::property::MaterialProperty;
use crate::property_type::PropertyType;

#[derive(Debug, Serialize)]
struct MaterialDto {
    id: String,
    name: String,
    state: String,
    properties: Vec<PropertyDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PropertyDto {
    key_type: String,
    #[serde(rename = "type")]
    kind: String,
    table: Vec<SampleDto>,
}

/// Decoding view of a property; samples are decoded one by one.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PropertyFields {
    key_type: String,
    #[serde(rename = "type")]
    kind: String,
    table: Vec<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SampleDto {
    key: f64,
    value: f64,
}

fn parse_state(value: &Value) -> MaterialState {
    match value {
        Value::String(s) => MaterialState::from_id(s)
            .or_else(|| s.parse::<u8>().ok().and_then(MaterialState::from_tag))
            .unwrap_or_default(),
        Value::Number(n) => n
            .as_u64()
            .and_then(|n| u8::try_from(n).ok())
            .and_then(MaterialState::from_tag)
            .unwrap_or_default(),
        _ => MaterialState::None,
    }
}

fn parse_table(kind: PropertyType, samples: &[Value]) -> ValueTable {
    samples
        .iter()
        .filter_map(|sample| match SampleDto::deserialize(sample) {
            Ok(s) if !s.key.is_nan() => Some((s.key, s.value)),
            Ok(_) => {
                warn!(kind = %kind, "NaN sample key dropped");
                None
            }
            Err(e) => {
                warn!(kind = %kind, error = %e, "malformed sample dropped");
                None
            }
        })
        .collect()
}

fn parse_property(value: &Value) -> Option<MaterialProperty> {
    let fields = match PropertyFields::deserialize(value) {
        Ok(fields) => fields,
        Err(e) => {
            warn!(error = %e, "malformed property dropped");
            return None;
        }
    };
    let Some(kind) = PropertyType::from_id(&fields.kind) else {
        warn!(kind = %fields.kind, "unknown property type dropped");
        return None;
    };
    let key_kind = VariableKind::from_id(&fields.key_type).unwrap_or(VariableKind::Temperature);
    let table = parse_table(kind, &fields.table);
    Some(if table.is_empty() {
        MaterialProperty::new(kind)
    } else {
        MaterialProperty::from_parts(key_kind, kind, table)
    })
}

impl Material {
    /// JSON representation of this material.
    ///
    /// Non-finite sample keys or values are written as `null` and dropped
    /// again by [`from_json`](Self::from_json).
    pub fn to_json(&self) -> Value {
        let dto = MaterialDto {
            id: self.id().hyphenated().to_string(),
            name: self.name().to_string(),
            state: self.state().id().to_string(),
            properties: self
                .iter()
                .map(|p| PropertyDto {
                    key_type: p.key_kind().id().to_string(),
                    kind: p.kind().id().to_string(),
                    table: p
                        .table()
                        .iter()
                        .map(|(key, value)| SampleDto { key, value })
                        .collect(),
                })
                .collect(),
        };
        serde_json::to_value(dto).unwrap_or(Value::Null)
    }

    /// Build a material from its JSON representation.
    ///
    /// Every field is decoded on its own: a malformed field takes its
    /// default, and a malformed property or sample is dropped. Anything that
    /// is not a JSON object yields an empty material.
    pub fn from_json(value: &Value) -> Self {
        let mut material = Material::new();
        let Some(object) = value.as_object() else {
            warn!("material JSON is not an object, using defaults");
            return material;
        };

        if let Some(id) = object
            .get("id")
            .and_then(Value::as_str)
            .and_then(|s| Uuid::parse_str(s).ok())
        {
            material.set_id(id);
        }
        if let Some(name) = object.get("name").and_then(Value::as_str) {
            material.set_name(name);
        }
        if let Some(state) = object.get("state") {
            material.set_state(parse_state(state));
        }

        let properties = object.get("properties").and_then(Value::as_array);
        for property in properties.into_iter().flatten().filter_map(parse_property) {
            material.add(property);
        }
        material
    }

    /// Serialize to a pretty-printed JSON string.
    pub fn to_json_string(&self) -> String {
        serde_json::to_string_pretty(&self.to_json()).unwrap_or_default()
    }

    /// Parse a material from a JSON string.
    pub fn from_json_str(text: &str) -> Result<Self, RheaError> {
        let value: Value = serde_json::from_str(text).map_err(|e| RheaError::Application {
            message: format!("invalid material JSON: {e}"),
        })?;
        Ok(Self::from_json(&value))
    }
}
