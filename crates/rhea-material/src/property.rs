//! A single material property: a typed, temperature-keyed value table.

use rhea_codec::{CodecError, Decoder, Encoder};
use rhea_core::{Insertion, ValueTable, VariableKind};

use crate::property_type::PropertyType;

/// A material property.
///
/// Owns its [`ValueTable`] privately; samples can only be added through
/// [`add`](Self::add), which keeps the table sorted and unique by key.
/// The key variable is temperature.
///
/// Two properties are equal when their key variable, type and table match.
/// Display name and units overrides do not take part in equality.
#[derive(Clone, Debug)]
pub struct MaterialProperty {
    key_kind: VariableKind,
    kind: PropertyType,
    name: String,
    units: String,
    table: ValueTable,
}

impl MaterialProperty {
    /// A property of type `kind` holding its single default sample.
    pub fn new(kind: PropertyType) -> Self {
        let mut property = Self {
            key_kind: VariableKind::Temperature,
            kind,
            name: String::new(),
            units: String::new(),
            table: ValueTable::new(),
        };
        property.set_type(kind);
        property
    }

    /// A property of type `kind` with the given samples instead of the
    /// default one.
    pub fn with_samples(kind: PropertyType, samples: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let mut property = Self::new(kind);
        property.table = samples.into_iter().collect();
        property
    }

    /// Variable of the table keys.
    pub fn key_kind(&self) -> VariableKind {
        self.key_kind
    }

    /// Property type.
    pub fn kind(&self) -> PropertyType {
        self.kind
    }

    /// Switch to type `kind`.
    ///
    /// Discards every sample: the table becomes exactly
    /// `(key initial value, kind initial value)`. Name and units reset to
    /// those of `kind`.
    pub fn set_type(&mut self, kind: PropertyType) {
        self.kind = kind;
        self.name = kind.name().to_string();
        self.units = kind.units().to_string();
        self.table = ValueTable::with_sample(self.key_kind.init_value(), kind.init_value());
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Override the display name (useful for custom properties).
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Units string.
    pub fn units(&self) -> &str {
        &self.units
    }

    /// Override the units string.
    pub fn set_units(&mut self, units: impl Into<String>) {
        self.units = units.into();
    }

    /// The sample table.
    pub fn table(&self) -> &ValueTable {
        &self.table
    }

    /// Insert a sample, replacing the value of an existing key.
    pub fn add(&mut self, key: f64, value: f64) -> Insertion {
        self.table.add(key, value)
    }

    /// Remove the sample at `position`. Panics if out of range.
    pub fn remove_sample(&mut self, position: usize) -> (f64, f64) {
        self.table.remove(position)
    }

    /// Remove every sample.
    pub fn clear_samples(&mut self) {
        self.table.clear();
    }

    /// Interpolated value at `key`, `None` if the table is empty.
    pub fn value_at(&self, key: f64) -> Option<f64> {
        self.table.interpolate(key)
    }

    pub(crate) fn from_parts(
        key_kind: VariableKind,
        kind: PropertyType,
        table: ValueTable,
    ) -> Self {
        Self {
            key_kind,
            kind,
            name: kind.name().to_string(),
            units: kind.units().to_string(),
            table,
        }
    }

    pub(crate) fn encode(&self, enc: &mut dyn Encoder) -> Result<(), CodecError> {
        enc.write_str(self.key_kind.id())?;
        enc.write_str(self.kind.id())?;
        enc.write_str(&self.name)?;
        enc.write_str(&self.units)?;
        enc.write_len(self.table.len())?;
        for (key, value) in self.table.iter() {
            enc.write_f64(key)?;
            enc.write_f64(value)?;
        }
        Ok(())
    }

    pub(crate) fn decode(dec: &mut dyn Decoder) -> Result<Self, CodecError> {
        let key_id = dec.read_str()?;
        let key_kind = VariableKind::from_id(&key_id)
            .ok_or_else(|| CodecError::Malformed {
                detail: format!("unknown variable '{key_id}'"),
            })?;
        let type_id = dec.read_str()?;
        let kind = PropertyType::from_id(&type_id).ok_or_else(|| CodecError::Malformed {
            detail: format!("unknown property type '{type_id}'"),
        })?;
        let name = dec.read_str()?;
        let units = dec.read_str()?;
        let n = dec.read_len()?;
        let mut table = ValueTable::new();
        for _ in 0..n {
            let key = dec.read_f64()?;
            let value = dec.read_f64()?;
            if key.is_nan() {
                return Err(CodecError::Malformed {
                    detail: format!("NaN key in '{type_id}' table"),
                });
            }
            table.add(key, value);
        }
        Ok(Self {
            key_kind,
            kind,
            name,
            units,
            table,
        })
    }
}

impl PartialEq for MaterialProperty {
    fn eq(&self, other: &Self) -> bool {
        self.key_kind == other.key_kind && self.kind == other.kind && self.table == other.table
    }
}
