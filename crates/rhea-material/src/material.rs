//! Materials: a named, identified set of properties, at most one per type.

use std::fmt;
use std::ops::Deref;
use std::path::Path;

use rhea_codec::{read_file, write_record, CodecError, Decoder, Encoder, Encoding, Record};
use rhea_core::{DomainMask, FileKind, Insertion, RheaError, Version};
use uuid::Uuid;

use crate::property::MaterialProperty;
use crate::property_type::PropertyType;

/// First format version that records [`MaterialState`].
const STATE_SINCE: Version = Version::new(1, 1, 0);

/// Physical state of a material.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MaterialState {
    /// Unspecified.
    #[default]
    None,
    /// Gas.
    Gas,
    /// Liquid.
    Liquid,
    /// Solid.
    Solid,
}

impl MaterialState {
    /// Every state, in tag order.
    pub const ALL: [MaterialState; 4] = [
        MaterialState::None,
        MaterialState::Gas,
        MaterialState::Liquid,
        MaterialState::Solid,
    ];

    /// Stable lowercase identifier.
    pub fn id(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Gas => "gas",
            Self::Liquid => "liquid",
            Self::Solid => "solid",
        }
    }

    /// Look up a state by identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }

    /// Single-byte tag used by the codec.
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// State for a tag, if defined.
    pub fn from_tag(tag: u8) -> Option<Self> {
        Self::ALL.get(usize::from(tag)).copied()
    }
}

impl fmt::Display for MaterialState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A material.
///
/// Properties are kept sorted by [`PropertyType`] with at most one property
/// per type. The identifier is generated at creation and regenerated by
/// [`clear`](Self::clear); it also names the material's file.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    id: Uuid,
    name: String,
    state: MaterialState,
    properties: Vec<MaterialProperty>,
}

impl Default for Material {
    fn default() -> Self {
        Self::new()
    }
}

impl Material {
    /// An empty material with a fresh identifier.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            state: MaterialState::None,
            properties: Vec::new(),
        }
    }

    /// A material named "Default" holding one default property for every
    /// type except [`PropertyType::Custom`].
    pub fn generate_default() -> Self {
        let mut material = Self::new();
        material.set_name("Default");
        for kind in PropertyType::ALL {
            if kind != PropertyType::Custom {
                material.add(MaterialProperty::new(kind));
            }
        }
        material
    }

    /// Unique identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Replace the identifier.
    pub fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    /// Name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Physical state.
    pub fn state(&self) -> MaterialState {
        self.state
    }

    /// Set the physical state.
    pub fn set_state(&mut self, state: MaterialState) {
        self.state = state;
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Whether the material has no properties.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Properties in ascending type order.
    pub fn iter(&self) -> std::slice::Iter<'_, MaterialProperty> {
        self.properties.iter()
    }

    /// Add `property`, or replace the property of the same type in place.
    ///
    /// Replacing leaves the size and the order of other properties
    /// unchanged. Inserting grows the set by one and keeps it sorted by type.
    pub fn add(&mut self, property: MaterialProperty) -> Insertion {
        match self.find_position(property.kind()) {
            Some(pos) => {
                self.properties[pos] = property;
                Insertion::Replaced
            }
            None => {
                let pos = self
                    .properties
                    .partition_point(|p| p.kind() < property.kind());
                self.properties.insert(pos, property);
                Insertion::Inserted
            }
        }
    }

    /// Property at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position >= len()`.
    pub fn get(&self, position: usize) -> &MaterialProperty {
        assert!(
            position < self.properties.len(),
            "material property position {position} out of range (len {})",
            self.properties.len()
        );
        &self.properties[position]
    }

    /// Editor for the samples and display overrides of the property at
    /// `position`. Panics if out of range.
    ///
    /// The editor cannot change the property type; use [`add`](Self::add)
    /// to switch types.
    pub fn edit(&mut self, position: usize) -> PropertyEditor<'_> {
        PropertyEditor {
            property: self.get_mut(position),
        }
    }

    pub(crate) fn get_mut(&mut self, position: usize) -> &mut MaterialProperty {
        assert!(
            position < self.properties.len(),
            "material property position {position} out of range (len {})",
            self.properties.len()
        );
        &mut self.properties[position]
    }

    /// Remove and return the property at `position`. Panics if out of range.
    pub fn remove(&mut self, position: usize) -> MaterialProperty {
        assert!(
            position < self.properties.len(),
            "material property position {position} out of range (len {})",
            self.properties.len()
        );
        self.properties.remove(position)
    }

    /// Reset to an empty, unnamed material with a fresh identifier.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Position of the property of type `kind`.
    pub fn find_position(&self, kind: PropertyType) -> Option<usize> {
        self.properties.iter().position(|p| p.kind() == kind)
    }

    /// Property of type `kind`.
    pub fn find(&self, kind: PropertyType) -> Option<&MaterialProperty> {
        self.find_position(kind).map(|pos| &self.properties[pos])
    }

    /// Whether every type in `kinds` is present. False for an empty request.
    pub fn has_properties(&self, kinds: &[PropertyType]) -> bool {
        !kinds.is_empty() && kinds.iter().all(|&k| self.find_position(k).is_some())
    }

    /// Whether the material holds every property the domains in `mask`
    /// need.
    pub fn valid_for_domains(&self, mask: DomainMask) -> bool {
        self.has_properties(&PropertyType::required_for(mask))
    }

    /// Whether both materials hold equal properties, ignoring identity,
    /// name and state.
    pub fn properties_equal(&self, other: &Material) -> bool {
        self.properties == other.properties
    }

    /// Extension of material files in the given encoding.
    pub fn default_extension(binary: bool) -> &'static str {
        if binary {
            "rbmt"
        } else {
            "ramt"
        }
    }

    /// File name derived from the identifier, e.g. `<uuid>.rbmt`.
    pub fn file_name(&self, encoding: Encoding) -> String {
        format!(
            "{}.{}",
            self.id.hyphenated(),
            Self::default_extension(encoding == Encoding::Binary)
        )
    }

    /// Read a material file. The encoding follows the extension.
    pub fn read(path: &Path) -> Result<Self, RheaError> {
        read_file::<Self>(path).map(|(_, material)| material)
    }

    /// Write this material atomically. The encoding follows the extension.
    pub fn write(&self, path: &Path) -> Result<(), RheaError> {
        write_record(path, self)
    }
}

/// Mutable access to one property of a [`Material`] that keeps its type
/// fixed.
#[derive(Debug)]
pub struct PropertyEditor<'a> {
    property: &'a mut MaterialProperty,
}

impl PropertyEditor<'_> {
    /// Insert a sample, or replace the value at an existing key.
    pub fn add(&mut self, key: f64, value: f64) -> Insertion {
        self.property.add(key, value)
    }

    /// Remove and return the sample at `position`. Panics if out of range.
    pub fn remove_sample(&mut self, position: usize) -> (f64, f64) {
        self.property.remove_sample(position)
    }

    /// Remove every sample.
    pub fn clear_samples(&mut self) {
        self.property.clear_samples();
    }

    /// Override the display name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.property.set_name(name);
    }

    /// Override the units.
    pub fn set_units(&mut self, units: impl Into<String>) {
        self.property.set_units(units);
    }
}

impl Deref for PropertyEditor<'_> {
    type Target = MaterialProperty;

    fn deref(&self) -> &MaterialProperty {
        self.property
    }
}

impl<'a> IntoIterator for &'a Material {
    type Item = &'a MaterialProperty;
    type IntoIter = std::slice::Iter<'a, MaterialProperty>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Record for Material {
    const KIND: FileKind = FileKind::Material;

    fn encode(&self, enc: &mut dyn Encoder) -> Result<(), CodecError> {
        enc.write_str(&self.id.hyphenated().to_string())?;
        enc.write_str(&self.name)?;
        enc.write_u8(self.state.tag())?;
        enc.write_len(self.properties.len())?;
        for property in &self.properties {
            property.encode(enc)?;
        }
        Ok(())
    }

    fn decode(dec: &mut dyn Decoder, version: Version) -> Result<Self, CodecError> {
        let id_str = dec.read_str()?;
        let id = Uuid::parse_str(&id_str).map_err(|e| CodecError::Malformed {
            detail: format!("invalid material id '{id_str}': {e}"),
        })?;
        let name = dec.read_str()?;
        let state = if version >= STATE_SINCE {
            let tag = dec.read_u8()?;
            MaterialState::from_tag(tag).ok_or_else(|| CodecError::Malformed {
                detail: format!("invalid material state {tag}"),
            })?
        } else {
            MaterialState::None
        };
        let mut material = Material {
            id,
            name,
            state,
            properties: Vec::new(),
        };
        let n = dec.read_len()?;
        for _ in 0..n {
            material.add(MaterialProperty::decode(dec)?);
        }
        Ok(material)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rhea_codec::{decode_record, encode_record};
    use rhea_core::{Domain, FileHeader};

    fn density_only() -> Material {
        let mut m = Material::new();
        m.add(MaterialProperty::new(PropertyType::Density));
        m
    }

    #[test]
    fn add_inserts_sorted() {
        let mut m = Material::new();
        assert_eq!(
            m.add(MaterialProperty::new(PropertyType::ThermalConductivity)),
            Insertion::Inserted
        );
        assert_eq!(m.add(MaterialProperty::new(PropertyType::Density)), Insertion::Inserted);
        assert_eq!(m.add(MaterialProperty::new(PropertyType::Emissivity)), Insertion::Inserted);
        let kinds: Vec<_> = m.iter().map(MaterialProperty::kind).collect();
        assert_eq!(
            kinds,
            vec![PropertyType::Density, PropertyType::Emissivity, PropertyType::ThermalConductivity]
        );
    }

    #[test]
    fn add_replaces_in_place() {
        let mut m = Material::generate_default();
        let before: Vec<_> = m.iter().map(MaterialProperty::kind).collect();
        let mut p = MaterialProperty::new(PropertyType::HeatCapacity);
        p.add(400.0, 1.0);
        assert_eq!(m.add(p.clone()), Insertion::Replaced);
        let after: Vec<_> = m.iter().map(MaterialProperty::kind).collect();
        assert_eq!(before, after);
        assert_eq!(m.find(PropertyType::HeatCapacity), Some(&p));
    }

    #[test]
    fn editor_changes_samples_but_not_type() {
        let mut m = Material::new();
        m.add(MaterialProperty::new(PropertyType::Density));
        m.add(MaterialProperty::new(PropertyType::Emissivity));

        let mut e = m.edit(1);
        e.clear_samples();
        e.add(300.0, 0.4);
        e.set_units("-");
        assert_eq!(e.kind(), PropertyType::Emissivity);

        let kinds: Vec<_> = m.iter().map(MaterialProperty::kind).collect();
        assert_eq!(kinds, vec![PropertyType::Density, PropertyType::Emissivity]);
        assert_eq!(m.get(1).table().iter().collect::<Vec<_>>(), vec![(300.0, 0.4)]);
        assert_eq!(m.get(1).units(), "-");
    }

    #[test]
    fn find_position_absent_is_none() {
        let m = density_only();
        assert_eq!(m.find_position(PropertyType::Density), Some(0));
        assert_eq!(m.find_position(PropertyType::PoissonRatio), None);
    }

    #[test]
    fn has_properties_empty_request_is_false() {
        assert!(!density_only().has_properties(&[]));
        assert!(density_only().has_properties(&[PropertyType::Density]));
    }

    #[test]
    fn validity_for_domains() {
        let m = density_only();
        assert!(m.valid_for_domains(DomainMask::single(Domain::Wave)));
        assert!(!m.valid_for_domains(DomainMask::single(Domain::Fluid)));
        assert!(!m.valid_for_domains(DomainMask::single(Domain::Mesh)));
    }

    #[test]
    fn default_covers_all_but_custom() {
        let m = Material::generate_default();
        assert_eq!(m.name(), "Default");
        assert_eq!(m.len(), PropertyType::COUNT - 1);
        assert!(m.find(PropertyType::Custom).is_none());
        assert!(m.valid_for_domains(DomainMask::ALL));
    }

    #[test]
    fn clear_regenerates_id() {
        let mut m = Material::generate_default();
        let id = m.id();
        m.set_state(MaterialState::Solid);
        m.clear();
        assert_ne!(m.id(), id);
        assert!(m.is_empty());
        assert_eq!(m.name(), "");
        assert_eq!(m.state(), MaterialState::None);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn get_out_of_range_panics() {
        Material::new().get(0);
    }

    #[test]
    fn file_name_uses_id() {
        let m = Material::new();
        let name = m.file_name(Encoding::Binary);
        assert_eq!(name, format!("{}.rbmt", m.id()));
        assert!(m.file_name(Encoding::Text).ends_with(".ramt"));
    }

    #[test]
    fn state_absent_before_1_1() {
        let mut m = density_only();
        m.set_state(MaterialState::Liquid);
        let mut header = FileHeader::new(FileKind::Material);
        header.version = Version::new(1, 0, 0);

        // A 1.0.0 writer never emitted the state byte.
        let mut bytes = Vec::new();
        {
            let mut enc = rhea_codec::BinaryEncoder::new(&mut bytes);
            rhea_codec::encode_header(&mut enc, &header).unwrap();
            enc.write_str(&m.id().to_string()).unwrap();
            enc.write_str(m.name()).unwrap();
            enc.write_len(m.len()).unwrap();
            for p in m.iter() {
                p.encode(&mut enc).unwrap();
            }
        }
        let (h, back): (FileHeader, Material) = decode_record(Encoding::Binary, &bytes).unwrap();
        assert_eq!(h.version, Version::new(1, 0, 0));
        assert_eq!(back.state(), MaterialState::None);
        assert!(back.properties_equal(&m));
    }

    #[test]
    fn memory_roundtrip_text() {
        let mut m = Material::generate_default();
        m.set_name("Steel\nS235");
        m.set_state(MaterialState::Solid);
        let bytes =
            encode_record(Encoding::Text, &FileHeader::new(FileKind::Material), &m).unwrap();
        let (_, back): (FileHeader, Material) = decode_record(Encoding::Text, &bytes).unwrap();
        assert_eq!(back, m);
    }
}
