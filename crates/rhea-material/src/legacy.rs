//! Import of materials from the legacy plain-text property format.
//!
//! The format is a sequence of tag lines. Recognized tags:
//!
//! ```text
//! !VERSION <text>
//! NAME: <text>
//! NPROP: <count>
//! properties:
//!   <name>          one record of four lines per declared property
//!   <value>
//!   <units>
//!   <table size>
//! <Name_with_underscores>/temperature:
//!   <key> <value>   <table size> pairs, whitespace separated
//! ```
//!
//! A tag value may follow the tag on the same line or sit on the next line.
//! Unknown tags, unknown property names and unparsable numbers are logged
//! and skipped. Only failing to read the file aborts the import.

use std::fs;
use std::path::Path;

use rhea_core::{RheaError, VariableKind};
use tracing::{debug, warn};

use crate::material::Material;
use crate::property::MaterialProperty;
use crate::property_type::PropertyType;

/// Legacy property names, lowercase.
const NAMES: [(&str, PropertyType); 12] = [
    ("density", PropertyType::Density),
    ("dynamic viscosity", PropertyType::DynamicViscosity),
    ("electrical conductivity", PropertyType::ElectricalConductivity),
    ("emissivity", PropertyType::Emissivity),
    ("heat capacity", PropertyType::HeatCapacity),
    ("modulus of elasticity", PropertyType::ModulusOfElasticity),
    ("permeability", PropertyType::PermeabilityToFluids),
    ("poissons ratio", PropertyType::PoissonRatio),
    ("relative permittivity", PropertyType::RelativePermittivity),
    ("speed of sound", PropertyType::SoundSpeed),
    ("thermal conductivity", PropertyType::ThermalConductivity),
    ("thermal expansion coefficient", PropertyType::ThermalExpansionCoefficient),
];

/// Property type for a legacy property name, matched case-insensitively.
pub fn legacy_property_type(name: &str) -> Option<PropertyType> {
    let lower = name.trim().to_lowercase();
    NAMES.iter().find(|(n, _)| *n == lower).map(|&(_, t)| t)
}

/// Table tag announcing the samples of the property called `name`.
pub fn legacy_table_tag(name: &str) -> String {
    format!("{}/temperature:", name.trim().replace(' ', "_"))
}

/// Import a material from a legacy file.
///
/// The returned material has a fresh identifier. Properties declared with a
/// table size of zero hold a single sample at the default temperature.
/// Properties with a table hold exactly the samples listed under their
/// table tag, or the declared value if the tag never appears.
pub fn import_legacy(path: &Path) -> Result<Material, RheaError> {
    if path.as_os_str().is_empty() {
        return Err(RheaError::InvalidFileName {
            path: path.to_path_buf(),
            reason: "no file name was provided".into(),
        });
    }
    let text = fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            RheaError::OpenFile {
                path: path.to_path_buf(),
                source,
            }
        } else {
            RheaError::ReadFile {
                path: path.to_path_buf(),
                reason: source.to_string(),
            }
        }
    })?;
    let material = parse(path, &text);
    debug!(
        path = %path.display(),
        name = material.name(),
        properties = material.len(),
        "legacy material imported"
    );
    Ok(material)
}

struct Table {
    tag: String,
    size: usize,
    kind: Option<PropertyType>,
}

struct Lines<'a> {
    inner: std::iter::Enumerate<std::str::Lines<'a>>,
    line_no: usize,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.lines().enumerate(),
            line_no: 0,
        }
    }

    /// Next line, verbatim apart from trailing whitespace.
    fn raw(&mut self) -> Option<&'a str> {
        let (i, line) = self.inner.next()?;
        self.line_no = i + 1;
        Some(line.trim_end())
    }

    /// Next non-blank line, trimmed.
    fn non_blank(&mut self) -> Option<&'a str> {
        loop {
            let line = self.raw()?.trim_start();
            if !line.is_empty() {
                return Some(line);
            }
        }
    }

    /// `rest` if non-empty, otherwise the next non-blank line.
    fn value(&mut self, rest: &'a str) -> Option<&'a str> {
        if rest.is_empty() {
            self.non_blank()
        } else {
            Some(rest)
        }
    }
}

fn parse(path: &Path, text: &str) -> Material {
    let mut material = Material::new();
    let mut declared = 0usize;
    let mut tables: Vec<Table> = Vec::new();
    let mut lines = Lines::new(text);

    while let Some(line) = lines.non_blank() {
        let (tag, rest) = match line.split_once(char::is_whitespace) {
            Some((tag, rest)) => (tag, rest.trim()),
            None => (line, ""),
        };
        match tag {
            "!VERSION" => {
                let version = lines.value(rest).unwrap_or_default();
                debug!(path = %path.display(), version, "legacy format version");
            }
            "NAME:" => {
                material.set_name(lines.value(rest).unwrap_or_default());
            }
            "NPROP:" => match lines.value(rest).map(str::parse::<usize>) {
                Some(Ok(n)) => declared = n,
                _ => warn!(
                    path = %path.display(),
                    line = lines.line_no,
                    "invalid property count, ignored"
                ),
            },
            "properties:" => {
                for _ in 0..declared {
                    match read_property(path, &mut lines) {
                        Some((property, table)) => {
                            if let Some(property) = property {
                                material.add(property);
                            }
                            tables.push(table);
                        }
                        None => {
                            warn!(
                                path = %path.display(),
                                "property list ends early, remaining records skipped"
                            );
                            break;
                        }
                    }
                }
            }
            _ => match tables.iter().find(|t| t.tag == tag) {
                Some(table) => read_table(path, &mut lines, rest, table, &mut material),
                None => warn!(
                    path = %path.display(),
                    line = lines.line_no,
                    tag,
                    "unrecognized line skipped"
                ),
            },
        }
    }
    material
}

/// One four-line property record. `None` when the file ends inside it.
fn read_property(path: &Path, lines: &mut Lines<'_>) -> Option<(Option<MaterialProperty>, Table)> {
    let name = lines.non_blank()?;
    let value_line = lines.non_blank()?;
    let value_line_no = lines.line_no;
    let units = lines.raw()?.trim();
    let size_line = lines.non_blank()?;

    let size = size_line.parse::<usize>().unwrap_or_else(|_| {
        warn!(
            path = %path.display(),
            line = lines.line_no,
            property = name,
            "invalid table size, treated as zero"
        );
        0
    });
    let kind = legacy_property_type(name);
    let table = Table {
        tag: legacy_table_tag(name),
        size,
        kind,
    };

    let Some(kind) = kind else {
        warn!(path = %path.display(), property = name, "unknown property skipped");
        return Some((None, table));
    };
    let Ok(value) = value_line.parse::<f64>() else {
        warn!(
            path = %path.display(),
            line = value_line_no,
            property = name,
            "invalid property value, property skipped"
        );
        return Some((None, table));
    };

    let mut property = MaterialProperty::new(kind);
    property.add(VariableKind::Temperature.init_value(), value);
    if !units.is_empty() && units != kind.units() {
        property.set_units(units);
    }
    Some((Some(property), table))
}

fn read_table(
    path: &Path,
    lines: &mut Lines<'_>,
    rest: &str,
    table: &Table,
    material: &mut Material,
) {
    // The declared size is untrusted; numbers grow only as tokens arrive.
    let wanted = table.size.saturating_mul(2);
    let mut numbers = Vec::new();
    let mut pending = rest;
    while numbers.len() < wanted {
        for token in pending.split_whitespace() {
            match token.parse::<f64>() {
                Ok(v) => numbers.push(v),
                Err(_) => warn!(
                    path = %path.display(),
                    line = lines.line_no,
                    token,
                    "invalid table number skipped"
                ),
            }
        }
        if numbers.len() >= wanted {
            break;
        }
        match lines.non_blank() {
            Some(line) => pending = line,
            None => {
                warn!(path = %path.display(), tag = %table.tag, "table ends early");
                break;
            }
        }
    }

    let Some(position) = table.kind.and_then(|k| material.find_position(k)) else {
        return;
    };
    let property = material.get_mut(position);
    let pairs: Vec<(f64, f64)> = numbers
        .chunks_exact(2)
        .map(|pair| (pair[0], pair[1]))
        .filter(|(key, _)| !key.is_nan())
        .collect();
    if pairs.is_empty() {
        return;
    }
    property.clear_samples();
    for (key, value) in pairs {
        property.add(key, value);
    }
}
