//! Test utilities for rhea development.
//!
//! Provides sample materials and problems ([`fixtures`]), scratch
//! directories, and a [`LegacyFile`] builder that renders material files in
//! the legacy plain-text format.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A fresh temporary directory, removed on drop.
pub fn scratch_dir() -> TempDir {
    tempfile::Builder::new()
        .prefix("rhea-test-")
        .tempdir()
        .expect("create scratch directory")
}

/// Builder for legacy material files.
///
/// ```
/// use rhea_test_utils::LegacyFile;
///
/// let text = LegacyFile::new("Water")
///     .property("Density", 998.0, "kg/m^3")
///     .render();
/// assert!(text.contains("NPROP: 1"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct LegacyFile {
    version: String,
    name: String,
    properties: Vec<LegacyProperty>,
    extra_lines: Vec<String>,
}

#[derive(Clone, Debug)]
struct LegacyProperty {
    name: String,
    value: String,
    units: String,
    table: Vec<(f64, f64)>,
}

impl LegacyFile {
    pub fn new(name: &str) -> Self {
        Self {
            version: "2.0.0".into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// A property with a single value and no table.
    pub fn property(mut self, name: &str, value: f64, units: &str) -> Self {
        self.properties.push(LegacyProperty {
            name: name.into(),
            value: value.to_string(),
            units: units.into(),
            table: Vec::new(),
        });
        self
    }

    /// A property whose value line is written verbatim.
    pub fn raw_property(mut self, name: &str, value: &str, units: &str) -> Self {
        self.properties.push(LegacyProperty {
            name: name.into(),
            value: value.into(),
            units: units.into(),
            table: Vec::new(),
        });
        self
    }

    /// A property with a temperature table.
    pub fn tabulated(mut self, name: &str, value: f64, units: &str, table: &[(f64, f64)]) -> Self {
        self.properties.push(LegacyProperty {
            name: name.into(),
            value: value.to_string(),
            units: units.into(),
            table: table.to_vec(),
        });
        self
    }

    /// An arbitrary line appended after the property list.
    pub fn extra_line(mut self, line: &str) -> Self {
        self.extra_lines.push(line.into());
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("!VERSION {}\n", self.version));
        out.push_str(&format!("NAME: {}\n", self.name));
        out.push_str(&format!("NPROP: {}\n", self.properties.len()));
        out.push_str("properties:\n");
        for p in &self.properties {
            out.push_str(&format!("{}\n{}\n{}\n{}\n", p.name, p.value, p.units, p.table.len()));
        }
        for line in &self.extra_lines {
            out.push_str(line);
            out.push('\n');
        }
        for p in self.properties.iter().filter(|p| !p.table.is_empty()) {
            out.push_str(&format!("{}/temperature:\n", p.name.replace(' ', "_")));
            for (key, value) in &p.table {
                out.push_str(&format!("{key} {value}\n"));
            }
        }
        out
    }

    /// Write the rendered file to `dir/file_name` and return its path.
    pub fn write_to(&self, dir: &Path, file_name: &str) -> io::Result<PathBuf> {
        let path = dir.join(file_name);
        fs::write(&path, self.render())?;
        Ok(path)
    }
}
