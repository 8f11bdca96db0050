//! A directory of material files, one file per material.

use std::error::Error;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use rhea_codec::{extension, remove_file_if_exists, Encoding};
use rhea_core::{DomainMask, RheaError};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::legacy::import_legacy;
use crate::material::Material;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`CatalogConfig::validate()`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The directory path is empty.
    EmptyDirectory,
    /// The path exists but is not a directory.
    NotADirectory {
        /// The offending path.
        path: PathBuf,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDirectory => write!(f, "catalog directory is empty"),
            Self::NotADirectory { path } => {
                write!(f, "catalog path '{}' is not a directory", path.display())
            }
        }
    }
}

impl Error for ConfigError {}

// ── CatalogConfig ──────────────────────────────────────────────────

/// Where a [`MaterialCatalog`] lives and how it writes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Directory holding one file per material.
    pub directory: PathBuf,
    /// Write new files in the binary encoding. Default: `true`.
    pub binary: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("materials"),
            binary: true,
        }
    }
}

impl CatalogConfig {
    /// Config for `directory` with the default encoding.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            ..Self::default()
        }
    }

    /// Check structural invariants. The directory need not exist yet.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.directory.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDirectory);
        }
        if self.directory.exists() && !self.directory.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: self.directory.clone(),
            });
        }
        Ok(())
    }

    /// Encoding used for writes.
    pub fn encoding(&self) -> Encoding {
        Encoding::from_binary_flag(self.binary)
    }
}

// ── CatalogError ───────────────────────────────────────────────────

/// Errors from [`MaterialCatalog`] operations.
#[derive(Debug)]
pub enum CatalogError {
    /// The configuration is invalid.
    Config(ConfigError),
    /// A file operation failed.
    File(RheaError),
    /// No material with this id is in the catalog.
    UnknownMaterial {
        /// The id that was looked up.
        id: Uuid,
    },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::File(e) => write!(f, "{e}"),
            Self::UnknownMaterial { id } => write!(f, "no material with id {id} in catalog"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::File(e) => Some(e),
            Self::UnknownMaterial { .. } => None,
        }
    }
}

impl From<ConfigError> for CatalogError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<RheaError> for CatalogError {
    fn from(e: RheaError) -> Self {
        Self::File(e)
    }
}

// ── MaterialCatalog ────────────────────────────────────────────────

/// Materials stored one per file in a directory, keyed by id.
///
/// Materials keep insertion order; loading inserts in file-name order.
/// In-memory changes reach the disk only through [`save`](Self::save),
/// [`save_all`](Self::save_all) and [`delete`](Self::delete).
#[derive(Debug)]
pub struct MaterialCatalog {
    config: CatalogConfig,
    materials: IndexMap<Uuid, Material>,
}

impl MaterialCatalog {
    /// Open the catalog directory, creating it if missing, and load every
    /// material file in either encoding.
    ///
    /// Files that fail to read are logged and skipped.
    pub fn open(config: CatalogConfig) -> Result<Self, CatalogError> {
        config.validate()?;
        fs::create_dir_all(&config.directory).map_err(|e| RheaError::WriteFile {
            path: config.directory.clone(),
            reason: e.to_string(),
        })?;

        let entries = fs::read_dir(&config.directory).map_err(|source| RheaError::OpenFile {
            path: config.directory.clone(),
            source,
        })?;
        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| is_material_file(p))
            .collect();
        paths.sort();

        let mut materials = IndexMap::with_capacity(paths.len());
        for path in &paths {
            match Material::read(path) {
                Ok(material) => {
                    if let Some(previous) = materials.insert(material.id(), material) {
                        warn!(
                            path = %path.display(),
                            id = %previous.id(),
                            "duplicate material id, later file wins"
                        );
                    }
                }
                Err(e) => warn!(path = %path.display(), error = %e, "material file skipped"),
            }
        }
        info!(
            directory = %config.directory.display(),
            materials = materials.len(),
            skipped = paths.len() - materials.len(),
            "material catalog loaded"
        );
        Ok(Self { config, materials })
    }

    /// The catalog configuration.
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Number of materials.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether the catalog holds no materials.
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Materials in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Material> + '_ {
        self.materials.values()
    }

    /// Material by id.
    pub fn get(&self, id: Uuid) -> Option<&Material> {
        self.materials.get(&id)
    }

    /// Mutable material by id. Changing its id through this reference
    /// desynchronizes the catalog key; use [`insert`](Self::insert) instead.
    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut Material> {
        self.materials.get_mut(&id)
    }

    /// First material named `name`.
    pub fn find_by_name(&self, name: &str) -> Option<&Material> {
        self.materials.values().find(|m| m.name() == name)
    }

    /// Insert `material`, replacing and returning any material with the
    /// same id. A replaced material keeps its catalog position.
    pub fn insert(&mut self, material: Material) -> Option<Material> {
        self.materials.insert(material.id(), material)
    }

    /// Remove a material from memory only. Its file stays on disk.
    pub fn remove(&mut self, id: Uuid) -> Option<Material> {
        self.materials.shift_remove(&id)
    }

    /// Path the material `id` is saved to.
    pub fn path_for(&self, id: Uuid) -> PathBuf {
        let ext = Material::default_extension(self.config.binary);
        self.config.directory.join(format!("{}.{ext}", id.hyphenated()))
    }

    /// Write material `id` to its file, removing a copy in the other
    /// encoding if one exists.
    pub fn save(&self, id: Uuid) -> Result<PathBuf, CatalogError> {
        let material = self.get(id).ok_or(CatalogError::UnknownMaterial { id })?;
        let path = self.path_for(id);
        material.write(&path)?;
        let other = path.with_extension(Material::default_extension(!self.config.binary));
        remove_file_if_exists(&other)?;
        debug!(path = %path.display(), name = material.name(), "material saved");
        Ok(path)
    }

    /// Write every material. Stops at the first failure.
    pub fn save_all(&self) -> Result<(), CatalogError> {
        for id in self.materials.keys() {
            self.save(*id)?;
        }
        Ok(())
    }

    /// Remove material `id` from memory and delete its files.
    pub fn delete(&mut self, id: Uuid) -> Result<Material, CatalogError> {
        let material = self
            .materials
            .shift_remove(&id)
            .ok_or(CatalogError::UnknownMaterial { id })?;
        for binary in [false, true] {
            let path = self
                .config
                .directory
                .join(format!("{}.{}", id.hyphenated(), Material::default_extension(binary)));
            remove_file_if_exists(&path)?;
        }
        Ok(material)
    }

    /// Import a legacy material file into the catalog (in memory) and
    /// return its id.
    pub fn import_legacy(&mut self, path: &Path) -> Result<Uuid, CatalogError> {
        let material = import_legacy(path)?;
        let id = material.id();
        self.insert(material);
        Ok(id)
    }

    /// Materials holding every property the domains in `mask` need.
    pub fn valid_for(&self, mask: DomainMask) -> impl Iterator<Item = &Material> + '_ {
        self.materials
            .values()
            .filter(move |m| m.valid_for_domains(mask))
    }
}

fn is_material_file(path: &Path) -> bool {
    path.is_file()
        && extension(path).is_some_and(|ext| {
            ext.eq_ignore_ascii_case(Material::default_extension(true))
                || ext.eq_ignore_ascii_case(Material::default_extension(false))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(CatalogConfig::default().validate().is_ok());
        assert_eq!(CatalogConfig::default().encoding(), Encoding::Binary);
    }

    #[test]
    fn empty_directory_rejected() {
        assert_eq!(
            CatalogConfig::new("").validate(),
            Err(ConfigError::EmptyDirectory)
        );
    }

    #[test]
    fn file_path_rejected() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = CatalogConfig::new(file.path()).validate().unwrap_err();
        assert!(matches!(err, ConfigError::NotADirectory { .. }));
    }

    #[test]
    fn open_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("materials");
        let catalog = MaterialCatalog::open(CatalogConfig::new(&path)).unwrap();
        assert!(catalog.is_empty());
        assert!(path.is_dir());
    }

    #[test]
    fn unknown_id_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = MaterialCatalog::open(CatalogConfig::new(dir.path())).unwrap();
        let id = Uuid::new_v4();
        assert!(matches!(
            catalog.save(id),
            Err(CatalogError::UnknownMaterial { id: missing }) if missing == id
        ));
    }
}
