//! Material properties, materials and material catalogs for rhea.
//!
//! A [`Material`] owns at most one [`MaterialProperty`] per
//! [`PropertyType`], kept sorted by type. Each property owns a
//! temperature-keyed [`ValueTable`](rhea_core::ValueTable). Materials
//! persist one per file through the rhea codec, exchange as JSON, and can be
//! imported from the legacy plain-text format. A [`MaterialCatalog`] manages
//! a directory of material files.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod catalog;
pub mod json;
pub mod legacy;
pub mod material;
pub mod property;
pub mod property_type;

pub use catalog::{CatalogConfig, CatalogError, ConfigError, MaterialCatalog};
pub use legacy::{import_legacy, legacy_property_type, legacy_table_tag};
pub use material::{Material, MaterialState, PropertyEditor};
pub use property::MaterialProperty;
pub use property_type::PropertyType;
