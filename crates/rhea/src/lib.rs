//! rhea: configuration and versioned persistence for multi-physics
//! simulations.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all rhea sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use rhea::prelude::*;
//!
//! let dir = tempfile::tempdir().unwrap();
//!
//! // Heat transfer through a radiating body pulls in plain heat transfer.
//! let mut problem = Problem::new();
//! let active = problem.set_domains(DomainMask::single(Domain::RadiativeHeat)).unwrap();
//! assert!(active.contains(Domain::Heat));
//!
//! // A material good enough for every active domain.
//! let material = Material::generate_default();
//! assert!(material.valid_for_domains(problem.domains()));
//!
//! // Persist both; the extension picks the encoding.
//! let material_path = dir.path().join(material.file_name(Encoding::Binary));
//! material.write(&material_path).unwrap();
//! problem.write(&dir.path().join("model.ramd")).unwrap();
//!
//! assert_eq!(Material::read(&material_path).unwrap(), material);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `rhea-core` | Domains, variables, value tables, versions, headers, errors |
//! | [`codec`] | `rhea-codec` | Text and binary codecs, atomic file IO, link files |
//! | [`material`] | `rhea-material` | Material properties, materials, catalogs, legacy import |
//! | [`problem`] | `rhea-problem` | Problem aggregate, time solver, solver settings |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types (`rhea-core`).
///
/// Domains and [`types::DomainMask`], the domain registry queries, the
/// variable registry, [`types::ValueTable`] and the shared error taxonomy.
pub use rhea_core as types;

/// Versioned file codec (`rhea-codec`).
///
/// [`codec::read_file`] and [`codec::write_file`] persist any
/// [`codec::Record`] atomically in the encoding named by the extension.
pub use rhea_codec as codec;

/// Materials (`rhea-material`).
pub use rhea_material as material;

/// Problems (`rhea-problem`).
pub use rhea_problem as problem;

/// Common imports for typical rhea usage.
///
/// ```rust
/// use rhea::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use rhea_core::{
        Domain, DomainError, DomainMask, FileHeader, FileKind, Insertion, RheaError, ValueTable,
        VariableKind, Version, FILE_VERSION,
    };

    // Codec
    pub use rhea_codec::{read_file, resolve_link, write_file, write_link, Encoding, Record};

    // Materials
    pub use rhea_material::{
        CatalogConfig, Material, MaterialCatalog, MaterialProperty, MaterialState, PropertyType,
    };

    // Problems
    pub use rhea_problem::{
        MarchApproximation, MatrixSolverConfig, MatrixSolverKind, MonitoringPoint, Problem,
        ProblemSetup, TimeSolver,
    };
}
