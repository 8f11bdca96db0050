//! Core types for the rhea simulation-configuration engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the static reference data and primitive containers shared by every
//! other rhea crate: physics domains and their composition registry,
//! physical variables, ordered value tables, file headers, format
//! versions, and the shared error taxonomy.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod domain;
pub mod error;
pub mod file;
pub mod registry;
pub mod table;
pub mod variable;
pub mod version;

pub use domain::{Domain, DomainDescriptor, DomainMask, DomainMaskIter};
pub use error::{DomainError, RheaError};
pub use file::{FileHeader, FileKind};
pub use registry::{
    close_required, domains_for, excluded_mask, required_mask, sort_by_dependency,
    time_march_enabled, validate_composition, variables_for, DomainList,
};
pub use table::{Insertion, ValueTable};
pub use variable::VariableKind;
pub use version::{ParseVersionError, Version, FILE_VERSION};
