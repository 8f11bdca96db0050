//! Error types shared across the rhea workspace.
//!
//! [`RheaError`] is the recoverable taxonomy every public persistence entry
//! point reports. [`DomainError`] covers domain-composition failures.

use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::domain::Domain;
use crate::file::FileKind;

/// Recoverable errors from file, link and configuration operations.
///
/// Variants that concern a file carry the offending path so callers can
/// report it without extra context.
#[derive(Debug)]
pub enum RheaError {
    /// The path cannot name a file of the requested kind (empty name,
    /// missing or unrecognized extension).
    InvalidFileName {
        /// The rejected path.
        path: PathBuf,
        /// Why it was rejected.
        reason: String,
    },
    /// The file could not be opened or created.
    OpenFile {
        /// The path that failed to open.
        path: PathBuf,
        /// The underlying I/O failure.
        source: io::Error,
    },
    /// The stream failed or ended early while reading.
    ReadFile {
        /// The file being read.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },
    /// The stream failed while writing or committing.
    WriteFile {
        /// The file being written.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },
    /// The header declares a different file kind than the operation expects.
    InvalidFileFormat {
        /// The file being read.
        path: PathBuf,
        /// Kind the caller asked for.
        expected: FileKind,
        /// Kind recorded in the header.
        found: FileKind,
    },
    /// A link target could not be resolved to an existing file.
    NotFound {
        /// The link file or target that was looked up.
        path: PathBuf,
        /// What was missing.
        reason: String,
    },
    /// No matrix-solver configuration is registered for the requested kind.
    UnknownSolverKind {
        /// Name of the requested kind.
        kind: String,
    },
    /// An unexpected lower-level failure, message preserved.
    Application {
        /// Description of the failure.
        message: String,
    },
}

impl RheaError {
    /// The file path this error concerns, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::InvalidFileName { path, .. }
            | Self::OpenFile { path, .. }
            | Self::ReadFile { path, .. }
            | Self::WriteFile { path, .. }
            | Self::InvalidFileFormat { path, .. }
            | Self::NotFound { path, .. } => Some(path),
            Self::UnknownSolverKind { .. } | Self::Application { .. } => None,
        }
    }
}

impl fmt::Display for RheaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFileName { path, reason } => {
                write!(f, "invalid file name '{}': {reason}", path.display())
            }
            Self::OpenFile { path, source } => {
                write!(f, "cannot open file '{}': {source}", path.display())
            }
            Self::ReadFile { path, reason } => {
                write!(f, "error reading file '{}': {reason}", path.display())
            }
            Self::WriteFile { path, reason } => {
                write!(f, "error writing file '{}': {reason}", path.display())
            }
            Self::InvalidFileFormat {
                path,
                expected,
                found,
            } => write!(
                f,
                "invalid file format '{}': expected {expected} file, found {found}",
                path.display()
            ),
            Self::NotFound { path, reason } => {
                write!(f, "not found '{}': {reason}", path.display())
            }
            Self::UnknownSolverKind { kind } => {
                write!(f, "no configuration for matrix solver kind '{kind}'")
            }
            Self::Application { message } => write!(f, "{message}"),
        }
    }
}

impl Error for RheaError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::OpenFile { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<DomainError> for RheaError {
    fn from(e: DomainError) -> Self {
        Self::Application {
            message: e.to_string(),
        }
    }
}

/// Errors from domain-composition checks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomainError {
    /// An active domain is excluded by another active domain.
    ExcludedCombination {
        /// The excluded domain.
        domain: Domain,
        /// The active domain whose exclusion mask contains `domain`.
        excluded_by: Domain,
    },
    /// The requirement graph over the listed domains contains a cycle.
    DependencyCycle {
        /// Domains participating in the cycle, in discovery order.
        domains: Vec<Domain>,
    },
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExcludedCombination {
                domain,
                excluded_by,
            } => write!(
                f,
                "domain '{}' cannot be combined with '{}'",
                domain.name(),
                excluded_by.name()
            ),
            Self::DependencyCycle { domains } => {
                write!(f, "circular domain requirement:")?;
                for (i, d) in domains.iter().enumerate() {
                    let sep = if i == 0 { " " } else { " -> " };
                    write!(f, "{sep}{}", d.id())?;
                }
                Ok(())
            }
        }
    }
}

impl Error for DomainError {}
