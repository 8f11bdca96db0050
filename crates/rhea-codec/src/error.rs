//! Low-level stream errors raised while encoding or decoding.

use std::fmt;
use std::io;
use std::path::Path;

use rhea_core::{FileKind, RheaError, Version};

/// Errors raised by [`Encoder`](crate::Encoder) and
/// [`Decoder`](crate::Decoder) implementations.
///
/// These never leave the crate's file-level entry points unwrapped: see
/// [`into_read_error`](Self::into_read_error) and
/// [`into_write_error`](Self::into_write_error).
#[derive(Debug)]
pub enum CodecError {
    /// An I/O error occurred during read or write.
    Io(io::Error),
    /// The stream ended in the middle of a value.
    UnexpectedEof,
    /// The stream does not start with the expected magic marker.
    InvalidMagic,
    /// A value could not be decoded (bad number, bad escape, bad UTF-8).
    Malformed {
        /// Human-readable description of what went wrong.
        detail: String,
    },
    /// The header names a file kind this build does not know.
    UnknownKind {
        /// The unrecognized kind as found in the stream.
        found: String,
    },
    /// The header names a different file kind than the caller expects.
    KindMismatch {
        /// Kind the caller asked for.
        expected: FileKind,
        /// Kind recorded in the header.
        found: FileKind,
    },
    /// The file was written by a newer format version than this build reads.
    UnsupportedVersion {
        /// The version found in the header.
        found: Version,
    },
}

impl CodecError {
    pub(crate) fn malformed(detail: impl Into<String>) -> Self {
        Self::Malformed {
            detail: detail.into(),
        }
    }

    /// Rewrap as a [`RheaError`] for a failed read of `path`.
    pub fn into_read_error(self, path: &Path) -> RheaError {
        match self {
            Self::KindMismatch { expected, found } => RheaError::InvalidFileFormat {
                path: path.to_path_buf(),
                expected,
                found,
            },
            other => RheaError::ReadFile {
                path: path.to_path_buf(),
                reason: other.to_string(),
            },
        }
    }

    /// Rewrap as a [`RheaError`] for a failed write of `path`.
    pub fn into_write_error(self, path: &Path) -> RheaError {
        RheaError::WriteFile {
            path: path.to_path_buf(),
            reason: self.to_string(),
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::UnexpectedEof => write!(f, "unexpected end of stream"),
            Self::InvalidMagic => write!(f, "invalid magic marker (expected \"RHEA\")"),
            Self::Malformed { detail } => write!(f, "malformed value: {detail}"),
            Self::UnknownKind { found } => write!(f, "unknown file kind '{found}'"),
            Self::KindMismatch { expected, found } => {
                write!(f, "expected {expected} file, found {found}")
            }
            Self::UnsupportedVersion { found } => {
                write!(f, "unsupported format version {found}")
            }
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for CodecError {
    fn from(e: io::Error) -> Self {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            Self::UnexpectedEof
        } else {
            Self::Io(e)
        }
    }
}
