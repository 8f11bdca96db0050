//! Encoding selection by file extension.

use std::fmt;
use std::path::Path;

use rhea_core::{FileKind, RheaError};

use crate::paths::extension;

/// Physical encoding of a persisted file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Line-oriented human-readable text.
    Text,
    /// Packed little-endian binary.
    Binary,
}

impl Encoding {
    /// Select the encoding from the extension of `path`.
    ///
    /// Every kind's extension pair is recognized, so a file whose extension
    /// belongs to another kind still decodes far enough for its header to be
    /// checked.
    pub fn from_path(path: &Path) -> Result<Self, RheaError> {
        let invalid = |reason: String| RheaError::InvalidFileName {
            path: path.to_path_buf(),
            reason,
        };
        if path.file_stem().is_none_or(|stem| stem.is_empty()) {
            return Err(invalid("empty file name".to_string()));
        }
        let ext = extension(path).ok_or_else(|| invalid("missing extension".to_string()))?;
        for kind in FileKind::ALL {
            if kind.text_extension().is_some_and(|e| e.eq_ignore_ascii_case(ext)) {
                return Ok(Self::Text);
            }
            if kind.binary_extension().is_some_and(|e| e.eq_ignore_ascii_case(ext)) {
                return Ok(Self::Binary);
            }
        }
        Err(invalid(format!("unrecognized extension '{ext}'")))
    }

    /// Extension (without the dot) used for files of `kind` in this encoding.
    pub fn extension_for(self, kind: FileKind) -> Option<&'static str> {
        match self {
            Self::Text => kind.text_extension(),
            Self::Binary => kind.binary_extension(),
        }
    }

    /// Binary when `binary` is true, text otherwise.
    pub fn from_binary_flag(binary: bool) -> Self {
        if binary {
            Self::Binary
        } else {
            Self::Text
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Binary => f.write_str("binary"),
        }
    }
}
