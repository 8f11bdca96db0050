//! Logical file kinds and the header every persisted file starts with.

use std::fmt;

use crate::version::{Version, FILE_VERSION};

/// Logical kind of a persisted file.
///
/// The header records the kind so a reader can reject a file written for a
/// different purpose before decoding its payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// No kind; never written by a well-formed producer.
    #[default]
    None,
    /// A problem model.
    Model,
    /// A single material.
    Material,
    /// A radiation view-factor matrix.
    ViewFactorMatrix,
    /// Display properties of a model.
    DisplayProperties,
    /// A link pointing at another file.
    Link,
}

impl FileKind {
    /// Every kind, in tag order.
    pub const ALL: [FileKind; 6] = [
        FileKind::None,
        FileKind::Model,
        FileKind::Material,
        FileKind::ViewFactorMatrix,
        FileKind::DisplayProperties,
        FileKind::Link,
    ];

    /// Stable string identifier used by the text encoding.
    pub fn id(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Model => "model",
            Self::Material => "material",
            Self::ViewFactorMatrix => "view-factor-matrix",
            Self::DisplayProperties => "display-properties",
            Self::Link => "link",
        }
    }

    /// Look up a kind by its string identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.id() == id)
    }

    /// Single-byte tag used by the binary encoding.
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Kind for a binary tag, if the tag is defined.
    pub fn from_tag(tag: u8) -> Option<Self> {
        Self::ALL.get(usize::from(tag)).copied()
    }

    /// Extension (without the dot) of the human-readable encoding.
    pub fn text_extension(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Model => Some("ramd"),
            Self::Material => Some("ramt"),
            Self::ViewFactorMatrix => Some("ravf"),
            Self::DisplayProperties => Some("radp"),
            Self::Link => Some("ralk"),
        }
    }

    /// Extension (without the dot) of the packed binary encoding.
    pub fn binary_extension(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Model => Some("rbmd"),
            Self::Material => Some("rbmt"),
            Self::ViewFactorMatrix => Some("rbvf"),
            Self::DisplayProperties => Some("rbdp"),
            Self::Link => Some("rblk"),
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Leading metadata of every persisted file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileHeader {
    /// Logical kind of the payload.
    pub kind: FileKind,
    /// Format version the payload was written with.
    pub version: Version,
    /// Free-text description.
    pub information: String,
}

impl FileHeader {
    /// Header for a file of `kind` written with the current [`FILE_VERSION`].
    pub fn new(kind: FileKind) -> Self {
        Self {
            kind,
            version: FILE_VERSION,
            information: String::new(),
        }
    }

    /// Replace the free-text description.
    pub fn with_information(mut self, information: impl Into<String>) -> Self {
        self.information = information.into();
        self
    }

    /// One-line human-readable summary.
    pub fn describe(&self) -> String {
        if self.information.is_empty() {
            format!("{} file, version {}", self.kind, self.version)
        } else {
            format!(
                "{} file, version {}: {}",
                self.kind, self.version, self.information
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_and_ids_roundtrip() {
        for kind in FileKind::ALL {
            assert_eq!(FileKind::from_tag(kind.tag()), Some(kind));
            assert_eq!(FileKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(FileKind::from_tag(6), None);
    }

    #[test]
    fn extensions_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        for kind in FileKind::ALL {
            for ext in [kind.text_extension(), kind.binary_extension()]
                .into_iter()
                .flatten()
            {
                assert!(seen.insert(ext), "duplicate extension {ext}");
            }
        }
        assert_eq!(seen.len(), 10);
    }

    #[test]
    fn describe_mentions_kind_and_version() {
        let header = FileHeader::new(FileKind::Material).with_information("water");
        assert_eq!(header.describe(), "material file, version 1.1.0: water");
    }
}
