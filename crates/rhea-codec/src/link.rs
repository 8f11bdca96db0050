//! Link files: small records pointing at a shared payload file.

use std::io;
use std::path::{Path, PathBuf};

use rhea_core::{FileKind, RheaError, Version};
use tracing::debug;

use crate::codec::{Decoder, Encoder, Record};
use crate::error::CodecError;
use crate::file::{read_file, write_record};

/// Payload of a link file: the target path and the version of the target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    /// Recorded target. Relative targets are relative to the link file's
    /// directory.
    pub target: PathBuf,
    /// Format version of the target file.
    pub version: Version,
}

impl Record for Link {
    const KIND: FileKind = FileKind::Link;

    fn encode(&self, enc: &mut dyn Encoder) -> Result<(), CodecError> {
        let target = self.target.to_str().ok_or_else(|| {
            CodecError::malformed(format!(
                "link target '{}' is not valid UTF-8",
                self.target.display()
            ))
        })?;
        enc.write_str(target)?;
        enc.write_u32(self.version.major)?;
        enc.write_u32(self.version.minor)?;
        enc.write_u32(self.version.release)
    }

    fn decode(dec: &mut dyn Decoder, _version: Version) -> Result<Self, CodecError> {
        let target = PathBuf::from(dec.read_str()?);
        let version = Version::new(dec.read_u32()?, dec.read_u32()?, dec.read_u32()?);
        Ok(Self { target, version })
    }
}

/// Write a link at `link` pointing at `target`, which has format `version`.
pub fn write_link(link: &Path, target: &Path, version: Version) -> Result<(), RheaError> {
    write_record(
        link,
        &Link {
            target: target.to_path_buf(),
            version,
        },
    )
}

/// Read the recorded target and version of a link file.
pub fn read_link(link: &Path) -> Result<(PathBuf, Version), RheaError> {
    let (_, Link { target, version }) = read_file::<Link>(link)?;
    Ok((target, version))
}

/// Resolve `link` to an absolute path of an existing file.
///
/// The recorded target wins if it exists. Otherwise, or if the link file
/// itself does not exist, `fallback` is used if it exists. Other failures
/// reading the link propagate.
pub fn resolve_link(link: &Path, fallback: &Path) -> Result<PathBuf, RheaError> {
    let recorded = match read_link(link) {
        Ok((target, _)) => Some(link.parent().unwrap_or(Path::new("")).join(target)),
        Err(RheaError::OpenFile { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            None
        }
        Err(e) => return Err(e),
    };
    let resolved = match recorded {
        Some(target) if target.exists() => target,
        _ if fallback.exists() => fallback.to_path_buf(),
        _ => {
            return Err(RheaError::NotFound {
                path: link.to_path_buf(),
                reason: format!(
                    "neither the link target nor the fallback '{}' exists",
                    fallback.display()
                ),
            })
        }
    };
    let absolute = std::path::absolute(&resolved).map_err(|e| RheaError::Application {
        message: format!("cannot make '{}' absolute: {e}", resolved.display()),
    })?;
    debug!(link = %link.display(), target = %absolute.display(), "link resolved");
    Ok(absolute)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn roundtrip_link() {
        let dir = tempfile::tempdir().unwrap();
        let link = dir.path().join("shared.ralk");
        write_link(&link, Path::new("water.rbmt"), Version::new(1, 0, 0)).unwrap();
        let (target, version) = read_link(&link).unwrap();
        assert_eq!(target, PathBuf::from("water.rbmt"));
        assert_eq!(version, Version::new(1, 0, 0));
    }

    #[test]
    fn relative_target_resolves_next_to_link() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("water.rbmt");
        fs::write(&target, b"").unwrap();
        let link = dir.path().join("shared.rblk");
        write_link(&link, Path::new("water.rbmt"), Version::new(1, 1, 0)).unwrap();

        let resolved = resolve_link(&link, Path::new("/nonexistent/fallback")).unwrap();
        assert!(resolved.is_absolute());
        assert_eq!(resolved, std::path::absolute(&target).unwrap());
    }

    #[test]
    fn missing_target_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let fallback = dir.path().join("fallback.rbmt");
        fs::write(&fallback, b"").unwrap();
        let link = dir.path().join("shared.rblk");
        write_link(&link, Path::new("moved.rbmt"), Version::new(1, 1, 0)).unwrap();

        assert_eq!(resolve_link(&link, &fallback).unwrap(), fallback);
        assert_eq!(
            resolve_link(&dir.path().join("absent.rblk"), &fallback).unwrap(),
            fallback
        );
    }

    #[test]
    fn nothing_exists_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_link(&dir.path().join("absent.rblk"), &dir.path().join("nope"))
            .unwrap_err();
        assert!(matches!(err, RheaError::NotFound { .. }));
    }

    #[test]
    fn corrupt_link_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let link = dir.path().join("bad.ralk");
        fs::write(&link, b"not a link\n").unwrap();
        let fallback = dir.path().join("fallback.rbmt");
        fs::write(&fallback, b"").unwrap();
        assert!(matches!(
            resolve_link(&link, &fallback),
            Err(RheaError::ReadFile { .. })
        ));
    }
}
