//! File-name helpers.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rhea_core::RheaError;

/// Extension of `path` without the dot, if it has a UTF-8 one.
pub fn extension(path: &Path) -> Option<&str> {
    path.extension()?.to_str()
}

/// `dir/stem-<step>.ext`, with `step` zero-padded to `width` digits.
///
/// ```
/// use std::path::{Path, PathBuf};
/// use rhea_codec::file_name_with_time_step;
///
/// assert_eq!(
///     file_name_with_time_step(Path::new("out/result.rbmd"), 7, 4),
///     PathBuf::from("out/result-0007.rbmd"),
/// );
/// ```
pub fn file_name_with_time_step(path: &Path, step: usize, width: usize) -> PathBuf {
    file_name_with_suffix(path, &format!("-{step:0width$}"))
}

/// `dir/stem<suffix>.ext`.
pub fn file_name_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_stem().map(OsString::from).unwrap_or_default();
    name.push(suffix);
    if let Some(ext) = path.extension() {
        name.push(".");
        name.push(ext);
    }
    path.with_file_name(name)
}

/// Sibling path used while a write is in flight: `<file name>.tmp`.
pub(crate) fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Remove `path` if it exists. Returns whether a file was removed.
pub fn remove_file_if_exists(path: &Path) -> Result<bool, RheaError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(RheaError::WriteFile {
            path: path.to_path_buf(),
            reason: format!("cannot remove file: {e}"),
        }),
    }
}
