//! File-level read and atomic write of `(FileHeader, Record)` pairs.
//!
//! Writes go to a sibling `<name>.tmp` file which is flushed, synced and
//! renamed over the destination. Any failure before the rename removes the
//! temporary file and leaves the destination untouched.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use rhea_core::{FileHeader, RheaError};
use tracing::debug;

use crate::binary::{BinaryDecoder, BinaryEncoder};
use crate::codec::{decode_header, decode_header_expecting, encode_header, Decoder, Encoder, Record};
use crate::encoding::Encoding;
use crate::error::CodecError;
use crate::paths::temp_path;
use crate::text::{TextDecoder, TextEncoder};

/// Write `payload` under `header` to `path`, atomically.
///
/// The encoding follows the extension of `path`. `header.kind` must be
/// `T::KIND`.
pub fn write_file<T: Record>(
    path: &Path,
    header: &FileHeader,
    payload: &T,
) -> Result<(), RheaError> {
    if header.kind != T::KIND {
        return Err(RheaError::InvalidFileFormat {
            path: path.to_path_buf(),
            expected: T::KIND,
            found: header.kind,
        });
    }
    let encoding = Encoding::from_path(path)?;
    let tmp = temp_path(path);
    if let Err(e) = commit(path, &tmp, encoding, header, payload) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    debug!(
        path = %path.display(),
        kind = %header.kind,
        version = %header.version,
        %encoding,
        "file written"
    );
    Ok(())
}

/// Write `payload` with a fresh header for `T::KIND` at the current version.
pub fn write_record<T: Record>(path: &Path, payload: &T) -> Result<(), RheaError> {
    write_file(path, &FileHeader::new(T::KIND), payload)
}

fn commit<T: Record>(
    path: &Path,
    tmp: &Path,
    encoding: Encoding,
    header: &FileHeader,
    payload: &T,
) -> Result<(), RheaError> {
    let write_err = |e: CodecError| e.into_write_error(path);
    let file = File::create(tmp).map_err(|source| RheaError::OpenFile {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    encode_to(&mut writer, encoding, header, payload).map_err(write_err)?;
    let file = writer
        .into_inner()
        .map_err(|e| write_err(e.into_error().into()))?;
    file.sync_all().map_err(|e| write_err(e.into()))?;
    fs::rename(tmp, path).map_err(|e| write_err(e.into()))
}

/// Read the header and payload of `path`, which must hold a `T::KIND` file.
///
/// # Errors
///
/// - [`RheaError::InvalidFileName`] if the extension is not recognized.
/// - [`RheaError::OpenFile`] if `path` cannot be opened.
/// - [`RheaError::InvalidFileFormat`] if the header declares another kind.
/// - [`RheaError::ReadFile`] on truncated or malformed content.
pub fn read_file<T: Record>(path: &Path) -> Result<(FileHeader, T), RheaError> {
    let encoding = Encoding::from_path(path)?;
    let reader = open(path)?;
    let (header, payload) = decode_from(reader, encoding).map_err(|e| e.into_read_error(path))?;
    debug!(
        path = %path.display(),
        kind = %header.kind,
        version = %header.version,
        %encoding,
        "file read"
    );
    Ok((header, payload))
}

/// Read only the header of `path`, whatever its kind.
pub fn read_header(path: &Path) -> Result<FileHeader, RheaError> {
    let encoding = Encoding::from_path(path)?;
    let reader = open(path)?;
    let result = match encoding {
        Encoding::Text => decode_header(&mut TextDecoder::new(reader)),
        Encoding::Binary => decode_header(&mut BinaryDecoder::new(reader)),
    };
    result.map_err(|e| e.into_read_error(path))
}

/// Encode a header and payload into memory.
pub fn encode_record<T: Record>(
    encoding: Encoding,
    header: &FileHeader,
    payload: &T,
) -> Result<Vec<u8>, CodecError> {
    let mut buf = Vec::new();
    encode_to(&mut buf, encoding, header, payload)?;
    Ok(buf)
}

/// Decode a header and payload from memory, checking the header kind.
pub fn decode_record<T: Record>(
    encoding: Encoding,
    bytes: &[u8],
) -> Result<(FileHeader, T), CodecError> {
    decode_from(bytes, encoding)
}

fn open(path: &Path) -> Result<BufReader<File>, RheaError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| RheaError::OpenFile {
            path: path.to_path_buf(),
            source,
        })
}

fn encode_to<W: Write, T: Record>(
    writer: W,
    encoding: Encoding,
    header: &FileHeader,
    payload: &T,
) -> Result<(), CodecError> {
    match encoding {
        Encoding::Text => encode_with(&mut TextEncoder::new(writer), header, payload),
        Encoding::Binary => encode_with(&mut BinaryEncoder::new(writer), header, payload),
    }
}

fn encode_with<T: Record>(
    enc: &mut dyn Encoder,
    header: &FileHeader,
    payload: &T,
) -> Result<(), CodecError> {
    encode_header(enc, header)?;
    payload.encode(enc)
}

fn decode_from<R: BufRead, T: Record>(
    reader: R,
    encoding: Encoding,
) -> Result<(FileHeader, T), CodecError> {
    match encoding {
        Encoding::Text => decode_with(&mut TextDecoder::new(reader)),
        Encoding::Binary => decode_with(&mut BinaryDecoder::new(reader)),
    }
}

fn decode_with<T: Record>(dec: &mut dyn Decoder) -> Result<(FileHeader, T), CodecError> {
    let header = decode_header_expecting(dec, T::KIND)?;
    let payload = T::decode(dec, header.version)?;
    Ok((header, payload))
}
