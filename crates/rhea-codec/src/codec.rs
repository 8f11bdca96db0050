//! Encoder/decoder contracts and header encode/decode.
//!
//! Payload types implement [`Record`] once against the [`Encoder`] and
//! [`Decoder`] traits; the text and binary backends differ only in how
//! primitives are laid out, never in logical structure.

use rhea_core::{FileHeader, FileKind, Version, FILE_VERSION};

use crate::error::CodecError;

/// Sink for primitive values.
pub trait Encoder {
    /// Write the backend's magic marker.
    fn write_magic(&mut self) -> Result<(), CodecError>;
    /// Write a single byte.
    fn write_u8(&mut self, v: u8) -> Result<(), CodecError>;
    /// Write a u32.
    fn write_u32(&mut self, v: u32) -> Result<(), CodecError>;
    /// Write a u64.
    fn write_u64(&mut self, v: u64) -> Result<(), CodecError>;
    /// Write an f64 so that it reads back equal.
    fn write_f64(&mut self, v: f64) -> Result<(), CodecError>;
    /// Write a UTF-8 string.
    fn write_str(&mut self, s: &str) -> Result<(), CodecError>;
    /// Write an opaque byte array.
    fn write_bytes(&mut self, b: &[u8]) -> Result<(), CodecError>;

    /// Write a boolean as a `0`/`1` byte.
    fn write_bool(&mut self, v: bool) -> Result<(), CodecError> {
        self.write_u8(u8::from(v))
    }

    /// Write a collection length.
    fn write_len(&mut self, n: usize) -> Result<(), CodecError> {
        let n = u32::try_from(n)
            .map_err(|_| CodecError::malformed(format!("length {n} exceeds u32")))?;
        self.write_u32(n)
    }

    /// Write a file kind.
    fn write_kind(&mut self, kind: FileKind) -> Result<(), CodecError> {
        self.write_u8(kind.tag())
    }
}

/// Source of primitive values, mirroring [`Encoder`].
pub trait Decoder {
    /// Read and check the backend's magic marker.
    fn read_magic(&mut self) -> Result<(), CodecError>;
    /// Read a single byte.
    fn read_u8(&mut self) -> Result<u8, CodecError>;
    /// Read a u32.
    fn read_u32(&mut self) -> Result<u32, CodecError>;
    /// Read a u64.
    fn read_u64(&mut self) -> Result<u64, CodecError>;
    /// Read an f64.
    fn read_f64(&mut self) -> Result<f64, CodecError>;
    /// Read a UTF-8 string.
    fn read_str(&mut self) -> Result<String, CodecError>;
    /// Read an opaque byte array.
    fn read_bytes(&mut self) -> Result<Vec<u8>, CodecError>;

    /// Read a `0`/`1` boolean byte.
    fn read_bool(&mut self) -> Result<bool, CodecError> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            flag => Err(CodecError::malformed(format!("invalid boolean flag {flag}"))),
        }
    }

    /// Read a collection length.
    fn read_len(&mut self) -> Result<usize, CodecError> {
        Ok(self.read_u32()? as usize)
    }

    /// Read a file kind.
    fn read_kind(&mut self) -> Result<FileKind, CodecError> {
        let tag = self.read_u8()?;
        FileKind::from_tag(tag).ok_or(CodecError::UnknownKind {
            found: tag.to_string(),
        })
    }
}

/// A payload that can be persisted as a file of kind [`KIND`](Self::KIND).
pub trait Record: Sized {
    /// File kind recorded in the header.
    const KIND: FileKind;

    /// Encode the payload (the header is written separately).
    fn encode(&self, enc: &mut dyn Encoder) -> Result<(), CodecError>;

    /// Decode a payload written with format `version`.
    ///
    /// Fields introduced after `version` must take their defaults.
    fn decode(dec: &mut dyn Decoder, version: Version) -> Result<Self, CodecError>;
}

/// Encode a file header: magic, kind, version triple, information.
pub fn encode_header(enc: &mut dyn Encoder, header: &FileHeader) -> Result<(), CodecError> {
    enc.write_magic()?;
    enc.write_kind(header.kind)?;
    enc.write_u32(header.version.major)?;
    enc.write_u32(header.version.minor)?;
    enc.write_u32(header.version.release)?;
    enc.write_str(&header.information)
}

/// Decode and validate a file header.
///
/// Fails with [`CodecError::UnsupportedVersion`] for files newer than
/// [`FILE_VERSION`].
pub fn decode_header(dec: &mut dyn Decoder) -> Result<FileHeader, CodecError> {
    let header = read_header_fields(dec)?;
    check_version(&header)?;
    Ok(header)
}

/// Decode a header and check it declares `expected`.
///
/// The kind is checked before the version, so a newer file of another kind
/// reports [`CodecError::KindMismatch`].
pub fn decode_header_expecting(
    dec: &mut dyn Decoder,
    expected: FileKind,
) -> Result<FileHeader, CodecError> {
    let header = read_header_fields(dec)?;
    if header.kind != expected {
        return Err(CodecError::KindMismatch {
            expected,
            found: header.kind,
        });
    }
    check_version(&header)?;
    Ok(header)
}

fn read_header_fields(dec: &mut dyn Decoder) -> Result<FileHeader, CodecError> {
    dec.read_magic()?;
    let kind = dec.read_kind()?;
    let version = Version::new(dec.read_u32()?, dec.read_u32()?, dec.read_u32()?);
    let information = dec.read_str()?;
    Ok(FileHeader {
        kind,
        version,
        information,
    })
}

fn check_version(header: &FileHeader) -> Result<(), CodecError> {
    if header.version > FILE_VERSION {
        return Err(CodecError::UnsupportedVersion {
            found: header.version,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::{BinaryDecoder, BinaryEncoder};

    fn newer_model_header() -> Vec<u8> {
        let mut header = FileHeader::new(FileKind::Model);
        header.version = Version::new(FILE_VERSION.major + 1, 0, 0);
        let mut enc = BinaryEncoder::new(Vec::new());
        encode_header(&mut enc, &header).unwrap();
        enc.into_inner()
    }

    #[test]
    fn kind_is_checked_before_version() {
        let bytes = newer_model_header();
        let mut dec = BinaryDecoder::new(bytes.as_slice());
        let err = decode_header_expecting(&mut dec, FileKind::Material).unwrap_err();
        assert!(
            matches!(
                err,
                CodecError::KindMismatch {
                    expected: FileKind::Material,
                    found: FileKind::Model
                }
            ),
            "{err}"
        );
    }

    #[test]
    fn newer_version_of_expected_kind_is_unsupported() {
        let bytes = newer_model_header();
        let mut dec = BinaryDecoder::new(bytes.as_slice());
        assert!(matches!(
            decode_header_expecting(&mut dec, FileKind::Model),
            Err(CodecError::UnsupportedVersion { .. })
        ));
        let mut dec = BinaryDecoder::new(bytes.as_slice());
        assert!(matches!(
            decode_header(&mut dec),
            Err(CodecError::UnsupportedVersion { .. })
        ));
    }
}
