//! Packed binary backend.
//!
//! All integers are little-endian. Strings and byte arrays are
//! length-prefixed with a `u32` length. Floats are stored as their IEEE-754
//! bit pattern.

use std::io::{Read, Write};

use crate::codec::{Decoder, Encoder};
use crate::error::CodecError;
use crate::MAGIC;

/// Writes primitives in the packed binary layout.
pub struct BinaryEncoder<W: Write> {
    writer: W,
}

impl<W: Write> BinaryEncoder<W> {
    /// Wrap a byte sink.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the encoder and return the underlying sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Encoder for BinaryEncoder<W> {
    fn write_magic(&mut self) -> Result<(), CodecError> {
        self.writer.write_all(&MAGIC)?;
        Ok(())
    }

    fn write_u8(&mut self, v: u8) -> Result<(), CodecError> {
        self.writer.write_all(&[v])?;
        Ok(())
    }

    fn write_u32(&mut self, v: u32) -> Result<(), CodecError> {
        self.writer.write_all(&v.to_le_bytes())?;
        Ok(())
    }

    fn write_u64(&mut self, v: u64) -> Result<(), CodecError> {
        self.writer.write_all(&v.to_le_bytes())?;
        Ok(())
    }

    fn write_f64(&mut self, v: f64) -> Result<(), CodecError> {
        self.writer.write_all(&v.to_le_bytes())?;
        Ok(())
    }

    fn write_str(&mut self, s: &str) -> Result<(), CodecError> {
        self.write_bytes(s.as_bytes())
    }

    fn write_bytes(&mut self, b: &[u8]) -> Result<(), CodecError> {
        self.write_len(b.len())?;
        self.writer.write_all(b)?;
        Ok(())
    }
}

/// Reads primitives in the packed binary layout.
pub struct BinaryDecoder<R: Read> {
    reader: R,
}

impl<R: Read> BinaryDecoder<R> {
    /// Wrap a byte source.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut buf = [0u8; N];
        self.reader.read_exact(&mut buf)?;
        Ok(buf)
    }
}

impl<R: Read> Decoder for BinaryDecoder<R> {
    fn read_magic(&mut self) -> Result<(), CodecError> {
        let magic: [u8; 4] = match self.read_array() {
            Ok(m) => m,
            Err(CodecError::UnexpectedEof) => return Err(CodecError::InvalidMagic),
            Err(e) => return Err(e),
        };
        if magic != MAGIC {
            return Err(CodecError::InvalidMagic);
        }
        Ok(())
    }

    fn read_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.read_array::<1>()?[0])
    }

    fn read_u32(&mut self) -> Result<u32, CodecError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    fn read_u64(&mut self) -> Result<u64, CodecError> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    fn read_f64(&mut self) -> Result<f64, CodecError> {
        Ok(f64::from_le_bytes(self.read_array()?))
    }

    fn read_str(&mut self) -> Result<String, CodecError> {
        let bytes = self.read_bytes()?;
        String::from_utf8(bytes)
            .map_err(|e| CodecError::malformed(format!("invalid UTF-8 string: {e}")))
    }

    fn read_bytes(&mut self) -> Result<Vec<u8>, CodecError> {
        let len = self.read_len()?;
        let mut buf = Vec::new();
        // Bound the allocation by what the stream actually holds.
        let read = (&mut self.reader).take(len as u64).read_to_end(&mut buf)?;
        if read != len {
            return Err(CodecError::UnexpectedEof);
        }
        Ok(buf)
    }
}
