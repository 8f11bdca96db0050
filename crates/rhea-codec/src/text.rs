//! Human-readable line-oriented backend.
//!
//! Each primitive occupies exactly one line. Strings escape `\`, newline
//! and carriage return so they stay on their line; byte arrays are written
//! as lowercase hex. File kinds are written by id rather than by tag.

use std::io::{BufRead, Write};

use rhea_core::FileKind;

use crate::codec::{Decoder, Encoder};
use crate::error::CodecError;
use crate::TEXT_MAGIC;

/// Writes primitives one per line.
pub struct TextEncoder<W: Write> {
    writer: W,
}

impl<W: Write> TextEncoder<W> {
    /// Wrap a byte sink.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the encoder and return the underlying sink.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn line(&mut self, s: &str) -> Result<(), CodecError> {
        self.writer.write_all(s.as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

impl<W: Write> Encoder for TextEncoder<W> {
    fn write_magic(&mut self) -> Result<(), CodecError> {
        self.line(TEXT_MAGIC)
    }

    fn write_u8(&mut self, v: u8) -> Result<(), CodecError> {
        self.line(&v.to_string())
    }

    fn write_u32(&mut self, v: u32) -> Result<(), CodecError> {
        self.line(&v.to_string())
    }

    fn write_u64(&mut self, v: u64) -> Result<(), CodecError> {
        self.line(&v.to_string())
    }

    fn write_f64(&mut self, v: f64) -> Result<(), CodecError> {
        // Debug formatting is the shortest representation that parses back
        // to the same value.
        self.line(&format!("{v:?}"))
    }

    fn write_str(&mut self, s: &str) -> Result<(), CodecError> {
        self.line(&escape(s))
    }

    fn write_bytes(&mut self, b: &[u8]) -> Result<(), CodecError> {
        let hex: String = b.iter().map(|byte| format!("{byte:02x}")).collect();
        self.line(&hex)
    }

    fn write_kind(&mut self, kind: FileKind) -> Result<(), CodecError> {
        self.line(kind.id())
    }
}

/// Reads primitives one per line.
pub struct TextDecoder<R: BufRead> {
    reader: R,
    line_no: usize,
    buf: String,
}

impl<R: BufRead> TextDecoder<R> {
    /// Wrap a buffered byte source.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            buf: String::new(),
        }
    }

    fn next_line(&mut self) -> Result<&str, CodecError> {
        self.buf.clear();
        if self.reader.read_line(&mut self.buf)? == 0 {
            return Err(CodecError::UnexpectedEof);
        }
        self.line_no += 1;
        let line = self.buf.strip_suffix('\n').unwrap_or(&self.buf);
        Ok(line.strip_suffix('\r').unwrap_or(line))
    }

    fn parse<T: std::str::FromStr>(&mut self, what: &str) -> Result<T, CodecError>
    where
        T::Err: std::fmt::Display,
    {
        let line = self.next_line()?.trim().to_string();
        line.parse().map_err(|e| {
            CodecError::malformed(format!(
                "line {}: invalid {what} '{line}': {e}",
                self.line_no
            ))
        })
    }
}

impl<R: BufRead> Decoder for TextDecoder<R> {
    fn read_magic(&mut self) -> Result<(), CodecError> {
        match self.next_line() {
            Ok(line) if line == TEXT_MAGIC => Ok(()),
            Ok(_) | Err(CodecError::UnexpectedEof) => Err(CodecError::InvalidMagic),
            Err(e) => Err(e),
        }
    }

    fn read_u8(&mut self) -> Result<u8, CodecError> {
        self.parse("u8")
    }

    fn read_u32(&mut self) -> Result<u32, CodecError> {
        self.parse("u32")
    }

    fn read_u64(&mut self) -> Result<u64, CodecError> {
        self.parse("u64")
    }

    fn read_f64(&mut self) -> Result<f64, CodecError> {
        self.parse("f64")
    }

    fn read_str(&mut self) -> Result<String, CodecError> {
        let line_no = self.line_no + 1;
        let line = self.next_line()?;
        unescape(line).ok_or_else(|| {
            CodecError::malformed(format!("line {line_no}: invalid escape sequence"))
        })
    }

    fn read_bytes(&mut self) -> Result<Vec<u8>, CodecError> {
        let line_no = self.line_no + 1;
        let line = self.next_line()?.trim();
        decode_hex(line)
            .ok_or_else(|| CodecError::malformed(format!("line {line_no}: invalid hex data")))
    }

    fn read_kind(&mut self) -> Result<FileKind, CodecError> {
        let line = self.next_line()?.trim();
        FileKind::from_id(line).ok_or_else(|| CodecError::UnknownKind {
            found: line.to_string(),
        })
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

fn unescape(s: &str) -> Option<String> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            '\\' => out.push('\\'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            _ => return None,
        }
    }
    Some(out)
}

fn decode_hex(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| s.get(i..i + 2).and_then(|pair| u8::from_str_radix(pair, 16).ok()))
        .collect()
}
