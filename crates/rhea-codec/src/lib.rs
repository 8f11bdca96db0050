//! Versioned file codec for rhea.
//!
//! Persists `(FileHeader, payload)` pairs in one of two encodings chosen by
//! file extension, and commits writes atomically.
//!
//! # Architecture
//!
//! - [`Encoder`] / [`Decoder`] are the primitive contracts; [`TextEncoder`]
//!   and [`BinaryEncoder`] (and their decoders) implement them
//! - [`Record`] is implemented once per payload type against those traits
//! - [`write_file`] / [`read_file`] wrap header handling, kind checking,
//!   atomic commit and error rewrapping
//! - [`write_link`] / [`resolve_link`] handle link indirection files
//!
//! # Format
//!
//! ```text
//! [MAGIC] [KIND] [VERSION major minor release] [INFORMATION] [PAYLOAD]
//! ```
//!
//! The binary encoding starts with `b"RHEA"` and stores the kind as a tag
//! byte; the text encoding starts with a `#RHEA` line and stores the kind by
//! id. Both carry the same logical fields in the same order.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod binary;
pub mod codec;
pub mod encoding;
pub mod error;
pub mod file;
pub mod link;
pub mod paths;
pub mod text;

pub use binary::{BinaryDecoder, BinaryEncoder};
pub use codec::{decode_header, decode_header_expecting, encode_header, Decoder, Encoder, Record};
pub use encoding::Encoding;
pub use error::CodecError;
pub use file::{decode_record, encode_record, read_file, read_header, write_file, write_record};
pub use link::{read_link, resolve_link, write_link, Link};
pub use paths::{extension, file_name_with_suffix, file_name_with_time_step, remove_file_if_exists};
pub use text::{TextDecoder, TextEncoder};

/// Magic bytes at the start of every binary file.
pub const MAGIC: [u8; 4] = *b"RHEA";

/// First line of every text file.
pub const TEXT_MAGIC: &str = "#RHEA";
