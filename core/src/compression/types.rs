//! compression/types.rs
//! Codec identifiers, the decoder factory seam, and the error taxonomy.
use std::fmt;
use std::io::{self, Read};
use std::str::FromStr;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::compression::constants::codec_ids;
use crate::utils::enum_name_or_hex;

/// Compression formats the decompressor can be asked for.
#[repr(u8)]
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CodecId {
    Gzip = codec_ids::GZIP,
}

impl CodecId {
    /// Every codec this build knows about, in wire-id order.
    pub const ALL: &'static [CodecId] = &[CodecId::Gzip];

    pub fn name(self) -> &'static str {
        match self {
            CodecId::Gzip => "gzip",
        }
    }
}

impl fmt::Display for CodecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses an HTTP content-coding token (`gzip`, `x-gzip`), case-insensitive.
impl FromStr for CodecId {
    type Err = ParseCodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token.eq_ignore_ascii_case("gzip") || token.eq_ignore_ascii_case("x-gzip") {
            Ok(CodecId::Gzip)
        } else {
            Err(ParseCodecError { encoding: token.to_owned() })
        }
    }
}

/// A content-coding token did not name a known codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported encoding: {encoding:?}")]
pub struct ParseCodecError {
    pub encoding: String,
}

/// Turns a raw compressed stream into a decompressing one.
///
/// Implementations may read a bounded format header from `source` to
/// validate it; header rejection is reported as an `io::Error`.
pub trait DecoderFactory: Send + Sync {
    /// The codec this factory decodes.
    fn codec(&self) -> CodecId;

    fn decoder<'a>(&self, source: Box<dyn Read + 'a>) -> io::Result<Box<dyn Read + 'a>>;
}

/// Fieldless mirror of [`DecompressError`] for counters and host-side mapping.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    UnsupportedCodec,
    DecoderInitFailed,
    ReadFailed,
    EmptyPayload,
    SizeLimitExceeded,
}

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DecompressError {
    /// Raw id is unknown or has no registered decoder. Nothing was read.
    #[error("unsupported compression codec: {}", codec_label(.codec_id))]
    UnsupportedCodec { codec_id: u8 },

    #[error("codec {codec} decoder init failed: {source}")]
    DecoderInitFailed {
        codec: CodecId,
        #[source]
        source: io::Error,
    },

    #[error("codec {codec} read failed: {source}")]
    ReadFailed {
        codec: CodecId,
        #[source]
        source: io::Error,
    },

    #[error("empty profile")]
    EmptyPayload { codec: CodecId },

    #[error("body size exceeds the limit {limit} bytes")]
    SizeLimitExceeded { codec: CodecId, limit: u64 },
}

fn codec_label(raw: &u8) -> String {
    enum_name_or_hex::<CodecId>(*raw)
}

impl DecompressError {
    pub fn kind(&self) -> ErrorKind {
        use DecompressError::*;
        match self {
            UnsupportedCodec { .. } => ErrorKind::UnsupportedCodec,
            DecoderInitFailed { .. } => ErrorKind::DecoderInitFailed,
            ReadFailed { .. } => ErrorKind::ReadFailed,
            EmptyPayload { .. } => ErrorKind::EmptyPayload,
            SizeLimitExceeded { .. } => ErrorKind::SizeLimitExceeded,
        }
    }

    /// The codec involved, when the failure happened after lookup.
    pub fn codec(&self) -> Option<CodecId> {
        use DecompressError::*;
        match self {
            UnsupportedCodec { .. } => None,
            DecoderInitFailed { codec, .. }
            | ReadFailed { codec, .. }
            | EmptyPayload { codec }
            | SizeLimitExceeded { codec, .. } => Some(*codec),
        }
    }
}
