//! decompress-core
//!
//! Bounded decompression for untrusted, compressed payloads.
//! A compression bomb costs at most `max_size + 1` decoded bytes to reject.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod config;
pub mod utils;

pub mod compression;
pub mod telemetry;

pub mod decompressor;

pub use compression::{
    CodecId, CodecRegistry, DecoderFactory, DecompressError, ErrorKind, ParseCodecError,
};
pub use config::{ConfigError, DecompressorConfig};
pub use decompressor::Decompressor;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::compression::{CodecId, CodecRegistry, DecoderFactory, DecompressError, ErrorKind};
    pub use crate::config::DecompressorConfig;
    pub use crate::decompressor::Decompressor;
    pub use crate::telemetry::{DecompressCounters, Stage, TelemetrySnapshot, TelemetryTimer};
}
