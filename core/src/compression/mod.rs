//! compression/mod.rs
//! Codec-pluggable decoding with a hard ceiling on decoded size.
//!
//! - `CodecId` names a format; `registry` maps it to a `DecoderFactory`.
//! - Factories validate the format header before any payload is decoded.
//! - `stream::drain_bounded` reads at most `max_size + 1` decoded bytes.

pub mod constants;
pub mod types;
pub mod registry;
pub mod codecs;
pub mod stream;

pub use constants::*;
pub use types::*;
pub use registry::*;
