//! compression/codecs/mod.rs
//! Decoder factories, one per supported codec.

pub mod gzip;

pub use gzip::*;
