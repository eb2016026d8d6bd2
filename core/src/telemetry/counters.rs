//! telemetry/counters.rs
//! Mutable counters for decompression calls.
//!
//! Summary: each caller owns its counters and records into them; the shared
//! `Decompressor` is never touched. Merge per-worker counters at the end.
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

use crate::compression::ErrorKind;

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecompressCounters {
    pub payloads_accepted: u64,
    pub rejected_unsupported_codec: u64,
    pub rejected_decoder_init: u64,
    pub rejected_read: u64,
    pub rejected_empty: u64,
    pub rejected_oversize: u64,
    /// Decoded bytes handed to callers (accepted payloads only).
    pub bytes_decompressed: u64,
}

impl DecompressCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one accepted payload of `len` decoded bytes.
    pub fn add_accepted(&mut self, len: usize) {
        self.payloads_accepted += 1;
        self.bytes_decompressed += len as u64;
    }

    /// Record one rejected payload.
    pub fn add_rejected(&mut self, kind: ErrorKind) {
        match kind {
            ErrorKind::UnsupportedCodec => self.rejected_unsupported_codec += 1,
            ErrorKind::DecoderInitFailed => self.rejected_decoder_init += 1,
            ErrorKind::ReadFailed => self.rejected_read += 1,
            ErrorKind::EmptyPayload => self.rejected_empty += 1,
            ErrorKind::SizeLimitExceeded => self.rejected_oversize += 1,
        }
    }

    pub fn payloads_rejected(&self) -> u64 {
        self.rejected_unsupported_codec
            + self.rejected_decoder_init
            + self.rejected_read
            + self.rejected_empty
            + self.rejected_oversize
    }

    pub fn payloads_total(&self) -> u64 {
        self.payloads_accepted + self.payloads_rejected()
    }

    // No locks or atomics in workers; fold at the end.
    pub fn merge(&mut self, other: &DecompressCounters) {
        self.payloads_accepted += other.payloads_accepted;
        self.rejected_unsupported_codec += other.rejected_unsupported_codec;
        self.rejected_decoder_init += other.rejected_decoder_init;
        self.rejected_read += other.rejected_read;
        self.rejected_empty += other.rejected_empty;
        self.rejected_oversize += other.rejected_oversize;
        self.bytes_decompressed += other.bytes_decompressed;
    }
}

impl AddAssign for DecompressCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
