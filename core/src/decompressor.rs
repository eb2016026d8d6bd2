//! decompressor.rs
//! Bounded decompression of untrusted payloads.
//!
//! Per call: codec lookup → decoder construction → bounded read → size check.
//! Each step can short-circuit the next, and nothing is read from the source
//! before the lookup succeeds.

use std::io::Read;
use std::time::Instant;

use crate::compression::stream::{drain_bounded, Drained};
use crate::compression::{CodecId, CodecRegistry, DecompressError};
use crate::config::DecompressorConfig;
use crate::telemetry::{DecompressCounters, Stage, TelemetryTimer};
use crate::utils::prepare_buffer;

/// Decodes compressed payloads under a hard size ceiling.
///
/// Immutable after construction; share it across threads by reference or `Arc`.
#[derive(Debug)]
pub struct Decompressor {
    size_hint: u64,
    max_size: u64,
    registry: CodecRegistry,
}

impl Decompressor {
    /// A decompressor with every built-in codec registered.
    pub fn new(size_hint: u64, max_size: u64) -> Self {
        Self::with_registry(size_hint, max_size, CodecRegistry::with_defaults())
    }

    pub fn from_config(config: &DecompressorConfig) -> Self {
        Self::new(config.size_hint, config.max_size)
    }

    pub fn with_registry(size_hint: u64, max_size: u64, registry: CodecRegistry) -> Self {
        if size_hint > max_size {
            tracing::warn!(size_hint, max_size, "size hint exceeds the decompressed size limit");
        }
        Self { size_hint, max_size, registry }
    }

    pub fn size_hint(&self) -> u64 {
        self.size_hint
    }

    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    pub fn supported_codecs(&self) -> Vec<CodecId> {
        self.registry.codecs()
    }

    /// Decodes `source` with `codec`, returning exactly the decoded bytes.
    ///
    /// `codec` is a [`CodecId`] or its raw wire value.
    ///
    /// # Errors
    /// - `UnsupportedCodec` if `codec` is unknown or unregistered; `source` is untouched.
    /// - `DecoderInitFailed` if the format header is rejected.
    /// - `ReadFailed` on an I/O or decode error mid-stream.
    /// - `EmptyPayload` if nothing decodes.
    /// - `SizeLimitExceeded` if more than `max_size` bytes decode.
    pub fn decompress<R: Read>(
        &self,
        source: R,
        codec: impl Into<u8>,
    ) -> Result<Vec<u8>, DecompressError> {
        let result = self.run(source, codec.into(), None);
        log_outcome(&result, self.max_size);
        result
    }

    /// Same as [`decompress`](Self::decompress), also recording the outcome
    /// into caller-owned `counters` and per-stage times into `timer`.
    pub fn decompress_recorded<R: Read>(
        &self,
        source: R,
        codec: impl Into<u8>,
        counters: &mut DecompressCounters,
        timer: &mut TelemetryTimer,
    ) -> Result<Vec<u8>, DecompressError> {
        let result = self.run(source, codec.into(), Some(timer));
        match &result {
            Ok(buf) => counters.add_accepted(buf.len()),
            Err(e) => counters.add_rejected(e.kind()),
        }
        log_outcome(&result, self.max_size);
        result
    }

    fn run<R: Read>(
        &self,
        source: R,
        raw_codec: u8,
        mut timer: Option<&mut TelemetryTimer>,
    ) -> Result<Vec<u8>, DecompressError> {
        let mut clock = Instant::now();

        let resolved = self.registry.resolve(raw_codec);
        lap(&mut timer, &mut clock, Stage::Lookup);
        let (codec, factory) = resolved?;

        let decoder = factory
            .decoder(Box::new(source))
            .map_err(|source| DecompressError::DecoderInitFailed { codec, source });
        lap(&mut timer, &mut clock, Stage::DecoderInit);
        let decoder = decoder?;

        let mut buf = prepare_buffer(self.size_hint);
        let drained = drain_bounded(decoder, self.max_size, &mut buf)
            .map_err(|source| DecompressError::ReadFailed { codec, source });
        lap(&mut timer, &mut clock, Stage::BoundedRead);

        // `buf` is dropped here on every rejection; only an accepted payload leaves.
        let checked = match drained? {
            Drained::Over => Err(DecompressError::SizeLimitExceeded { codec, limit: self.max_size }),
            Drained::Within(0) => Err(DecompressError::EmptyPayload { codec }),
            Drained::Within(_) => Ok(buf),
        };
        lap(&mut timer, &mut clock, Stage::Validate);
        checked
    }
}

fn lap(timer: &mut Option<&mut TelemetryTimer>, clock: &mut Instant, stage: Stage) {
    if let Some(t) = timer.as_deref_mut() {
        t.add_stage_time(stage, clock.elapsed());
    }
    *clock = Instant::now();
}

fn log_outcome(result: &Result<Vec<u8>, DecompressError>, max_size: u64) {
    match result {
        Ok(buf) => tracing::debug!(bytes = buf.len(), limit = max_size, "payload decompressed"),
        Err(e @ DecompressError::SizeLimitExceeded { .. }) => {
            tracing::warn!(codec = ?e.codec(), limit = max_size, "rejected oversized payload")
        }
        Err(e) => tracing::debug!(kind = ?e.kind(), error = %e, "payload rejected"),
    }
}
