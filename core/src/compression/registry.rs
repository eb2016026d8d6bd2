//! compression/registry.rs
//! Codec registry: resolves codec IDs to decoder factories.

use std::collections::HashMap;
use std::fmt;

use num_enum::TryFromPrimitive;

use crate::compression::codecs::GzipFactory;
use crate::compression::types::{CodecId, DecoderFactory, DecompressError};

/// Fixed mapping from [`CodecId`] to its decoder factory.
///
/// Built once, then moved into a [`Decompressor`](crate::Decompressor), which
/// only ever reads it.
#[derive(Default)]
pub struct CodecRegistry {
    factories: HashMap<CodecId, Box<dyn DecoderFactory>>,
}

impl CodecRegistry {
    /// A registry with no codecs; every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every codec this build ships a decoder for.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(GzipFactory::new()));
        registry
    }

    /// Adds `factory` under its own codec, replacing any previous entry.
    pub fn register(&mut self, factory: Box<dyn DecoderFactory>) -> &mut Self {
        self.factories.insert(factory.codec(), factory);
        self
    }

    pub fn get(&self, codec: CodecId) -> Option<&dyn DecoderFactory> {
        self.factories.get(&codec).map(|f| f.as_ref())
    }

    /// Resolves a raw wire id. Unknown ids and unregistered codecs both miss.
    pub fn resolve(&self, raw: u8) -> Result<(CodecId, &dyn DecoderFactory), DecompressError> {
        let codec = CodecId::try_from_primitive(raw)
            .map_err(|_| DecompressError::UnsupportedCodec { codec_id: raw })?;
        let factory = self
            .get(codec)
            .ok_or(DecompressError::UnsupportedCodec { codec_id: raw })?;
        Ok((codec, factory))
    }

    /// Registered codecs in wire-id order.
    pub fn codecs(&self) -> Vec<CodecId> {
        let mut codecs: Vec<CodecId> = self.factories.keys().copied().collect();
        codecs.sort_by_key(|c| u8::from(*c));
        codecs
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecRegistry")
            .field("codecs", &self.codecs())
            .finish()
    }
}
