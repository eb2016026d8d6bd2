//! compression/constants.rs
//! Stable codec IDs and format constants.

/// Stable codec IDs (u8) shared with callers and wire headers.
/// Append new IDs; never renumber.
pub mod codec_ids {
    pub const GZIP: u8 = 0x00;
}

/// Gzip member header (RFC 1952).
pub mod gzip {
    pub const ID1: u8 = 0x1f;
    pub const ID2: u8 = 0x8b;
    /// CM = 8 (deflate) is the only method defined for gzip.
    pub const CM_DEFLATE: u8 = 0x08;
    /// ID1, ID2, CM, FLG, MTIME(4), XFL, OS
    pub const FIXED_HEADER_LEN: usize = 10;

    // FLG bits
    pub const FHCRC: u8 = 0x02;
    pub const FEXTRA: u8 = 0x04;
    pub const FNAME: u8 = 0x08;
    pub const FCOMMENT: u8 = 0x10;
    pub const FLG_RESERVED: u8 = 0xe0;

    /// Longest FNAME / FCOMMENT accepted, terminating NUL included.
    pub const MAX_HEADER_STRING_LEN: usize = 512;
}
