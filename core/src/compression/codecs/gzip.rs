//! compression/codecs/gzip.rs
//! Gzip decoder factory via flate2.
//!
//! The whole first member header (fixed part, FEXTRA, FNAME, FCOMMENT, FHCRC)
//! is read and checked up front, so a malformed header fails at construction
//! before any payload byte is decoded. The header bytes are replayed in front
//! of the rest of the source so flate2 still sees a complete stream.

use std::io::{self, Cursor, Read};

use flate2::read::MultiGzDecoder;

use crate::compression::constants::gzip;
use crate::compression::types::{CodecId, DecoderFactory};

/// Decodes RFC 1952 streams, including concatenated members.
#[derive(Debug, Default, Clone, Copy)]
pub struct GzipFactory;

impl GzipFactory {
    pub fn new() -> Self {
        Self
    }
}

impl DecoderFactory for GzipFactory {
    fn codec(&self) -> CodecId {
        CodecId::Gzip
    }

    fn decoder<'a>(&self, mut source: Box<dyn Read + 'a>) -> io::Result<Box<dyn Read + 'a>> {
        match read_header(&mut source)? {
            // No bytes at all: an empty body, not a malformed one.
            None => Ok(Box::new(io::empty())),
            Some(header) => {
                let replay = Cursor::new(header).chain(source);
                Ok(Box::new(MultiGzDecoder::new(replay)))
            }
        }
    }
}

/// Reads and validates one member header, returning every byte consumed.
/// `None` when the source ends before its first byte.
fn read_header(source: &mut dyn Read) -> io::Result<Option<Vec<u8>>> {
    let mut fixed = [0u8; gzip::FIXED_HEADER_LEN];
    let filled = read_up_to(source, &mut fixed)?;
    if filled == 0 {
        return Ok(None);
    }
    if filled < fixed.len() {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("truncated gzip header: got {} of {} bytes", filled, fixed.len()),
        ));
    }
    check_fixed(&fixed)?;

    let flags = fixed[3];
    let mut header = fixed.to_vec();

    if flags & gzip::FEXTRA != 0 {
        let mut xlen = [0u8; 2];
        source.read_exact(&mut xlen)?;
        header.extend_from_slice(&xlen);
        let start = header.len();
        header.resize(start + u16::from_le_bytes(xlen) as usize, 0);
        source.read_exact(&mut header[start..])?;
    }
    if flags & gzip::FNAME != 0 {
        read_zero_terminated(source, &mut header, "FNAME")?;
    }
    if flags & gzip::FCOMMENT != 0 {
        read_zero_terminated(source, &mut header, "FCOMMENT")?;
    }
    if flags & gzip::FHCRC != 0 {
        let mut crc = [0u8; 2];
        source.read_exact(&mut crc)?;
        let expected = u16::from_le_bytes(crc);
        let actual = (crc32fast::hash(&header) & 0xffff) as u16;
        if expected != actual {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("gzip header checksum mismatch: {:04x} != {:04x}", expected, actual),
            ));
        }
        header.extend_from_slice(&crc);
    }
    Ok(Some(header))
}

fn check_fixed(header: &[u8; gzip::FIXED_HEADER_LEN]) -> io::Result<()> {
    if header[0] != gzip::ID1 || header[1] != gzip::ID2 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("invalid gzip magic: {:02x} {:02x}", header[0], header[1]),
        ));
    }
    if header[2] != gzip::CM_DEFLATE {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("unsupported gzip compression method: {}", header[2]),
        ));
    }
    if header[3] & gzip::FLG_RESERVED != 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("reserved gzip flag bits set: {:02x}", header[3]),
        ));
    }
    Ok(())
}

/// Appends a NUL-terminated field (NUL included) to `header`.
fn read_zero_terminated(source: &mut dyn Read, header: &mut Vec<u8>, field: &str) -> io::Result<()> {
    let mut byte = [0u8; 1];
    for _ in 0..gzip::MAX_HEADER_STRING_LEN {
        source.read_exact(&mut byte)?;
        header.push(byte[0]);
        if byte[0] == 0 {
            return Ok(());
        }
    }
    Err(io::Error::new(
        io::ErrorKind::InvalidData,
        format!("gzip {} longer than {} bytes", field, gzip::MAX_HEADER_STRING_LEN),
    ))
}

/// Like `read_exact`, but reports a short read instead of failing on it.
fn read_up_to(r: &mut dyn Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match r.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
