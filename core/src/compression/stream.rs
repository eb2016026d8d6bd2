//! compression/stream.rs
//! Bounded draining of a decompressing stream.
use std::io::{self, Read};

/// Outcome of draining a stream under a ceiling.
#[derive(Debug, PartialEq, Eq)]
pub enum Drained {
    /// Stream ended within the ceiling; `n` bytes were appended.
    Within(u64),
    /// More than `max_size` bytes were available. Reading stopped at `max_size + 1`.
    Over,
}

/// Appends at most `max_size + 1` bytes from `r` into `out`.
///
/// The one extra byte tells "exactly at the limit" apart from "over the limit"
/// in a single pass, so the work done never exceeds `max_size + 1` decoded
/// bytes no matter how far `r` would expand. `out` may be pre-sized; it is
/// left holding whatever was read, and the caller decides whether to keep it.
pub fn drain_bounded<R: Read>(r: R, max_size: u64, out: &mut Vec<u8>) -> io::Result<Drained> {
    let mut limited = r.take(max_size.saturating_add(1));
    let n = limited.read_to_end(out)? as u64;
    if n > max_size {
        Ok(Drained::Over)
    } else {
        Ok(Drained::Within(n))
    }
}
