use std::fmt;

use num_enum::TryFromPrimitive;

pub fn enum_name_or_hex<T>(raw: T::Primitive) -> String
where
    T: TryFromPrimitive + fmt::Display,
    T::Primitive: fmt::LowerHex,
{
    match T::try_from_primitive(raw) {
        Ok(variant) => variant.to_string(),
        Err(_) => format!("0x{:x}", raw),
    }
}

/// Returns an empty, growable buffer pre-sized from `size_hint`.
///
/// The hint only saves reallocations. If the reservation cannot be made
/// (hint larger than the address space or the allocator refuses), the buffer
/// starts unreserved and grows on demand instead.
pub fn prepare_buffer(size_hint: u64) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Ok(hint) = usize::try_from(size_hint) {
        if buf.try_reserve_exact(hint).is_err() {
            tracing::debug!(size_hint, "buffer pre-allocation refused, growing on demand");
        }
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compression::CodecId;

    #[test]
    fn known_codec_prints_name() {
        assert_eq!(enum_name_or_hex::<CodecId>(0x00), "gzip");
    }

    #[test]
    fn unknown_codec_prints_hex() {
        assert_eq!(enum_name_or_hex::<CodecId>(0x2a), "0x2a");
    }

    #[test]
    fn buffer_honours_hint() {
        let buf = prepare_buffer(4096);
        assert!(buf.is_empty());
        assert!(buf.capacity() >= 4096);
    }

    #[test]
    fn absurd_hint_falls_back_to_growable() {
        let mut buf = prepare_buffer(u64::MAX);
        buf.extend_from_slice(b"still usable");
        assert_eq!(buf, b"still usable");
    }
}
