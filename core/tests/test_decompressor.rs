// End-to-end behaviour of `Decompressor::decompress`: accepted payloads,
// the inclusive ceiling, and every rejection kind.

#[cfg(test)]
mod tests {
    use std::error::Error as _;
    use std::io::{self, Read, Write};

    use flate2::{write::GzEncoder, Compression, GzBuilder};
    use proptest::prelude::*;

    use decompress_core::{CodecId, DecompressError, Decompressor, ErrorKind};

    fn gz(data: &[u8]) -> Vec<u8> {
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(data).unwrap();
        enc.finish().unwrap()
    }

    fn plaintext(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i % 251) as u8).collect()
    }

    /// Yields `inner` up to `after` bytes, then fails every read.
    struct FailAfter<'a> {
        inner: &'a [u8],
        after: usize,
    }

    impl Read for FailAfter<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.after == 0 {
                return Err(io::Error::new(io::ErrorKind::ConnectionReset, "peer went away"));
            }
            let n = buf.len().min(self.after).min(self.inner.len());
            buf[..n].copy_from_slice(&self.inner[..n]);
            self.inner = &self.inner[n..];
            self.after -= n;
            Ok(n)
        }
    }

    // --- accepted payloads ---

    #[test]
    fn small_payload_under_limit_is_returned_verbatim() {
        let d = Decompressor::new(512, 1024);
        let plain = plaintext(100);

        let out = d.decompress(&gz(&plain)[..], CodecId::Gzip).unwrap();

        assert_eq!(out.len(), 100);
        assert_eq!(out, plain);
    }

    #[test]
    fn payload_exactly_at_limit_is_accepted() {
        let d = Decompressor::new(0, 1024);
        let plain = plaintext(1024);

        let out = d.decompress(&gz(&plain)[..], CodecId::Gzip).unwrap();
        assert_eq!(out, plain);
    }

    #[test]
    fn raw_wire_id_selects_codec() {
        let d = Decompressor::new(64, 1024);
        let out = d.decompress(&gz(b"raw id")[..], 0x00u8).unwrap();
        assert_eq!(out, b"raw id");
    }

    #[test]
    fn hint_larger_than_payload_does_not_pad_output() {
        let d = Decompressor::new(1 << 20, 1 << 21);
        let out = d.decompress(&gz(b"tiny")[..], CodecId::Gzip).unwrap();
        assert_eq!(out, b"tiny");
    }

    #[test]
    fn hint_above_limit_is_not_clamped_and_limit_still_holds() {
        let d = Decompressor::new(4096, 16);
        assert_eq!(d.size_hint(), 4096);

        assert_eq!(d.decompress(&gz(&[1u8; 16])[..], CodecId::Gzip).unwrap().len(), 16);
        let err = d.decompress(&gz(&[1u8; 17])[..], CodecId::Gzip).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SizeLimitExceeded);
    }

    #[test]
    fn concatenated_members_decode_as_one_payload() {
        let d = Decompressor::new(0, 1024);
        let mut wire = gz(b"first ");
        wire.extend_from_slice(&gz(b"second"));

        let out = d.decompress(&wire[..], CodecId::Gzip).unwrap();
        assert_eq!(out, b"first second");
    }

    #[test]
    fn repeated_calls_are_independent() {
        let d = Decompressor::new(128, 1024);
        let wire = gz(&plaintext(300));

        let a = d.decompress(&wire.clone()[..], CodecId::Gzip).unwrap();
        let b = d.decompress(&wire[..], CodecId::Gzip).unwrap();

        assert_eq!(a, b);
        assert_eq!(d.size_hint(), 128);
        assert_eq!(d.max_size(), 1024);
        assert_eq!(d.supported_codecs(), vec![CodecId::Gzip]);
    }

    // --- size ceiling ---

    #[test]
    fn payload_over_limit_reports_the_limit() {
        let d = Decompressor::new(512, 1024);

        let err = d.decompress(&gz(&plaintext(2000))[..], CodecId::Gzip).unwrap_err();

        assert!(matches!(
            err,
            DecompressError::SizeLimitExceeded { codec: CodecId::Gzip, limit: 1024 }
        ));
        assert!(err.to_string().contains("1024"));
    }

    #[test]
    fn one_byte_over_limit_is_rejected() {
        let d = Decompressor::new(0, 1024);
        let err = d.decompress(&gz(&plaintext(1025))[..], CodecId::Gzip).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SizeLimitExceeded);
    }

    #[test]
    fn zero_limit_rejects_any_content() {
        let d = Decompressor::new(0, 0);
        let err = d.decompress(&gz(b"x")[..], CodecId::Gzip).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SizeLimitExceeded);
    }

    // --- empty payloads ---

    #[test]
    fn zero_compressed_bytes_is_empty_payload() {
        let d = Decompressor::new(64, 1024);
        let err = d.decompress(io::empty(), CodecId::Gzip).unwrap_err();
        assert!(matches!(err, DecompressError::EmptyPayload { codec: CodecId::Gzip }));
        assert_eq!(err.to_string(), "empty profile");
    }

    #[test]
    fn gzip_of_nothing_is_empty_payload() {
        let d = Decompressor::new(64, 1024);
        let err = d.decompress(&gz(b"")[..], CodecId::Gzip).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyPayload);
    }

    // --- malformed input ---

    #[test]
    fn corrupted_magic_fails_decoder_init() {
        let d = Decompressor::new(64, 1024);
        let mut wire = gz(b"profile");
        wire[0] = b'P';

        let err = d.decompress(&wire[..], CodecId::Gzip).unwrap_err();

        assert!(matches!(err, DecompressError::DecoderInitFailed { codec: CodecId::Gzip, .. }));
        let cause = err.source().unwrap().downcast_ref::<io::Error>().unwrap();
        assert_eq!(cause.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn truncated_header_fails_decoder_init() {
        let d = Decompressor::new(64, 1024);
        let wire = gz(b"profile");

        let err = d.decompress(&wire[..4], CodecId::Gzip).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecoderInitFailed);
    }

    /// Fixed gzip header with the given FLG byte and no optional fields.
    fn header_with_flags(flags: u8) -> Vec<u8> {
        vec![0x1f, 0x8b, 0x08, flags, 0, 0, 0, 0, 0, 0xff]
    }

    /// Asserts `err` is a gzip init failure and returns the io cause kind.
    fn init_cause(err: &DecompressError) -> io::ErrorKind {
        assert!(
            matches!(err, DecompressError::DecoderInitFailed { codec: CodecId::Gzip, .. }),
            "expected DecoderInitFailed, got {err:?}"
        );
        err.source().unwrap().downcast_ref::<io::Error>().unwrap().kind()
    }

    #[test]
    fn name_cut_off_by_end_of_stream_fails_decoder_init() {
        let d = Decompressor::new(64, 1024);
        let mut wire = header_with_flags(0x08);
        wire.extend_from_slice(b"profile.pp");

        let err = d.decompress(&wire[..], CodecId::Gzip).unwrap_err();
        assert_eq!(init_cause(&err), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn comment_cut_off_by_end_of_stream_fails_decoder_init() {
        let d = Decompressor::new(64, 1024);
        let mut wire = header_with_flags(0x10);
        wire.extend_from_slice(b"captured on");

        let err = d.decompress(&wire[..], CodecId::Gzip).unwrap_err();
        assert_eq!(init_cause(&err), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn truncated_extra_field_fails_decoder_init() {
        let d = Decompressor::new(64, 1024);
        let mut wire = header_with_flags(0x04);
        wire.extend_from_slice(&[0x10, 0x00, 1, 2, 3]);

        let err = d.decompress(&wire[..], CodecId::Gzip).unwrap_err();
        assert_eq!(init_cause(&err), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn reserved_flag_bits_fail_decoder_init() {
        let d = Decompressor::new(64, 1024);
        let mut wire = gz(b"profile");
        wire[3] |= 0x80;

        let err = d.decompress(&wire[..], CodecId::Gzip).unwrap_err();
        assert_eq!(init_cause(&err), io::ErrorKind::InvalidData);
    }

    #[test]
    fn overlong_name_fails_decoder_init() {
        let d = Decompressor::new(64, 1024);
        let mut wire = header_with_flags(0x08);
        wire.extend(std::iter::repeat(b'n').take(4096));

        let err = d.decompress(&wire[..], CodecId::Gzip).unwrap_err();
        assert_eq!(init_cause(&err), io::ErrorKind::InvalidData);
    }

    #[test]
    fn header_crc_mismatch_fails_decoder_init() {
        let d = Decompressor::new(64, 1024);
        let body = gz(b"profile");
        let mut wire = body[..10].to_vec();
        wire[3] |= 0x02;
        wire.extend_from_slice(&[0xde, 0xad]);
        wire.extend_from_slice(&body[10..]);

        let err = d.decompress(&wire[..], CodecId::Gzip).unwrap_err();
        assert_eq!(init_cause(&err), io::ErrorKind::InvalidData);
    }

    #[test]
    fn matching_header_crc_is_accepted() {
        let d = Decompressor::new(64, 1024);
        let body = gz(b"profile");
        let mut wire = body[..10].to_vec();
        wire[3] |= 0x02;
        let crc = (crc32fast::hash(&wire) & 0xffff) as u16;
        wire.extend_from_slice(&crc.to_le_bytes());
        wire.extend_from_slice(&body[10..]);

        let out = d.decompress(&wire[..], CodecId::Gzip).unwrap();
        assert_eq!(out, b"profile");
    }

    #[test]
    fn named_and_commented_member_is_accepted() {
        let d = Decompressor::new(64, 1024);
        let mut enc = GzBuilder::new()
            .filename("profile.pprof")
            .comment("heap")
            .extra(vec![b'P', b'F', 2, 0, 7, 7])
            .write(Vec::new(), Compression::default());
        enc.write_all(b"profile").unwrap();
        let wire = enc.finish().unwrap();

        let out = d.decompress(&wire[..], CodecId::Gzip).unwrap();
        assert_eq!(out, b"profile");
    }

    #[test]
    fn checksum_mismatch_is_read_failure() {
        let d = Decompressor::new(64, 1024);
        let mut wire = gz(b"profile payload");
        let crc_at = wire.len() - 8;
        wire[crc_at] ^= 0xff;

        let err = d.decompress(&wire[..], CodecId::Gzip).unwrap_err();
        assert!(matches!(err, DecompressError::ReadFailed { codec: CodecId::Gzip, .. }));
        assert!(err.source().is_some());
    }

    #[test]
    fn truncated_body_is_read_failure() {
        let d = Decompressor::new(64, 1024);
        let wire = gz(&plaintext(500));

        let err = d.decompress(&wire[..wire.len() - 8], CodecId::Gzip).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ReadFailed);
    }

    #[test]
    fn source_error_mid_stream_is_read_failure() {
        let d = Decompressor::new(64, 1 << 20);
        let wire = gz(&plaintext(50_000));
        let source = FailAfter { inner: &wire, after: 32 };

        let err = d.decompress(source, CodecId::Gzip).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ReadFailed);
    }

    // --- properties ---

    proptest! {
        #[test]
        fn prop_within_limit_round_trips(
            plain in proptest::collection::vec(any::<u8>(), 1..4096),
            slack in 0u64..256,
        ) {
            let max = plain.len() as u64 + slack;
            let d = Decompressor::new(0, max);
            let out = d.decompress(&gz(&plain)[..], CodecId::Gzip).unwrap();
            prop_assert_eq!(out, plain);
        }

        #[test]
        fn prop_over_limit_is_rejected(
            plain in proptest::collection::vec(any::<u8>(), 1..4096),
            short_by in 1u64..64,
        ) {
            let max = (plain.len() as u64).saturating_sub(short_by);
            let d = Decompressor::new(0, max);
            let err = d.decompress(&gz(&plain)[..], CodecId::Gzip).unwrap_err();
            prop_assert_eq!(err.kind(), ErrorKind::SizeLimitExceeded);
        }
    }
}
