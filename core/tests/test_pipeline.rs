// End-to-end streaming: scenarios, chunk invariance, wrapping, advisories.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::{rngs::StdRng, RngCore, SeedableRng};

    use baseex_core::codecs::{CodecError, Converter, Mode, OutputCase};
    use baseex_core::stream::{
        decode_stream, encode_stream, run_stream, InputSource, OutputSink, SharedBuffer,
        StreamConfig, StreamPipeline,
    };
    use baseex_core::types::{Diagnostic, StreamError, StreamReport};

    // ------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------
    fn conv(name: &str) -> Converter {
        Converter::resolve(name).unwrap()
    }

    fn run(name: &str, mode: Mode, input: &[u8], config: StreamConfig) -> (Vec<u8>, StreamReport) {
        let mut out = Vec::new();
        let report = run_stream(conv(name), input, &mut out, &config.with_mode(mode)).unwrap();
        (out, report)
    }

    fn encode(name: &str, input: &[u8]) -> Vec<u8> {
        run(name, Mode::Encode, input, StreamConfig::default()).0
    }

    fn decode(name: &str, input: &[u8]) -> Vec<u8> {
        run(name, Mode::Decode, input, StreamConfig::default()).0
    }

    fn try_decode(name: &str, input: &[u8], config: StreamConfig) -> Result<Vec<u8>, StreamError> {
        let mut out = Vec::new();
        run_stream(conv(name), input, &mut out, &config.with_mode(Mode::Decode))?;
        Ok(out)
    }

    /// Drive a pipeline directly with an explicit partition of the input.
    fn push_split(name: &str, mode: Mode, input: &[u8], cuts: &[usize], wrap: usize) -> Vec<u8> {
        let mut out = Vec::new();
        let config = StreamConfig::default().with_mode(mode).with_line_wrap(wrap);
        let mut pipeline = StreamPipeline::new(conv(name), config, &mut out);
        let mut rest = input;
        for &cut in cuts {
            let n = cut.min(rest.len());
            pipeline.push(&rest[..n]).unwrap();
            rest = &rest[n..];
        }
        pipeline.push(rest).unwrap();
        pipeline.finish().unwrap();
        out
    }

    fn random_bytes(len: usize, seed: u64) -> Vec<u8> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut buf = vec![0u8; len];
        rng.fill_bytes(&mut buf);
        buf
    }

    // ------------------------------------------------------------
    // Scenarios
    // ------------------------------------------------------------
    #[test]
    fn test_uuencode_round_trip() {
        let encoded = encode("uuencode", b"Hi");
        assert_eq!(encoded, b"begin 644 /dev/stdin\n\"2&D`\n`\nend\n");
        assert_eq!(decode("uuencode", &encoded), b"Hi");
    }

    #[test]
    fn test_uuencode_uses_file_metadata() {
        use baseex_core::codecs::FileMetadata;
        let config = StreamConfig::default()
            .with_file(FileMetadata { name: "hi.txt".into(), permissions: "755".into() });
        let (out, _) = run("xxencode", Mode::Encode, b"Hi", config);
        assert!(out.starts_with(b"begin 755 hi.txt\n"));
        assert!(out.ends_with(b"+\nend\n"));
        assert_eq!(decode("xxencode", &out), b"Hi");
    }

    #[test]
    fn test_case_flags() {
        let upper = StreamConfig::default().with_output_case(OutputCase::Upper);
        let lower = StreamConfig::default().with_output_case(OutputCase::Lower);

        let (up, _) = run("base32_rfc3548", Mode::Encode, b"Hi", upper);
        let (low, _) = run("base32_rfc3548", Mode::Encode, b"Hi", lower);
        assert_eq!(up, b"JBUQ====\n");
        assert_eq!(low, b"jbuq====\n");
        assert_eq!(decode("base32_rfc3548", &up), b"Hi");
        assert_eq!(decode("base32_rfc3548", &low), b"Hi");
    }

    #[test]
    fn test_garbage_tolerance() {
        let err = try_decode("base58", b"4Ve28L4e_tt\n", StreamConfig::default()).unwrap_err();
        assert!(matches!(err, StreamError::Codec(_)));

        let out = try_decode("base58", b"4Ve28L4e_tt\n", StreamConfig::default().with_ignore_garbage(true)).unwrap();
        assert_eq!(out, b"garbage");
    }

    #[test]
    fn test_garbage_in_block_codec() {
        let input = b"SGVs*bG8=\n";
        assert!(try_decode("base64", input, StreamConfig::default()).is_err());
        let lenient = StreamConfig::default().with_ignore_garbage(true).with_chunk_size(3);
        assert_eq!(try_decode("base64", input, lenient).unwrap(), b"Hello");
    }

    #[test]
    fn test_large_unbounded_input_advisory() {
        let data = random_bytes(4096, 7);
        let config = StreamConfig::default().with_large_input_threshold(1024).with_chunk_size(1000);
        let (encoded, report) = run("base58", Mode::Encode, &data, config.clone());
        assert!(matches!(
            report.diagnostics.as_slice(),
            [Diagnostic::LargeUnboundedInput { bytes: 4096, threshold: 1024, converter: "base58" }]
        ));

        let (decoded, report) = run("base58", Mode::Decode, &encoded, config);
        assert_eq!(decoded, data);
        assert_eq!(report.diagnostics.len(), 1);
    }

    #[test]
    fn test_default_threshold_with_linear_codec() {
        let data = random_bytes(70 * 1024, 11);
        let (encoded, report) = run("base91", Mode::Encode, &data, StreamConfig::default());
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(decode("base91", &encoded), data);

        let (_, report) = run("base91", Mode::Encode, &data[..1024], StreamConfig::default());
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn test_block_codec_never_warns() {
        let data = random_bytes(200 * 1024, 3);
        let (_, report) = run("base64", Mode::Encode, &data, StreamConfig::default());
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn test_adobe_envelope() {
        assert_eq!(encode("base85_adobe", b"Hi"), b"<~88/~>\n");
        assert_eq!(encode("base85_adobe", b"\0\0\0\0Hi"), b"<~z88/~>\n");
        assert_eq!(encode("base85_adobe", b""), b"<~~>\n");
        assert_eq!(decode("base85_adobe", b"<~z88/~>\n"), b"\0\0\0\0Hi");
    }

    #[test]
    fn test_adobe_zero_run_inside_group_is_rejected() {
        let err = try_decode("base85_adobe", b"<~8z8/~>", StreamConfig::default()).unwrap_err();
        assert!(matches!(err, StreamError::Codec(CodecError::InvalidCharacter { found: 'z', .. })));

        let small = StreamConfig::default().with_chunk_size(1);
        assert!(try_decode("base85_adobe", b"<~88/8z8~>", small).is_err());
    }

    #[test]
    fn test_uuencode_leading_blank_line() {
        let mut input = b"\n".to_vec();
        input.extend(encode("uuencode", b"Hi"));
        assert_eq!(decode("uuencode", &input), b"Hi");
    }

    #[test]
    fn test_base1_round_trip() {
        let encoded = encode("base1", b"Hi");
        assert_eq!(encoded.iter().filter(|&&c| c == b'A').count(), 0x4869);
        assert!(encoded.split(|&c| c == b'\n').all(|line| line.len() <= 76));
        assert_eq!(decode("base1", &encoded), b"Hi");
    }

    #[test]
    fn test_adobe_markers_wrap_with_payload() {
        let config = StreamConfig::default().with_line_wrap(4);
        let (out, _) = run("base85_adobe", Mode::Encode, b"Hi", config);
        // "<~88/~>" in lines of 4
        assert_eq!(out, b"<~88\n/~>\n");
        assert_eq!(decode("base85_adobe", &out), b"Hi");
    }

    #[test]
    fn test_empty_input() {
        assert!(encode("base64", b"").is_empty());
        assert!(encode("base58", b"").is_empty());
        assert_eq!(encode("uuencode", b""), b"begin 644 /dev/stdin\n`\nend\n");
        assert!(decode("base64", b"").is_empty());
        assert!(decode("uuencode", b"begin 644 /dev/stdin\n`\nend\n").is_empty());
    }

    #[test]
    fn test_exact_line_gets_no_extra_newline() {
        // 57 bytes encode to exactly 76 characters.
        let out = encode("base64", &[0x55; 57]);
        assert_eq!(out.len(), 77);
        assert_eq!(out.last(), Some(&b'\n'));
        assert_eq!(out.iter().filter(|&&b| b == b'\n').count(), 1);
    }

    #[test]
    fn test_binary_output_has_no_terminator() {
        assert_eq!(encode("leb128", b"Hi"), vec![0xE9, 0x90, 0x05]);
        assert_eq!(decode("leb128", &[0xE9, 0x90, 0x05]), b"Hi");
    }

    #[test]
    fn test_wrap_widths_on_large_random_buffer() {
        let data = random_bytes(128 * 1024, 42);
        for width in [76usize, 48, 0] {
            let config = StreamConfig::default().with_line_wrap(width);
            let (out, _) = run("base64", Mode::Encode, &data, config);
            let text = String::from_utf8(out.clone()).unwrap();
            let lines: Vec<&str> = text.lines().collect();
            if width == 0 {
                assert_eq!(lines.len(), 1);
            } else {
                for line in &lines[..lines.len() - 1] {
                    assert_eq!(line.len(), width);
                }
                assert!(lines[lines.len() - 1].len() <= width);
            }
            assert_eq!(decode("base64", &out), data, "width {width}");
        }
    }

    #[test]
    fn test_large_random_round_trips() {
        let data = random_bytes(128 * 1024, 9);
        for name in ["base16", "base32_rfc4648", "base64_urlsafe", "base85_adobe", "base85_z85", "base2048", "uuencode", "xxencode"] {
            let config = StreamConfig::default().with_chunk_size(4093);
            let (encoded, _) = run(name, Mode::Encode, &data, config.clone());
            let (decoded, _) = run(name, Mode::Decode, &encoded, config);
            assert_eq!(decoded, data, "{name}");
        }
    }

    #[test]
    fn test_multi_byte_wrap_counts_characters() {
        let config = StreamConfig::default().with_line_wrap(10);
        let (out, _) = run("base2048", Mode::Encode, &random_bytes(300, 5), config);
        let text = String::from_utf8(out.clone()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        for line in &lines[..lines.len() - 1] {
            assert_eq!(line.chars().count(), 10);
        }
        assert_eq!(decode("base2048", &out), random_bytes(300, 5));
    }

    #[test]
    fn test_multi_byte_decode_with_one_byte_chunks() {
        let data = random_bytes(500, 21);
        let encoded = encode("base2048", &data);
        let config = StreamConfig::default().with_chunk_size(1);
        let (decoded, _) = run("base2048", Mode::Decode, &encoded, config);
        assert_eq!(decoded, data);
    }

    #[test]
    fn test_public_api_entry_points() {
        let sink = SharedBuffer::new();
        let report = encode_stream(
            Converter::Base64,
            InputSource::Memory(b"Hello".to_vec()),
            OutputSink::Memory(sink.clone()),
            StreamConfig::default(),
        )
        .unwrap();
        assert_eq!(sink.contents(), b"SGVsbG8=\n");
        assert_eq!(report.telemetry.bytes_in, 5);

        let back = SharedBuffer::new();
        decode_stream(
            Converter::Base64,
            InputSource::Memory(sink.contents()),
            OutputSink::Memory(back.clone()),
            StreamConfig::default(),
        )
        .unwrap();
        assert_eq!(back.contents(), b"Hello");
    }

    #[test]
    fn test_file_and_reader_sources() {
        let path = std::env::temp_dir().join(format!("baseex-source-{}.txt", std::process::id()));
        std::fs::write(&path, b"Hi").unwrap();

        let sink = SharedBuffer::new();
        encode_stream(
            Converter::Uuencode,
            InputSource::File(path.clone()),
            OutputSink::Writer(Box::new(sink.clone())),
            StreamConfig::default(),
        )
        .unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(sink.contents(), b"begin 644 /dev/stdin\n\"2&D`\n`\nend\n");

        let back = SharedBuffer::new();
        decode_stream(
            Converter::Uuencode,
            InputSource::Reader(Box::new(std::io::Cursor::new(sink.contents()))),
            OutputSink::Memory(back.clone()),
            StreamConfig::default(),
        )
        .unwrap();
        assert_eq!(back.contents(), b"Hi");

        let missing = encode_stream(
            Converter::Base64,
            InputSource::File(path),
            OutputSink::Memory(SharedBuffer::new()),
            StreamConfig::default(),
        );
        assert!(matches!(missing, Err(StreamError::Read(_))));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut out = Vec::new();
        let zero_chunk = StreamConfig::default().with_chunk_size(0);
        assert!(matches!(
            run_stream(Converter::Base64, &b""[..], &mut out, &zero_chunk),
            Err(StreamError::Validation(_))
        ));
        let zero_queue = StreamConfig::default().with_queue_capacity(0);
        assert!(matches!(
            run_stream(Converter::Base64, &b""[..], &mut out, &zero_queue),
            Err(StreamError::Validation(_))
        ));
    }

    #[test]
    fn test_read_failure_is_reported_as_read_error() {
        struct Failing;
        impl std::io::Read for Failing {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "disk gone"))
            }
        }
        let mut out = Vec::new();
        let err = run_stream(Converter::Base64, Failing, &mut out, &StreamConfig::default()).unwrap_err();
        assert!(matches!(err, StreamError::Read(_)));
    }

    #[test]
    fn test_codec_error_midstream_stops_pipeline() {
        let mut input = encode("base64", &random_bytes(10_000, 1));
        input[5000] = b'*';
        let config = StreamConfig::default().with_chunk_size(512).with_queue_capacity(1);
        let err = try_decode("base64", &input, config).unwrap_err();
        assert!(matches!(err, StreamError::Codec(_)));
    }

    #[test]
    fn test_line_boundary_state() {
        let mut out = Vec::new();
        let config = StreamConfig::default().with_line_wrap(4);
        let mut pipeline = StreamPipeline::new(Converter::Base64, config, &mut out);
        pipeline.push(b"abc").unwrap();
        assert!(pipeline.state().reached_line_boundary);
        assert!(pipeline.state().carry_out.is_empty());
        pipeline.push(b"d").unwrap();
        assert_eq!(pipeline.state().carry_in, b"d");
        pipeline.finish().unwrap();
        assert_eq!(out, b"YWJj\nZA==\n");
    }

    // ------------------------------------------------------------
    // Chunk invariance
    // ------------------------------------------------------------
    const STREAMED: &[&str] = &[
        "base16", "base32_crockford", "base32_rfc3548", "base32_zbase32", "base58_flickr",
        "base64", "base85_adobe", "base85_ascii", "base91", "base2048", "uuencode", "xxencode",
        "leb128", "simplebase7", "simplebase36",
    ];

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_encode_is_chunk_invariant(
            idx in 0..STREAMED.len(),
            data in proptest::collection::vec(any::<u8>(), 0..300),
            cuts in proptest::collection::vec(0usize..40, 0..12),
            wrap in prop_oneof![Just(0usize), Just(76usize), 1usize..20],
        ) {
            let name = STREAMED[idx];
            let whole = push_split(name, Mode::Encode, &data, &[], wrap);
            let split = push_split(name, Mode::Encode, &data, &cuts, wrap);
            prop_assert_eq!(&whole, &split);
        }

        #[test]
        fn prop_decode_is_chunk_invariant_and_round_trips(
            idx in 0..STREAMED.len(),
            data in proptest::collection::vec(any::<u8>(), 0..300),
            cuts in proptest::collection::vec(0usize..40, 0..12),
            wrap in prop_oneof![Just(0usize), Just(76usize), 1usize..20],
        ) {
            let name = STREAMED[idx];
            let encoded = push_split(name, Mode::Encode, &data, &[], wrap);
            let decoded = push_split(name, Mode::Decode, &encoded, &cuts, wrap);
            prop_assert_eq!(&decoded, &data);
        }

        #[test]
        fn prop_reader_chunk_size_does_not_change_output(
            data in proptest::collection::vec(any::<u8>(), 0..400),
            chunk in 1usize..64,
            queue in 1usize..4,
        ) {
            let small = StreamConfig::default().with_chunk_size(chunk).with_queue_capacity(queue);
            let (a, _) = run("base64", Mode::Encode, &data, small);
            let (b, _) = run("base64", Mode::Encode, &data, StreamConfig::default());
            prop_assert_eq!(a, b);
        }
    }
}
