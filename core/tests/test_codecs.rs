// Codec collaborator: known vectors, garbage handling, registry lookup.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use baseex_core::codecs::{CodecError, CodecOptions, Converter, FramingKind, Mode, OutputCase};

    fn opts() -> CodecOptions {
        CodecOptions::default()
    }

    fn enc(name: &str, input: &[u8]) -> Vec<u8> {
        Converter::resolve(name).unwrap().codec().encode(input, &opts()).unwrap()
    }

    fn dec(name: &str, input: &[u8]) -> Result<Vec<u8>, CodecError> {
        Converter::resolve(name).unwrap().codec().decode(input, &opts())
    }

    #[test]
    fn test_known_vectors() {
        let cases: &[(&str, &[u8], &[u8])] = &[
            ("base16", b"Hi", b"4869"),
            ("base32_rfc3548", b"Hi", b"JBUQ===="),
            ("base32_rfc3548", b"Hello World!", b"JBSWY3DPEBLW64TMMQQQ===="),
            ("base32_rfc4648", b"Hi", b"91KG===="),
            ("base64", b"Hi", b"SGk="),
            ("base58_bitcoin", b"Hi", b"6Wc"),
            ("base58_bitcoin", b"\0\0Hi", b"116Wc"),
            ("base58", b"garbage", b"4Ve28L4ett"),
            ("base58_flickr", b"garbage", b"4Ve28L4ett"),
            ("base58_bitcoin", b"garbage", b"4vE28m4EUU"),
            ("base1", b"\x05", b"AAAAA"),
            ("base85_ascii", b"Hi", b"88/"),
            ("base85_ascii", b"Hello World!", b"87cURD]i,\"Ebo80"),
            ("base85_adobe", b"\0\0\0\0Hi", b"z88/"),
            ("base85_z85", &[0x86, 0x4F, 0xD2, 0x6F, 0xB5, 0x59, 0xF7, 0x5B], b"HelloWorld"),
            ("base85_z85", b"Hi", b"nne"),
            ("base91", b"Hi", b"KaD"),
            ("base91", b"Hello World!", b">OwJh>Io0Tv!8PE"),
            ("uuencode", b"Hi", b"\"2&D`\n"),
            ("leb128", b"Hi", &[0xE9, 0x90, 0x05]),
        ];
        for (name, plain, encoded) in cases {
            assert_eq!(&enc(name, plain), encoded, "encode {name}");
            assert_eq!(&dec(name, encoded).unwrap(), plain, "decode {name}");
        }
    }

    #[test]
    fn test_output_case_on_case_insensitive_codecs() {
        let codec = Converter::Base32Rfc3548.codec();
        let lower = CodecOptions { output_case: OutputCase::Lower, ..opts() };
        assert_eq!(codec.encode(b"Hi", &lower).unwrap(), b"jbuq====");
        assert_eq!(codec.decode(b"jbuq====", &opts()).unwrap(), b"Hi");

        let codec = Converter::Base16.codec();
        assert_eq!(codec.encode(b"Hello", &lower).unwrap(), b"48656c6c6f");
        let upper = CodecOptions { output_case: OutputCase::Upper, ..opts() };
        assert_eq!(codec.encode(b"Hello", &upper).unwrap(), b"48656C6C6F");
    }

    #[test]
    fn test_crockford_aliases() {
        let codec = Converter::Base32Crockford.codec();
        let canonical = codec.decode(b"01", &opts()).unwrap();
        assert_eq!(codec.decode(b"oI", &opts()).unwrap(), canonical);
        assert_eq!(codec.decode(b"OL", &opts()).unwrap(), canonical);
    }

    #[test]
    fn test_invalid_character_is_fatal_by_default() {
        let err = dec("base58", b"4Ve28L4e_tt").unwrap_err();
        assert!(matches!(err, CodecError::InvalidCharacter { found: '_', offset: 8, .. }));

        let lenient = CodecOptions { ignore_garbage: true, ..opts() };
        let codec = Converter::Base58.codec();
        assert_eq!(codec.decode(b"4Ve28L4e_tt", &lenient).unwrap(), b"garbage");
    }

    #[test]
    fn test_strip_garbage_keeps_alphabet_only() {
        let codec = Converter::Base64.codec();
        assert_eq!(codec.strip_garbage(b"SG#k=\t"), b"SGk=");

        let adobe = Converter::Base85Adobe.codec();
        assert_eq!(adobe.strip_garbage(b"z8~8/"), b"z88/");

        let b2048 = Converter::Base2048.codec();
        let text = "\u{4E01}x\u{0101}".as_bytes();
        assert_eq!(b2048.strip_garbage(text), "\u{4E01}\u{0101}".as_bytes());
    }

    #[test]
    fn test_base85_single_char_tail_is_malformed() {
        assert!(matches!(dec("base85_ascii", b"88/8"), Ok(_)));
        assert!(matches!(dec("base85_ascii", b"88/8d8"), Err(CodecError::Malformed { .. })));
    }

    #[test]
    fn test_base85_overflow() {
        assert!(matches!(dec("base85_ascii", b"uuuuu"), Err(CodecError::Overflow { .. })));
    }

    #[test]
    fn test_base2048_tail_characters() {
        // 3 bytes = 24 bits: two full characters plus a 2-bit tail.
        let out = enc("base2048", b"abc");
        let text = String::from_utf8(out.clone()).unwrap();
        assert_eq!(text.chars().count(), 3);
        let last = text.chars().last().unwrap() as u32;
        assert!((0x0100..0x0108).contains(&last));
        assert_eq!(dec("base2048", &out).unwrap(), b"abc");

        // Anything after a tail character is rejected.
        let mut bad = out.clone();
        bad.extend_from_slice("\u{4E00}".as_bytes());
        assert!(matches!(dec("base2048", &bad), Err(CodecError::Malformed { .. })));
    }

    #[test]
    fn test_uuencode_lines_and_sentinel() {
        let data = vec![0x41u8; 100];
        let out = enc("uuencode", &data);
        let lines: Vec<&[u8]> = out.split(|&b| b == b'\n').filter(|l| !l.is_empty()).collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0][0], b'M'); // 45 + 32
        assert_eq!(lines[0].len(), 61);
        assert_eq!(lines[2][0], (10 + 32) as u8);

        let mut with_sentinel = out.clone();
        with_sentinel.extend_from_slice(b"`\n");
        assert_eq!(dec("uuencode", &with_sentinel).unwrap(), data);
    }

    #[test]
    fn test_uuencode_short_line_is_malformed() {
        // Announces 45 bytes, carries 3.
        assert!(matches!(dec("uuencode", b"M2&D`\n"), Err(CodecError::Malformed { .. })));
    }

    #[test]
    fn test_leb128_rejects_trailing_bytes() {
        assert!(matches!(dec("leb128", &[0xE9, 0x90, 0x05, 0x00]), Err(CodecError::Malformed { .. })));
        assert!(matches!(dec("leb128", &[0xE9, 0x90]), Err(CodecError::Malformed { .. })));
        assert_eq!(enc("leb128", b""), vec![0x01]);
    }

    #[test]
    fn test_base1_is_unary() {
        let out = enc("base1", b"Hi");
        assert_eq!(out.len(), 0x4869);
        assert!(out.iter().all(|&c| c == b'A'));
        assert_eq!(dec("base1", &out).unwrap(), b"Hi");
        assert_eq!(dec("base1", b"aaAAa").unwrap(), vec![5]);
        assert!(enc("base1", b"").is_empty());
        assert!(dec("base1", b"").unwrap().is_empty());

        let lenient = CodecOptions { ignore_garbage: true, ..opts() };
        let codec = Converter::Base1.codec();
        assert!(matches!(codec.decode(b"AA-A", &opts()), Err(CodecError::InvalidCharacter { found: '-', offset: 2, .. })));
        assert_eq!(codec.decode(b"AA-A", &lenient).unwrap(), vec![3]);
    }

    #[test]
    fn test_base1_rejects_values_beyond_the_limit() {
        assert!(matches!(
            Converter::Base1.codec().encode(&[0x01, 0x00, 0x00, 0x01], &opts()),
            Err(CodecError::TooLarge { .. })
        ));
        assert!(matches!(
            Converter::Base1.codec().encode(&[0xFF; 9], &opts()),
            Err(CodecError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_simplebase_case_insensitivity() {
        let b16 = Converter::resolve("simplebase16").unwrap();
        assert!(b16.descriptor().case_insensitive);
        let codec = b16.codec();
        let out = codec.encode(&[0xAB, 0xCD], &opts()).unwrap();
        assert_eq!(out, b"abcd");
        assert_eq!(codec.decode(b"ABCD", &opts()).unwrap(), vec![0xAB, 0xCD]);

        let b62 = Converter::resolve("simplebase62").unwrap();
        assert!(!b62.descriptor().case_insensitive);
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        assert_eq!(Converter::resolve("BASE64"), Some(Converter::Base64));
        assert_eq!(Converter::resolve("Base85_Adobe"), Some(Converter::Base85Adobe));
        assert_eq!(Converter::resolve("SimpleBase36"), Some(Converter::SimpleBase(36)));
        assert_eq!(Converter::resolve("simplebase1"), None);
        assert_eq!(Converter::resolve("simplebase63"), None);
        assert_eq!(Converter::resolve("simplebase07"), None);
        assert_eq!(Converter::resolve("base65"), None);
    }

    #[test]
    fn test_names_cover_every_converter() {
        let names: Vec<&str> = Converter::names().collect();
        assert_eq!(names.first(), Some(&"base1"));
        assert_eq!(names.last(), Some(&"simplebase62"));
        assert_eq!(names.len(), 19 + 61);
        for name in &names {
            let conv = Converter::resolve(name).unwrap();
            assert_eq!(conv.name(), *name);
        }
    }

    #[test]
    fn test_descriptors() {
        let uu = Converter::Uuencode.descriptor();
        assert_eq!(uu.framing, FramingKind::Uuencode);
        assert_eq!(uu.block_size(Mode::Encode), Some(45));
        assert!(!uu.is_unbounded(Mode::Decode));

        let b58 = Converter::Base58.descriptor();
        assert!(b58.is_unbounded(Mode::Encode) && b58.is_unbounded(Mode::Decode));

        let b2048 = Converter::Base2048.descriptor();
        assert!(b2048.multi_byte_units);
        assert_eq!(b2048.block_size(Mode::Decode), Some(8));

        assert!(Converter::Leb128.descriptor().binary_output);
        assert_eq!(Converter::Base85Adobe.descriptor().framing, FramingKind::Adobe85);
    }

    const ALL: &[&str] = &[
        "base16", "base32_crockford", "base32_rfc3548", "base32_rfc4648", "base32_zbase32",
        "base58_bitcoin", "base58_flickr", "base64", "base64_urlsafe", "base85_adobe",
        "base85_ascii", "base85_z85", "base91", "base2048", "uuencode", "xxencode", "leb128",
        "simplebase2", "simplebase36", "simplebase62",
    ];

    proptest! {
        #[test]
        fn prop_codec_round_trip(idx in 0..ALL.len(), data in proptest::collection::vec(any::<u8>(), 0..200)) {
            let codec = Converter::resolve(ALL[idx]).unwrap().codec();
            let encoded = codec.encode(&data, &opts()).unwrap();
            prop_assert_eq!(codec.decode(&encoded, &opts()).unwrap(), data);
        }
    }
}
