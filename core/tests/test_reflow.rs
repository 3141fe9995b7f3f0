// LineWrapReflow: fixed-width lines carried across calls.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use baseex_core::stream::reflow::reflow;

    #[test]
    fn test_width_zero_disables_wrapping() {
        let r = reflow(b"cdef", b"ab".to_vec(), 0, false);
        assert_eq!(r.to_write, b"abcdef");
        assert!(r.carry.is_empty());
        assert!(!r.reached_line_boundary);
        assert_eq!(r.lines, 0);
    }

    #[test]
    fn test_partial_line_is_carried() {
        let r = reflow(b"abcdefg", Vec::new(), 3, false);
        assert_eq!(r.to_write, b"abc\ndef\n");
        assert_eq!(r.carry, b"g");
        assert!(!r.reached_line_boundary);

        let r = reflow(b"hi", r.carry, 3, false);
        assert_eq!(r.to_write, b"ghi\n");
        assert!(r.carry.is_empty());
        assert!(r.reached_line_boundary);
    }

    #[test]
    fn test_short_text_writes_nothing() {
        let r = reflow(b"ab", Vec::new(), 76, false);
        assert!(r.to_write.is_empty());
        assert_eq!(r.carry, b"ab");
        assert!(!r.reached_line_boundary);
    }

    #[test]
    fn test_multi_byte_units_are_characters() {
        let text = "\u{4E00}\u{4E01}\u{4E02}\u{4E03}\u{4E04}";
        let r = reflow(text.as_bytes(), Vec::new(), 2, true);
        let written = String::from_utf8(r.to_write).unwrap();
        assert_eq!(written, "\u{4E00}\u{4E01}\n\u{4E02}\u{4E03}\n");
        assert_eq!(String::from_utf8(r.carry).unwrap(), "\u{4E04}");
    }

    proptest! {
        #[test]
        fn prop_lines_have_exact_width(
            pieces in proptest::collection::vec(proptest::collection::vec(b'A'..=b'Z', 0..50), 1..10),
            width in 1usize..20,
        ) {
            let mut carry = Vec::new();
            let mut out = Vec::new();
            for piece in &pieces {
                let r = reflow(piece, carry, width, false);
                out.extend_from_slice(&r.to_write);
                carry = r.carry;
                prop_assert!(carry.len() < width);
            }
            out.extend_from_slice(&carry);

            let flat: Vec<u8> = pieces.concat();
            let unwrapped: Vec<u8> = out.iter().copied().filter(|&b| b != b'\n').collect();
            prop_assert_eq!(&unwrapped, &flat);

            let lines: Vec<&[u8]> = out.split(|&b| b == b'\n').collect();
            for line in &lines[..lines.len() - 1] {
                prop_assert_eq!(line.len(), width);
            }
            prop_assert!(lines[lines.len() - 1].len() < width);
        }
    }
}
