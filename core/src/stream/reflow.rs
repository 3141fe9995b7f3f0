//! stream/reflow.rs
//! Fixed-width line wrapping of encoded text across chunk boundaries.

use crate::stream::aligner::unit_starts;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Reflowed {
    /// Complete lines, each followed by `\n`.
    pub to_write: Vec<u8>,
    /// Partial last line, shorter than the width.
    pub carry: Vec<u8>,
    /// Output ended exactly on a line edge.
    pub reached_line_boundary: bool,
    pub lines: usize,
}

/// Wrap `carry_in ++ text` at `width` units. `width == 0` disables wrapping.
///
/// Units are code points when `multi_byte` is set, bytes otherwise.
pub fn reflow(text: &[u8], carry_in: Vec<u8>, width: usize, multi_byte: bool) -> Reflowed {
    let mut combined = carry_in;
    combined.extend_from_slice(text);

    if width == 0 {
        return Reflowed { to_write: combined, ..Default::default() };
    }

    // Offsets of every line start, plus the end of the last full line.
    let edges: Vec<usize> = if multi_byte {
        let starts = unit_starts(&combined);
        let full = starts.len() / width;
        (0..=full)
            .map(|k| starts.get(k * width).copied().unwrap_or(combined.len()))
            .collect()
    } else {
        (0..=combined.len() / width).map(|k| k * width).collect()
    };

    let lines = edges.len() - 1;
    let split = edges[lines];
    let mut to_write = Vec::with_capacity(split + lines);
    for pair in edges.windows(2) {
        to_write.extend_from_slice(&combined[pair[0]..pair[1]]);
        to_write.push(b'\n');
    }
    let carry = combined[split..].to_vec();

    Reflowed {
        reached_line_boundary: lines > 0 && carry.is_empty(),
        to_write,
        carry,
        lines,
    }
}
