//! codecs/types.rs
//! Codec descriptor, options, error type and the `Codec` trait.
use thiserror::Error;

/// Direction of a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Encode,
    Decode,
}

/// Literal envelope a codec wraps its payload in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramingKind {
    None,
    /// `begin <perm> <name>` … sentinel line, `end`
    Uuencode,
    /// `<~` … `~>` with the `z` run-length escape
    Adobe85,
}

/// Static, per-converter buffering contract.
///
/// A `None` block size marks an *unbounded* codec: it needs the whole input
/// before it can produce anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecDescriptor {
    pub block_size_encode: Option<usize>,
    pub block_size_decode: Option<usize>,
    /// Encoded units are multi-byte UTF-8 code points rather than single bytes.
    pub multi_byte_units: bool,
    pub framing: FramingKind,
    /// Output case may be forced with the upper/lower flags.
    pub case_insensitive: bool,
    /// Encoded form is raw bytes: no newline stripping, wrapping or trailing terminator.
    pub binary_output: bool,
}

impl CodecDescriptor {
    /// Plain fixed-block text codec.
    pub const fn blocks(encode: usize, decode: usize) -> Self {
        Self {
            block_size_encode: Some(encode),
            block_size_decode: Some(decode),
            multi_byte_units: false,
            framing: FramingKind::None,
            case_insensitive: false,
            binary_output: false,
        }
    }

    /// Text codec that needs the complete value before converting.
    pub const fn unbounded() -> Self {
        Self {
            block_size_encode: None,
            block_size_decode: None,
            multi_byte_units: false,
            framing: FramingKind::None,
            case_insensitive: false,
            binary_output: false,
        }
    }

    pub const fn case_insensitive(mut self) -> Self {
        self.case_insensitive = true;
        self
    }

    pub const fn multi_byte(mut self) -> Self {
        self.multi_byte_units = true;
        self
    }

    pub const fn framed(mut self, framing: FramingKind) -> Self {
        self.framing = framing;
        self
    }

    pub const fn binary(mut self) -> Self {
        self.binary_output = true;
        self
    }

    pub fn block_size(&self, mode: Mode) -> Option<usize> {
        match mode {
            Mode::Encode => self.block_size_encode,
            Mode::Decode => self.block_size_decode,
        }
    }

    pub fn is_unbounded(&self, mode: Mode) -> bool {
        self.framing != FramingKind::Uuencode && self.block_size(mode).is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputCase {
    #[default]
    Default,
    Upper,
    Lower,
}

/// File metadata carried into envelope headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    pub name: String,
    /// Octal permission string, e.g. `644`.
    pub permissions: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecOptions {
    pub line_wrap: usize,
    pub ignore_garbage: bool,
    pub output_case: OutputCase,
    pub file: Option<FileMetadata>,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            line_wrap: crate::constants::DEFAULT_WRAP,
            ignore_garbage: false,
            output_case: OutputCase::Default,
            file: None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("{codec}: invalid character {found:?} at offset {offset}")]
    InvalidCharacter {
        codec: &'static str,
        found: char,
        offset: usize,
    },

    #[error("{codec}: invalid input length {len}")]
    InvalidLength { codec: &'static str, len: usize },

    #[error("{codec}: group value overflows 32 bits")]
    Overflow { codec: &'static str },

    #[error("{codec}: input value exceeds the {limit} character limit")]
    TooLarge { codec: &'static str, limit: u64 },

    #[error("{codec}: malformed input: {msg}")]
    Malformed { codec: &'static str, msg: String },
}

// Require Send + Sync so codecs can live on the worker thread.
pub trait Codec: Send + Sync {
    fn name(&self) -> &'static str;

    /// Encode a block-aligned run of bytes (or the final remainder).
    fn encode(&self, input: &[u8], opts: &CodecOptions) -> Result<Vec<u8>, CodecError>;

    /// Decode a block-aligned run of encoded units (or the final remainder).
    fn decode(&self, input: &[u8], opts: &CodecOptions) -> Result<Vec<u8>, CodecError>;

    /// Drop every byte that is not part of the codec's alphabet.
    fn strip_garbage(&self, input: &[u8]) -> Vec<u8>;
}

/// Apply the requested output case to ASCII text.
pub fn apply_case(mut text: Vec<u8>, case: OutputCase) -> Vec<u8> {
    match case {
        OutputCase::Default => {}
        OutputCase::Upper => text.make_ascii_uppercase(),
        OutputCase::Lower => text.make_ascii_lowercase(),
    }
    text
}

/// Build a 256-entry reverse lookup table; `0xFF` marks bytes outside the alphabet.
pub fn build_decode_table(alphabet: &[u8]) -> [u8; 256] {
    let mut table = [0xFFu8; 256];
    for (i, &c) in alphabet.iter().enumerate() {
        table[c as usize] = i as u8;
    }
    table
}

pub(crate) fn invalid_char(codec: &'static str, input: &[u8], offset: usize) -> CodecError {
    // Report the whole code point when the offending byte starts one.
    let found = std::str::from_utf8(&input[offset..])
        .ok()
        .or_else(|| {
            let end = (offset + 4).min(input.len());
            (offset + 1..=end)
                .rev()
                .find_map(|e| std::str::from_utf8(&input[offset..e]).ok())
        })
        .and_then(|s| s.chars().next())
        .unwrap_or(char::REPLACEMENT_CHARACTER);
    CodecError::InvalidCharacter { codec, found, offset }
}
