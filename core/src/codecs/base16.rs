//! Base16 via the `hex` crate. Upper case by default (RFC 4648 §8).

use crate::codecs::types::{apply_case, invalid_char, Codec, CodecError, CodecOptions, OutputCase};

pub struct Base16Codec;

impl Codec for Base16Codec {
    fn name(&self) -> &'static str {
        "base16"
    }

    fn encode(&self, input: &[u8], opts: &CodecOptions) -> Result<Vec<u8>, CodecError> {
        let text = match opts.output_case {
            OutputCase::Lower => hex::encode(input),
            _ => hex::encode_upper(input),
        };
        Ok(apply_case(text.into_bytes(), opts.output_case))
    }

    fn decode(&self, input: &[u8], opts: &CodecOptions) -> Result<Vec<u8>, CodecError> {
        let cleaned;
        let input = if opts.ignore_garbage {
            cleaned = self.strip_garbage(input);
            &cleaned[..]
        } else {
            input
        };

        hex::decode(input).map_err(|e| match e {
            hex::FromHexError::InvalidHexCharacter { index, .. } => invalid_char("base16", input, index),
            hex::FromHexError::OddLength => CodecError::InvalidLength { codec: "base16", len: input.len() },
            other => CodecError::Malformed { codec: "base16", msg: other.to_string() },
        })
    }

    fn strip_garbage(&self, input: &[u8]) -> Vec<u8> {
        input.iter().copied().filter(u8::is_ascii_hexdigit).collect()
    }
}
