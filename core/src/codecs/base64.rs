//! Base64 (standard and URL-safe) via the `base64` crate.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::{DecodeError, Engine};

use crate::codecs::types::{invalid_char, Codec, CodecError, CodecOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base64Variant {
    Standard,
    UrlSafe,
}

pub struct Base64Codec {
    variant: Base64Variant,
    engine: GeneralPurpose,
}

impl Base64Codec {
    pub fn new(variant: Base64Variant) -> Self {
        // Padded on encode, padding-indifferent on decode.
        let config = GeneralPurposeConfig::new()
            .with_encode_padding(true)
            .with_decode_padding_mode(DecodePaddingMode::Indifferent);
        let engine = match variant {
            Base64Variant::Standard => GeneralPurpose::new(&alphabet::STANDARD, config),
            Base64Variant::UrlSafe => GeneralPurpose::new(&alphabet::URL_SAFE, config),
        };
        Self { variant, engine }
    }

    fn is_alphabet(&self, c: u8) -> bool {
        match c {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'=' => true,
            b'+' | b'/' => self.variant == Base64Variant::Standard,
            b'-' | b'_' => self.variant == Base64Variant::UrlSafe,
            _ => false,
        }
    }
}

impl Codec for Base64Codec {
    fn name(&self) -> &'static str {
        match self.variant {
            Base64Variant::Standard => "base64",
            Base64Variant::UrlSafe => "base64_urlsafe",
        }
    }

    fn encode(&self, input: &[u8], _opts: &CodecOptions) -> Result<Vec<u8>, CodecError> {
        Ok(self.engine.encode(input).into_bytes())
    }

    fn decode(&self, input: &[u8], opts: &CodecOptions) -> Result<Vec<u8>, CodecError> {
        let cleaned;
        let input = if opts.ignore_garbage {
            cleaned = self.strip_garbage(input);
            &cleaned[..]
        } else {
            input
        };

        self.engine.decode(input).map_err(|e| match e {
            DecodeError::InvalidByte(offset, _) => invalid_char(self.name(), input, offset),
            DecodeError::InvalidLength(len) => CodecError::InvalidLength { codec: self.name(), len },
            other => CodecError::Malformed { codec: self.name(), msg: other.to_string() },
        })
    }

    fn strip_garbage(&self, input: &[u8]) -> Vec<u8> {
        input.iter().copied().filter(|&c| self.is_alphabet(c)).collect()
    }
}
