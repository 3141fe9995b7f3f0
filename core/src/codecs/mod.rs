pub mod types;
pub mod registry;

pub mod base1;
pub mod base16;
pub mod base2048;
pub mod base32;
pub mod base64;
pub mod base85;
pub mod base91;
pub mod leb128;
pub mod radix;
pub mod uuencode;

pub use types::*;
pub use registry::Converter;
