/// Tool name used as the prefix of every user-facing diagnostic.
pub const TOOL_NAME: &str = "base-ex";

/// Default wrap width for encoded text.
pub const DEFAULT_WRAP: usize = 76;

/// Largest single delivery the reader hands to the pipeline.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024; // 64 KiB

/// Max chunk size sanity bound (32 MiB).
pub const MAX_CHUNK_SIZE: usize = 32 * 1024 * 1024;

/// Capacity of the bounded queue between the reader and the chunk worker.
pub const DEFAULT_QUEUE_CAP: usize = 8;

/// Unbounded codecs buffering more than this at end-of-stream trigger the
/// large-input advisory.
pub const DEFAULT_LARGE_INPUT_THRESHOLD: usize = 64 * 1024; // 64 KiB

/// Payload bytes per UUencode / XXencode data line.
pub const UU_LINE_BYTES: usize = 45;

/// Envelope metadata used when reading standard input.
pub mod stdin_meta {
    pub const NAME: &str = "/dev/stdin";
    pub const PERMISSIONS: &str = "644";
}

/// Literal framing artifacts.
pub mod markers {
    /// Adobe base-85 open / close frame markers.
    pub const ADOBE_OPEN: &[u8; 2] = b"<~";
    pub const ADOBE_CLOSE: &[u8; 2] = b"~>";

    /// Adobe run-length escape standing for five `!` pad characters.
    pub const ADOBE_ZERO_RUN: u8 = b'z';
    pub const ADOBE_ZERO_GROUP: &[u8; 5] = b"!!!!!";

    /// UUencode envelope.
    pub const UU_BEGIN: &[u8] = b"begin ";
    pub const UU_END: &[u8] = b"end";
}
