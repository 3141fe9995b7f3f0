//! stream/state.rs
//! Chunk envelope and the mutable state threaded through every chunk step.

use bytes::Bytes;

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ChunkFlags: u8 {
        /// End of stream; the chunk carries no further input after its bytes.
        const FINAL_CHUNK = 0b0000_0001;
    }
}

/// One delivery from the source, tagged with its arrival position.
#[derive(Debug, Clone)]
pub struct ChunkInput {
    /// Monotonic chunk number starting at 0
    pub chunk_index: u64,
    pub bytes: Bytes,
    pub flags: ChunkFlags,
}

impl ChunkInput {
    pub fn is_final(&self) -> bool {
        self.flags.contains(ChunkFlags::FINAL_CHUNK)
    }
}

/// Carry state owned by whichever step currently holds the worker.
#[derive(Debug, Default)]
pub struct PipelineState {
    /// Cleaned, not yet converted input.
    pub carry_in: Vec<u8>,
    /// Partial trailing line of encoded output.
    pub carry_out: Vec<u8>,
    /// Last write ended exactly on a line edge.
    pub reached_line_boundary: bool,
    /// Any encoded text (payload or markers) went out.
    pub wrote_text: bool,
    /// Index the next chunk must carry.
    pub next_chunk: u64,
}
