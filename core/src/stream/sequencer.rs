//! stream/sequencer.rs
//! Ordered hand-off of chunks to the single pipeline worker.
//!
//! A bounded crossbeam channel feeds one scoped worker thread that owns the
//! `StreamPipeline`. Chunks are processed strictly in arrival order; the
//! worker checks the index sequence before touching the carry state.

use std::io::Write;
use std::thread::{Scope, ScopedJoinHandle};

use bytes::Bytes;
use crossbeam::channel::{bounded, Receiver, Sender};
use log::{debug, error};

use crate::stream::pipeline::StreamPipeline;
use crate::stream::state::{ChunkFlags, ChunkInput};
use crate::types::{StreamError, StreamReport};

pub struct ChunkSequencer<'scope> {
    tx: Option<Sender<ChunkInput>>,
    worker: ScopedJoinHandle<'scope, Result<StreamReport, StreamError>>,
    next_index: u64,
}

impl<'scope> ChunkSequencer<'scope> {
    /// Start the worker inside `scope`. `capacity` bounds chunks in flight.
    pub fn spawn<'env, W>(
        scope: &'scope Scope<'scope, 'env>,
        pipeline: StreamPipeline<W>,
        capacity: usize,
    ) -> Self
    where
        W: Write + Send + 'scope,
    {
        let (tx, rx) = bounded::<ChunkInput>(capacity.max(1));
        let worker = scope.spawn(move || run_worker(pipeline, rx));
        debug!("[SEQUENCER] worker started, queue capacity {}", capacity);
        Self { tx: Some(tx), worker, next_index: 0 }
    }

    /// Queue the next chunk. Blocks while the queue is full.
    pub fn enqueue(&mut self, bytes: Bytes) -> Result<(), StreamError> {
        self.send(bytes, ChunkFlags::empty())
    }

    /// Signal end of stream, wait for the worker and return its report.
    pub fn drain(mut self) -> Result<StreamReport, StreamError> {
        // A closed queue means the worker already stopped; its result says why.
        let _ = self.send(Bytes::new(), ChunkFlags::FINAL_CHUNK);
        drop(self.tx.take());
        debug!("[SEQUENCER] draining after {} chunks", self.next_index);
        match self.worker.join() {
            Ok(result) => result,
            Err(_) => Err(StreamError::Internal("chunk worker panicked".into())),
        }
    }

    fn send(&mut self, bytes: Bytes, flags: ChunkFlags) -> Result<(), StreamError> {
        let tx = self
            .tx
            .as_ref()
            .ok_or(StreamError::PipelineClosed("chunk queue already drained"))?;
        tx.send(ChunkInput { chunk_index: self.next_index, bytes, flags })
            .map_err(|_| StreamError::PipelineClosed("chunk queue closed"))?;
        self.next_index += 1;
        Ok(())
    }
}

fn run_worker<W: Write>(
    mut pipeline: StreamPipeline<W>,
    rx: Receiver<ChunkInput>,
) -> Result<StreamReport, StreamError> {
    let mut expected = 0u64;
    for input in rx.iter() {
        if input.chunk_index != expected {
            error!(
                "[SEQUENCER] chunk {} arrived while expecting {}",
                input.chunk_index, expected
            );
            return Err(StreamError::Internal(format!(
                "out-of-order chunk {} (expected {})",
                input.chunk_index, expected
            )));
        }
        expected += 1;

        if !input.bytes.is_empty() {
            if let Err(e) = pipeline.push(&input.bytes) {
                error!("[SEQUENCER] chunk {} failed: {}", input.chunk_index, e);
                return Err(e);
            }
        }
        if input.is_final() {
            debug!("[SEQUENCER] final chunk {} received", input.chunk_index);
            return pipeline.finish();
        }
    }
    Err(StreamError::PipelineClosed("chunk queue closed before the final chunk"))
}
