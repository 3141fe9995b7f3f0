//! stream/io.rs
//! Normalized input/output plus the chunk reader.

use std::io::{ErrorKind, Read, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use bytes::Bytes;

use crate::types::StreamError;

/// Canonical input abstraction
pub enum InputSource {
    /// Standard input or any other stream.
    Reader(Box<dyn Read + Send>),
    /// Opened lazily; a failure to open counts as a read failure.
    File(PathBuf),
    Memory(Vec<u8>),
}

/// Canonical output abstraction
pub enum OutputSink {
    Writer(Box<dyn Write + Send>),
    /// Collect into a buffer the caller keeps a handle to.
    Memory(SharedBuffer),
}

/// Normalize input source into a boxed reader
pub fn open_input(src: InputSource) -> Result<Box<dyn Read + Send>, StreamError> {
    let reader: Box<dyn Read + Send> = match src {
        InputSource::Reader(r) => r,
        InputSource::File(p) => Box::new(std::fs::File::open(p).map_err(StreamError::Read)?),
        InputSource::Memory(b) => Box::new(std::io::Cursor::new(b)),
    };
    Ok(reader)
}

/// Normalize output sink into a boxed writer
pub fn open_output(sink: OutputSink) -> Box<dyn Write + Send> {
    match sink {
        OutputSink::Writer(w) => w,
        OutputSink::Memory(buf) => Box::new(buf),
    }
}

/// Cloneable in-memory sink.
#[derive(Clone, Default, Debug)]
pub struct SharedBuffer {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything written so far.
    pub fn contents(&self) -> Vec<u8> {
        match self.buf.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
        let mut guard = self
            .buf
            .lock()
            .map_err(|_| std::io::Error::new(ErrorKind::Other, "shared buffer poisoned"))?;
        guard.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Fill up to `len` bytes; a short result means end of input.
pub fn read_exact_or_eof<R: Read>(r: &mut R, len: usize) -> Result<Bytes, StreamError> {
    let mut buf = vec![0u8; len];
    let mut off = 0;

    while off < len {
        match r.read(&mut buf[off..]) {
            Ok(0) => break,
            Ok(n) => off += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(StreamError::Read(e)),
        }
    }

    buf.truncate(off);
    Ok(Bytes::from(buf))
}
