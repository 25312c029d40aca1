//! Append-only JSONL writer for sample recordings and signal streams.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use dawdle_common::error::{DawdleError, DawdleResult};

/// Writes serializable records as JSON lines, optionally after a
/// `#`-prefixed header line.
pub struct JsonlWriter<W: Write> {
    writer: BufWriter<W>,
    lines_written: u64,
    flush_every: u64,
}

impl JsonlWriter<File> {
    /// Create (or truncate) a file and write the header as the first line.
    pub fn create<H: Serialize>(path: &Path, header: &H) -> DawdleResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        let mut writer = Self::new(file, 1000);
        writer.write_header(header)?;
        Ok(writer)
    }
}

impl<W: Write> JsonlWriter<W> {
    /// Wrap a sink, flushing after every `flush_every` lines.
    ///
    /// `flush_every` of 0 or 1 flushes after each line.
    pub fn new(sink: W, flush_every: u64) -> Self {
        Self {
            writer: BufWriter::new(sink),
            lines_written: 0,
            flush_every: flush_every.max(1),
        }
    }

    /// Write a header as a comment line (prefixed with #).
    pub fn write_header<H: Serialize>(&mut self, header: &H) -> DawdleResult<()> {
        let header_json = serde_json::to_string(header)?;
        writeln!(self.writer, "# {header_json}")
            .map_err(|e| DawdleError::emit(format!("Failed to write header: {e}")))?;
        Ok(())
    }

    /// Write a single record as a JSONL line.
    pub fn write_line<T: Serialize>(&mut self, record: &T) -> DawdleResult<()> {
        let json = serde_json::to_string(record)?;
        writeln!(self.writer, "{json}")
            .map_err(|e| DawdleError::emit(format!("Failed to write line: {e}")))?;
        self.lines_written += 1;

        if self.lines_written % self.flush_every == 0 {
            self.flush()?;
        }

        Ok(())
    }

    /// Flush buffered writes.
    pub fn flush(&mut self) -> DawdleResult<()> {
        self.writer
            .flush()
            .map_err(|e| DawdleError::emit(format!("Failed to flush: {e}")))?;
        Ok(())
    }

    /// Number of record lines written (header excluded).
    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }
}

impl<W: Write> Drop for JsonlWriter<W> {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
