use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

/// Writes records as JSON Lines, one serialized record per line
pub struct RecordWriter<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(writer: W) -> Self {
        RecordWriter { writer, written: 0 }
    }

    pub fn write_record<T: Serialize + ?Sized>(&mut self, record: &T) -> Result<()> {
        let json = serde_json::to_string(record)
            .context("Failed to serialize record")?;
        writeln!(self.writer, "{}", json)
            .context("Failed to write record")?;
        self.written += 1;
        Ok(())
    }

    /// Like [`write_record`](Self::write_record) but pretty-printed; the record spans several lines
    pub fn write_record_pretty<T: Serialize + ?Sized>(&mut self, record: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(record)
            .context("Failed to serialize record")?;
        writeln!(self.writer, "{}", json)
            .context("Failed to write record")?;
        self.written += 1;
        Ok(())
    }

    pub fn write_records<I, T>(&mut self, records: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Serialize,
    {
        for record in records {
            self.write_record(&record)?;
        }
        Ok(())
    }

    /// Number of records written so far
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush writer")
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
