use std::io::{BufWriter, Write};

use crate::engine::Processor;

/// Write `count` records as JSON Lines, returning the bytes written.
pub fn write_records_jsonl<W: Write>(
    writer: W,
    processor: &Processor,
    count: usize,
) -> std::io::Result<u64> {
    let mut writer = CountingWriter::new(BufWriter::new(writer));
    for record in processor.records(count) {
        serde_json::to_writer(&mut writer, &record)?;
        writer.write_all(b"\n")?;
    }

    writer.flush()?;
    Ok(writer.bytes_written())
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
