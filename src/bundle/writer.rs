//! Aggregation block writer

use std::io::{self, Write};

/// Writes aggregation blocks to an output sink
///
/// Each block is a header line `\n--- <path> ---\n`, the file content, and
/// a trailing newline.
pub struct BundleWriter<W: Write> {
    inner: W,
    bytes_written: u64,
}

impl<W: Write> BundleWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            bytes_written: 0,
        }
    }

    /// Append one block for the file at `display_path`
    pub fn write_block(&mut self, display_path: &str, content: &str) -> io::Result<()> {
        let header = format!("\n--- {} ---\n", display_path);
        self.inner.write_all(header.as_bytes())?;
        self.inner.write_all(content.as_bytes())?;
        self.inner.write_all(b"\n")?;

        self.bytes_written += (header.len() + content.len() + 1) as u64;
        Ok(())
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Flush and hand back the sink
    pub fn finish(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_block_layout() {
        let mut writer = BundleWriter::new(Vec::new());
        writer.write_block("a.js", "x").unwrap();
        writer.write_block("sub/c.css", "y\n").unwrap();

        let bytes = writer.bytes_written();
        let out = String::from_utf8(writer.finish().unwrap()).unwrap();

        assert_eq!(out, "\n--- a.js ---\nx\n\n--- sub/c.css ---\ny\n\n");
        assert_eq!(bytes, out.len() as u64);
    }

    #[test]
    fn test_empty_content_still_gets_header() {
        let mut writer = BundleWriter::new(Vec::new());
        writer.write_block("empty.html", "").unwrap();
        let out = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert_eq!(out, "\n--- empty.html ---\n\n");
    }
}
