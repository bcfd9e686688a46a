use std::fs::File;
use std::io::{BufWriter, Write};
use anyhow::{Result, Context};
use brotli::enc::BrotliEncoderParams;
use brotli::CompressorWriter;
use crate::model::Snapshot;

pub struct SnapshotWriter {
    writer: Box<dyn Write>,
    path: String,
}

impl SnapshotWriter {
    /// Creates a new SnapshotWriter for the specified file path.
    ///
    /// Automatically enables Brotli compression if the file path ends with `.br`
    /// (e.g., `categories.json.br`).
    ///
    /// # Compression
    ///
    /// Brotli compression uses quality level 6 (balanced speed/ratio).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use catlist::{Snapshot, SnapshotWriter};
    /// # fn main() -> anyhow::Result<()> {
    /// let snapshot = Snapshot::default();
    ///
    /// // Uncompressed snapshot
    /// SnapshotWriter::new("categories.json")?.write(&snapshot)?;
    ///
    /// // Compressed snapshot
    /// SnapshotWriter::new("categories.json.br")?.write(&snapshot)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(file_path: &str) -> Result<Self> {
        let file = File::create(file_path)
            .with_context(|| format!("Failed to create file: {}", file_path))?;

        let writer: Box<dyn Write> = if file_path.ends_with(".br") {
            let buf_writer = BufWriter::new(file);
            let params = BrotliEncoderParams {
                quality: 6,  // Balanced compression
                lgwin: 22,   // Window size
                ..Default::default()
            };
            Box::new(CompressorWriter::with_params(buf_writer, 4096, &params))
        } else {
            Box::new(BufWriter::new(file))
        };

        Ok(SnapshotWriter {
            writer,
            path: file_path.to_string(),
        })
    }

    /// Serializes the whole snapshot and flushes it to disk.
    pub fn write(mut self, snapshot: &Snapshot) -> Result<()> {
        serde_json::to_writer(&mut self.writer, snapshot)
            .with_context(|| format!("Failed to serialize snapshot to {}", self.path))?;

        self.writer.flush()
            .context("Failed to flush writer")?;

        tracing::info!("wrote snapshot to {}", self.path);
        Ok(())
    }
}

impl Drop for SnapshotWriter {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}
