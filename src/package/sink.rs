//! Container sinks: where sealed parts end up.
use std::io::{Seek, Write};

use zip::write::{SimpleFileOptions, ZipWriter};
use zip::CompressionMethod;

use crate::common::Result;
use crate::package::options::Compression;

/// Receives named byte blobs in the order the package is sealed.
pub trait PackageSink {
    /// Add an entry with the sink's normal compression.
    fn add_part(&mut self, path: &str, data: &[u8]) -> Result<()>;

    /// Add an entry that must not be compressed.
    fn add_stored_part(&mut self, path: &str, data: &[u8]) -> Result<()> {
        self.add_part(path, data)
    }

    /// Compression for entries added with [`add_part`](Self::add_part).
    /// Called by the assembler with its options before sealing; sinks that
    /// do not compress ignore it.
    fn set_compression(&mut self, _compression: Compression) {}
}

/// Writes parts into a ZIP archive.
///
/// Every entry gets the same fixed timestamp, so identical input yields
/// identical archives.
pub struct ZipSink<W: Write + Seek> {
    zip_writer: ZipWriter<W>,
    compression: Compression,
}

impl<W: Write + Seek> ZipSink<W> {
    pub fn new(writer: W) -> Self {
        Self::with_compression(writer, Compression::Deflated)
    }

    /// A sink with a fixed starting compression. When used through
    /// [`PackageAssembler`](crate::package::PackageAssembler), the
    /// assembler's `PackageOptions::compression` replaces it at sealing.
    pub fn with_compression(writer: W, compression: Compression) -> Self {
        Self {
            zip_writer: ZipWriter::new(writer),
            compression,
        }
    }

    fn options(method: CompressionMethod) -> SimpleFileOptions {
        SimpleFileOptions::default()
            .compression_method(method)
            .last_modified_time(zip::DateTime::default())
    }

    fn write_entry(&mut self, path: &str, data: &[u8], method: CompressionMethod) -> Result<()> {
        self.zip_writer.start_file(path, Self::options(method))?;
        self.zip_writer.write_all(data)?;
        Ok(())
    }

    /// Write the central directory and return the underlying writer.
    pub fn finish(self) -> Result<W> {
        Ok(self.zip_writer.finish()?)
    }
}

impl ZipSink<std::io::Cursor<Vec<u8>>> {
    /// A sink writing to memory.
    pub fn in_memory() -> Self {
        Self::new(std::io::Cursor::new(Vec::new()))
    }

    /// Finish writing and return the archive bytes.
    pub fn finish_to_bytes(self) -> Result<Vec<u8>> {
        Ok(self.finish()?.into_inner())
    }
}

impl<W: Write + Seek> PackageSink for ZipSink<W> {
    fn add_part(&mut self, path: &str, data: &[u8]) -> Result<()> {
        let method = match self.compression {
            Compression::Deflated => CompressionMethod::Deflated,
            Compression::Stored => CompressionMethod::Stored,
        };
        self.write_entry(path, data, method)
    }

    fn add_stored_part(&mut self, path: &str, data: &[u8]) -> Result<()> {
        self.write_entry(path, data, CompressionMethod::Stored)
    }

    fn set_compression(&mut self, compression: Compression) {
        self.compression = compression;
    }
}

/// One entry captured by [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkEntry {
    pub path: String,
    pub data: Vec<u8>,
    pub stored: bool,
}

/// Collects parts in memory, in order. Useful for inspecting output.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Vec<SinkEntry>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[SinkEntry] {
        &self.entries
    }

    /// Entry paths in the order they were added.
    pub fn paths(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.path.as_str()).collect()
    }

    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|e| e.path == path)
            .map(|e| e.data.as_slice())
    }

    /// Entry content as UTF-8 text.
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(|data| std::str::from_utf8(data).ok())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PackageSink for MemorySink {
    fn add_part(&mut self, path: &str, data: &[u8]) -> Result<()> {
        self.entries.push(SinkEntry {
            path: path.to_string(),
            data: data.to_vec(),
            stored: false,
        });
        Ok(())
    }

    fn add_stored_part(&mut self, path: &str, data: &[u8]) -> Result<()> {
        self.entries.push(SinkEntry {
            path: path.to_string(),
            data: data.to_vec(),
            stored: true,
        });
        Ok(())
    }
}
