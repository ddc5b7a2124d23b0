//! Input file access
//!
//! Opens the coordinate table once, transparently decoding gzip and bzip2
//! inputs, and yields its lines through a reusable buffer.

use crate::core::error::{InputError, InputResult};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

/// Default buffer size for BufReader (64KB)
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Compression format of an input table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    /// Plain text (uncompressed)
    Plain,
    /// Gzip compressed (.gz)
    Gzip,
    /// Bzip2 compressed (.bz2)
    Bzip2,
}

impl CompressionFormat {
    /// Detect the format from the file extension, then from magic bytes
    ///
    /// # Examples
    /// ```
    /// use asm_convert::core::io::CompressionFormat;
    /// use std::path::Path;
    ///
    /// let detect = |name: &str, magic: &[u8]| CompressionFormat::detect(Path::new(name), magic);
    /// assert_eq!(detect("loci.tsv.gz", b""), CompressionFormat::Gzip);
    /// assert_eq!(detect("loci.tsv", b"BZh9"), CompressionFormat::Bzip2);
    /// assert_eq!(detect("loci.tsv", b"17\t1"), CompressionFormat::Plain);
    /// ```
    pub fn detect(path: &Path, magic: &[u8]) -> Self {
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        if extension == "gz" || magic.starts_with(&[0x1f, 0x8b]) {
            CompressionFormat::Gzip
        } else if extension == "bz2" || magic.starts_with(b"BZh") {
            CompressionFormat::Bzip2
        } else {
            CompressionFormat::Plain
        }
    }
}

/// Open an input table for line-by-line reading
///
/// Any failure to open or probe the file is reported as [`InputError::FileOpen`]
/// carrying the path.
pub fn open_input<P: AsRef<Path>>(path: P) -> InputResult<Box<dyn BufRead>> {
    let path = path.as_ref();
    let file_open = |source: io::Error| InputError::FileOpen {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(file_open)?;
    let mut magic = [0u8; 3];
    let bytes_read = file.read(&mut magic).map_err(file_open)?;

    // Reset file position
    drop(file);
    let file = File::open(path).map_err(file_open)?;

    let format = CompressionFormat::detect(path, &magic[..bytes_read]);
    log::debug!("Opening {} as {:?}", path.display(), format);

    Ok(match format {
        CompressionFormat::Gzip => Box::new(BufReader::with_capacity(
            DEFAULT_BUFFER_SIZE,
            flate2::read::MultiGzDecoder::new(file),
        )),
        CompressionFormat::Bzip2 => Box::new(BufReader::with_capacity(
            DEFAULT_BUFFER_SIZE,
            bzip2::read::BzDecoder::new(file),
        )),
        CompressionFormat::Plain => Box::new(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file)),
    })
}

/// Line iterator that reuses a buffer to avoid allocations
pub struct LineIterator<R: BufRead> {
    reader: R,
    buffer: String,
}

impl<R: BufRead> LineIterator<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: String::with_capacity(256),
        }
    }

    /// Read the next line into the internal buffer
    /// Returns None at EOF, Some(Ok(&str)) on success, Some(Err) on error
    pub fn next_line(&mut self) -> Option<io::Result<&str>> {
        self.buffer.clear();
        match self.reader.read_line(&mut self.buffer) {
            Ok(0) => None, // EOF
            Ok(_) => {
                // Remove trailing newline
                if self.buffer.ends_with('\n') {
                    self.buffer.pop();
                    if self.buffer.ends_with('\r') {
                        self.buffer.pop();
                    }
                }
                Some(Ok(&self.buffer))
            }
            Err(e) => Some(Err(e)),
        }
    }
}
