//! Reads raw CEDICT text into decoded lines.
//!
//! The loader is the only place bytes become text. Each line is decoded as
//! UTF-8 with `encoding_rs` (invalid sequences become U+FFFD) and normalized
//! to NFC, so the parser and the tone transcoder only ever see one encoding.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info};
use unicode_normalization::{is_nfc, UnicodeNormalization};

use crate::Result;

fn skip_utf8_bom(line: &str) -> &str {
    line.strip_prefix('\u{FEFF}').unwrap_or(line)
}

fn trim_line_terminator(bytes: &[u8]) -> &[u8] {
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    bytes.strip_suffix(b"\r").unwrap_or(bytes)
}

/// Decodes one line of source bytes into NFC text.
pub fn decode_line(bytes: &[u8]) -> String {
    let (decoded, had_errors) = encoding_rs::UTF_8.decode_without_bom_handling(bytes);
    if had_errors {
        debug!("Invalid UTF-8 replaced in line: {}", decoded);
    }
    if is_nfc(&decoded) {
        decoded.into_owned()
    } else {
        decoded.nfc().collect()
    }
}

pub struct CedictSourceLoader<R: BufRead> {
    pub source_name: String,
    input_reader: R,
    line_buffer: Vec<u8>,
    line_count: u64,
    bytes_read: u64,
    total_size: u64,
}

impl CedictSourceLoader<BufReader<File>> {
    /// Opens a decompressed CEDICT text file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let total_size = file.metadata()?.len();
        info!("Loading source: {} ({} bytes)", path.display(), total_size);
        Ok(Self::from_reader(BufReader::new(file), &path.display().to_string(), total_size))
    }
}

impl<R: BufRead> CedictSourceLoader<R> {
    /// Wraps an already opened reader. `total_size` is the byte length of the
    /// source if known, 0 otherwise.
    pub fn from_reader(input_reader: R, source_name: &str, total_size: u64) -> Self {
        Self {
            source_name: source_name.to_string(),
            input_reader,
            line_buffer: Vec::with_capacity(256),
            line_count: 0,
            bytes_read: 0,
            total_size,
        }
    }

    /// Returns the next decoded line without its terminator, or `None` at the
    /// end of the source.
    pub fn next_line(&mut self) -> Result<Option<String>> {
        self.line_buffer.clear();
        let bytes_read = self.input_reader.read_until(b'\n', &mut self.line_buffer)?;
        if bytes_read == 0 {
            return Ok(None);
        }
        self.bytes_read += bytes_read as u64;
        self.line_count += 1;

        let line = decode_line(trim_line_terminator(&self.line_buffer));
        if self.line_count == 1 {
            return Ok(Some(skip_utf8_bom(&line).to_string()));
        }
        Ok(Some(line))
    }

    pub fn lines_read(&self) -> u64 {
        self.line_count
    }

    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    pub fn total_size(&self) -> u64 {
        self.total_size
    }
}
