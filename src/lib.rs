//! # CEDICT Ingest - Chinese-English Dictionary Source Ingestion
//!
//! This crate reads CEDICT-style dictionary sources line by line and turns
//! them into structured records ready for a lookup store.
//!
//! ## Features
//!
//! - **Line parsing**: Split `traditional simplified [romanization] /gloss/gloss/` lines
//! - **Tone marks**: Convert numbered pinyin (`ni3 hao3`) to tone-marked pinyin (`nǐ hǎo`)
//! - **Ingest pipeline**: Lazy, line-by-line ingestion with per-line error reporting
//! - **Record stores**: In-memory, JSON lines and Tantivy full-text index stores
//! - **Progress reporting**: Byte-based progress with cooperative cancellation
//!
//! ## Quick Start
//!
//! ### Converting Pinyin
//!
//! ```
//! use cedict_ingest::pinyin::{to_toned_form, ErhuaPolicy};
//!
//! assert_eq!(to_toned_form("ni3 hao3", ErhuaPolicy::Merge), "nǐ hǎo");
//! assert_eq!(to_toned_form("yi1 dian3 r5", ErhuaPolicy::Merge), "yī diǎnr");
//! ```
//!
//! ### Ingesting a Dictionary File
//!
//! ```no_run
//! use cedict_ingest::builder::{CedictIngestor, CedictSourceLoader, IngestConfig};
//! use cedict_ingest::storage::FtsRecordStore;
//!
//! # fn main() -> cedict_ingest::Result<()> {
//! let config = IngestConfig { tone_accents: true, ..IngestConfig::default() };
//! let mut loader = CedictSourceLoader::open("cedict_ts.u8")?;
//! let mut store = FtsRecordStore::new("cedict_index");
//!
//! let summary = CedictIngestor::ingest_source(&mut loader, &config, &mut store, None)?;
//! println!("{} records written", summary.records_written);
//!
//! for record in store.lookup_simplified("你好")? {
//!     println!("{}: {}", record.romanization_numeric, record.joined_glosses());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **Parsing**: [`parser`] splits lines into headwords, romanization and gloss text
//! - **Romanization**: [`pinyin`] holds the tone mark table and the transcoder
//! - **Building**: [`builder`] assembles records and drives ingest runs
//! - **Storage**: [`storage`] defines the [`storage::RecordStore`] contract and its stores
//! - **Utilities**: [`utils`] for progress reporting
//!
//! ## Error Handling
//!
//! Per-line problems are reported as [`IngestError`] values carrying the
//! 1-based line number and a [`MalformedLine`] cause. Everything else returns
//! [`Result<T>`] with a [`CedictError`]. The crate uses the `snafu` library
//! for error context and backtraces.
//!
//! ```
//! use cedict_ingest::parser::parse_line;
//! use cedict_ingest::MalformedLine;
//!
//! assert_eq!(parse_line("你 你 ni3 /you/"), Err(MalformedLine::MissingOpenBracket));
//! ```

pub mod builder;
pub mod error;
pub mod parser;
pub mod pinyin;
pub mod storage;
pub mod utils;

// Re-export commonly used types for convenience
pub use builder::{CedictIngestor, DictionaryRecord, IngestConfig};
pub use storage::RecordStore;

// Re-export error types for convenience
pub use error::{CedictError, IngestError, MalformedLine, Result, snafu};
