//! Line-by-line ingest of a CEDICT document.
//!
//! [`IngestState`] owns the only running state of a run, the raw line counter
//! and the record ordinal counter. It is fed one line at a time. [`IngestPipeline`]
//! wraps it as a lazy iterator over any sequence of lines.
//!
//! - Comment lines produce nothing and do not advance the ordinal.
//! - A blank line is malformed like any other line without `[`.
//! - Malformed lines produce an [`IngestError`] carrying the raw line number;
//!   they advance the line counter but not the ordinal.
//! - Every other line produces a [`DictionaryRecord`] with the next ordinal,
//!   starting at 1.
//!
//! Under [`MalformedLinePolicy::Abort`] the first error is the last item.
//!
//! # Examples
//!
//! ```
//! use cedict_ingest::builder::{IngestConfig, IngestPipeline, MalformedLinePolicy};
//!
//! let lines = ["# header", "你 你 [ni3] /you/", "bad line", "好 好 [hao3] /good/"];
//! let config = IngestConfig {
//!     on_malformed_line: MalformedLinePolicy::SkipAndReport,
//!     ..IngestConfig::default()
//! };
//!
//! let results: Vec<_> = IngestPipeline::new(lines, &config).collect();
//! assert_eq!(results.len(), 3);
//! assert_eq!(results[0].as_ref().unwrap().ordinal, 1);
//! assert_eq!(results[1].as_ref().unwrap_err().line_no, 3);
//! assert_eq!(results[2].as_ref().unwrap().ordinal, 2);
//! ```

use log::debug;

use crate::builder::ingest_config::{IngestConfig, MalformedLinePolicy};
use crate::builder::record_builder::{DictionaryRecord, RecordBuilder};
use crate::error::{IngestError, MalformedLine};
use crate::parser::{parse_line, LineParse};

/// Outcome of feeding one line, `None` for lines that carry no entry.
pub type LineOutcome = Option<Result<DictionaryRecord, IngestError>>;

/// Run-scoped counters and options for a single ingest run.
#[derive(Debug, Clone)]
pub struct IngestState {
    builder: RecordBuilder,
    policy: MalformedLinePolicy,
    line_no: u64,
    next_ordinal: u64,
    aborted: bool,
}

impl IngestState {
    pub fn new(config: &IngestConfig) -> Self {
        Self {
            builder: RecordBuilder::new(config.record_options()),
            policy: config.on_malformed_line,
            line_no: 0,
            next_ordinal: 1,
            aborted: false,
        }
    }

    /// Feeds the next raw line of the document.
    ///
    /// Once the run has aborted every further line is ignored and `None` is
    /// returned.
    pub fn ingest_line(&mut self, line: &str) -> LineOutcome {
        if self.aborted {
            return None;
        }
        self.line_no += 1;

        let parsed = match parse_line(line) {
            Ok(LineParse::Skip) => return None,
            Ok(LineParse::Entry(parsed)) => parsed,
            Err(cause) => return Some(Err(self.fail(cause))),
        };

        match self.builder.build(parsed, self.next_ordinal) {
            Ok(record) => {
                self.next_ordinal += 1;
                Some(Ok(record))
            }
            Err(cause) => Some(Err(self.fail(cause))),
        }
    }

    fn fail(&mut self, cause: MalformedLine) -> IngestError {
        debug!("Malformed line {}: {}", self.line_no, cause);
        if self.policy == MalformedLinePolicy::Abort {
            self.aborted = true;
        }
        IngestError::new(self.line_no, cause)
    }

    /// Raw lines consumed so far, including comments and malformed lines.
    pub fn lines_read(&self) -> u64 {
        self.line_no
    }

    /// Records produced so far.
    pub fn records_built(&self) -> u64 {
        self.next_ordinal - 1
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted
    }
}

/// Lazy iterator of records and per-line errors over a sequence of lines.
///
/// The iterator is finite and fused after an abort. It cannot be restarted;
/// build a new pipeline to run the same lines again.
pub struct IngestPipeline<I> {
    lines: I,
    state: IngestState,
}

impl<I> IngestPipeline<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    pub fn new<L: IntoIterator<IntoIter = I>>(lines: L, config: &IngestConfig) -> Self {
        Self {
            lines: lines.into_iter(),
            state: IngestState::new(config),
        }
    }

    pub fn state(&self) -> &IngestState {
        &self.state
    }
}

impl<I> Iterator for IngestPipeline<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = Result<DictionaryRecord, IngestError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.state.is_aborted() {
            let line = self.lines.next()?;
            if let Some(outcome) = self.state.ingest_line(line.as_ref()) {
                return Some(outcome);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = "\
# CC-CEDICT
#! date=2024-01-01
你 你 [ni3] /you/
好 好 [hao3] /good/well/
broken line without brackets
# another comment
中國 中国 [Zhong1 guo2] /China/
你 你 [ni3 /missing close/
水 水 [shui3] /water/
";

    fn skip_config() -> IngestConfig {
        IngestConfig {
            on_malformed_line: MalformedLinePolicy::SkipAndReport,
            ..IngestConfig::default()
        }
    }

    #[test]
    fn test_ordinals_are_contiguous_across_comments_and_errors() {
        let results: Vec<_> = IngestPipeline::new(DOCUMENT.lines(), &skip_config()).collect();

        let ordinals: Vec<u64> = results.iter().filter_map(|r| r.as_ref().ok()).map(|r| r.ordinal).collect();
        assert_eq!(ordinals, vec![1, 2, 3, 4]);

        let errors: Vec<&IngestError> = results.iter().filter_map(|r| r.as_ref().err()).collect();
        assert_eq!(errors, vec![
            &IngestError::new(5, MalformedLine::MissingOpenBracket),
            &IngestError::new(8, MalformedLine::MissingCloseBracket),
        ]);
    }

    #[test]
    fn test_abort_stops_at_first_error() {
        let mut pipeline = IngestPipeline::new(DOCUMENT.lines(), &IngestConfig::default());
        let results: Vec<_> = pipeline.by_ref().collect();

        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_ok());
        assert_eq!(results[2], Err(IngestError::new(5, MalformedLine::MissingOpenBracket)));
        assert!(pipeline.state().is_aborted());
        assert_eq!(pipeline.state().lines_read(), 5);
        assert_eq!(pipeline.next(), None);
    }

    #[test]
    fn test_tone_accents_flow_into_records() {
        let config = IngestConfig { tone_accents: true, ..skip_config() };
        let records: Vec<DictionaryRecord> = IngestPipeline::new(DOCUMENT.lines(), &config)
            .filter_map(|r| r.ok())
            .collect();

        let toned: Vec<Option<&str>> = records.iter().map(|r| r.romanization_toned.as_deref()).collect();
        assert_eq!(toned, vec![Some("nǐ"), Some("hǎo"), Some("Zhōng guó"), Some("shuǐ")]);
        assert_eq!(records[1].glosses, vec!["good", "well"]);
    }

    #[test]
    fn test_state_counters() {
        let mut state = IngestState::new(&skip_config());
        assert!(state.ingest_line("# comment").is_none());
        assert!(matches!(state.ingest_line("你 你 [ni3] /you/\n"), Some(Ok(_))));
        assert!(matches!(state.ingest_line("oops"), Some(Err(_))));
        assert_eq!(state.lines_read(), 3);
        assert_eq!(state.records_built(), 1);
        assert!(!state.is_aborted());
    }

    #[test]
    fn test_blank_lines_are_malformed() {
        let lines = ["你 你 [ni3] /you/", "", "   ", "好 好 [hao3] /good/"];

        let results: Vec<_> = IngestPipeline::new(lines, &IngestConfig::default()).collect();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().map(|r| r.ordinal), Ok(1));
        assert_eq!(results[1], Err(IngestError::new(2, MalformedLine::MissingOpenBracket)));

        let results: Vec<_> = IngestPipeline::new(lines, &skip_config()).collect();
        let errors: Vec<u64> = results.iter().filter_map(|r| r.as_ref().err()).map(|e| e.line_no).collect();
        assert_eq!(errors, vec![2, 3]);
        let ordinals: Vec<u64> = results.iter().filter_map(|r| r.as_ref().ok()).map(|r| r.ordinal).collect();
        assert_eq!(ordinals, vec![1, 2]);
    }

    #[test]
    fn test_empty_document() {
        let lines: Vec<String> = Vec::new();
        assert_eq!(IngestPipeline::new(lines, &IngestConfig::default()).count(), 0);
    }
}
