//! Parser for a single CEDICT-style dictionary line.
//!
//! A line has the shape
//!
//! ```text
//! 傳統 传统 [chuan2 tong3] /tradition/traditional/
//! ```
//!
//! i.e. traditional and simplified headwords, the numbered romanization in
//! square brackets, and slash-delimited senses. Lines starting with `#` are
//! comments.
//!
//! # Examples
//!
//! ```
//! use cedict_ingest::parser::{parse_line, LineParse};
//!
//! match parse_line("你 你 [ni3] /you/").unwrap() {
//!     LineParse::Entry(parsed) => {
//!         assert_eq!(parsed.simplified, "你");
//!         assert_eq!(parsed.romanization_numeric, "ni3");
//!         assert_eq!(parsed.gloss_raw, "you");
//!     }
//!     LineParse::Skip => unreachable!(),
//! }
//! ```

use crate::error::MalformedLine;

/// Comment marker at the start of a line.
pub const COMMENT_PREFIX: char = '#';

/// Separator between the senses of a gloss, also terminating the gloss span.
pub const SENSE_SEPARATOR: char = '/';

/// The structural fields of one dictionary line, before any normalization.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedLine {
    pub traditional: String,
    pub simplified: String,
    /// Text strictly between the first `[` and the next `]`.
    pub romanization_numeric: String,
    /// Text after the first `/` following the romanization, minus the closing
    /// `/`, trimmed. Inner `/` separators are kept.
    pub gloss_raw: String,
}

/// Outcome of parsing one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineParse {
    /// Comment line, carries no entry.
    Skip,
    Entry(ParsedLine),
}

/// Strips the `\n` or `\r\n` line terminator, if any.
pub fn strip_line_terminator(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line)
}

/// Parses one raw dictionary line.
///
/// The line terminator is optional. Fails with a [`MalformedLine`] when a
/// required delimiter is missing, when fewer than two headword tokens precede
/// the `[`, or when the gloss span is empty.
pub fn parse_line(line: &str) -> Result<LineParse, MalformedLine> {
    let line = strip_line_terminator(line);
    if line.starts_with(COMMENT_PREFIX) {
        return Ok(LineParse::Skip);
    }

    let open = line.find('[').ok_or(MalformedLine::MissingOpenBracket)?;
    let mut headwords = line[..open].split_whitespace();
    let (traditional, simplified) = match (headwords.next(), headwords.next()) {
        (Some(traditional), Some(simplified)) => (traditional, simplified),
        _ => return Err(MalformedLine::MissingHeadwords),
    };

    let after_open = &line[open + 1..];
    let close = after_open.find(']').ok_or(MalformedLine::MissingCloseBracket)?;
    let romanization_numeric = &after_open[..close];

    let after_close = &after_open[close + 1..];
    let slash = after_close
        .find(SENSE_SEPARATOR)
        .ok_or(MalformedLine::MissingGlossDelimiter)?;
    let gloss_span = after_close[slash + 1..].trim_end();
    let gloss_raw = gloss_span
        .strip_suffix(SENSE_SEPARATOR)
        .unwrap_or(gloss_span)
        .trim();
    if gloss_raw.is_empty() {
        return Err(MalformedLine::EmptyGloss);
    }

    Ok(LineParse::Entry(ParsedLine {
        traditional: traditional.to_string(),
        simplified: simplified.to_string(),
        romanization_numeric: romanization_numeric.to_string(),
        gloss_raw: gloss_raw.to_string(),
    }))
}
