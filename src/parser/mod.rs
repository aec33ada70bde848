// Dictionary line parsing
//
// This module splits raw CEDICT-style lines into their structural fields.

pub mod line_parser;

pub use line_parser::{parse_line, strip_line_terminator, LineParse, ParsedLine, SENSE_SEPARATOR};
