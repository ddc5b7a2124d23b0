//! Locus parsing
//!
//! Turns one line of a tab- or comma-delimited table into a query locus.
//!
//! # Input Format
//!
//! ```text
//! #chromosome  start     end
//! 17           36169091  36169091
//! X            3084378   3084378
//! ```
//!
//! - Lines starting with `#` are comments
//! - Lines with fewer than 2 columns after trimming are blank
//! - The first three columns are the sequence name, start and end; extra columns are ignored

use crate::core::error::LocusParseError;
use memchr::memchr_iter;
use std::fmt;

/// Identifier of the newer human assembly
pub const GRCH38: &str = "GRCh38";

/// Identifier of the older human assembly
pub const GRCH37: &str = "GRCh37";

/// A genomic interval as written in the input table
///
/// Coordinates are kept as the raw strings from the file; equality and hashing
/// are structural over the triple, which makes the locus usable as a cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locus {
    seq_region_name: String,
    start: String,
    end: String,
}

impl Locus {
    pub fn new(
        seq_region_name: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        Self {
            seq_region_name: seq_region_name.into(),
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn seq_region_name(&self) -> &str {
        &self.seq_region_name
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    /// Region string understood by the mapping service, always on the forward strand
    ///
    /// # Examples
    /// ```
    /// use asm_convert::core::Locus;
    /// let locus = Locus::new("17", "36169091", "36169091");
    /// assert_eq!(locus.region(), "17:36169091..36169091:1");
    /// ```
    pub fn region(&self) -> String {
        format!("{}:{}..{}:1", self.seq_region_name, self.start, self.end)
    }
}

impl fmt::Display for Locus {
    /// Colon-joined triple, as echoed in the verbose report
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.seq_region_name, self.start, self.end)
    }
}

/// Direction of conversion between the two supported assemblies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapDirection {
    /// GRCh38 input, GRCh37 output
    #[default]
    Forward,
    /// GRCh37 input, GRCh38 output
    Reverse,
}

/// Source and target assembly, fixed for a whole run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyPair {
    pub source: String,
    pub target: String,
}

impl AssemblyPair {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Build the pair for a conversion direction
    ///
    /// # Examples
    /// ```
    /// use asm_convert::core::{AssemblyPair, MapDirection};
    /// let pair = AssemblyPair::from_direction(MapDirection::Forward);
    /// assert_eq!(pair.source, "GRCh38");
    /// assert_eq!(pair.target, "GRCh37");
    /// ```
    pub fn from_direction(direction: MapDirection) -> Self {
        match direction {
            MapDirection::Forward => Self::new(GRCH38, GRCH37),
            MapDirection::Reverse => Self::new(GRCH37, GRCH38),
        }
    }
}

impl Default for AssemblyPair {
    fn default() -> Self {
        Self::from_direction(MapDirection::default())
    }
}

/// Column separator of the input table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Tab,
    Comma,
}

impl Delimiter {
    pub fn as_byte(&self) -> u8 {
        match self {
            Delimiter::Tab => b'\t',
            Delimiter::Comma => b',',
        }
    }

    pub fn as_char(&self) -> char {
        self.as_byte() as char
    }
}

/// Outcome of parsing one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    /// Header or comment line
    Comment,
    /// Empty or single-column line
    Blank,
    /// A query locus
    Locus(Locus),
}

/// Split a line on a single-byte delimiter
fn split_fields(line: &str, delimiter: u8) -> Vec<&str> {
    let mut fields = Vec::with_capacity(4);
    let mut field_start = 0;
    for pos in memchr_iter(delimiter, line.as_bytes()) {
        fields.push(&line[field_start..pos]);
        field_start = pos + 1;
    }
    fields.push(&line[field_start..]);
    fields
}

/// Parse one line of the input table
///
/// The comment check applies to the raw line; trimming happens afterwards.
/// `line_number` is 1-based and only used for diagnostics.
///
/// # Examples
/// ```
/// use asm_convert::core::{parse_locus_line, Delimiter, Locus, ParsedLine};
///
/// let parsed = parse_locus_line("X\t3084378\t3084378", Delimiter::Tab, 1).unwrap();
/// assert_eq!(parsed, ParsedLine::Locus(Locus::new("X", "3084378", "3084378")));
///
/// let header = parse_locus_line("#chromosome\tstart\tend", Delimiter::Tab, 1);
/// assert_eq!(header.unwrap(), ParsedLine::Comment);
/// assert_eq!(parse_locus_line("   ", Delimiter::Tab, 2).unwrap(), ParsedLine::Blank);
/// assert!(parse_locus_line("17\t100", Delimiter::Tab, 3).is_err());
/// ```
pub fn parse_locus_line(
    line: &str,
    delimiter: Delimiter,
    line_number: usize,
) -> Result<ParsedLine, LocusParseError> {
    if line.starts_with('#') {
        return Ok(ParsedLine::Comment);
    }

    let trimmed = line.trim();
    let fields = split_fields(trimmed, delimiter.as_byte());

    match fields.len() {
        0 | 1 => Ok(ParsedLine::Blank),
        2 => Err(LocusParseError::MalformedRow {
            line: line_number,
            columns: 2,
            content: trimmed.to_string(),
        }),
        _ => Ok(ParsedLine::Locus(Locus::new(fields[0], fields[1], fields[2]))),
    }
}
