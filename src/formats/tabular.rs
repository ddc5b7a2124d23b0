//! Tabular coordinate conversion
//!
//! Reads a coordinate table top to bottom, resolving each unique locus once
//! through the [`LocusCache`], then writes the report in input order.

use crate::core::{
    open_input, parse_locus_line, AssemblyPair, Delimiter, InputError, LineIterator, Locus,
    LocusCache, MappingKind, MappingService, ParsedLine, Result,
};
use crate::formats::report::{write_report, ReportMode};
use std::io::{BufRead, Write};
use std::path::Path;

/// Run-wide settings for a conversion
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub assemblies: AssemblyPair,
    pub delimiter: Delimiter,
    pub mode: ReportMode,
}

/// Conversion statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionStats {
    /// Data rows written to the report
    pub total: usize,
    pub comments: usize,
    pub blank: usize,
    pub malformed: usize,
    /// Distinct loci in the input
    pub unique: usize,
    /// Requests issued to the mapping service
    pub remote_calls: usize,
    pub resolved: usize,
    pub ambiguous: usize,
    pub failed: usize,
}

impl ConversionStats {
    fn record(&mut self, kind: MappingKind) {
        match kind {
            MappingKind::Resolved => self.resolved += 1,
            MappingKind::Ambiguous => self.ambiguous += 1,
            MappingKind::Failed => self.failed += 1,
        }
    }
}

/// Convert a coordinate table read from `reader`
///
/// Malformed rows are logged and left out of the report; remote failures
/// become `failed` rows. Only read and write errors abort the run.
pub fn convert_tabular<R, W, S>(
    reader: R,
    writer: &mut W,
    service: S,
    options: &ConvertOptions,
) -> Result<ConversionStats>
where
    R: BufRead,
    W: Write,
    S: MappingService,
{
    let mut stats = ConversionStats::default();
    let mut cache = LocusCache::new(service, options.assemblies.clone());
    let mut inputs: Vec<Locus> = Vec::new();
    let mut lines = LineIterator::new(reader);
    let mut line_number = 0;

    while let Some(line) = lines.next_line() {
        let line = line.map_err(InputError::Read)?;
        line_number += 1;
        match parse_locus_line(line, options.delimiter, line_number) {
            Ok(ParsedLine::Comment) => stats.comments += 1,
            Ok(ParsedLine::Blank) => stats.blank += 1,
            Ok(ParsedLine::Locus(locus)) => {
                let kind = cache.get_or_resolve(&locus).kind();
                log::debug!("Line {}: {} {}", line_number, locus, kind.as_str());
                stats.record(kind);
                inputs.push(locus);
            }
            Err(e) => {
                log::warn!("Skipping row: {}", e);
                stats.malformed += 1;
            }
        }
    }

    stats.unique = cache.len();
    stats.remote_calls = cache.remote_calls();
    log::info!(
        "Resolved {} unique loci from {} rows with {} requests",
        stats.unique,
        inputs.len(),
        stats.remote_calls
    );

    stats.total = write_report(
        writer,
        &inputs,
        &cache,
        &options.assemblies,
        options.mode,
    )?;

    Ok(stats)
}

/// Convert a coordinate table stored at `input`
///
/// Fails with [`InputError::FileOpen`] before anything is written if the
/// file cannot be opened.
pub fn convert_file<P, W, S>(
    input: P,
    writer: &mut W,
    service: S,
    options: &ConvertOptions,
) -> Result<ConversionStats>
where
    P: AsRef<Path>,
    W: Write,
    S: MappingService,
{
    let reader = open_input(input)?;
    convert_tabular(reader, writer, service, options)
}
