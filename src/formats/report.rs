//! Tabular report formatter
//!
//! Projects cached mapping results onto the input sequence, one row per
//! input locus in input order, tab-separated whatever the input delimiter.
//!
//! # Verbose
//!
//! ```text
//! # GRCh38 input coordinates  Converted to assembly  seq_region_name  start     end       strand
//! 17:36169091:36169091        GRCh37                 17               36082138  36082138  1
//! ```
//!
//! # Terse
//!
//! ```text
//! # GRCh37 seq_region_name  start     end
//! 17                        36082138  36082138
//! ```

use crate::core::{
    AssemblyPair, ConversionError, ConversionResult, Locus, MappingResult, ResultLookup,
};
use std::io::Write;

/// Report layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportMode {
    /// Mapped locus only
    #[default]
    Terse,
    /// Input locus echoed next to the full mapped record
    Verbose,
}

impl ReportMode {
    pub fn from_verbose(verbose: bool) -> Self {
        if verbose {
            ReportMode::Verbose
        } else {
            ReportMode::Terse
        }
    }
}

/// Header row for a report
///
/// # Examples
/// ```
/// use asm_convert::core::AssemblyPair;
/// use asm_convert::formats::report::{header, ReportMode};
///
/// let pair = AssemblyPair::default();
/// assert_eq!(header(&pair, ReportMode::Terse), "# GRCh37 seq_region_name\tstart\tend");
/// ```
pub fn header(assemblies: &AssemblyPair, mode: ReportMode) -> String {
    match mode {
        ReportMode::Verbose => {
            let input = format!("# {} input coordinates", assemblies.source);
            [
                input.as_str(),
                "Converted to assembly",
                "seq_region_name",
                "start",
                "end",
                "strand",
            ]
            .join("\t")
        }
        ReportMode::Terse => {
            let target = format!("# {} seq_region_name", assemblies.target);
            [target.as_str(), "start", "end"].join("\t")
        }
    }
}

/// Data row for one input locus
pub fn format_row(locus: &Locus, result: &MappingResult, mode: ReportMode) -> String {
    let mapped = result.mapped();
    match mode {
        ReportMode::Verbose => {
            let input = locus.to_string();
            [
                input.as_str(),
                mapped.assembly.as_str(),
                mapped.seq_region_name.as_str(),
                mapped.start.as_str(),
                mapped.end.as_str(),
                mapped.strand.as_str(),
            ]
            .join("\t")
        }
        ReportMode::Terse => [
            mapped.seq_region_name.as_str(),
            mapped.start.as_str(),
            mapped.end.as_str(),
        ]
        .join("\t"),
    }
}

/// Header followed by one row per input locus, repeats included
pub fn format_report<L: ResultLookup + ?Sized>(
    inputs: &[Locus],
    results: &L,
    assemblies: &AssemblyPair,
    mode: ReportMode,
) -> ConversionResult<Vec<String>> {
    let mut rows = Vec::with_capacity(inputs.len() + 1);
    rows.push(header(assemblies, mode));
    for locus in inputs {
        let result = results
            .lookup(locus)
            .ok_or_else(|| ConversionError::Unresolved(locus.clone()))?;
        rows.push(format_row(locus, result, mode));
    }
    Ok(rows)
}

/// Write the report to `writer`, returning the number of data rows
///
/// Every locus is looked up before anything is written, so a missing result
/// produces no partial report.
pub fn write_report<W: Write, L: ResultLookup + ?Sized>(
    writer: &mut W,
    inputs: &[Locus],
    results: &L,
    assemblies: &AssemblyPair,
    mode: ReportMode,
) -> ConversionResult<usize> {
    let rows = format_report(inputs, results, assemblies, mode)?;
    for row in &rows {
        writeln!(writer, "{}", row)?;
    }
    writer.flush()?;
    Ok(rows.len() - 1)
}
