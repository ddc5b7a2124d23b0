//! asm-convert - genomic coordinate conversion between human assemblies
//!
//! Maps loci listed in a tab- or comma-delimited table from GRCh38 to GRCh37
//! (or back) using the Ensembl REST assembly mapping endpoint.
//!
//! # Features
//!
//! - One remote request per unique locus, however often it repeats
//! - Every locus classified as resolved, ambiguous or failed
//! - Verbose and terse tabular reports in input order
//! - Transparent gzip/bzip2 input
//!
//! # Example
//!
//! ```no_run
//! use asm_convert::core::{AssemblyPair, EnsemblClient, MapDirection, DEFAULT_SERVER};
//! use asm_convert::formats::{convert_file, ConvertOptions, ReportMode};
//! use std::time::Duration;
//!
//! let client = EnsemblClient::new(DEFAULT_SERVER, Duration::from_secs(30))?;
//! let options = ConvertOptions {
//!     assemblies: AssemblyPair::from_direction(MapDirection::Forward),
//!     mode: ReportMode::Verbose,
//!     ..Default::default()
//! };
//! let mut stdout = std::io::stdout();
//! let stats = convert_file("loci.tsv", &mut stdout, client, &options)?;
//! eprintln!("{} rows, {} requests", stats.total, stats.remote_calls);
//! # Ok::<(), asm_convert::AsmConvertError>(())
//! ```

pub mod core;
pub mod formats;

// Re-export commonly used types
pub use crate::core::{
    AsmConvertError, AssemblyPair, CoordRecord, Delimiter, EnsemblClient, Locus, LocusCache,
    MapDirection, MappingKind, MappingResult, MappingService, Result,
};
pub use formats::{convert_file, convert_tabular, ConversionStats, ConvertOptions, ReportMode};
