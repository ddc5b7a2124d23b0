//! Core coordinate conversion functionality
//!
//! This module contains the locus parser, the remote mapping client,
//! result classification and the per-run locus cache.

mod cache;
mod client;
mod error;
pub mod io;
mod locus;
mod mapper;

pub use cache::{LocusCache, ResultLookup};
pub use client::{
    CoordRecord, EnsemblClient, MappingCandidate, MappingRequest, MappingResponse,
    MappingService, DEFAULT_SERVER, DEFAULT_TIMEOUT_SECS, SPECIES,
};
pub use error::{
    AsmConvertError, ConversionError, ConversionResult, InputError, InputResult,
    LocusParseError, Result, ServiceError, ServiceResult,
};
pub use io::{open_input, CompressionFormat, LineIterator};
pub use locus::{
    parse_locus_line, AssemblyPair, Delimiter, Locus, MapDirection, ParsedLine, GRCH37, GRCH38,
};
pub use mapper::{
    resolve, MappedPair, MappingKind, MappingResult, CHROMOSOME, FAILED, FORWARD_STRAND, MULTIPLE,
};
