//! Mapping result classification
//!
//! Every locus ends up in exactly one of three outcomes:
//! 1. `Resolved` - the service reported a single placement
//! 2. `Ambiguous` - the service reported more than one placement
//! 3. `Failed` - no placement, or the request itself failed
//!
//! Ambiguous and failed results carry sentinel strings in place of
//! coordinates, so a report can print any result without inspecting its kind.

use crate::core::client::{CoordRecord, MappingRequest, MappingService};
use crate::core::locus::{AssemblyPair, Locus};

/// Sentinel for loci with several candidate placements
pub const MULTIPLE: &str = "multiple";

/// Sentinel for loci that could not be mapped
pub const FAILED: &str = "failed";

/// Strand of every query region
pub const FORWARD_STRAND: &str = "1";

/// Coordinate system of every query region
pub const CHROMOSOME: &str = "chromosome";

/// Outcome kind of a mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MappingKind {
    Resolved,
    Ambiguous,
    Failed,
}

impl MappingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MappingKind::Resolved => "resolved",
            MappingKind::Ambiguous => "ambiguous",
            MappingKind::Failed => "failed",
        }
    }
}

/// Query record and its placement on the target assembly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedPair {
    pub original: CoordRecord,
    pub mapped: CoordRecord,
}

/// Classified result of mapping one locus
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingResult {
    Resolved(MappedPair),
    Ambiguous(MappedPair),
    Failed(MappedPair),
}

/// Placeholder pair for the ambiguous and failed outcomes
fn sentinel_pair(assemblies: &AssemblyPair, sentinel: &str) -> MappedPair {
    let record = |strand: &str, assembly: &str| CoordRecord {
        seq_region_name: sentinel.to_string(),
        start: sentinel.to_string(),
        end: sentinel.to_string(),
        strand: strand.to_string(),
        coord_system: CHROMOSOME.to_string(),
        assembly: assembly.to_string(),
    };

    MappedPair {
        original: record(FORWARD_STRAND, &assemblies.source),
        mapped: record(sentinel, &assemblies.target),
    }
}

impl MappingResult {
    /// Result for a locus with a single placement
    pub fn resolved(assemblies: &AssemblyPair, locus: &Locus, candidate: CoordRecord) -> Self {
        MappingResult::Resolved(MappedPair {
            original: CoordRecord {
                seq_region_name: locus.seq_region_name().to_string(),
                start: locus.start().to_string(),
                end: locus.end().to_string(),
                strand: FORWARD_STRAND.to_string(),
                coord_system: CHROMOSOME.to_string(),
                assembly: assemblies.source.clone(),
            },
            mapped: CoordRecord {
                assembly: assemblies.target.clone(),
                ..candidate
            },
        })
    }

    /// Result for a locus with several placements
    ///
    /// # Examples
    /// ```
    /// use asm_convert::core::{AssemblyPair, MappingResult};
    /// let result = MappingResult::ambiguous(&AssemblyPair::default());
    /// assert_eq!(result.mapped().start, "multiple");
    /// assert_eq!(result.original().strand, "1");
    /// assert_eq!(result.mapped().assembly, "GRCh37");
    /// ```
    pub fn ambiguous(assemblies: &AssemblyPair) -> Self {
        MappingResult::Ambiguous(sentinel_pair(assemblies, MULTIPLE))
    }

    /// Result for a locus that could not be mapped
    pub fn failed(assemblies: &AssemblyPair) -> Self {
        MappingResult::Failed(sentinel_pair(assemblies, FAILED))
    }

    pub fn kind(&self) -> MappingKind {
        match self {
            MappingResult::Resolved(_) => MappingKind::Resolved,
            MappingResult::Ambiguous(_) => MappingKind::Ambiguous,
            MappingResult::Failed(_) => MappingKind::Failed,
        }
    }

    pub fn pair(&self) -> &MappedPair {
        match self {
            MappingResult::Resolved(pair)
            | MappingResult::Ambiguous(pair)
            | MappingResult::Failed(pair) => pair,
        }
    }

    pub fn original(&self) -> &CoordRecord {
        &self.pair().original
    }

    pub fn mapped(&self) -> &CoordRecord {
        &self.pair().mapped
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, MappingResult::Resolved(_))
    }
}

/// Map one locus between the assemblies and classify the outcome
///
/// Issues exactly one request. Service errors are logged and folded into
/// [`MappingResult::Failed`]; nothing is retried.
pub fn resolve<S: MappingService + ?Sized>(
    service: &S,
    assemblies: &AssemblyPair,
    locus: &Locus,
) -> MappingResult {
    let request = MappingRequest::new(assemblies, locus);

    let mut candidates = match service.fetch(&request) {
        Ok(candidates) => candidates,
        Err(e) => {
            log::warn!("Mapping {} failed: {}", locus, e);
            return MappingResult::failed(assemblies);
        }
    };

    match candidates.len() {
        0 => {
            log::debug!("No placement for {} on {}", locus, assemblies.target);
            MappingResult::failed(assemblies)
        }
        1 => {
            let candidate = candidates.swap_remove(0);
            MappingResult::resolved(assemblies, locus, candidate)
        }
        n => {
            log::debug!("{} placements for {} on {}", n, locus, assemblies.target);
            MappingResult::ambiguous(assemblies)
        }
    }
}
