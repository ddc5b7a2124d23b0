//! Per-run locus cache
//!
//! Memoizes mapping results by locus so repeated input rows cost a single
//! remote call. The cache lives for one run and is never persisted.

use crate::core::client::MappingService;
use crate::core::locus::{AssemblyPair, Locus};
use crate::core::mapper::{resolve, MappingResult};
use std::collections::HashMap;

/// Read access to resolved loci, used by the report formatter
pub trait ResultLookup {
    fn lookup(&self, locus: &Locus) -> Option<&MappingResult>;
}

impl ResultLookup for HashMap<Locus, MappingResult> {
    fn lookup(&self, locus: &Locus) -> Option<&MappingResult> {
        self.get(locus)
    }
}

/// Cache of mapping results keyed by locus
///
/// Single-threaded: `get_or_resolve` takes `&mut self`, so at most one
/// resolution per unique locus is guaranteed by the borrow checker.
///
/// # Example
///
/// ```
/// use asm_convert::core::{
///     AssemblyPair, CoordRecord, Locus, LocusCache, MappingRequest, MappingService,
///     ServiceResult,
/// };
///
/// struct NoMappings;
///
/// impl MappingService for NoMappings {
///     fn fetch(&self, _request: &MappingRequest) -> ServiceResult<Vec<CoordRecord>> {
///         Ok(Vec::new())
///     }
/// }
///
/// let mut cache = LocusCache::new(NoMappings, AssemblyPair::default());
/// let locus = Locus::new("17", "36169091", "36169091");
/// cache.get_or_resolve(&locus);
/// cache.get_or_resolve(&locus);
/// assert_eq!(cache.remote_calls(), 1);
/// ```
pub struct LocusCache<S> {
    service: S,
    assemblies: AssemblyPair,
    entries: HashMap<Locus, MappingResult>,
    remote_calls: usize,
}

impl<S: MappingService> LocusCache<S> {
    pub fn new(service: S, assemblies: AssemblyPair) -> Self {
        Self {
            service,
            assemblies,
            entries: HashMap::new(),
            remote_calls: 0,
        }
    }

    /// Return the cached result for a locus, resolving it on first sight
    pub fn get_or_resolve(&mut self, locus: &Locus) -> &MappingResult {
        let service = &self.service;
        let assemblies = &self.assemblies;
        let remote_calls = &mut self.remote_calls;

        self.entries.entry(locus.clone()).or_insert_with(|| {
            *remote_calls += 1;
            resolve(service, assemblies, locus)
        })
    }

    /// Cached result, without resolving
    pub fn get(&self, locus: &Locus) -> Option<&MappingResult> {
        self.entries.get(locus)
    }

    /// Number of unique loci resolved so far
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of requests issued to the mapping service
    pub fn remote_calls(&self) -> usize {
        self.remote_calls
    }
}

impl<S: MappingService> ResultLookup for LocusCache<S> {
    fn lookup(&self, locus: &Locus) -> Option<&MappingResult> {
        self.get(locus)
    }
}
