//! Remote assembly mapping client
//!
//! The [`MappingService`] trait is the boundary between result classification
//! and transport. [`EnsemblClient`] implements it against the Ensembl REST
//! `map/:species/:asm_one/:region/:asm_two` endpoint.

use crate::core::error::{ServiceError, ServiceResult};
use crate::core::locus::{AssemblyPair, Locus};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use serde::{Deserialize, Deserializer};
use std::time::Duration;

/// Public Ensembl REST server
pub const DEFAULT_SERVER: &str = "https://rest.ensembl.org";

/// Species all requests are addressed to
pub const SPECIES: &str = "human";

/// Default transport timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// One side of a mapping: a located interval on a named assembly
///
/// All values are kept as strings so that service data and sentinel
/// placeholders print the same way.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CoordRecord {
    #[serde(deserialize_with = "scalar_string")]
    pub seq_region_name: String,
    #[serde(deserialize_with = "scalar_string")]
    pub start: String,
    #[serde(deserialize_with = "scalar_string")]
    pub end: String,
    #[serde(deserialize_with = "scalar_string")]
    pub strand: String,
    #[serde(default = "default_coord_system", deserialize_with = "scalar_string")]
    pub coord_system: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub assembly: String,
}

fn default_coord_system() -> String {
    "chromosome".to_string()
}

/// JSON value that the service may send either as a number or as text
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Integer(i64),
    Float(f64),
    Text(String),
}

fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Integer(value) => value.to_string(),
        Scalar::Float(value) => value.to_string(),
        Scalar::Text(value) => value,
    })
}

/// Body of a `map` response
#[derive(Debug, Deserialize)]
pub struct MappingResponse {
    #[serde(default)]
    pub mappings: Vec<MappingCandidate>,
}

/// One candidate placement of the query region on the target assembly
#[derive(Debug, Deserialize)]
pub struct MappingCandidate {
    pub mapped: CoordRecord,
}

/// A single assembly mapping query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingRequest {
    pub species: String,
    pub source_assembly: String,
    pub region: String,
    pub target_assembly: String,
}

impl MappingRequest {
    /// Build the request for a locus, forward strand, human
    pub fn new(assemblies: &AssemblyPair, locus: &Locus) -> Self {
        Self {
            species: SPECIES.to_string(),
            source_assembly: assemblies.source.clone(),
            region: locus.region(),
            target_assembly: assemblies.target.clone(),
        }
    }

    /// Endpoint path relative to the server root, unencoded
    ///
    /// Used for logs and error messages; [`EnsemblClient::url`] builds the
    /// encoded request URL.
    ///
    /// # Examples
    /// ```
    /// use asm_convert::core::{AssemblyPair, Locus, MappingRequest};
    /// let request = MappingRequest::new(
    ///     &AssemblyPair::new("GRCh38", "GRCh37"),
    ///     &Locus::new("17", "36169091", "36169091"),
    /// );
    /// assert_eq!(request.path(), "/map/human/GRCh38/17:36169091..36169091:1/GRCh37");
    /// ```
    pub fn path(&self) -> String {
        format!(
            "/map/{}/{}/{}/{}",
            self.species, self.source_assembly, self.region, self.target_assembly
        )
    }
}

/// Source of mapping candidates for a request
pub trait MappingService {
    /// Return every candidate placement the service reports for the request
    fn fetch(&self, request: &MappingRequest) -> ServiceResult<Vec<CoordRecord>>;
}

impl<S: MappingService + ?Sized> MappingService for &S {
    fn fetch(&self, request: &MappingRequest) -> ServiceResult<Vec<CoordRecord>> {
        (**self).fetch(request)
    }
}

/// Blocking HTTP client for the Ensembl REST mapping endpoint
pub struct EnsemblClient {
    client: Client,
    base_url: Url,
}

impl EnsemblClient {
    /// Create a client for the given server root
    pub fn new(base_url: &str, timeout: Duration) -> ServiceResult<Self> {
        let invalid = |message: String| ServiceError::Transport {
            url: base_url.to_string(),
            message,
        };

        let parsed =
            Url::parse(base_url).map_err(|e| invalid(format!("Invalid server URL: {}", e)))?;
        if parsed.cannot_be_a_base() {
            return Err(invalid("Server URL cannot carry a path".to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| invalid(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// Full URL for a request
    ///
    /// Each component is pushed as its own path segment, so a `/` or `#`
    /// inside a locus field is percent-encoded rather than reshaping the
    /// endpoint. The query is present but empty.
    pub fn url(&self, request: &MappingRequest) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend([
                "map",
                request.species.as_str(),
                request.source_assembly.as_str(),
                request.region.as_str(),
                request.target_assembly.as_str(),
            ]);
        }
        url.set_query(Some(""));
        url
    }
}

impl MappingService for EnsemblClient {
    fn fetch(&self, request: &MappingRequest) -> ServiceResult<Vec<CoordRecord>> {
        let url = self.url(request);
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .send()
            .map_err(|e| ServiceError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body: MappingResponse = response.json().map_err(|e| ServiceError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        Ok(body.mappings.into_iter().map(|c| c.mapped).collect())
    }
}
