//! EPA CompTox (CCTE) API client.
//!
//! API docs: https://api-ccte.epa.gov/docs/chemical.html
//! Endpoint: https://api-ccte.epa.gov
//!
//! Three calls are used:
//!   - `chemical/search/equal/{identifier}`: identifier → DTXSID candidates
//!   - `chemical/detail/search/by-dtxsid/{dtxsid}`: name, mass, density
//!   - `hazard/human/search/by-dtxsid/{dtxsid}`: toxicology study records
//!
//! Every request carries the `x-api-key` header. There are no retries.
//! Identifiers are pushed as percent-encoded path segments.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, ClientBuilder, RequestBuilder, StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use toxrank_common::{ChemicalMatch, CompoundDetail, HazardRecord, Result, ToxRankError};
use tracing::{debug, info, instrument, warn};

use super::HazardSource;

pub const COMPTOX_API_URL: &str = "https://api-ccte.epa.gov";

const API_KEY_HEADER: &str = "x-api-key";
const DETAIL_PROJECTION: &str = "chemicaldetailall";

/// CompTox client for identifier resolution, chemical detail and hazard data.
#[derive(Debug)]
pub struct CompToxClient {
    client: Client,
    base_url: Url,
    api_key: SecretString,
}

/// Which lookup a status belongs to; a 400 only means a bad identifier on search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lookup {
    Search,
    Detail,
}

impl CompToxClient {
    /// Client against the public CompTox endpoint with no request timeout.
    pub fn new(api_key: SecretString) -> Result<Self> {
        Self::with_base_url(COMPTOX_API_URL, api_key, None)
    }

    pub fn with_base_url(
        base_url: &str,
        api_key: SecretString,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = ClientBuilder::new();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| ToxRankError::Config(format!("invalid CompTox base URL {}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ToxRankError::Config(format!(
                "CompTox base URL cannot carry a path: {}",
                base_url
            )));
        }

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Base URL extended by `segments`, each percent-encoded on its own.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ToxRankError::Config(format!("CompTox base URL cannot carry a path: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn get(&self, segments: &[&str]) -> Result<RequestBuilder> {
        Ok(self
            .client
            .get(self.endpoint(segments)?)
            .header(ACCEPT, "application/json")
            .header(API_KEY_HEADER, self.api_key.expose_secret()))
    }

    /// Resolve a CAS number to the first matching DTXSID.
    #[instrument(skip(self))]
    pub async fn search_equal(&self, identifier: &str) -> Result<ChemicalMatch> {
        let identifier = identifier.trim();
        debug!(identifier, "Resolving identifier in CompTox");

        let resp = self
            .get(&["chemical", "search", "equal", identifier])?
            .send()
            .await?;
        check_status(resp.status(), identifier, Lookup::Search)?;
        info!("Successfully connected with CompTox API");

        let matches: Vec<ChemicalMatch> = resp.json().await?;
        let first = matches.into_iter().next().ok_or_else(|| {
            warn!(identifier, "Compound not found");
            ToxRankError::NotFound(identifier.to_string())
        })?;

        info!(
            dtxsid = %first.dtxsid,
            "Compound {} identified",
            first.preferred_name.as_deref().unwrap_or(&first.dtxsid)
        );
        Ok(first)
    }

    /// Fetch full chemical detail for a DTXSID.
    #[instrument(skip(self))]
    pub async fn chemical_detail(&self, dtxsid: &str) -> Result<CompoundDetail> {
        info!("Grabbing chemical information for {}", dtxsid);

        let resp = self
            .get(&["chemical", "detail", "search", "by-dtxsid", dtxsid])?
            .query(&[("projection", DETAIL_PROJECTION)])
            .send()
            .await?;
        check_status(resp.status(), dtxsid, Lookup::Detail)?;

        Ok(resp.json().await?)
    }

    /// Fetch human hazard records for a DTXSID.
    #[instrument(skip(self))]
    pub async fn human_hazards(&self, dtxsid: &str) -> Result<Vec<HazardRecord>> {
        let resp = self
            .get(&["hazard", "human", "search", "by-dtxsid", dtxsid])?
            .query(&[("projection", DETAIL_PROJECTION)])
            .send()
            .await?;

        let status = resp.status();
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "Hazard data could not be grabbed");
            return Err(ToxRankError::HazardUnavailable {
                dtxsid: dtxsid.to_string(),
                status: status.as_u16(),
            });
        }

        let records: Vec<HazardRecord> = resp.json().await?;
        if records.is_empty() {
            info!("Hazard data successfully queried, no records found for {}", dtxsid);
        } else {
            info!(count = records.len(), "Successfully grabbed hazard data");
        }
        Ok(records)
    }
}

/// Map a CompTox response status to the error taxonomy.
fn check_status(status: StatusCode, subject: &str, lookup: Lookup) -> Result<()> {
    match status {
        StatusCode::OK => Ok(()),
        StatusCode::BAD_REQUEST if lookup == Lookup::Search => {
            warn!(subject, "Identifier not found in CompTox");
            Err(ToxRankError::InvalidIdentifier(subject.to_string()))
        }
        StatusCode::UNAUTHORIZED => {
            warn!("Invalid API key");
            Err(ToxRankError::Unauthorized)
        }
        StatusCode::NOT_FOUND => {
            warn!(subject, "Compound not found");
            Err(ToxRankError::NotFound(subject.to_string()))
        }
        other => {
            warn!(status = other.as_u16(), "Invalid API response");
            Err(ToxRankError::UnexpectedStatus { status: other.as_u16() })
        }
    }
}

#[async_trait]
impl HazardSource for CompToxClient {
    async fn resolve_identifier(&self, identifier: &str) -> Result<ChemicalMatch> {
        self.search_equal(identifier).await
    }

    async fn fetch_compound(&self, dtxsid: &str) -> Result<CompoundDetail> {
        self.chemical_detail(dtxsid).await
    }

    async fn fetch_hazards(&self, dtxsid: &str) -> Result<Vec<HazardRecord>> {
        self.human_hazards(dtxsid).await
    }
}
