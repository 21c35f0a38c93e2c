//! Toxicology data source clients.

pub mod comptox;

use async_trait::async_trait;
use toxrank_common::{ChemicalMatch, CompoundDetail, HazardRecord, Result};

/// Common interface for hazard data providers.
#[async_trait]
pub trait HazardSource: Send + Sync {
    /// Resolve a user-facing identifier (CAS number) to its first matching compound.
    async fn resolve_identifier(&self, identifier: &str) -> Result<ChemicalMatch>;

    /// Fetch name, mass and density for a resolved compound.
    async fn fetch_compound(&self, dtxsid: &str) -> Result<CompoundDetail>;

    /// Fetch every human hazard study recorded for a resolved compound.
    async fn fetch_hazards(&self, dtxsid: &str) -> Result<Vec<HazardRecord>>;
}
