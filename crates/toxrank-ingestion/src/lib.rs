//! toxrank-ingestion — Clients for the upstream toxicology data sources.
//!
//! Currently a single source, the EPA CompTox (CCTE) public API, behind the
//! [`sources::HazardSource`] trait so the ranking pipeline can be exercised
//! without network access.

pub mod sources;

pub use sources::comptox::CompToxClient;
pub use sources::HazardSource;
