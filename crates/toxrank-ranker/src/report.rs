//! Single entry point: identifier → ranked hazard report.

use serde::Serialize;
use toxrank_common::{Compound, HazardRecord, Result, ToxRankError};
use toxrank_ingestion::HazardSource;
use tracing::{info, instrument, warn};

use crate::summary::{render_summary, TierCounts};
use crate::table::{build_table, StyledTable, ToxicityTable};
use crate::transform::transform_all;

/// Everything one run produces for a compound.
#[derive(Debug, Clone, Serialize)]
pub struct ToxicityReport {
    pub compound: Compound,
    pub styled: StyledTable,
    pub table: ToxicityTable,
    pub counts: TierCounts,
    pub summary: String,
}

/// Convert, rank and summarise the hazard records of an already resolved compound.
pub fn build_report(compound: Compound, hazards: Vec<HazardRecord>) -> ToxicityReport {
    let converted = transform_all(hazards, compound.average_mass);
    let table = build_table(converted);
    let counts = TierCounts::from_table(&table);
    let summary = render_summary(&compound, &counts);
    let styled = StyledTable::from_table(&table);

    ToxicityReport { compound, styled, table, counts, summary }
}

/// Resolve `identifier`, fetch its detail and hazards, and build the report.
///
/// Upstream failures are logged here and returned; a compound with no hazard
/// records yields [`ToxRankError::NoHazardData`].
#[instrument(skip(source))]
pub async fn run_identifier(source: &dyn HazardSource, identifier: &str) -> Result<ToxicityReport> {
    info!("Evaluating {}", identifier);

    let result: Result<ToxicityReport> = async {
        let found = source.resolve_identifier(identifier).await?;
        let detail = source.fetch_compound(&found.dtxsid).await?;
        let compound = Compound::from_detail(identifier, &found.dtxsid, detail);

        let hazards = source.fetch_hazards(&found.dtxsid).await?;
        if hazards.is_empty() {
            return Err(ToxRankError::NoHazardData(compound.preferred_name.clone()));
        }

        Ok(build_report(compound, hazards))
    }
    .await;

    match &result {
        Ok(report) => info!(
            compound = %report.compound.preferred_name,
            rows = report.table.len(),
            evaluated = report.counts.evaluated(),
            "Report built"
        ),
        Err(e) => warn!(error = %e, "No results found"),
    }
    result
}
