//! Ranked hazard table: filter, sort, project and style.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::tier::ToxicityTier;
use crate::transform::ConvertedRecord;

/// Source value the hazard API attaches to placeholder rows.
pub const EXCLUDED_SOURCE: &str = "TEST";

/// Output columns, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    TestType,
    ReportedDose,
    ConvertedDose,
    ExposureRoute,
    Species,
    Toxicity,
    Year,
    Source,
    Subsource,
    Supercategory,
    RiskAssessment,
    StudyType,
    CriticalEffect,
}

impl Column {
    pub const ALL: [Column; 13] = [
        Column::TestType,
        Column::ReportedDose,
        Column::ConvertedDose,
        Column::ExposureRoute,
        Column::Species,
        Column::Toxicity,
        Column::Year,
        Column::Source,
        Column::Subsource,
        Column::Supercategory,
        Column::RiskAssessment,
        Column::StudyType,
        Column::CriticalEffect,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            Column::TestType => "Test Type",
            Column::ReportedDose => "Reported Dose Value",
            Column::ConvertedDose => "Converted Dose Value",
            Column::ExposureRoute => "Exposure Route",
            Column::Species => "Species/Organism",
            Column::Toxicity => "Toxicity",
            Column::Year => "Year",
            Column::Source => "Source/Reference",
            Column::Subsource => "Subsource",
            Column::Supercategory => "Supercategory",
            Column::RiskAssessment => "Risk assessment",
            Column::StudyType => "Study type",
            Column::CriticalEffect => "Critical Effect",
        }
    }
}

/// One projected output row. Serialized with the display headers as keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    #[serde(rename = "Test Type")]
    pub test_type: String,
    #[serde(rename = "Reported Dose Value")]
    pub reported_dose: String,
    #[serde(rename = "Converted Dose Value")]
    pub converted_dose: String,
    #[serde(rename = "Exposure Route")]
    pub exposure_route: String,
    #[serde(rename = "Species/Organism")]
    pub species: String,
    #[serde(rename = "Toxicity")]
    pub toxicity: ToxicityTier,
    #[serde(rename = "Year")]
    pub year: Option<i32>,
    #[serde(rename = "Source/Reference")]
    pub source: String,
    #[serde(rename = "Subsource")]
    pub subsource: String,
    #[serde(rename = "Supercategory")]
    pub supercategory: String,
    #[serde(rename = "Risk assessment")]
    pub risk_assessment: String,
    #[serde(rename = "Study type")]
    pub study_type: String,
    #[serde(rename = "Critical Effect")]
    pub critical_effect: String,
}

impl TableRow {
    fn from_converted(rec: ConvertedRecord) -> Self {
        let ConvertedRecord { record, tier, reported_dose, converted_dose, .. } = rec;
        Self {
            test_type: record.toxval_type.unwrap_or_default(),
            reported_dose,
            converted_dose,
            exposure_route: record.exposure_route.unwrap_or_default(),
            species: record.species_common.unwrap_or_default(),
            toxicity: tier,
            year: record.year,
            source: record.source.unwrap_or_default(),
            subsource: record.subsource.unwrap_or_default(),
            supercategory: record.supercategory.unwrap_or_default(),
            risk_assessment: record.risk_assessment_class.unwrap_or_default(),
            study_type: record.study_type.unwrap_or_default(),
            critical_effect: record.critical_effect.unwrap_or_default(),
        }
    }

    /// Display text of a single cell.
    pub fn cell(&self, column: Column) -> String {
        match column {
            Column::TestType => self.test_type.clone(),
            Column::ReportedDose => self.reported_dose.clone(),
            Column::ConvertedDose => self.converted_dose.clone(),
            Column::ExposureRoute => self.exposure_route.clone(),
            Column::Species => self.species.clone(),
            Column::Toxicity => self.toxicity.as_str().to_string(),
            Column::Year => self.year.map(|y| y.to_string()).unwrap_or_default(),
            Column::Source => self.source.clone(),
            Column::Subsource => self.subsource.clone(),
            Column::Supercategory => self.supercategory.clone(),
            Column::RiskAssessment => self.risk_assessment.clone(),
            Column::StudyType => self.study_type.clone(),
            Column::CriticalEffect => self.critical_effect.clone(),
        }
    }
}

/// Unstyled ranked table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToxicityTable {
    pub rows: Vec<TableRow>,
}

impl ToxicityTable {
    pub fn headers(&self) -> Vec<&'static str> {
        Column::ALL.iter().map(Column::header).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn count_tier(&self, tier: ToxicityTier) -> usize {
        self.rows.iter().filter(|r| r.toxicity == tier).count()
    }
}

/// Missing values sort after present ones.
fn cmp_missing_last(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Evaluated first, then inhalation/oral/dermal, test type, severity, species.
/// Stable: ties keep input order.
pub fn sort_records(records: &mut [ConvertedRecord]) {
    records.sort_by(|a, b| {
        a.evaluated_rank
            .cmp(&b.evaluated_rank)
            .then(a.exposure_rank.cmp(&b.exposure_rank))
            .then_with(|| {
                cmp_missing_last(a.record.toxval_type.as_deref(), b.record.toxval_type.as_deref())
            })
            .then(a.tier_rank.cmp(&b.tier_rank))
            .then_with(|| {
                cmp_missing_last(
                    a.record.species_common.as_deref(),
                    b.record.species_common.as_deref(),
                )
            })
    });
}

/// Drop placeholder rows, rank, and project to the output columns.
pub fn build_table(records: Vec<ConvertedRecord>) -> ToxicityTable {
    let mut kept: Vec<ConvertedRecord> = records
        .into_iter()
        .filter(|r| r.record.source() != EXCLUDED_SOURCE)
        .collect();
    sort_records(&mut kept);

    ToxicityTable {
        rows: kept.into_iter().map(TableRow::from_converted).collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledCell {
    pub text: String,
    /// Inline CSS, e.g. `background-color: #FFC000`.
    pub style: Option<String>,
}

/// Table with tier shading applied; no row index column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledTable {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<StyledCell>>,
}

impl StyledTable {
    pub fn from_table(table: &ToxicityTable) -> Self {
        let rows: Vec<Vec<StyledCell>> = table
            .rows
            .iter()
            .map(|row| {
                Column::ALL
                    .iter()
                    .map(|&col| StyledCell {
                        text: row.cell(col),
                        style: match col {
                            Column::Toxicity => tier_style(row.toxicity),
                            _ => None,
                        },
                    })
                    .collect()
            })
            .collect();

        Self { headers: table.headers(), rows }
    }
}

pub fn tier_style(tier: ToxicityTier) -> Option<String> {
    tier.background_color()
        .map(|color| format!("background-color: {}", color))
}

#[cfg(test)]
mod tests {
    use super::*;
    use toxrank_common::HazardRecord;

    fn converted(route: &str, value: f64, units: &str, species: Option<&str>, source: &str) -> ConvertedRecord {
        let test_type = if route == "inhalation" { "LC50" } else { "LD50" };
        ConvertedRecord::new(
            HazardRecord {
                toxval_type: Some(test_type.to_string()),
                exposure_route: Some(route.to_string()),
                toxval_numeric: Some(value),
                toxval_numeric_qualifier: Some("=".to_string()),
                toxval_units: Some(units.to_string()),
                species_common: species.map(String::from),
                source: Some(source.to_string()),
                ..Default::default()
            },
            Some(78.0),
        )
    }

    #[test]
    fn test_sort_order_example() {
        let records = vec![
            converted("inhalation", 100.0, "ppm", Some("rat"), "A"),   // High
            converted("oral", 900.0, "mg/kg", Some("rat"), "B"),       // Low
            converted("inhalation", 500.0, "ppm", Some("rat"), "C"),   // Moderate
            converted("dermal", 10.0, "mg/L/day", Some("rat"), "D"),  // Not evaluated
        ];
        let table = build_table(records);
        let order: Vec<(&str, ToxicityTier)> = table
            .rows
            .iter()
            .map(|r| (r.exposure_route.as_str(), r.toxicity))
            .collect();
        assert_eq!(
            order,
            vec![
                ("inhalation", ToxicityTier::High),
                ("inhalation", ToxicityTier::Moderate),
                ("oral", ToxicityTier::Low),
                ("dermal", ToxicityTier::NotEvaluated),
            ]
        );
    }

    #[test]
    fn test_unevaluated_sorts_after_every_evaluated_route() {
        let records = vec![
            converted("inhalation", 1.0, "furlongs", Some("rat"), "A"),
            converted("dermal", 5000.0, "mg/kg", Some("rabbit"), "B"),
        ];
        let table = build_table(records);
        assert_eq!(table.rows[0].exposure_route, "dermal");
        assert_eq!(table.rows[1].toxicity, ToxicityTier::NotEvaluated);
    }

    #[test]
    fn test_species_ties_and_stability() {
        let records = vec![
            converted("oral", 10.0, "mg/kg", None, "first-none"),
            converted("oral", 20.0, "mg/kg", Some("rat"), "rat"),
            converted("oral", 30.0, "mg/kg", Some("mouse"), "mouse"),
            converted("oral", 40.0, "mg/kg", None, "second-none"),
        ];
        let table = build_table(records);
        let sources: Vec<&str> = table.rows.iter().map(|r| r.source.as_str()).collect();
        assert_eq!(sources, vec!["mouse", "rat", "first-none", "second-none"]);
    }

    #[test]
    fn test_test_rows_excluded() {
        let records = vec![
            converted("oral", 10.0, "mg/kg", Some("rat"), "TEST"),
            converted("oral", 20.0, "mg/kg", Some("rat"), "ECHA"),
            converted("inhalation", 5.0, "ppm", Some("rat"), "TEST"),
        ];
        let table = build_table(records);
        assert_eq!(table.len(), 1);
        assert!(table.rows.iter().all(|r| r.source != EXCLUDED_SOURCE));
    }

    #[test]
    fn test_headers_and_serialization_keys() {
        let table = build_table(vec![converted("oral", 20.0, "mg/kg", Some("rat"), "ECHA")]);
        assert_eq!(table.headers().len(), 13);
        assert_eq!(table.headers()[0], "Test Type");
        assert_eq!(table.headers()[12], "Critical Effect");

        let json = serde_json::to_value(&table.rows[0]).unwrap();
        assert_eq!(json["Reported Dose Value"], "20 mg/kg");
        assert_eq!(json["Toxicity"], "High");
        assert!(json["Year"].is_null());
    }

    #[test]
    fn test_styled_table_shades_tier_cells_only() {
        let table = build_table(vec![
            converted("oral", 20.0, "mg/kg", Some("rat"), "ECHA"),
            converted("oral", 100.0, "mg/kg", Some("rat"), "ECHA"),
            converted("oral", 600.0, "mg/kg", Some("rat"), "ECHA"),
            converted("oral", 1.0, "ppm", Some("rat"), "ECHA"),
        ]);
        let styled = StyledTable::from_table(&table);
        let tox = Column::ALL.iter().position(|c| *c == Column::Toxicity).unwrap();

        let styles: Vec<Option<&str>> = styled.rows.iter().map(|r| r[tox].style.as_deref()).collect();
        assert_eq!(
            styles,
            vec![
                Some("background-color: #FFC000"),
                Some("background-color: #FFFF00"),
                Some("background-color: #00B0F0"),
                None,
            ]
        );
        assert!(styled.rows.iter().all(|r| r.len() == Column::ALL.len()));
        assert!(styled.rows[0][0].style.is_none());
    }
}
