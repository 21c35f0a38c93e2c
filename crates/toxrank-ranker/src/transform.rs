//! Per-record dose conversion, tiering and formatting.
//!
//! Dispatch is test type → exposure route → reported units. Only LC50/LD50
//! studies are converted; inhalation doses end up in ppm, oral and dermal
//! doses in mg/kg. Records that cannot be converted are kept and carry a
//! [`NotEvaluatedReason`] instead of a number.

use std::fmt;

use toxrank_common::HazardRecord;

use crate::tier::{classify, ExposureRoute, ToxicityTier, UNKNOWN_ROUTE_RANK};
use crate::units::{mg_per_l_to_mg_per_m3, mg_per_l_to_ppm, mg_per_m3_to_ppm};

/// Test types whose doses can be compared across studies.
pub const CONVERTIBLE_TEST_TYPES: [&str; 2] = ["LC50", "LD50"];

/// Why a record has no converted dose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotEvaluatedReason {
    IncorrectTestType,
    IncorrectExposureRoute,
    IncorrectUnits,
    MissingValue,
    MissingMolecularMass,
}

impl NotEvaluatedReason {
    pub fn message(&self) -> &'static str {
        match self {
            Self::IncorrectTestType => "Not evaluated: incorrect test type",
            Self::IncorrectExposureRoute => "Not evaluated: incorrect exposure route",
            Self::IncorrectUnits => "Not evaluated: incorrect units",
            Self::MissingValue => "Not evaluated: missing value",
            Self::MissingMolecularMass => "Not evaluated: missing molecular mass",
        }
    }
}

impl fmt::Display for NotEvaluatedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Dose in the route's canonical unit, or the reason there is none.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConvertedValue {
    Numeric(f64),
    NotEvaluated(NotEvaluatedReason),
}

impl ConvertedValue {
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            Self::Numeric(v) => Some(*v),
            Self::NotEvaluated(_) => None,
        }
    }
}

/// The arithmetic applied to a reported dose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conversion {
    Passthrough,
    MgPerLToPpm,
    MgPerM3ToPpm,
    MgPerLToMgPerKg,
}

impl Conversion {
    fn select(route: ExposureRoute, units: &str) -> Option<Self> {
        match (route, units) {
            (ExposureRoute::Inhalation, "mg/L") => Some(Self::MgPerLToPpm),
            (ExposureRoute::Inhalation, "mg/m3") => Some(Self::MgPerM3ToPpm),
            (ExposureRoute::Inhalation, "ppm") => Some(Self::Passthrough),
            (ExposureRoute::Oral | ExposureRoute::Dermal, "mg/L") => Some(Self::MgPerLToMgPerKg),
            (ExposureRoute::Oral | ExposureRoute::Dermal, "mg/kg") => Some(Self::Passthrough),
            _ => None,
        }
    }

    fn apply(&self, value: f64, molecular_mass: Option<f64>) -> ConvertedValue {
        let mass = molecular_mass.filter(|m| *m > 0.0);
        match (self, mass) {
            (Self::Passthrough, _) => ConvertedValue::Numeric(value),
            (Self::MgPerLToMgPerKg, _) => ConvertedValue::Numeric(mg_per_l_to_mg_per_m3(value)),
            (Self::MgPerLToPpm, Some(m)) => ConvertedValue::Numeric(mg_per_l_to_ppm(value, m)),
            (Self::MgPerM3ToPpm, Some(m)) => ConvertedValue::Numeric(mg_per_m3_to_ppm(value, m)),
            (Self::MgPerLToPpm | Self::MgPerM3ToPpm, None) => {
                ConvertedValue::NotEvaluated(NotEvaluatedReason::MissingMolecularMass)
            }
        }
    }
}

/// Route and conversion for a record, or why it cannot be converted.
fn plan(record: &HazardRecord) -> Result<(ExposureRoute, Conversion), NotEvaluatedReason> {
    if !CONVERTIBLE_TEST_TYPES.contains(&record.test_type()) {
        return Err(NotEvaluatedReason::IncorrectTestType);
    }
    let route = ExposureRoute::parse(record.route())
        .ok_or(NotEvaluatedReason::IncorrectExposureRoute)?;
    let conversion = Conversion::select(route, record.units())
        .ok_or(NotEvaluatedReason::IncorrectUnits)?;
    Ok((route, conversion))
}

/// Convert a record's dose into its route's canonical unit.
pub fn convert_value(record: &HazardRecord, molecular_mass: Option<f64>) -> ConvertedValue {
    match plan(record) {
        Err(reason) => ConvertedValue::NotEvaluated(reason),
        Ok((_, conversion)) => match record.toxval_numeric {
            Some(value) => conversion.apply(value, molecular_mass),
            None => ConvertedValue::NotEvaluated(NotEvaluatedReason::MissingValue),
        },
    }
}

/// Canonical unit of a converted value; empty whenever the value was not evaluated.
pub fn converted_units(record: &HazardRecord, converted: ConvertedValue) -> &'static str {
    match (converted, plan(record)) {
        (ConvertedValue::Numeric(_), Ok((route, _))) => route.canonical_unit(),
        _ => "",
    }
}

pub fn designate_tier(route: Option<ExposureRoute>, converted: ConvertedValue) -> ToxicityTier {
    match (route, converted) {
        (Some(route), ConvertedValue::Numeric(dose)) => classify(route, dose),
        _ => ToxicityTier::NotEvaluated,
    }
}

/// Integral values are kept whole; anything else is rounded to 2 decimal places.
pub fn round_dose(value: f64) -> f64 {
    if value.fract() == 0.0 {
        value
    } else {
        (value * 100.0).round() / 100.0
    }
}

/// Rounded dose without decimal padding ("150", "47.02").
pub fn format_dose_value(value: f64) -> String {
    round_dose(value).to_string()
}

/// Comparison operator shown in front of a dose. "=" is implied and omitted.
fn qualifier_prefix(record: &HazardRecord) -> &str {
    match record.toxval_numeric_qualifier.as_deref().map(str::trim) {
        None | Some("=") => "",
        Some(q) => q,
    }
}

fn join_dose(qualifier: &str, value: &str, units: &str) -> String {
    format!("{}{} {}", qualifier, value, units).trim().to_string()
}

/// "{qualifier}{value} {units}" for the dose as reported by the study.
pub fn reported_dose(record: &HazardRecord) -> String {
    let value = record.toxval_numeric.map(format_dose_value).unwrap_or_default();
    join_dose(qualifier_prefix(record), &value, record.units())
}

/// Converted dose string, or the not-evaluated message.
pub fn converted_dose(record: &HazardRecord, converted: ConvertedValue, units: &str) -> String {
    match converted {
        ConvertedValue::Numeric(v) => join_dose(qualifier_prefix(record), &format_dose_value(v), units),
        ConvertedValue::NotEvaluated(reason) => reason.message().to_string(),
    }
}

/// A hazard record with its conversion, tier and sort keys.
#[derive(Debug, Clone)]
pub struct ConvertedRecord {
    pub record: HazardRecord,
    pub converted: ConvertedValue,
    pub converted_units: &'static str,
    pub tier: ToxicityTier,
    pub tier_rank: u8,
    pub evaluated_rank: u8,
    pub exposure_rank: u8,
    pub reported_dose: String,
    pub converted_dose: String,
}

impl ConvertedRecord {
    pub fn new(record: HazardRecord, molecular_mass: Option<f64>) -> Self {
        let route = ExposureRoute::parse(record.route());
        let converted = convert_value(&record, molecular_mass);
        let units = converted_units(&record, converted);
        let tier = designate_tier(route, converted);

        Self {
            reported_dose: reported_dose(&record),
            converted_dose: converted_dose(&record, converted, units),
            converted,
            converted_units: units,
            tier,
            tier_rank: tier.rank(),
            evaluated_rank: tier.evaluated_rank(),
            exposure_rank: route.map(|r| r.rank()).unwrap_or(UNKNOWN_ROUTE_RANK),
            record,
        }
    }
}

/// Convert every record of one compound, preserving input order.
pub fn transform_all(records: Vec<HazardRecord>, molecular_mass: Option<f64>) -> Vec<ConvertedRecord> {
    records
        .into_iter()
        .map(|r| ConvertedRecord::new(r, molecular_mass))
        .collect()
}
