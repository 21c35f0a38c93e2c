//! Core domain types shared between the CompTox client and the ranking pipeline.
//!
//! Field names follow the CompTox JSON payloads (camelCase). Every hazard field
//! is optional because the upstream API does not guarantee any of them.

use serde::{Deserialize, Serialize};

/// One candidate returned by identifier resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChemicalMatch {
    pub dtxsid: String,
    pub preferred_name: Option<String>,
}

/// Chemical detail payload (`projection=chemicaldetailall`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundDetail {
    pub preferred_name: Option<String>,
    pub average_mass: Option<f64>,
    pub density: Option<f64>,
}

/// A resolved compound, as used by the ranking pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Compound {
    /// Identifier the user typed (CAS number).
    pub identifier: String,
    pub dtxsid: String,
    pub preferred_name: String,
    /// Average molecular mass in g/mol.
    pub average_mass: Option<f64>,
    /// Density in g/cm³.
    pub density: Option<f64>,
}

impl Compound {
    pub fn from_detail(identifier: &str, dtxsid: &str, detail: CompoundDetail) -> Self {
        Self {
            identifier: identifier.to_string(),
            dtxsid: dtxsid.to_string(),
            preferred_name: detail.preferred_name.unwrap_or_else(|| dtxsid.to_string()),
            average_mass: detail.average_mass,
            density: detail.density,
        }
    }
}

/// One toxicology study result from the hazard endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HazardRecord {
    /// LC50, LD50, NOAEL, ...
    pub toxval_type: Option<String>,
    pub exposure_route: Option<String>,
    pub toxval_numeric: Option<f64>,
    /// Comparison operator ("=", "<", ">", ...).
    pub toxval_numeric_qualifier: Option<String>,
    pub toxval_units: Option<String>,
    pub species_common: Option<String>,
    pub year: Option<i32>,
    pub source: Option<String>,
    pub subsource: Option<String>,
    pub supercategory: Option<String>,
    pub risk_assessment_class: Option<String>,
    pub study_type: Option<String>,
    pub critical_effect: Option<String>,
}

impl HazardRecord {
    pub fn test_type(&self) -> &str {
        self.toxval_type.as_deref().unwrap_or("")
    }

    pub fn route(&self) -> &str {
        self.exposure_route.as_deref().unwrap_or("")
    }

    pub fn units(&self) -> &str {
        self.toxval_units.as_deref().unwrap_or("")
    }

    pub fn source(&self) -> &str {
        self.source.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hazard_record_deserializes_camel_case_with_nulls() {
        let json = r#"{
            "toxvalType": "LD50",
            "exposureRoute": "oral",
            "toxvalNumeric": 930.0,
            "toxvalNumericQualifier": "=",
            "toxvalUnits": "mg/kg",
            "speciesCommon": "Rat",
            "year": 1977,
            "source": "ECHA eChemPortal",
            "subsource": null,
            "riskAssessmentClass": "acute",
            "unknownField": 12
        }"#;
        let rec: HazardRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.test_type(), "LD50");
        assert_eq!(rec.route(), "oral");
        assert_eq!(rec.toxval_numeric, Some(930.0));
        assert_eq!(rec.year, Some(1977));
        assert!(rec.subsource.is_none());
        assert!(rec.critical_effect.is_none());
    }

    #[test]
    fn test_compound_from_detail_falls_back_to_dtxsid() {
        let detail = CompoundDetail { preferred_name: None, average_mass: Some(30.03), density: None };
        let compound = Compound::from_detail("50-00-0", "DTXSID7020637", detail);
        assert_eq!(compound.preferred_name, "DTXSID7020637");
        assert_eq!(compound.identifier, "50-00-0");
    }
}
