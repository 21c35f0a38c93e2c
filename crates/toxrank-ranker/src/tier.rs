//! Exposure routes and toxicity tier classification.
//!
//! Each route has a High threshold (at or below → High) and a Low threshold
//! (at or above → Low); anything strictly between is Moderate. Doses must
//! already be in the route's canonical unit.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Study exposure pathway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExposureRoute {
    Inhalation,
    Oral,
    Dermal,
}

impl ExposureRoute {
    /// Parse the upstream route string. Anything else is not evaluable.
    pub fn parse(route: &str) -> Option<Self> {
        match route {
            "inhalation" => Some(Self::Inhalation),
            "oral" => Some(Self::Oral),
            "dermal" => Some(Self::Dermal),
            _ => None,
        }
    }

    /// Unit every dose on this route is normalised to.
    pub fn canonical_unit(&self) -> &'static str {
        match self {
            Self::Inhalation => "ppm",
            Self::Oral | Self::Dermal => "mg/kg",
        }
    }

    /// Display order: inhalation, oral, dermal.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Inhalation => 0,
            Self::Oral => 1,
            Self::Dermal => 2,
        }
    }
}

/// Rank given to routes the pipeline does not recognise; sorts after dermal.
pub const UNKNOWN_ROUTE_RANK: u8 = 3;

/// Classification cut-offs for one route, in its canonical unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteThresholds {
    /// At or below → High.
    pub high_max: f64,
    /// At or above → Low.
    pub low_min: f64,
}

impl RouteThresholds {
    pub fn classify(&self, dose: f64) -> ToxicityTier {
        if dose <= self.high_max {
            ToxicityTier::High
        } else if dose >= self.low_min {
            ToxicityTier::Low
        } else {
            ToxicityTier::Moderate
        }
    }
}

/// ppm
pub const INHALATION_THRESHOLDS: RouteThresholds = RouteThresholds { high_max: 200.0, low_min: 2000.0 };
/// mg/kg
pub const ORAL_THRESHOLDS: RouteThresholds = RouteThresholds { high_max: 50.0, low_min: 500.0 };
/// mg/kg
pub const DERMAL_THRESHOLDS: RouteThresholds = RouteThresholds { high_max: 200.0, low_min: 1000.0 };

/// Inhalation dose in ppm.
pub fn classify_inhalation(ppm: f64) -> ToxicityTier {
    INHALATION_THRESHOLDS.classify(ppm)
}

/// Oral dose in mg/kg.
pub fn classify_oral(mg_per_kg: f64) -> ToxicityTier {
    ORAL_THRESHOLDS.classify(mg_per_kg)
}

/// Dermal dose in mg/kg.
pub fn classify_dermal(mg_per_kg: f64) -> ToxicityTier {
    DERMAL_THRESHOLDS.classify(mg_per_kg)
}

pub fn classify(route: ExposureRoute, dose: f64) -> ToxicityTier {
    match route {
        ExposureRoute::Inhalation => classify_inhalation(dose),
        ExposureRoute::Oral => classify_oral(dose),
        ExposureRoute::Dermal => classify_dermal(dose),
    }
}

/// Toxicity designation of a single study.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToxicityTier {
    High,
    Moderate,
    Low,
    #[serde(rename = "Not evaluated")]
    NotEvaluated,
}

impl ToxicityTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Moderate => "Moderate",
            Self::Low => "Low",
            Self::NotEvaluated => "Not evaluated",
        }
    }

    /// Most severe first.
    pub fn rank(&self) -> u8 {
        match self {
            Self::High => 0,
            Self::Moderate => 1,
            Self::Low => 2,
            Self::NotEvaluated => 3,
        }
    }

    /// 0 for any evaluated tier, 1 otherwise.
    pub fn evaluated_rank(&self) -> u8 {
        if self.is_evaluated() { 0 } else { 1 }
    }

    pub fn is_evaluated(&self) -> bool {
        !matches!(self, Self::NotEvaluated)
    }

    /// Cell background for the styled table. Not evaluated is left unshaded.
    pub fn background_color(&self) -> Option<&'static str> {
        match self {
            Self::High => Some("#FFC000"),
            Self::Moderate => Some("#FFFF00"),
            Self::Low => Some("#00B0F0"),
            Self::NotEvaluated => None,
        }
    }
}

impl fmt::Display for ToxicityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_boundaries(classify: fn(f64) -> ToxicityTier, high_max: f64, low_min: f64) {
        assert_eq!(classify(0.0), ToxicityTier::High);
        assert_eq!(classify(high_max), ToxicityTier::High);
        assert_eq!(classify(high_max + 0.001), ToxicityTier::Moderate);
        assert_eq!(classify((high_max + low_min) / 2.0), ToxicityTier::Moderate);
        assert_eq!(classify(low_min - 0.001), ToxicityTier::Moderate);
        assert_eq!(classify(low_min), ToxicityTier::Low);
        assert_eq!(classify(low_min * 10.0), ToxicityTier::Low);
    }

    #[test]
    fn test_inhalation_boundaries() {
        assert_boundaries(classify_inhalation, 200.0, 2000.0);
    }

    #[test]
    fn test_oral_boundaries() {
        assert_boundaries(classify_oral, 50.0, 500.0);
    }

    #[test]
    fn test_dermal_boundaries() {
        assert_boundaries(classify_dermal, 200.0, 1000.0);
    }

    #[test]
    fn test_classify_dispatches_by_route() {
        assert_eq!(classify(ExposureRoute::Inhalation, 600.0), ToxicityTier::Moderate);
        assert_eq!(classify(ExposureRoute::Oral, 600.0), ToxicityTier::Low);
        assert_eq!(classify(ExposureRoute::Dermal, 600.0), ToxicityTier::Moderate);
    }

    #[test]
    fn test_route_parse_and_rank() {
        assert_eq!(ExposureRoute::parse("inhalation"), Some(ExposureRoute::Inhalation));
        assert_eq!(ExposureRoute::parse("dermal"), Some(ExposureRoute::Dermal));
        assert_eq!(ExposureRoute::parse("injection"), None);
        assert_eq!(ExposureRoute::parse("Oral"), None);
        assert!(ExposureRoute::Inhalation.rank() < ExposureRoute::Oral.rank());
        assert!(ExposureRoute::Dermal.rank() < UNKNOWN_ROUTE_RANK);
    }

    #[test]
    fn test_tier_ranks_and_colors() {
        assert_eq!(ToxicityTier::High.rank(), 0);
        assert_eq!(ToxicityTier::NotEvaluated.rank(), 3);
        assert_eq!(ToxicityTier::Low.evaluated_rank(), 0);
        assert_eq!(ToxicityTier::NotEvaluated.evaluated_rank(), 1);
        assert_eq!(ToxicityTier::High.background_color(), Some("#FFC000"));
        assert_eq!(ToxicityTier::NotEvaluated.background_color(), None);
        assert_eq!(
            serde_json::to_string(&ToxicityTier::NotEvaluated).unwrap(),
            "\"Not evaluated\""
        );
    }
}
