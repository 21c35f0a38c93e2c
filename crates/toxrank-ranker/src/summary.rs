//! Narrative summary printed above the hazard table.

use std::fmt::Write;

use serde::{Deserialize, Serialize};
use toxrank_common::Compound;

use crate::table::ToxicityTable;
use crate::tier::ToxicityTier;

/// Densities outside this range (g/cm³) make ppm conversions suspect.
pub const DENSITY_REVIEW_RANGE: (f64, f64) = (0.8, 1.2);

/// Caveat attached to the inhalation conversions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DensityNote {
    Missing,
    OutOfRange(f64),
}

pub fn density_note(density: Option<f64>) -> Option<DensityNote> {
    let (lo, hi) = DENSITY_REVIEW_RANGE;
    match density {
        None => Some(DensityNote::Missing),
        Some(d) if d < lo || d > hi => Some(DensityNote::OutOfRange(d)),
        Some(_) => None,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCounts {
    pub total: usize,
    pub high: usize,
    pub moderate: usize,
    pub low: usize,
}

impl TierCounts {
    pub fn from_table(table: &ToxicityTable) -> Self {
        Self {
            total: table.len(),
            high: table.count_tier(ToxicityTier::High),
            moderate: table.count_tier(ToxicityTier::Moderate),
            low: table.count_tier(ToxicityTier::Low),
        }
    }

    pub fn evaluated(&self) -> usize {
        self.high + self.moderate + self.low
    }
}

/// Integral floats keep a trailing `.0`.
fn display_float(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{:.1}", v)
    } else {
        v.to_string()
    }
}

fn display_or_unknown(value: Option<f64>) -> String {
    value.map(display_float).unwrap_or_else(|| "unknown".to_string())
}

pub fn render_summary(compound: &Compound, counts: &TierCounts) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "CompTox Results for CAS Number {}", compound.identifier);
    let _ = writeln!(
        out,
        "{} (CAS# {}) has a reported mass of {} and density of {}",
        compound.preferred_name,
        compound.identifier,
        display_or_unknown(compound.average_mass),
        display_or_unknown(compound.density),
    );

    let note = density_note(compound.density);
    match note {
        Some(DensityNote::Missing) => {
            let _ = writeln!(
                out,
                "\nNo density was found in CompTox. A density near 1 is assumed for inhalation result conversions."
            );
        }
        Some(DensityNote::OutOfRange(d)) => {
            let _ = writeln!(
                out,
                "NOTE: the density {} is outside the 0.8-1.2g/cm^3 range. Converted inhalation results should be reviewed.",
                display_float(d)
            );
        }
        None => {}
    }
    // A caveat is set off from the counts by a blank line.
    if note.is_some() {
        out.push('\n');
    }

    let _ = write!(
        out,
        "{} studies were evaluated for toxicity results of {} total studies:\n   {} High Toxicity\n   {} Moderate Toxicity\n   {} Low Toxicity\n",
        counts.evaluated(),
        counts.total,
        counts.high,
        counts.moderate,
        counts.low,
    );
    out
}
