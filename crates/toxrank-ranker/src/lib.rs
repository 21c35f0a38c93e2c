//! toxrank-ranker — Dose conversion and toxicity tier ranking.
//!
//! Hazard records flow through [`transform`] one at a time, then [`table`]
//! filters, sorts and projects them; [`report`] wires both to a
//! [`toxrank_ingestion::HazardSource`].

pub mod units;
pub mod tier;
pub mod transform;
pub mod table;
pub mod summary;
pub mod report;

pub use report::{build_report, run_identifier, ToxicityReport};
pub use tier::{ExposureRoute, ToxicityTier};
pub use transform::{ConvertedRecord, ConvertedValue, NotEvaluatedReason};
