//! toxrank-common — Shared types and errors used across all toxrank crates.

pub mod error;
pub mod entities;

// Re-export commonly used types
pub use error::{Result, ToxRankError};
pub use entities::{ChemicalMatch, Compound, CompoundDetail, HazardRecord};
