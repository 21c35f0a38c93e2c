//! toxrank-web — Web form for CompTox toxicity ranking.
//! Provides:
//!   - An identifier form with "Update Selections" and "Run" actions
//!   - The ranked, tier-shaded hazard table and summary
//!   - A JSON report endpoint for programmatic use

pub mod config;
pub mod router;
pub mod handlers;
pub mod state;
