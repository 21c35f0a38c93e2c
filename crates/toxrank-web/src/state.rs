//! Shared application state for the web server.

use std::sync::Arc;

use minijinja::Environment;
use toxrank_ingestion::HazardSource;

use crate::config::Config;

pub const INDEX_TEMPLATE: &str = "index.html";

/// Shared state injected into every Axum handler. Immutable after startup.
pub struct AppState {
    pub config: Config,
    pub source: Arc<dyn HazardSource>,
    pub templates: Environment<'static>,
}

impl AppState {
    pub fn new(config: Config, source: Arc<dyn HazardSource>) -> anyhow::Result<Self> {
        let mut templates = Environment::new();
        templates.add_template(INDEX_TEMPLATE, include_str!("../templates/index.html"))?;
        Ok(Self { config, source, templates })
    }
}

pub type SharedState = Arc<AppState>;
