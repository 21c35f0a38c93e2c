//! Identifier form: enter a CAS list, pick one, run the ranking.
//!
//! The form is stateless: the identifier list travels with every POST, so
//! concurrent users never share selections.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::{Deserialize, Serialize};
use toxrank_ranker::run_identifier;
use toxrank_ranker::table::StyledTable;
use tracing::{error, info};

use crate::state::{SharedState, INDEX_TEMPLATE};

/// Split a comma separated identifier list. Whitespace is removed and empty
/// entries dropped.
pub fn parse_identifiers(text: &str) -> Vec<String> {
    text.split(',')
        .map(|part| part.chars().filter(|c| !c.is_whitespace()).collect::<String>())
        .filter(|id| !id.is_empty())
        .collect()
}

#[derive(Deserialize)]
pub struct SelectionForm {
    #[serde(default)]
    pub cas_text: String,
}

#[derive(Deserialize)]
pub struct RunForm {
    #[serde(default)]
    pub cas_text: String,
    pub selected: Option<String>,
}

/// Everything the index template renders.
#[derive(Debug, Default, Serialize)]
pub struct PageView {
    pub cas_text: String,
    pub choices: Vec<String>,
    pub selected: Option<String>,
    pub error: Option<String>,
    pub summary: Option<String>,
    pub table: Option<StyledTable>,
}

fn choices_for(state: &SharedState, cas_text: &str) -> Vec<String> {
    let parsed = parse_identifiers(cas_text);
    if parsed.is_empty() {
        state.config.form.default_identifiers.clone()
    } else {
        parsed
    }
}

pub fn render_page(state: &SharedState, view: &PageView) -> Response {
    let rendered = state
        .templates
        .get_template(INDEX_TEMPLATE)
        .and_then(|tmpl| tmpl.render(view));

    match rendered {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!(error = %e, "Template rendering failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "template rendering failed").into_response()
        }
    }
}

pub async fn index(State(state): State<SharedState>) -> Response {
    let view = PageView {
        choices: state.config.form.default_identifiers.clone(),
        ..Default::default()
    };
    render_page(&state, &view)
}

pub async fn update_selections(
    State(state): State<SharedState>,
    Form(form): Form<SelectionForm>,
) -> Response {
    let choices = choices_for(&state, &form.cas_text);
    info!(count = choices.len(), "Updated identifier selections");

    let view = PageView {
        cas_text: form.cas_text,
        choices,
        ..Default::default()
    };
    render_page(&state, &view)
}

pub async fn run(
    State(state): State<SharedState>,
    Form(form): Form<RunForm>,
) -> Response {
    let choices = choices_for(&state, &form.cas_text);
    let selected = form
        .selected
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let mut view = PageView {
        cas_text: form.cas_text,
        choices,
        selected: selected.clone(),
        ..Default::default()
    };

    let Some(identifier) = selected else {
        view.error = Some("Select an identifier before running.".to_string());
        return render_page(&state, &view);
    };

    match run_identifier(state.source.as_ref(), &identifier).await {
        Ok(report) => {
            view.summary = Some(report.summary);
            view.table = Some(report.styled);
        }
        Err(e) => {
            view.error = Some(e.to_string());
        }
    }
    render_page(&state, &view)
}
