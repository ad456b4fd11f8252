//! Read-only page handlers.
//!
//! Each handler queries the service, builds view types, and renders an
//! Askama template. Mutating routes live in `actions.rs`.

use askama::Template;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::Uri;
use axum::response::Html;
use serde::Deserialize;

use crate::AppState;
use crate::error::WebError;
use crate::views::*;

pub(crate) fn render<T: Template>(tmpl: T) -> Html<String> {
    Html(
        tmpl.render()
            .unwrap_or_else(|e| format!("<pre>Template error: {e}</pre>")),
    )
}

// ── Employee List ───────────────────────────────────────────────

#[derive(Template)]
#[template(path = "index.html")]
pub(crate) struct IndexTemplate {
    pub flash: Option<&'static str>,
    pub employees: Vec<EmployeeRow>,
    pub pagination: Option<PaginationView>,
}

/// Render page `index` of the employee list.
fn list_page(
    state: &AppState,
    index: i64,
    flash: Option<Flash>,
    uri: &Uri,
) -> Result<Html<String>, WebError> {
    let page = state
        .service
        .get_employees_by_page(index, state.settings.page_size)
        .map_err(WebError::at(uri))?;

    Ok(render(IndexTemplate {
        flash: flash.map(Flash::message),
        employees: page.items.iter().map(EmployeeRow::from_employee).collect(),
        pagination: Some(PaginationView::from_page(&page)),
    }))
}

#[derive(Debug, Deserialize)]
pub struct FlashQuery {
    pub flash: Option<Flash>,
}

/// GET /
pub async fn root(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    query: Result<Query<FlashQuery>, QueryRejection>,
) -> Result<Html<String>, WebError> {
    // An unrecognised flash value just means no message.
    let flash = query.ok().and_then(|Query(q)| q.flash);
    list_page(&state, 0, flash, &uri)
}

/// GET /home
pub async fn home(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> Result<Html<String>, WebError> {
    list_page(&state, 0, None, &uri)
}

/// GET /page/{pageno}
pub async fn page(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    pageno: Result<Path<i64>, PathRejection>,
) -> Result<Html<String>, WebError> {
    let Path(pageno) = pageno.map_err(WebError::at(&uri))?;
    list_page(&state, pageno, None, &uri)
}

// ── Add Form ────────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "add_employee.html")]
struct AddEmployeeTemplate;

/// GET /add
pub async fn add_form() -> Html<String> {
    render(AddEmployeeTemplate)
}
