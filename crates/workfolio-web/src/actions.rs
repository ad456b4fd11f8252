//! Mutating handlers: register, update and delete.

use askama::Template;
use axum::extract::rejection::{FormRejection, PathRejection, QueryRejection};
use axum::extract::{Form, OriginalUri, Path, Query, State};
use axum::response::{Html, Redirect};
use rand::Rng;
use tracing::info;
use workfolio_service::{EmployeeForm, EmployeeUpdate, ServiceResult};
use workfolio_state::EmployeeId;

use crate::AppState;
use crate::error::WebError;
use crate::pages::{IndexTemplate, render};
use crate::views::*;

/// Full list with a flash message, as shown after add and update.
fn list_all(state: &AppState, flash: Flash) -> ServiceResult<Html<String>> {
    let employees = state.service.get_all_employees()?;
    Ok(render(IndexTemplate {
        flash: Some(flash.message()),
        employees: employees.iter().map(EmployeeRow::from_employee).collect(),
        pagination: None,
    }))
}

// ── Register ────────────────────────────────────────────────────

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    form: Result<Form<EmployeeForm>, FormRejection>,
) -> Result<Html<String>, WebError> {
    let Form(form) = form.map_err(WebError::at(&uri))?;

    // An empty range would panic in `gen_range`.
    let bound = state.settings.id_bound;
    if bound <= 0 {
        return Err(WebError::new(
            format!("registration id bound must be positive, got {bound}"),
            &uri,
        ));
    }
    let id = rand::thread_rng().gen_range(0..bound);
    let employee = form.into_employee(id).map_err(WebError::at(&uri))?;
    state
        .service
        .add_employee(&employee)
        .map_err(WebError::at(&uri))?;
    info!(id, "registered employee");

    list_all(&state, Flash::Added).map_err(WebError::at(&uri))
}

// ── Update ──────────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "update_employee.html")]
struct UpdateEmployeeTemplate {
    emp: EmployeeRow,
}

/// GET /update/{id}
///
/// Trims the stored record and saves it back before showing the form.
pub async fn edit_form(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    id: Result<Path<EmployeeId>, PathRejection>,
) -> Result<Html<String>, WebError> {
    let Path(id) = id.map_err(WebError::at(&uri))?;

    let employee = state
        .service
        .get_employee_by_id(id)
        .map_err(WebError::at(&uri))?;
    let mut current = EmployeeUpdate::from(employee);
    current.trim_properties().map_err(WebError::at(&uri))?;
    state
        .service
        .update_employee(&current)
        .map_err(WebError::at(&uri))?;

    Ok(render(UpdateEmployeeTemplate {
        emp: EmployeeRow::from_update(&current),
    }))
}

/// GET /update?id=..&name=..
pub async fn update(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    query: Result<Query<EmployeeUpdate>, QueryRejection>,
) -> Result<Html<String>, WebError> {
    let Query(mut update) = query.map_err(WebError::at(&uri))?;

    update.trim_properties().map_err(WebError::at(&uri))?;
    state
        .service
        .update_employee(&update)
        .map_err(WebError::at(&uri))?;

    list_all(&state, Flash::Updated).map_err(WebError::at(&uri))
}

// ── Delete ──────────────────────────────────────────────────────

/// GET /delete/{id}
pub async fn delete(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    id: Result<Path<EmployeeId>, PathRejection>,
) -> Result<Redirect, WebError> {
    let Path(id) = id.map_err(WebError::at(&uri))?;

    state
        .service
        .delete_employee(id)
        .map_err(WebError::at(&uri))?;

    Ok(Redirect::to(&format!("/?flash={}", Flash::Deleted.query_value())))
}
