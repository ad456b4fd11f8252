//! workfolio-web — server-rendered web UI for WorkFolio.
//!
//! Provides axum route handlers that call into `EmployeeService` and
//! render Askama templates. Any failure is answered with a JSON
//! [`error::ErrorPayload`].
//!
//! # Routes
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | GET | `/` | First page, with an optional redirect-carried flash |
//! | GET | `/home` | First page |
//! | GET | `/page/{pageno}` | Zero-based page of employees |
//! | GET | `/add` | Empty add form |
//! | POST | `/register` | Add an employee from the form |
//! | GET | `/update/{id}` | Pre-filled update form |
//! | GET | `/update` | Apply a partial update from the query string |
//! | GET | `/delete/{id}` | Delete, then redirect to `/` |

pub mod actions;
pub mod error;
pub mod pages;
pub mod views;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;
use workfolio_service::EmployeeService;

/// Tunables for the web layer.
#[derive(Debug, Clone, Copy)]
pub struct WebSettings {
    /// Rows per list page.
    pub page_size: i64,
    /// Registration assigns ids uniformly from `[0, id_bound)`.
    pub id_bound: i32,
}

impl Default for WebSettings {
    fn default() -> Self {
        Self {
            page_size: 2,
            id_bound: 198,
        }
    }
}

/// Shared state for all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: EmployeeService,
    pub settings: WebSettings,
}

/// Build the complete router.
pub fn build_router(service: EmployeeService, settings: WebSettings) -> Router {
    let state = AppState { service, settings };

    Router::new()
        .route("/", get(pages::root))
        .route("/home", get(pages::home))
        .route("/page/{pageno}", get(pages::page))
        .route("/add", get(pages::add_form))
        .route("/register", post(actions::register))
        .route("/update/{id}", get(actions::edit_form))
        .route("/update", get(actions::update))
        .route("/delete/{id}", get(actions::delete))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
