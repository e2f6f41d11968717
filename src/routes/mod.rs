pub mod about;
pub mod index;

use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index::landing_page))
        .route("/about", get(about::about))
        .route("/health", get(|| async { "ok" }))
}
