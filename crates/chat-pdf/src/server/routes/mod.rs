//! Routes for the chat server

pub mod ask;

use axum::{extract::DefaultBodyLimit, routing::get, Router};

use crate::server::state::AppState;

/// Form routes; the body limit covers PDF uploads
pub fn form_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new().route(
        "/",
        get(ask::show_form)
            .post(ask::ask_question)
            .layer(DefaultBodyLimit::max(max_upload_size)),
    )
}
