pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post, put},
    Router,
};

use crate::session::handlers;
use crate::state::AppState;
use crate::templates::handlers as templates;

/// Multipart framing overhead allowed on top of the photo itself.
const MULTIPART_SLACK_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let photo_limit = state.config.max_photo_bytes + MULTIPART_SLACK_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        // Template catalog
        .route("/api/v1/templates", get(templates::handle_list_templates))
        .route("/api/v1/templates/:id", get(templates::handle_get_template))
        .route("/api/v1/styles", get(templates::handle_style_options))
        // Sessions
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_delete_session),
        )
        // Document
        .route(
            "/api/v1/sessions/:id/fields",
            patch(handlers::handle_update_field),
        )
        .route(
            "/api/v1/sessions/:id/collections/:collection",
            post(handlers::handle_add_entry),
        )
        .route(
            "/api/v1/sessions/:id/collections/:collection/:entry_id",
            patch(handlers::handle_update_entry).delete(handlers::handle_remove_entry),
        )
        .route(
            "/api/v1/sessions/:id/photo",
            put(handlers::handle_upload_photo)
                .delete(handlers::handle_remove_photo)
                .layer(DefaultBodyLimit::max(photo_limit)),
        )
        // Style
        .route(
            "/api/v1/sessions/:id/style",
            get(handlers::handle_get_style).put(handlers::handle_update_style),
        )
        // Preview
        .route(
            "/api/v1/sessions/:id/preview",
            get(handlers::handle_get_preview),
        )
        .route(
            "/api/v1/sessions/:id/preview.svg",
            get(handlers::handle_get_preview_svg),
        )
        // Wizard
        .route(
            "/api/v1/sessions/:id/wizard",
            get(handlers::handle_get_wizard),
        )
        .route(
            "/api/v1/sessions/:id/wizard/next",
            post(handlers::handle_wizard_next),
        )
        .route(
            "/api/v1/sessions/:id/wizard/back",
            post(handlers::handle_wizard_back),
        )
        .route(
            "/api/v1/sessions/:id/wizard/jump",
            post(handlers::handle_wizard_jump),
        )
        .route(
            "/api/v1/sessions/:id/wizard/finish",
            post(handlers::handle_wizard_finish),
        )
        // Export
        .route(
            "/api/v1/sessions/:id/export",
            post(handlers::handle_export),
        )
        .with_state(state)
}
