use axum::{
    body::Body,
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{Collection, EntryId, Photo};
use crate::models::style::{Palette, StyleSelection, StyleUpdate};
use crate::render::{export_pdf, Preview};
use crate::session::SessionView;
use crate::state::AppState;
use crate::store::{AddedEntry, FieldValue, ScalarField};
use crate::wizard::{Transition, WizardView};

// ────────────────────────────────────────────────────────────────────────────
// Sessions
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    let view = state.sessions.create().await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let view = state.sessions.read(id, |s| s.view()).await?;
    Ok(Json(view))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Document edits
// ────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct FieldUpdate {
    pub field: String,
    pub value: String,
}

/// PATCH /api/v1/sessions/:id/fields
pub async fn handle_update_field(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<FieldUpdate>,
) -> Result<Json<SessionView>, AppError> {
    let field: ScalarField = req.field.parse()?;
    let view = state
        .sessions
        .write(id, |s| {
            s.edit(|store| store.update(field, req.value));
            s.view()
        })
        .await?;
    Ok(Json(view))
}

#[derive(Serialize)]
pub struct AddEntryResponse {
    pub added: AddedEntry,
    pub session: SessionView,
}

/// POST /api/v1/sessions/:id/collections/:collection
pub async fn handle_add_entry(
    State(state): State<AppState>,
    Path((id, collection)): Path<(Uuid, String)>,
) -> Result<(StatusCode, Json<AddEntryResponse>), AppError> {
    let collection: Collection = collection.parse()?;
    let response = state
        .sessions
        .write(id, |s| {
            let added = s.edit(|store| store.add_entry(collection));
            AddEntryResponse {
                added,
                session: s.view(),
            }
        })
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[derive(Deserialize)]
pub struct EntryFieldUpdate {
    pub field: String,
    pub value: FieldValue,
}

#[derive(Serialize)]
pub struct EntryChangeResponse {
    /// `false` when no entry had the id; the document is unchanged.
    pub changed: bool,
    pub session: SessionView,
}

/// PATCH /api/v1/sessions/:id/collections/:collection/:entry_id
pub async fn handle_update_entry(
    State(state): State<AppState>,
    Path((id, collection, entry_id)): Path<(Uuid, String, u64)>,
    Json(req): Json<EntryFieldUpdate>,
) -> Result<Json<EntryChangeResponse>, AppError> {
    let collection: Collection = collection.parse()?;
    let response = state
        .sessions
        .write(id, |s| {
            let changed = s.edit(|store| {
                store.update_entry(collection, EntryId(entry_id), &req.field, req.value)
            })?;
            Ok::<_, AppError>(EntryChangeResponse {
                changed,
                session: s.view(),
            })
        })
        .await??;
    Ok(Json(response))
}

/// DELETE /api/v1/sessions/:id/collections/:collection/:entry_id
pub async fn handle_remove_entry(
    State(state): State<AppState>,
    Path((id, collection, entry_id)): Path<(Uuid, String, u64)>,
) -> Result<Json<EntryChangeResponse>, AppError> {
    let collection: Collection = collection.parse()?;
    let response = state
        .sessions
        .write(id, |s| {
            let changed = s.edit(|store| store.remove_entry(collection, EntryId(entry_id)));
            EntryChangeResponse {
                changed,
                session: s.view(),
            }
        })
        .await?;
    Ok(Json(response))
}

/// PUT /api/v1/sessions/:id/photo (multipart field `photo`)
pub async fn handle_upload_photo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<SessionView>, AppError> {
    let mut photo = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
    {
        if field.name() != Some("photo") {
            continue;
        }
        let media_type = field.content_type().unwrap_or("").to_string();
        if !media_type.starts_with("image/") {
            return Err(AppError::Validation(format!(
                "Photo must be an image, got '{media_type}'"
            )));
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read photo: {e}")))?;
        if bytes.len() > state.config.max_photo_bytes {
            return Err(AppError::Validation(format!(
                "Photo exceeds {} bytes",
                state.config.max_photo_bytes
            )));
        }
        photo = Some(Photo { media_type, bytes });
    }
    let photo =
        photo.ok_or_else(|| AppError::Validation("Missing multipart field 'photo'".to_string()))?;

    info!(session = %id, size_bytes = photo.bytes.len(), "photo uploaded");
    let view = state
        .sessions
        .write(id, |s| {
            s.edit(|store| store.set_photo(Some(photo)));
            s.view()
        })
        .await?;
    Ok(Json(view))
}

/// DELETE /api/v1/sessions/:id/photo
pub async fn handle_remove_photo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let view = state
        .sessions
        .write(id, |s| {
            s.edit(|store| store.set_photo(None));
            s.view()
        })
        .await?;
    Ok(Json(view))
}

// ────────────────────────────────────────────────────────────────────────────
// Style
// ────────────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleResponse {
    pub style: StyleSelection,
    pub palette: Palette,
}

/// GET /api/v1/sessions/:id/style
pub async fn handle_get_style(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StyleResponse>, AppError> {
    let style = state.sessions.read(id, |s| *s.style()).await?;
    Ok(Json(StyleResponse {
        palette: style.palette(),
        style,
    }))
}

/// PUT /api/v1/sessions/:id/style
pub async fn handle_update_style(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<StyleUpdate>,
) -> Result<Json<SessionView>, AppError> {
    let view = state
        .sessions
        .write(id, |s| {
            s.update_style(update)?;
            Ok::<_, AppError>(s.view())
        })
        .await??;
    Ok(Json(view))
}

// ────────────────────────────────────────────────────────────────────────────
// Preview
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/sessions/:id/preview
pub async fn handle_get_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Preview>, AppError> {
    let preview = state.sessions.read(id, |s| s.preview().clone()).await?;
    Ok(Json(preview))
}

/// GET /api/v1/sessions/:id/preview.svg
pub async fn handle_get_preview_svg(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let svg = state.sessions.read(id, |s| s.preview().svg.clone()).await?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response())
}

// ────────────────────────────────────────────────────────────────────────────
// Wizard
// ────────────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct WizardResponse {
    pub transition: Transition,
    pub wizard: WizardView,
}

#[derive(Deserialize)]
pub struct JumpRequest {
    pub step: usize,
}

/// GET /api/v1/sessions/:id/wizard
pub async fn handle_get_wizard(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardView>, AppError> {
    let view = state.sessions.read(id, |s| s.wizard().view()).await?;
    Ok(Json(view))
}

/// POST /api/v1/sessions/:id/wizard/next
pub async fn handle_wizard_next(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardResponse>, AppError> {
    wizard_move(&state, id, |s| s.wizard_next()).await
}

/// POST /api/v1/sessions/:id/wizard/back
pub async fn handle_wizard_back(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardResponse>, AppError> {
    wizard_move(&state, id, |s| s.wizard_back()).await
}

/// POST /api/v1/sessions/:id/wizard/jump
pub async fn handle_wizard_jump(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<JumpRequest>,
) -> Result<Json<WizardResponse>, AppError> {
    wizard_move(&state, id, |s| s.wizard_jump(req.step)).await
}

/// POST /api/v1/sessions/:id/wizard/finish
pub async fn handle_wizard_finish(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardResponse>, AppError> {
    wizard_move(&state, id, |s| s.wizard_finish()).await
}

async fn wizard_move(
    state: &AppState,
    id: Uuid,
    step: impl FnOnce(&mut crate::session::Session) -> Transition,
) -> Result<Json<WizardResponse>, AppError> {
    let response = state
        .sessions
        .write(id, |s| {
            let transition = step(s);
            WizardResponse {
                transition,
                wizard: s.wizard().view(),
            }
        })
        .await?;
    Ok(Json(response))
}

// ────────────────────────────────────────────────────────────────────────────
// Export
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions/:id/export
///
/// Snapshots the document under the lock, then builds the PDF on the blocking
/// pool so other sessions keep editing meanwhile.
pub async fn handle_export(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let (guard, doc, style) = state
        .sessions
        .read(id, |s| {
            s.begin_export().map(|guard| {
                let (doc, style) = s.snapshot();
                (guard, doc, style)
            })
        })
        .await?
        .ok_or_else(|| {
            AppError::Conflict("An export for this session is already in progress".to_string())
        })?;

    let result = tokio::task::spawn_blocking(move || {
        let _guard = guard;
        export_pdf(&doc, &style)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("export task failed: {e}")))?;

    let pdf = result.map_err(|e| {
        warn!(session = %id, error = %e, "export failed");
        AppError::from(e)
    })?;

    info!(session = %id, pages = pdf.pages, filename = %pdf.filename, "export sent");
    let disposition = format!("attachment; filename=\"{}\"", pdf.filename);
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Body::from(pdf.bytes),
    )
        .into_response())
}
