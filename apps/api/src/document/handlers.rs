use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use super::theme::{Theme, ThemeQuery};
use super::{assemble, load_source, ResumeDocument};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct PaletteResponse {
    pub label: &'static str,
    pub background: String,
    pub accent: String,
}

#[derive(Serialize)]
pub struct DocumentResponse {
    pub theme: Theme,
    pub palette: PaletteResponse,
    pub document: ResumeDocument,
}

/// GET /api/v1/sessions/:id/document?theme=
pub async fn handle_get_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ThemeQuery>,
) -> Result<Json<DocumentResponse>, AppError> {
    let source = load_source(&state.session(id)).await;
    let theme = query.theme;
    Ok(Json(DocumentResponse {
        theme,
        palette: PaletteResponse {
            label: theme.label(),
            background: theme.background().hex(),
            accent: theme.accent().hex(),
        },
        document: assemble(&source),
    }))
}
