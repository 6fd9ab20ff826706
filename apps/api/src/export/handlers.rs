use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use uuid::Uuid;

use super::{export_pdf, finalize, ExportOptions};
use crate::document::theme::ThemeQuery;
use crate::document::{assemble, load_source};
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/v1/sessions/:id/export?theme=
/// Renders the session's resume as a PDF download, then clears the session.
/// A failed render leaves the session untouched.
pub async fn handle_export(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ThemeQuery>,
) -> Result<Response, AppError> {
    let session = state.session(id);
    let doc = assemble(&load_source(&session).await);
    let opts = ExportOptions {
        theme: query.theme,
        scale: state.config.export_scale,
    };

    let pdf = tokio::task::spawn_blocking(move || export_pdf(&doc, &opts))
        .await
        .map_err(anyhow::Error::from)??;

    finalize(&session).await?;

    let disposition = format!("attachment; filename=\"{}\"", pdf.filename);
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Bytes::from(pdf.bytes),
    )
        .into_response())
}
