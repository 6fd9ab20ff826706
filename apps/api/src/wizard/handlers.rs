use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::store::StoredRecord;
use crate::wizard::forms::{hydrate, submit, FormActions, StepForm};
use crate::wizard::steps::Step;

#[derive(Serialize)]
pub struct SessionCreatedResponse {
    pub session_id: Uuid,
    pub next: String,
}

#[derive(Serialize)]
pub struct SubmitResponse {
    /// Store key the record was written under.
    pub saved: &'static str,
    /// Route of the page to navigate to.
    pub next: String,
}

/// Body of an action call: the client's current form state plus one operation.
#[derive(Deserialize)]
#[serde(bound(deserialize = ""))]
pub struct ActionRequest<F: FormActions> {
    pub form: F,
    pub action: F::Action,
}

/// POST /api/v1/sessions
pub async fn handle_create_session() -> (StatusCode, Json<SessionCreatedResponse>) {
    let session_id = Uuid::new_v4();
    info!(session = %session_id, "wizard session started");
    (
        StatusCode::CREATED,
        Json(SessionCreatedResponse {
            session_id,
            next: Step::Home.next().route(),
        }),
    )
}

/// DELETE /api/v1/sessions/:id
/// Drops every record of the session.
pub async fn handle_finalize_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.session(id).clear().await?;
    info!(session = %id, "wizard session cleared");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/sessions/:id/steps/<step>
pub async fn handle_get_step<F: StepForm>(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<F>, AppError> {
    let form = hydrate::<F>(&state.session(id)).await?;
    Ok(Json(form))
}

/// PUT /api/v1/sessions/:id/steps/<step>
pub async fn handle_submit_step<F: StepForm>(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(form): Json<F>,
) -> Result<Json<SubmitResponse>, AppError> {
    let next = submit(&state.session(id), &form).await?;
    Ok(Json(SubmitResponse {
        saved: <F::Record as StoredRecord>::KEY.as_str(),
        next: next.route(),
    }))
}

/// POST /api/v1/sessions/:id/steps/<step>/actions
/// Applies one action to the posted form and returns the updated form. Nothing is
/// persisted; a rejected action returns the error and the client keeps its state.
pub async fn handle_step_action<F: FormActions>(
    Path(_id): Path<Uuid>,
    Json(req): Json<ActionRequest<F>>,
) -> Result<Json<F>, AppError> {
    let mut form = req.form;
    form.apply(req.action)?;
    Ok(Json(form))
}
