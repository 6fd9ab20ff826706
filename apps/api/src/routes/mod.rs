pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, MethodRouter},
    Router,
};

use crate::document::handlers::handle_get_document;
use crate::export::handlers::handle_export;
use crate::media::handlers::handle_normalize;
use crate::state::AppState;
use crate::wizard::forms::{
    ActivitiesForm, CertificatesForm, CoreSkillsForm, EducationForm, ExperienceForm,
    FormActions, PersonalForm, PlatformsForm, ProfileImageForm, ProjectsForm,
    ScreenshotsForm, SocialAccountsForm, StepForm, SummaryForm, TechnicalSkillsForm,
};
use crate::wizard::handlers::{
    handle_create_session, handle_finalize_session, handle_get_step, handle_step_action,
    handle_submit_step,
};

fn step_path<F: StepForm>() -> String {
    format!("/api/v1/sessions/:id/steps/{}", F::STEP.slug())
}

fn step_methods<F: StepForm>() -> MethodRouter<AppState> {
    get(handle_get_step::<F>).put(handle_submit_step::<F>)
}

/// GET/PUT for the page itself.
fn plain_step<F: StepForm>(router: Router<AppState>) -> Router<AppState> {
    router.route(&step_path::<F>(), step_methods::<F>())
}

/// GET/PUT for the page plus POST `.../actions`.
fn action_step<F: FormActions>(router: Router<AppState>) -> Router<AppState> {
    router
        .route(&step_path::<F>(), step_methods::<F>())
        .route(
            &format!("{}/actions", step_path::<F>()),
            post(handle_step_action::<F>),
        )
}

pub fn build_router(state: AppState) -> Router {
    let json_limit = state.config.json_body_limit();
    let upload_limit = state.config.max_upload_bytes;

    let mut router = Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/sessions", post(handle_create_session))
        .route("/api/v1/sessions/:id", delete(handle_finalize_session))
        .route("/api/v1/sessions/:id/document", get(handle_get_document))
        .route("/api/v1/sessions/:id/export", post(handle_export));

    router = action_step::<PersonalForm>(router);
    router = action_step::<ProfileImageForm>(router);
    router = plain_step::<SocialAccountsForm>(router);
    router = action_step::<TechnicalSkillsForm>(router);
    router = action_step::<PlatformsForm>(router);
    router = action_step::<CoreSkillsForm>(router);
    router = action_step::<ProjectsForm>(router);
    router = action_step::<ActivitiesForm>(router);
    router = action_step::<SummaryForm>(router);
    router = plain_step::<EducationForm>(router);
    router = action_step::<CertificatesForm>(router);
    router = action_step::<ExperienceForm>(router);
    router = action_step::<ScreenshotsForm>(router);

    router
        .layer(DefaultBodyLimit::max(json_limit))
        .route(
            "/api/v1/media/normalize",
            post(handle_normalize).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .with_state(state)
}
