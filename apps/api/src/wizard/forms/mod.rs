//! Step forms: the in-memory state of one wizard page.
//!
//! Every page follows the same lifecycle:
//! 1. `hydrate`: load the page's record. If it is missing or unreadable, start empty.
//! 2. `FormActions::apply`: add/delete/edit operations, capacity-checked. A
//!    rejected action leaves the form untouched.
//! 3. `submit`: validate, default empty fields to placeholders, write the record,
//!    and return the next step.
//!
//! Forms are plain serde structs, so an HTTP client can hold them between calls
//! the same way a browser page holds its component state.

pub mod activities;
pub mod certificates;
pub mod education;
pub mod experience;
pub mod personal;
pub mod profile_image;
pub mod projects;
pub mod screenshots;
pub mod skills;
pub mod social;
pub mod summary;

use serde::{de::DeserializeOwned, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::store::{SessionStore, StoreError, StoredRecord};
use crate::wizard::steps::Step;
use crate::wizard::validation::WizardError;

pub use activities::ActivitiesForm;
pub use certificates::CertificatesForm;
pub use education::EducationForm;
pub use experience::ExperienceForm;
pub use personal::PersonalForm;
pub use profile_image::ProfileImageForm;
pub use projects::ProjectsForm;
pub use screenshots::ScreenshotsForm;
pub use skills::{CoreSkillsForm, PlatformsForm, TechnicalSkillsForm};
pub use social::SocialAccountsForm;
pub use summary::SummaryForm;

/// A wizard page that owns exactly one stored record.
pub trait StepForm: Default + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Record: StoredRecord + Send + Sync;

    const STEP: Step;

    /// Builds the page state from its stored record, or the empty state if none.
    fn from_record(record: Option<Self::Record>) -> Self;

    /// Validates the page and produces the record to persist, placeholders filled in.
    fn to_record(&self) -> Result<Self::Record, WizardError>;
}

/// Pages that expose list or draft operations beyond plain field edits.
pub trait FormActions: StepForm {
    type Action: DeserializeOwned + Send;

    fn apply(&mut self, action: Self::Action) -> Result<(), WizardError>;
}

pub async fn hydrate<F: StepForm>(store: &SessionStore) -> Result<F, StoreError> {
    let record = store.load::<F::Record>().await?;
    Ok(F::from_record(record))
}

/// Validates and persists a page, returning the step to navigate to.
pub async fn submit<F: StepForm>(store: &SessionStore, form: &F) -> Result<Step, AppError> {
    let record = form.to_record()?;
    store.save(&record).await?;
    info!(
        session = %store.session_id(),
        step = F::STEP.slug(),
        "step submitted"
    );
    Ok(F::STEP.next())
}
