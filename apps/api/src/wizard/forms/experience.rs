use serde::{Deserialize, Serialize};

use super::{FormActions, StepForm};
use crate::wizard::records::{is_blank, Experience, WorkDetail};
use crate::wizard::steps::Step;
use crate::wizard::validation::{
    apply_word_capped, check_cap, check_word_cap, remove_at, FieldErrors, WizardError,
    DESCRIPTION_WORD_CAP, MAX_EXPERIENCE_DETAILS,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceDraft {
    pub work: String,
    pub position: String,
    pub company: String,
    pub company_address: String,
    pub started: String,
    pub ended: String,
    pub description: String,
    pub work_details: Vec<WorkDetail>,
}

impl ExperienceDraft {
    fn is_complete(&self) -> bool {
        [
            &self.work,
            &self.position,
            &self.company,
            &self.company_address,
            &self.started,
            &self.ended,
            &self.description,
        ]
        .iter()
        .all(|f| !is_blank(f))
    }

    fn into_experience(self) -> Experience {
        Experience {
            work: self.work,
            position: self.position,
            company: self.company,
            company_address: self.company_address,
            started: self.started,
            ended: self.ended,
            description: self.description,
            work_details: self.work_details,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceForm {
    pub experience: Option<Experience>,
    pub draft: ExperienceDraft,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExperienceAction {
    SetDescription { value: String },
    AddDetail { value: String },
    DeleteDetail { index: usize },
    AddExperience,
    DeleteExperience,
}

impl StepForm for ExperienceForm {
    type Record = Experience;

    const STEP: Step = Step::Experience;

    fn from_record(record: Option<Experience>) -> Self {
        ExperienceForm {
            experience: record.filter(|e| !e.is_placeholder()),
            draft: ExperienceDraft::default(),
        }
    }

    /// A saved experience wins; otherwise a complete draft is promoted, and
    /// anything else stores the all-placeholder record.
    fn to_record(&self) -> Result<Experience, WizardError> {
        let experience = match &self.experience {
            Some(existing) => existing.clone(),
            None if self.draft.is_complete() => self.draft.clone().into_experience(),
            None => return Ok(Experience::placeholder()),
        };

        let mut errors = FieldErrors::new();
        check_word_cap(
            &mut errors,
            "description",
            &experience.description,
            DESCRIPTION_WORD_CAP,
        );
        errors.into_result()?;
        check_cap(
            &experience.work_details,
            MAX_EXPERIENCE_DETAILS,
            "experience details",
        )?;
        Ok(experience)
    }
}

impl FormActions for ExperienceForm {
    type Action = ExperienceAction;

    fn apply(&mut self, action: ExperienceAction) -> Result<(), WizardError> {
        match action {
            ExperienceAction::SetDescription { value } => {
                apply_word_capped(&mut self.draft.description, &value, DESCRIPTION_WORD_CAP);
            }
            ExperienceAction::AddDetail { value } => {
                let details = &mut self.draft.work_details;
                if details.len() >= MAX_EXPERIENCE_DETAILS {
                    return Err(WizardError::CapacityExceeded {
                        field: "experience details",
                        max: MAX_EXPERIENCE_DETAILS,
                    });
                }
                let value = value.trim();
                if !value.is_empty() {
                    let work_details_id = details.last().map_or(1, |d| d.work_details_id + 1);
                    details.push(WorkDetail {
                        work_details_id,
                        work_details: value.to_string(),
                    });
                }
            }
            ExperienceAction::DeleteDetail { index } => {
                remove_at(&mut self.draft.work_details, index, "experience detail")?;
            }
            ExperienceAction::AddExperience => {
                if self.experience.is_some() {
                    return Err(WizardError::AlreadyExists("experience"));
                }
                if !self.draft.is_complete() {
                    return Err(FieldErrors::single(
                        "experience",
                        "Please fill out all fields.",
                    ));
                }
                let draft = std::mem::take(&mut self.draft);
                self.experience = Some(draft.into_experience());
            }
            ExperienceAction::DeleteExperience => {
                if self.experience.take().is_none() {
                    return Err(WizardError::NotFound {
                        field: "experience",
                        position: 0,
                    });
                }
            }
        }
        Ok(())
    }
}
