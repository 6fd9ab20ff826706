use serde::{Deserialize, Serialize};

use super::{FormActions, StepForm};
use crate::wizard::records::{is_blank, PersonalSummary};
use crate::wizard::steps::Step;
use crate::wizard::validation::{
    apply_word_capped, check_word_cap, word_count, FieldErrors, WizardError, SUMMARY_WORD_CAP,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryForm {
    pub summary: String,
    pub word_count: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SummaryAction {
    /// Replaces the summary text unless the new text is over the word cap.
    SetSummary { value: String },
}

impl StepForm for SummaryForm {
    type Record = PersonalSummary;

    const STEP: Step = Step::Summary;

    fn from_record(record: Option<PersonalSummary>) -> Self {
        let summary = record.map(|r| r.0).unwrap_or_default();
        SummaryForm {
            word_count: word_count(&summary),
            summary,
        }
    }

    fn to_record(&self) -> Result<PersonalSummary, WizardError> {
        if is_blank(&self.summary) {
            return Err(FieldErrors::single(
                "summary",
                "Please write a summary before proceeding.",
            ));
        }
        let mut errors = FieldErrors::new();
        check_word_cap(&mut errors, "summary", &self.summary, SUMMARY_WORD_CAP);
        errors.into_result()?;
        Ok(PersonalSummary(self.summary.clone()))
    }
}

impl FormActions for SummaryForm {
    type Action = SummaryAction;

    fn apply(&mut self, action: SummaryAction) -> Result<(), WizardError> {
        match action {
            SummaryAction::SetSummary { value } => {
                if apply_word_capped(&mut self.summary, &value, SUMMARY_WORD_CAP) {
                    self.word_count = word_count(&self.summary);
                }
            }
        }
        Ok(())
    }
}
