use serde::{Deserialize, Serialize};

use super::StepForm;
use crate::wizard::records::EducationDetails;
use crate::wizard::steps::Step;
use crate::wizard::validation::{FieldErrors, WizardError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationForm {
    pub bachelor: String,
    pub course: String,
    pub major: String,
    pub school: String,
    pub started: String,
    pub ended: String,
}

impl StepForm for EducationForm {
    type Record = EducationDetails;

    const STEP: Step = Step::Education;

    fn from_record(record: Option<EducationDetails>) -> Self {
        let r = record.unwrap_or_default();
        EducationForm {
            bachelor: r.bachelor,
            course: r.course,
            major: r.major,
            school: r.school,
            started: r.started,
            ended: r.ended,
        }
    }

    fn to_record(&self) -> Result<EducationDetails, WizardError> {
        let mut errors = FieldErrors::new();
        errors.require("bachelor", &self.bachelor, "Degree is required");
        errors.require("course", &self.course, "Course is required");
        errors.require("major", &self.major, "Major is required");
        errors.require("school", &self.school, "School is required");
        errors.require("started", &self.started, "Start date is required");
        errors.require("ended", &self.ended, "End date is required");
        errors.into_result()?;

        Ok(EducationDetails {
            bachelor: self.bachelor.clone(),
            course: self.course.clone(),
            major: self.major.clone(),
            school: self.school.clone(),
            started: self.started.clone(),
            ended: self.ended.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::forms::test_support::session_store;
    use crate::wizard::forms::{hydrate, submit};

    fn complete() -> EducationForm {
        EducationForm {
            bachelor: "Bachelor of Science".to_string(),
            course: "Computer Science".to_string(),
            major: "Software Engineering".to_string(),
            school: "State University".to_string(),
            started: "2019-06".to_string(),
            ended: "2023-05".to_string(),
        }
    }

    #[test]
    fn test_any_blank_field_blocks_submission() {
        let form = EducationForm {
            major: " ".to_string(),
            ..complete()
        };
        let Err(WizardError::Validation(fields)) = form.to_record() else {
            panic!("expected validation error");
        };
        assert_eq!(fields.0.len(), 1);
        assert!(fields.get("major").is_some());
    }

    #[tokio::test]
    async fn test_round_trip() {
        let store = session_store();
        assert_eq!(submit(&store, &complete()).await.unwrap(), Step::Certificates);
        let hydrated: EducationForm = hydrate(&store).await.unwrap();
        assert_eq!(hydrated, complete());
    }
}
