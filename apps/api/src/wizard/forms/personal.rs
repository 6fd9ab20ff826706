use serde::{Deserialize, Serialize};

use super::{FormActions, StepForm};
use crate::wizard::records::{from_placeholder, is_blank, or_placeholder, PersonalDetails};
use crate::wizard::steps::Step;
use crate::wizard::validation::{
    digits_only, is_valid_email, is_valid_phone, FieldErrors, WizardError,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalForm {
    pub firstname: String,
    pub middlename: String,
    pub lastname: String,
    pub suffix: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PersonalAction {
    /// Phone input only ever holds digits.
    SetPhone { value: String },
    /// Middle initial input holds at most one character.
    SetMiddlename { value: String },
}

impl StepForm for PersonalForm {
    type Record = PersonalDetails;

    const STEP: Step = Step::Personal;

    fn from_record(record: Option<PersonalDetails>) -> Self {
        let Some(r) = record else {
            return Self::default();
        };
        PersonalForm {
            firstname: r.firstname,
            middlename: from_placeholder(&r.middlename),
            lastname: r.lastname,
            suffix: from_placeholder(&r.suffix),
            email: r.email,
            phone: r.phone_number,
        }
    }

    fn to_record(&self) -> Result<PersonalDetails, WizardError> {
        let mut errors = FieldErrors::new();

        errors.require("firstname", &self.firstname, "First name is required");
        if is_blank(&self.middlename) || self.middlename.chars().count() != 1 {
            errors.add(
                "middlename",
                "Middle Initial is required and must be a single letter",
            );
        }
        errors.require("lastname", &self.lastname, "Last name is required");
        if !is_valid_email(&self.email) {
            errors.add("email", "Valid email is required");
        }
        if !is_valid_phone(&self.phone) {
            errors.add("phone", "Phone number must be 11 digits");
        }
        errors.into_result()?;

        Ok(PersonalDetails {
            firstname: self.firstname.clone(),
            middlename: or_placeholder(&self.middlename),
            lastname: self.lastname.clone(),
            suffix: or_placeholder(&self.suffix),
            email: self.email.clone(),
            phone_number: self.phone.clone(),
        })
    }
}

impl FormActions for PersonalForm {
    type Action = PersonalAction;

    fn apply(&mut self, action: PersonalAction) -> Result<(), WizardError> {
        match action {
            PersonalAction::SetPhone { value } => self.phone = digits_only(&value),
            PersonalAction::SetMiddlename { value } => {
                self.middlename = value.chars().take(1).collect();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::forms::test_support::session_store;
    use crate::wizard::forms::{hydrate, submit};

    fn ana() -> PersonalForm {
        PersonalForm {
            firstname: "Ana".to_string(),
            middlename: "B".to_string(),
            lastname: "Cruz".to_string(),
            suffix: String::new(),
            email: "ana@x.com".to_string(),
            phone: "09171234567".to_string(),
        }
    }

    #[tokio::test]
    async fn test_valid_details_submit_and_navigate_forward() {
        let store = session_store();
        let next = submit(&store, &ana()).await.unwrap();
        assert_eq!(next, Step::SelectImage);

        let stored = store.load::<PersonalDetails>().await.unwrap().unwrap();
        assert_eq!(stored.suffix, " ");
        assert_eq!(stored.phone_number, "09171234567");
    }

    #[tokio::test]
    async fn test_short_phone_blocks_navigation() {
        let store = session_store();
        let form = PersonalForm {
            phone: "123".to_string(),
            ..ana()
        };
        let err = submit(&store, &form).await.unwrap_err();
        match err {
            crate::errors::AppError::Wizard(WizardError::Validation(fields)) => {
                assert_eq!(fields.get("phone"), Some("Phone number must be 11 digits"));
                assert_eq!(fields.0.len(), 1);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(store.load::<PersonalDetails>().await.unwrap().is_none());
    }

    #[test]
    fn test_middle_initial_must_be_single_char() {
        let form = PersonalForm {
            middlename: "Bo".to_string(),
            ..ana()
        };
        let Err(WizardError::Validation(fields)) = form.to_record() else {
            panic!("expected validation error");
        };
        assert!(fields.get("middlename").is_some());
    }

    #[test]
    fn test_missing_required_fields_are_all_reported() {
        let Err(WizardError::Validation(fields)) = PersonalForm::default().to_record() else {
            panic!("expected validation error");
        };
        for field in ["firstname", "middlename", "lastname", "email", "phone"] {
            assert!(fields.get(field).is_some(), "missing error for {field}");
        }
        assert!(fields.get("suffix").is_none());
    }

    #[tokio::test]
    async fn test_round_trip_hydrates_identical_fields() {
        let store = session_store();
        submit(&store, &ana()).await.unwrap();
        let hydrated: PersonalForm = hydrate(&store).await.unwrap();
        assert_eq!(hydrated, ana());
    }

    #[test]
    fn test_phone_action_strips_non_digits() {
        let mut form = ana();
        form.apply(PersonalAction::SetPhone {
            value: "(0917) 123-4567".to_string(),
        })
        .unwrap();
        assert_eq!(form.phone, "09171234567");
    }

    #[test]
    fn test_middlename_action_keeps_one_char() {
        let mut form = ana();
        form.apply(PersonalAction::SetMiddlename {
            value: "Bautista".to_string(),
        })
        .unwrap();
        assert_eq!(form.middlename, "B");
    }
}
