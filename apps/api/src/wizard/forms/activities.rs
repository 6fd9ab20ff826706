use serde::{Deserialize, Serialize};

use super::{FormActions, StepForm};
use crate::wizard::records::{Activities, Activity, OrganizationDetail};
use crate::wizard::steps::Step;
use crate::wizard::validation::{
    check_cap, remove_at, FieldErrors, WizardError, MAX_ACTIVITY_DETAILS,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityDraft {
    pub title: String,
    pub activity_type: String,
    pub community: String,
    pub started: String,
    pub ended: String,
    pub details: Vec<String>,
}

/// Activities page. Only one real activity is kept; placeholders never count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivitiesForm {
    pub activities: Vec<Activity>,
    pub draft: ActivityDraft,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActivityAction {
    AddDetail { value: String },
    DeleteDetail { index: usize },
    AddActivity,
    DeleteActivity { id: u64 },
}

impl StepForm for ActivitiesForm {
    type Record = Activities;

    const STEP: Step = Step::Activities;

    fn from_record(record: Option<Activities>) -> Self {
        ActivitiesForm {
            activities: record
                .unwrap_or_default()
                .0
                .into_iter()
                .filter(|a| !a.is_placeholder())
                .collect(),
            draft: ActivityDraft::default(),
        }
    }

    fn to_record(&self) -> Result<Activities, WizardError> {
        for activity in &self.activities {
            check_cap(
                &activity.organization_detail,
                MAX_ACTIVITY_DETAILS,
                "activity details",
            )?;
        }
        if self.activities.is_empty() {
            return Ok(Activities(vec![Activity::placeholder()]));
        }
        Ok(Activities(self.activities.clone()))
    }
}

impl FormActions for ActivitiesForm {
    type Action = ActivityAction;

    fn apply(&mut self, action: ActivityAction) -> Result<(), WizardError> {
        match action {
            ActivityAction::AddDetail { value } => {
                if self.draft.details.len() >= MAX_ACTIVITY_DETAILS {
                    return Err(WizardError::CapacityExceeded {
                        field: "activity details",
                        max: MAX_ACTIVITY_DETAILS,
                    });
                }
                let value = value.trim();
                if !value.is_empty() {
                    self.draft.details.push(value.to_string());
                }
            }
            ActivityAction::DeleteDetail { index } => {
                remove_at(&mut self.draft.details, index, "activity detail")?;
            }
            ActivityAction::AddActivity => self.add_activity()?,
            ActivityAction::DeleteActivity { id } => {
                let before = self.activities.len();
                self.activities.retain(|a| a.activity_id != id);
                if self.activities.len() == before {
                    return Err(WizardError::NotFound {
                        field: "activity",
                        position: id,
                    });
                }
            }
        }
        Ok(())
    }
}

impl ActivitiesForm {
    fn add_activity(&mut self) -> Result<(), WizardError> {
        if !self.activities.is_empty() {
            return Err(WizardError::AlreadyExists("activity"));
        }

        let d = &self.draft;
        if [&d.title, &d.activity_type, &d.community, &d.started, &d.ended]
            .iter()
            .any(|f| f.trim().is_empty())
        {
            return Err(FieldErrors::single("activity", "Please fill out all fields."));
        }

        let draft = std::mem::take(&mut self.draft);
        self.activities.push(Activity {
            activity_id: 1,
            activity_title: draft.title,
            activity_type: draft.activity_type,
            activity_community: draft.community,
            activity_started: draft.started,
            activity_ended: draft.ended,
            organization_detail: draft
                .details
                .into_iter()
                .zip(1..)
                .map(|(organization_detail, id)| OrganizationDetail {
                    organization_detail_id: id,
                    organization_detail,
                })
                .collect(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::forms::test_support::session_store;
    use crate::wizard::forms::{hydrate, submit};

    fn filled() -> ActivitiesForm {
        ActivitiesForm {
            activities: Vec::new(),
            draft: ActivityDraft {
                title: "Lead Organizer".to_string(),
                activity_type: "Hackathon".to_string(),
                community: "GDSC".to_string(),
                started: "2023-02".to_string(),
                ended: "2023-03".to_string(),
                details: Vec::new(),
            },
        }
    }

    #[test]
    fn test_second_activity_already_exists() {
        let mut form = filled();
        form.apply(ActivityAction::AddActivity).unwrap();
        form.draft = filled().draft;
        assert_eq!(
            form.apply(ActivityAction::AddActivity),
            Err(WizardError::AlreadyExists("activity"))
        );
        assert_eq!(form.activities.len(), 1);
    }

    #[test]
    fn test_deleting_activity_permits_a_new_add() {
        let mut form = filled();
        form.apply(ActivityAction::AddActivity).unwrap();
        form.apply(ActivityAction::DeleteActivity { id: 1 }).unwrap();
        assert!(form.activities.is_empty());

        form.draft = filled().draft;
        assert_eq!(form.apply(ActivityAction::AddActivity), Ok(()));
        assert_eq!(form.activities.len(), 1);
        assert_eq!(form.activities[0].activity_id, 1);
    }

    #[test]
    fn test_add_requires_all_fields() {
        let mut form = filled();
        form.draft.community.clear();
        let Err(WizardError::Validation(fields)) = form.apply(ActivityAction::AddActivity) else {
            panic!("expected validation error");
        };
        assert_eq!(fields.get("activity"), Some("Please fill out all fields."));
        assert!(form.activities.is_empty());
    }

    #[test]
    fn test_fourth_detail_rejected() {
        let mut form = filled();
        for i in 0..3 {
            form.apply(ActivityAction::AddDetail {
                value: format!("detail {i}"),
            })
            .unwrap();
        }
        assert!(matches!(
            form.apply(ActivityAction::AddDetail {
                value: "extra".to_string()
            }),
            Err(WizardError::CapacityExceeded { max: 3, .. })
        ));
    }

    #[tokio::test]
    async fn test_placeholder_does_not_block_a_real_activity() {
        let store = session_store();
        assert_eq!(
            submit(&store, &ActivitiesForm::default()).await.unwrap(),
            Step::Summary
        );
        let stored = store.load::<Activities>().await.unwrap().unwrap();
        assert_eq!(stored.0, vec![Activity::placeholder()]);

        let mut form: ActivitiesForm = hydrate(&store).await.unwrap();
        assert!(form.activities.is_empty());
        form.draft = filled().draft;
        form.apply(ActivityAction::AddActivity).unwrap();
        submit(&store, &form).await.unwrap();

        let stored = store.load::<Activities>().await.unwrap().unwrap();
        assert_eq!(stored.0.len(), 1);
        assert_eq!(stored.0[0].activity_title, "Lead Organizer");
    }

    #[test]
    fn test_delete_missing_activity() {
        let mut form = ActivitiesForm::default();
        assert!(form.apply(ActivityAction::DeleteActivity { id: 4 }).is_err());
    }
}
