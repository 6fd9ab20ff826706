use serde::{Deserialize, Serialize};

use super::{FormActions, StepForm};
use crate::media::data_url::is_image_data_url;
use crate::wizard::records::{is_blank, Screenshot, Screenshots};
use crate::wizard::steps::Step;
use crate::wizard::validation::{check_cap, next_id, FieldErrors, WizardError, MAX_SCREENSHOTS};

/// Completion page: project screenshots with captions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenshotsForm {
    pub screenshots: Vec<Screenshot>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScreenshotAction {
    Add { title: String, image: String },
    Delete { id: u64 },
}

impl StepForm for ScreenshotsForm {
    type Record = Screenshots;

    const STEP: Step = Step::Complete;

    fn from_record(record: Option<Screenshots>) -> Self {
        ScreenshotsForm {
            screenshots: record
                .unwrap_or_default()
                .0
                .into_iter()
                .filter(|s| !s.is_placeholder())
                .collect(),
        }
    }

    fn to_record(&self) -> Result<Screenshots, WizardError> {
        check_cap(&self.screenshots, MAX_SCREENSHOTS, "screenshots")?;
        if self.screenshots.is_empty() {
            return Ok(Screenshots(vec![Screenshot::placeholder()]));
        }
        Ok(Screenshots(self.screenshots.clone()))
    }
}

impl FormActions for ScreenshotsForm {
    type Action = ScreenshotAction;

    fn apply(&mut self, action: ScreenshotAction) -> Result<(), WizardError> {
        match action {
            ScreenshotAction::Add { title, image } => {
                if self.screenshots.len() >= MAX_SCREENSHOTS {
                    return Err(WizardError::CapacityExceeded {
                        field: "screenshots",
                        max: MAX_SCREENSHOTS,
                    });
                }
                if is_blank(&title) || is_blank(&image) {
                    return Err(FieldErrors::single(
                        "screenshot",
                        "Please add a title and select an image.",
                    ));
                }
                if !is_image_data_url(&image) {
                    return Err(FieldErrors::single("screenshot", "Selected file is not an image"));
                }
                let screenshots_id = next_id(self.screenshots.iter().map(|s| s.screenshots_id));
                self.screenshots.push(Screenshot {
                    screenshots_id,
                    screenshots: image,
                    title: title.trim().to_string(),
                });
            }
            ScreenshotAction::Delete { id } => {
                let before = self.screenshots.len();
                self.screenshots.retain(|s| s.screenshots_id != id);
                if self.screenshots.len() == before {
                    return Err(WizardError::NotFound {
                        field: "screenshot",
                        position: id,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::wizard::forms::test_support::{session_store, tiny_session_store};
    use crate::wizard::forms::{hydrate, submit};

    const SHOT: &str = "data:image/jpeg;base64,/9j/4AAQSkZJRg==";

    fn add(title: &str) -> ScreenshotAction {
        ScreenshotAction::Add {
            title: title.to_string(),
            image: SHOT.to_string(),
        }
    }

    #[test]
    fn test_sixteenth_screenshot_rejected_before_field_checks() {
        let mut form = ScreenshotsForm::default();
        for i in 0..MAX_SCREENSHOTS {
            form.apply(add(&format!("shot {i}"))).unwrap();
        }
        assert!(matches!(
            form.apply(ScreenshotAction::Add {
                title: String::new(),
                image: String::new(),
            }),
            Err(WizardError::CapacityExceeded { max: 15, .. })
        ));
    }

    #[test]
    fn test_title_and_image_required() {
        let mut form = ScreenshotsForm::default();
        let Err(WizardError::Validation(fields)) = form.apply(ScreenshotAction::Add {
            title: "Dashboard".to_string(),
            image: " ".to_string(),
        }) else {
            panic!("expected validation error");
        };
        assert_eq!(
            fields.get("screenshot"),
            Some("Please add a title and select an image.")
        );
    }

    #[test]
    fn test_ids_are_one_past_max() {
        let mut form = ScreenshotsForm::default();
        form.apply(add("a")).unwrap();
        form.apply(add("b")).unwrap();
        form.apply(ScreenshotAction::Delete { id: 1 }).unwrap();
        form.apply(add("c")).unwrap();
        let ids: Vec<u64> = form.screenshots.iter().map(|s| s.screenshots_id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[tokio::test]
    async fn test_empty_submission_stores_placeholder() {
        let store = session_store();
        assert_eq!(
            submit(&store, &ScreenshotsForm::default()).await.unwrap(),
            Step::Template
        );
        let stored = store.load::<Screenshots>().await.unwrap().unwrap();
        assert_eq!(stored.0, vec![Screenshot::placeholder()]);
        let hydrated: ScreenshotsForm = hydrate(&store).await.unwrap();
        assert!(hydrated.screenshots.is_empty());
    }

    #[tokio::test]
    async fn test_quota_overflow_reports_storage_limit() {
        let store = tiny_session_store(64);
        let mut form = ScreenshotsForm::default();
        form.apply(ScreenshotAction::Add {
            title: "Large".to_string(),
            image: format!("{SHOT}{}", "A".repeat(256)),
        })
        .unwrap();

        let err = submit(&store, &form).await.unwrap_err();
        assert!(matches!(err, AppError::StorageLimit));
        assert!(store.load::<Screenshots>().await.unwrap().is_none());
    }
}
