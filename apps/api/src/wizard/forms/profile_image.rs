use serde::{Deserialize, Serialize};

use super::{FormActions, StepForm};
use crate::media::data_url::is_image_data_url;
use crate::wizard::records::{is_blank, ProfileImage};
use crate::wizard::steps::Step;
use crate::wizard::validation::{FieldErrors, WizardError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileImageForm {
    /// Normalized `data:` URL of the chosen photo.
    pub image: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProfileImageAction {
    Select { data_url: String },
    Clear,
}

impl StepForm for ProfileImageForm {
    type Record = ProfileImage;

    const STEP: Step = Step::SelectImage;

    fn from_record(record: Option<ProfileImage>) -> Self {
        ProfileImageForm {
            image: record.map(|r| r.0).filter(|s| !is_blank(s)),
        }
    }

    fn to_record(&self) -> Result<ProfileImage, WizardError> {
        match &self.image {
            Some(url) if is_image_data_url(url) => Ok(ProfileImage(url.clone())),
            Some(_) => Err(FieldErrors::single("image", "Selected file is not an image")),
            None => Err(FieldErrors::single(
                "image",
                "Please select an image before proceeding.",
            )),
        }
    }
}

impl FormActions for ProfileImageForm {
    type Action = ProfileImageAction;

    fn apply(&mut self, action: ProfileImageAction) -> Result<(), WizardError> {
        match action {
            ProfileImageAction::Select { data_url } => {
                if !is_image_data_url(&data_url) {
                    return Err(FieldErrors::single("image", "Selected file is not an image"));
                }
                self.image = Some(data_url);
            }
            ProfileImageAction::Clear => self.image = None,
        }
        Ok(())
    }
}
