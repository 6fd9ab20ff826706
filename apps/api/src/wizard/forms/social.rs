use serde::{Deserialize, Serialize};

use super::StepForm;
use crate::wizard::records::{from_placeholder, is_blank, or_placeholder, SocialAccounts};
use crate::wizard::steps::Step;
use crate::wizard::validation::{FieldErrors, WizardError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialAccountsForm {
    pub portfolio: String,
    pub linkedin: String,
    pub github: String,
}

impl StepForm for SocialAccountsForm {
    type Record = SocialAccounts;

    const STEP: Step = Step::SocialAccounts;

    fn from_record(record: Option<SocialAccounts>) -> Self {
        let r = record.unwrap_or_default();
        SocialAccountsForm {
            portfolio: from_placeholder(&r.portfolio_link),
            linkedin: from_placeholder(&r.linkedin_link),
            github: from_placeholder(&r.github_link),
        }
    }

    fn to_record(&self) -> Result<SocialAccounts, WizardError> {
        if [&self.portfolio, &self.linkedin, &self.github]
            .iter()
            .all(|link| is_blank(link))
        {
            return Err(FieldErrors::single(
                "links",
                "Please provide at least one link before proceeding.",
            ));
        }
        Ok(SocialAccounts {
            portfolio_link: or_placeholder(&self.portfolio),
            linkedin_link: or_placeholder(&self.linkedin),
            github_link: or_placeholder(&self.github),
        })
    }
}
