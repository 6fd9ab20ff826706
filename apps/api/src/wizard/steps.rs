use serde::{Deserialize, Serialize};

/// Pages of the wizard in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Home,
    Personal,
    SelectImage,
    SocialAccounts,
    TechnicalSkills,
    Platform,
    CoreSkills,
    Projects,
    Activities,
    Summary,
    Education,
    Certificates,
    Experience,
    Complete,
    Template,
}

impl Step {
    pub const SEQUENCE: [Step; 15] = [
        Step::Home,
        Step::Personal,
        Step::SelectImage,
        Step::SocialAccounts,
        Step::TechnicalSkills,
        Step::Platform,
        Step::CoreSkills,
        Step::Projects,
        Step::Activities,
        Step::Summary,
        Step::Education,
        Step::Certificates,
        Step::Experience,
        Step::Complete,
        Step::Template,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Step::Home => "",
            Step::Personal => "personal",
            Step::SelectImage => "select_image",
            Step::SocialAccounts => "social_accounts",
            Step::TechnicalSkills => "technical_skills",
            Step::Platform => "platform",
            Step::CoreSkills => "core_skills",
            Step::Projects => "projects",
            Step::Activities => "activities",
            Step::Summary => "summary",
            Step::Education => "education",
            Step::Certificates => "certificates",
            Step::Experience => "experience",
            Step::Complete => "complete",
            Step::Template => "template",
        }
    }

    /// Client-side route of the page, e.g. `/select_image`.
    pub fn route(&self) -> String {
        format!("/{}", self.slug())
    }

    /// The page reached by this page's "Next" action. The template page exports
    /// and returns home.
    pub fn next(&self) -> Step {
        let idx = Self::SEQUENCE
            .iter()
            .position(|s| s == self)
            .unwrap_or_default();
        Self::SEQUENCE
            .get(idx + 1)
            .copied()
            .unwrap_or(Step::Home)
    }
}
