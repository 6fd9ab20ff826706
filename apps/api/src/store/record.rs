use serde::{de::DeserializeOwned, Serialize};

/// Fixed storage key of every wizard record.
///
/// The string forms match the keys the browser wizard wrote to local storage, so
/// stores populated by either side stay interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKey {
    PersonalDetails,
    ProfileImage,
    SocialAccounts,
    TechnicalSkills,
    Platforms,
    CoreSkills,
    PersonalSummary,
    EducationDetails,
    Certificates,
    Experience,
    Projects,
    Activities,
    Screenshots,
}

impl RecordKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKey::PersonalDetails => "personalDetails",
            RecordKey::ProfileImage => "profileImage",
            RecordKey::SocialAccounts => "socialAccounts",
            RecordKey::TechnicalSkills => "technicalSkills",
            RecordKey::Platforms => "platforms",
            RecordKey::CoreSkills => "coreSkilled",
            RecordKey::PersonalSummary => "personalSummary",
            RecordKey::EducationDetails => "educationDetails",
            RecordKey::Certificates => "certificates",
            RecordKey::Experience => "experience",
            RecordKey::Projects => "projects",
            RecordKey::Activities => "activities",
            RecordKey::Screenshots => "screenshots",
        }
    }
}

impl std::fmt::Display for RecordKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed record persisted under one fixed key.
///
/// Records are JSON by default. Raw-string records (profile image, summary) override
/// `encode`/`decode` so the stored value is the bare string.
pub trait StoredRecord: Sized + Serialize + DeserializeOwned {
    const KEY: RecordKey;

    fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    fn decode(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
