//! Typed records, one per wizard step, in their persisted JSON shape.
//!
//! Field names follow the stored layout exactly, so a store written by the browser
//! wizard can be read back unchanged. Every struct is `#[serde(default)]`: a missing
//! field hydrates as empty instead of failing the whole record.

use serde::{Deserialize, Serialize};

use crate::store::{RecordKey, StoredRecord};

/// Single-space value written in place of an empty field on submission.
pub const PLACEHOLDER: &str = " ";

pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Returns `value` unchanged, or the placeholder when it is blank.
pub fn or_placeholder(value: &str) -> String {
    if is_blank(value) {
        PLACEHOLDER.to_string()
    } else {
        value.to_string()
    }
}

/// Inverse of `or_placeholder` for hydration: blank values come back empty.
pub fn from_placeholder(value: &str) -> String {
    if is_blank(value) {
        String::new()
    } else {
        value.to_string()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Singular records
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalDetails {
    pub firstname: String,
    pub middlename: String,
    pub lastname: String,
    pub suffix: String,
    pub email: String,
    pub phone_number: String,
}

impl StoredRecord for PersonalDetails {
    const KEY: RecordKey = RecordKey::PersonalDetails;
}

/// Profile photo as a `data:` URL, stored as the bare string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileImage(pub String);

impl StoredRecord for ProfileImage {
    const KEY: RecordKey = RecordKey::ProfileImage;

    fn encode(&self) -> Result<String, serde_json::Error> {
        Ok(self.0.clone())
    }

    fn decode(raw: &str) -> Result<Self, serde_json::Error> {
        Ok(ProfileImage(raw.to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SocialAccounts {
    pub portfolio_link: String,
    pub linkedin_link: String,
    pub github_link: String,
}

impl StoredRecord for SocialAccounts {
    const KEY: RecordKey = RecordKey::SocialAccounts;
}

/// Free-text profile summary, stored as the bare string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonalSummary(pub String);

impl StoredRecord for PersonalSummary {
    const KEY: RecordKey = RecordKey::PersonalSummary;

    fn encode(&self) -> Result<String, serde_json::Error> {
        Ok(self.0.clone())
    }

    fn decode(raw: &str) -> Result<Self, serde_json::Error> {
        Ok(PersonalSummary(raw.to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationDetails {
    pub bachelor: String,
    pub course: String,
    pub major: String,
    pub school: String,
    pub started: String,
    pub ended: String,
}

impl StoredRecord for EducationDetails {
    const KEY: RecordKey = RecordKey::EducationDetails;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkDetail {
    pub work_details_id: u64,
    pub work_details: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub work: String,
    pub position: String,
    pub company: String,
    pub company_address: String,
    pub started: String,
    pub ended: String,
    pub description: String,
    pub work_details: Vec<WorkDetail>,
}

impl Experience {
    pub fn placeholder() -> Self {
        Experience {
            work: PLACEHOLDER.to_string(),
            position: PLACEHOLDER.to_string(),
            company: PLACEHOLDER.to_string(),
            company_address: PLACEHOLDER.to_string(),
            started: PLACEHOLDER.to_string(),
            ended: PLACEHOLDER.to_string(),
            description: PLACEHOLDER.to_string(),
            work_details: Vec::new(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
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
        .all(|f| is_blank(f))
            && self.work_details.iter().all(|d| is_blank(&d.work_details))
    }
}

impl StoredRecord for Experience {
    const KEY: RecordKey = RecordKey::Experience;
}

// ────────────────────────────────────────────────────────────────────────────
// Wrapped string lists
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechnicalSkills {
    pub skills: Vec<String>,
}

impl StoredRecord for TechnicalSkills {
    const KEY: RecordKey = RecordKey::TechnicalSkills;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Platforms {
    #[serde(rename = "platformUse")]
    pub platform_use: Vec<String>,
}

impl StoredRecord for Platforms {
    const KEY: RecordKey = RecordKey::Platforms;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreSkills {
    #[serde(rename = "coreSkills")]
    pub core_skills: Vec<String>,
}

impl StoredRecord for CoreSkills {
    const KEY: RecordKey = RecordKey::CoreSkills;
}

// ────────────────────────────────────────────────────────────────────────────
// Entry lists
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Certificate {
    pub id: u64,
    pub certificate_title: String,
    pub company_name: String,
}

impl Certificate {
    pub fn placeholder() -> Self {
        Certificate {
            id: 0,
            certificate_title: PLACEHOLDER.to_string(),
            company_name: PLACEHOLDER.to_string(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        is_blank(&self.certificate_title) && is_blank(&self.company_name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Certificates(pub Vec<Certificate>);

impl StoredRecord for Certificates {
    const KEY: RecordKey = RecordKey::Certificates;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformUse {
    #[serde(rename = "project_platform_useId")]
    pub project_platform_use_id: u64,
    pub platform_use: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectDetail {
    pub project_details_id: u64,
    pub project_details: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub project_id: u64,
    pub project_title: String,
    pub project_type: String,
    pub project_started: String,
    pub project_ended: String,
    pub project_description: String,
    pub platform_use: Vec<PlatformUse>,
    pub project_details: Vec<ProjectDetail>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Projects(pub Vec<Project>);

impl StoredRecord for Projects {
    const KEY: RecordKey = RecordKey::Projects;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizationDetail {
    pub organization_detail_id: u64,
    pub organization_detail: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Activity {
    pub activity_id: u64,
    pub activity_title: String,
    pub activity_type: String,
    pub activity_community: String,
    pub activity_started: String,
    pub activity_ended: String,
    pub organization_detail: Vec<OrganizationDetail>,
}

impl Activity {
    pub fn placeholder() -> Self {
        Activity {
            activity_id: 0,
            activity_title: PLACEHOLDER.to_string(),
            activity_type: PLACEHOLDER.to_string(),
            activity_community: PLACEHOLDER.to_string(),
            activity_started: PLACEHOLDER.to_string(),
            activity_ended: PLACEHOLDER.to_string(),
            organization_detail: vec![OrganizationDetail {
                organization_detail_id: 1,
                organization_detail: PLACEHOLDER.to_string(),
            }],
        }
    }

    pub fn is_placeholder(&self) -> bool {
        [
            &self.activity_title,
            &self.activity_type,
            &self.activity_community,
            &self.activity_started,
            &self.activity_ended,
        ]
        .iter()
        .all(|f| is_blank(f))
            && self
                .organization_detail
                .iter()
                .all(|d| is_blank(&d.organization_detail))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Activities(pub Vec<Activity>);

impl StoredRecord for Activities {
    const KEY: RecordKey = RecordKey::Activities;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Screenshot {
    pub screenshots_id: u64,
    /// Image as a `data:` URL.
    pub screenshots: String,
    pub title: String,
}

impl Screenshot {
    pub fn placeholder() -> Self {
        Screenshot {
            screenshots_id: 0,
            screenshots: PLACEHOLDER.to_string(),
            title: PLACEHOLDER.to_string(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        is_blank(&self.screenshots) && is_blank(&self.title)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Screenshots(pub Vec<Screenshot>);

impl StoredRecord for Screenshots {
    const KEY: RecordKey = RecordKey::Screenshots;
}
