use serde::Serialize;

/// Everything the two resume pages show, already trimmed and joined. Blank
/// values are `None` or absent from their list, never empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResumeDocument {
    pub personal: PersonalBlock,
    pub contact: ContactBlock,
    pub technical_skills: Vec<String>,
    pub platforms: Vec<String>,
    pub core_skills: Vec<String>,
    pub summary: Option<String>,
    pub education: EducationBlock,
    pub experience: Option<ExperienceBlock>,
    pub projects: Vec<ProjectBlock>,
    pub activity: Option<ActivityBlock>,
    pub screenshots: Vec<ScreenshotBlock>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PersonalBlock {
    pub full_name: String,
    pub lastname: Option<String>,
    pub course: Option<String>,
    pub major: Option<String>,
    /// `data:` URL of the profile photo.
    pub profile_image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContactBlock {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub linkedin: Option<String>,
    pub portfolio: Option<String>,
    pub github: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EducationBlock {
    /// e.g. "Bachelor of Science in Computer Science"
    pub degree_line: Option<String>,
    /// e.g. "State University | June 2019 - May 2023"
    pub school_line: Option<String>,
    /// One "title | company" line per certificate.
    pub certificates: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExperienceBlock {
    pub title_line: Option<String>,
    pub company_line: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectBlock {
    pub title: Option<String>,
    pub meta_line: Option<String>,
    pub platforms_line: Option<String>,
    pub description: Option<String>,
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActivityBlock {
    pub title_line: Option<String>,
    pub meta_line: Option<String>,
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScreenshotBlock {
    pub title: Option<String>,
    pub image: String,
}
