//! Builds the `ResumeDocument` from every stored wizard record.

use tracing::{debug, error};

use super::dates::date_range;
use super::model::{
    ActivityBlock, ContactBlock, EducationBlock, ExperienceBlock, PersonalBlock, ProjectBlock,
    ResumeDocument, ScreenshotBlock,
};
use crate::store::{SessionStore, StoredRecord};
use crate::wizard::records::{
    is_blank, Activities, Certificates, CoreSkills, EducationDetails, Experience,
    PersonalDetails, PersonalSummary, Platforms, ProfileImage, Project, Projects, Screenshots,
    SocialAccounts, TechnicalSkills,
};
use crate::wizard::validation::{MAX_PROJECTS, MAX_SCREENSHOTS};

/// Raw records of one session, each absent when never written or unreadable.
#[derive(Debug, Clone, Default)]
pub struct ResumeSource {
    pub personal: Option<PersonalDetails>,
    pub profile_image: Option<ProfileImage>,
    pub social: Option<SocialAccounts>,
    pub technical_skills: Option<TechnicalSkills>,
    pub platforms: Option<Platforms>,
    pub core_skills: Option<CoreSkills>,
    pub summary: Option<PersonalSummary>,
    pub education: Option<EducationDetails>,
    pub certificates: Option<Certificates>,
    pub experience: Option<Experience>,
    pub projects: Option<Projects>,
    pub activities: Option<Activities>,
    pub screenshots: Option<Screenshots>,
}

/// Reads every record of the session. A record that fails to load is logged and
/// left out; the rest of the document still assembles.
pub async fn load_source(store: &SessionStore) -> ResumeSource {
    ResumeSource {
        personal: load_logged(store).await,
        profile_image: load_logged(store).await,
        social: load_logged(store).await,
        technical_skills: load_logged(store).await,
        platforms: load_logged(store).await,
        core_skills: load_logged(store).await,
        summary: load_logged(store).await,
        education: load_logged(store).await,
        certificates: load_logged(store).await,
        experience: load_logged(store).await,
        projects: load_logged(store).await,
        activities: load_logged(store).await,
        screenshots: load_logged(store).await,
    }
}

async fn load_logged<R: StoredRecord>(store: &SessionStore) -> Option<R> {
    match store.load::<R>().await {
        Ok(record) => record,
        Err(e) => {
            error!(
                session = %store.session_id(),
                key = %R::KEY,
                "failed to load record: {e}"
            );
            None
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Text helpers
// ────────────────────────────────────────────────────────────────────────────

fn text(s: &str) -> Option<String> {
    let t = s.trim();
    (!t.is_empty()).then(|| t.to_string())
}

/// Joins the non-blank pieces with `sep`; `None` when nothing is left.
fn join_present<S: AsRef<str>>(parts: &[S], sep: &str) -> Option<String> {
    let kept: Vec<&str> = parts
        .iter()
        .map(|p| p.as_ref().trim())
        .filter(|p| !p.is_empty())
        .collect();
    (!kept.is_empty()).then(|| kept.join(sep))
}

fn present_list<'a>(items: impl IntoIterator<Item = &'a String>) -> Vec<String> {
    items.into_iter().filter_map(|s| text(s)).collect()
}

pub fn full_name(p: &PersonalDetails) -> String {
    let middle = p
        .middlename
        .trim()
        .chars()
        .next()
        .map(|c| format!("{c}."))
        .unwrap_or_default();
    let parts = [
        p.firstname.as_str(),
        middle.as_str(),
        p.lastname.as_str(),
        p.suffix.as_str(),
    ];
    join_present(&parts, " ").unwrap_or_default()
}

fn degree_line(e: &EducationDetails) -> Option<String> {
    match (text(&e.bachelor), text(&e.course)) {
        (Some(bachelor), Some(course)) => Some(format!("{bachelor} in {course}")),
        (bachelor, course) => bachelor.or(course),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Assembly
// ────────────────────────────────────────────────────────────────────────────

pub fn assemble(src: &ResumeSource) -> ResumeDocument {
    let personal = src.personal.clone().unwrap_or_default();
    let education = src.education.clone().unwrap_or_default();
    let social = src.social.clone().unwrap_or_default();

    let doc = ResumeDocument {
        personal: PersonalBlock {
            full_name: full_name(&personal),
            lastname: text(&personal.lastname),
            course: text(&education.course),
            major: text(&education.major),
            profile_image: src.profile_image.as_ref().and_then(|i| text(&i.0)),
        },
        contact: ContactBlock {
            phone: text(&personal.phone_number),
            email: text(&personal.email),
            linkedin: text(&social.linkedin_link),
            portfolio: text(&social.portfolio_link),
            github: text(&social.github_link),
        },
        technical_skills: src
            .technical_skills
            .as_ref()
            .map(|s| present_list(&s.skills))
            .unwrap_or_default(),
        platforms: src
            .platforms
            .as_ref()
            .map(|p| present_list(&p.platform_use))
            .unwrap_or_default(),
        core_skills: src
            .core_skills
            .as_ref()
            .map(|c| present_list(&c.core_skills))
            .unwrap_or_default(),
        summary: src.summary.as_ref().and_then(|s| text(&s.0)),
        education: EducationBlock {
            degree_line: degree_line(&education),
            school_line: join_present(
                &[
                    education.school.clone(),
                    date_range(&education.started, &education.ended),
                ],
                " | ",
            ),
            certificates: src
                .certificates
                .as_ref()
                .map(|c| {
                    c.0.iter()
                        .filter(|cert| !cert.is_placeholder())
                        .filter_map(|cert| {
                            join_present(
                                &[cert.certificate_title.as_str(), cert.company_name.as_str()],
                                " | ",
                            )
                        })
                        .collect()
                })
                .unwrap_or_default(),
        },
        experience: src
            .experience
            .as_ref()
            .filter(|e| !e.is_placeholder())
            .map(experience_block),
        projects: src
            .projects
            .as_ref()
            .map(|p| p.0.iter().take(MAX_PROJECTS).map(project_block).collect())
            .unwrap_or_default(),
        activity: src
            .activities
            .as_ref()
            .and_then(|a| a.0.iter().find(|a| !a.is_placeholder()))
            .map(|a| ActivityBlock {
                title_line: join_present(
                    &[a.activity_type.as_str(), a.activity_title.as_str()],
                    " - ",
                ),
                meta_line: join_present(
                    &[
                        a.activity_community.clone(),
                        date_range(&a.activity_started, &a.activity_ended),
                    ],
                    " | ",
                ),
                details: present_list(
                    a.organization_detail.iter().map(|d| &d.organization_detail),
                ),
            }),
        screenshots: src
            .screenshots
            .as_ref()
            .map(|s| {
                s.0.iter()
                    .filter(|shot| !is_blank(&shot.screenshots))
                    .take(MAX_SCREENSHOTS)
                    .map(|shot| ScreenshotBlock {
                        title: text(&shot.title),
                        image: shot.screenshots.trim().to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default(),
    };

    debug!(
        projects = doc.projects.len(),
        screenshots = doc.screenshots.len(),
        has_experience = doc.experience.is_some(),
        has_activity = doc.activity.is_some(),
        "resume document assembled"
    );
    doc
}

fn experience_block(e: &Experience) -> ExperienceBlock {
    ExperienceBlock {
        title_line: join_present(&[e.work.as_str(), e.position.as_str()], " - "),
        company_line: join_present(
            &[e.company.clone(), date_range(&e.started, &e.ended)],
            " | ",
        ),
        address: text(&e.company_address),
        description: text(&e.description),
        details: present_list(e.work_details.iter().map(|d| &d.work_details)),
    }
}

fn project_block(p: &Project) -> ProjectBlock {
    ProjectBlock {
        title: text(&p.project_title),
        meta_line: join_present(
            &[
                p.project_type.clone(),
                date_range(&p.project_started, &p.project_ended),
            ],
            " | ",
        ),
        platforms_line: join_present(
            &p.platform_use
                .iter()
                .map(|u| u.platform_use.as_str())
                .collect::<Vec<_>>(),
            " | ",
        ),
        description: text(&p.project_description),
        details: present_list(p.project_details.iter().map(|d| &d.project_details)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::forms::test_support::session_store;
    use crate::wizard::records::{
        Activity, Certificate, OrganizationDetail, PlatformUse, Screenshot, WorkDetail,
    };

    fn ana() -> PersonalDetails {
        PersonalDetails {
            firstname: "Ana".to_string(),
            middlename: "B".to_string(),
            lastname: "Cruz".to_string(),
            suffix: " ".to_string(),
            email: "ana@x.com".to_string(),
            phone_number: "09171234567".to_string(),
        }
    }

    #[test]
    fn test_full_name_skips_placeholder_suffix() {
        assert_eq!(full_name(&ana()), "Ana B. Cruz");
        let jr = PersonalDetails {
            middlename: " ".to_string(),
            suffix: "Jr.".to_string(),
            ..ana()
        };
        assert_eq!(full_name(&jr), "Ana Cruz Jr.");
    }

    #[test]
    fn test_empty_source_assembles_empty_document() {
        let doc = assemble(&ResumeSource::default());
        assert_eq!(doc, ResumeDocument::default());
    }

    #[test]
    fn test_blank_fields_drop_their_separators() {
        let src = ResumeSource {
            education: Some(EducationDetails {
                bachelor: " ".to_string(),
                course: "Computer Science".to_string(),
                school: "State University".to_string(),
                started: "not-a-date".to_string(),
                ended: " ".to_string(),
                ..Default::default()
            }),
            experience: Some(Experience {
                work: "Internship".to_string(),
                company: " ".to_string(),
                started: "2023-06".to_string(),
                ..Experience::placeholder()
            }),
            ..Default::default()
        };
        let doc = assemble(&src);
        assert_eq!(doc.education.degree_line.as_deref(), Some("Computer Science"));
        assert_eq!(doc.education.school_line.as_deref(), Some("State University"));

        let exp = doc.experience.unwrap();
        assert_eq!(exp.title_line.as_deref(), Some("Internship"));
        assert_eq!(exp.company_line.as_deref(), Some("June 2023"));
        assert_eq!(exp.address, None);
    }

    #[test]
    fn test_placeholder_records_render_nothing() {
        let src = ResumeSource {
            certificates: Some(Certificates(vec![Certificate::placeholder()])),
            experience: Some(Experience::placeholder()),
            activities: Some(Activities(vec![Activity::placeholder()])),
            screenshots: Some(Screenshots(vec![Screenshot::placeholder()])),
            technical_skills: Some(TechnicalSkills {
                skills: vec![" ".to_string()],
            }),
            ..Default::default()
        };
        let doc = assemble(&src);
        assert!(doc.education.certificates.is_empty());
        assert!(doc.experience.is_none());
        assert!(doc.activity.is_none());
        assert!(doc.screenshots.is_empty());
        assert!(doc.technical_skills.is_empty());
    }

    #[test]
    fn test_project_and_activity_lines() {
        let src = ResumeSource {
            projects: Some(Projects(vec![Project {
                project_id: 1,
                project_title: " Resume Builder ".to_string(),
                project_type: "Web App".to_string(),
                project_started: "2024-01".to_string(),
                project_ended: "2024-04".to_string(),
                project_description: "A wizard.".to_string(),
                platform_use: vec![
                    PlatformUse {
                        project_platform_use_id: 1,
                        platform_use: "Rust".to_string(),
                    },
                    PlatformUse {
                        project_platform_use_id: 2,
                        platform_use: " ".to_string(),
                    },
                    PlatformUse {
                        project_platform_use_id: 3,
                        platform_use: "Axum".to_string(),
                    },
                ],
                project_details: Vec::new(),
            }])),
            activities: Some(Activities(vec![
                Activity::placeholder(),
                Activity {
                    activity_id: 1,
                    activity_title: "Lead".to_string(),
                    activity_type: "Hackathon".to_string(),
                    activity_community: "GDSC".to_string(),
                    activity_started: "2023-02".to_string(),
                    activity_ended: "2023-03".to_string(),
                    organization_detail: vec![OrganizationDetail {
                        organization_detail_id: 1,
                        organization_detail: "Ran judging".to_string(),
                    }],
                },
            ])),
            ..Default::default()
        };
        let doc = assemble(&src);
        let project = &doc.projects[0];
        assert_eq!(project.title.as_deref(), Some("Resume Builder"));
        assert_eq!(
            project.meta_line.as_deref(),
            Some("Web App | January 2024 - April 2024")
        );
        assert_eq!(project.platforms_line.as_deref(), Some("Rust | Axum"));

        let activity = doc.activity.unwrap();
        assert_eq!(activity.title_line.as_deref(), Some("Hackathon - Lead"));
        assert_eq!(
            activity.meta_line.as_deref(),
            Some("GDSC | February 2023 - March 2023")
        );
        assert_eq!(activity.details, vec!["Ran judging"]);
    }

    #[tokio::test]
    async fn test_load_source_reads_saved_records() {
        let store = session_store();
        store.save(&ana()).await.unwrap();
        store
            .save(&Experience {
                work_details: vec![WorkDetail {
                    work_details_id: 1,
                    work_details: "Shipped v2".to_string(),
                }],
                work: "Internship".to_string(),
                ..Experience::placeholder()
            })
            .await
            .unwrap();

        let doc = assemble(&load_source(&store).await);
        assert_eq!(doc.personal.full_name, "Ana B. Cruz");
        assert_eq!(doc.contact.email.as_deref(), Some("ana@x.com"));
        assert_eq!(doc.experience.unwrap().details, vec!["Shipped v2"]);
    }
}
