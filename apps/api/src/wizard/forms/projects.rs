use serde::{Deserialize, Serialize};

use super::{FormActions, StepForm};
use crate::wizard::records::{PlatformUse, Project, ProjectDetail, Projects};
use crate::wizard::steps::Step;
use crate::wizard::validation::{
    apply_word_capped, check_cap, next_id, push_capped, remove_at, word_count, FieldErrors,
    WizardError, DESCRIPTION_WORD_CAP, MAX_PROJECTS, MAX_PROJECT_DETAILS, MAX_PROJECT_PLATFORMS,
};

/// The project being composed before it is added to the list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectDraft {
    pub title: String,
    pub project_type: String,
    pub started: String,
    pub ended: String,
    pub description: String,
    pub platforms: Vec<String>,
    pub details: Vec<String>,
}

impl ProjectDraft {
    fn into_project(self, project_id: u64) -> Project {
        Project {
            project_id,
            project_title: self.title,
            project_type: self.project_type,
            project_started: self.started,
            project_ended: self.ended,
            project_description: self.description,
            platform_use: self
                .platforms
                .into_iter()
                .zip(1..)
                .map(|(platform_use, id)| PlatformUse {
                    project_platform_use_id: id,
                    platform_use,
                })
                .collect(),
            project_details: self
                .details
                .into_iter()
                .zip(1..)
                .map(|(project_details, id)| ProjectDetail {
                    project_details_id: id,
                    project_details,
                })
                .collect(),
        }
    }

    fn from_project(project: Project) -> Self {
        ProjectDraft {
            title: project.project_title,
            project_type: project.project_type,
            started: project.project_started,
            ended: project.project_ended,
            description: project.project_description,
            platforms: project
                .platform_use
                .into_iter()
                .map(|p| p.platform_use)
                .collect(),
            details: project
                .project_details
                .into_iter()
                .map(|d| d.project_details)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectsForm {
    pub projects: Vec<Project>,
    pub draft: ProjectDraft,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProjectAction {
    AddPlatform { value: String },
    DeletePlatform { index: usize },
    AddDetail { value: String },
    DeleteDetail { index: usize },
    SetDescription { value: String },
    AddProject,
    DeleteProject { id: u64 },
    /// Moves a saved project back into the draft for editing.
    EditProject { id: u64 },
}

impl StepForm for ProjectsForm {
    type Record = Projects;

    const STEP: Step = Step::Projects;

    fn from_record(record: Option<Projects>) -> Self {
        ProjectsForm {
            projects: record.unwrap_or_default().0,
            draft: ProjectDraft::default(),
        }
    }

    fn to_record(&self) -> Result<Projects, WizardError> {
        if self.projects.is_empty() {
            return Err(FieldErrors::single(
                "projects",
                "You need to add at least one project.",
            ));
        }
        check_cap(&self.projects, MAX_PROJECTS, "projects")?;
        Ok(Projects(self.projects.clone()))
    }
}

impl FormActions for ProjectsForm {
    type Action = ProjectAction;

    fn apply(&mut self, action: ProjectAction) -> Result<(), WizardError> {
        let draft = &mut self.draft;
        match action {
            ProjectAction::AddPlatform { value } => {
                add_trimmed(&mut draft.platforms, &value, MAX_PROJECT_PLATFORMS, "project platforms")?
            }
            ProjectAction::DeletePlatform { index } => {
                remove_at(&mut draft.platforms, index, "project platform")?;
            }
            ProjectAction::AddDetail { value } => {
                add_trimmed(&mut draft.details, &value, MAX_PROJECT_DETAILS, "project details")?
            }
            ProjectAction::DeleteDetail { index } => {
                remove_at(&mut draft.details, index, "project detail")?;
            }
            ProjectAction::SetDescription { value } => {
                apply_word_capped(&mut draft.description, &value, DESCRIPTION_WORD_CAP);
            }
            ProjectAction::AddProject => self.add_project()?,
            ProjectAction::DeleteProject { id } => {
                let index = self.position(id)?;
                self.projects.remove(index);
            }
            ProjectAction::EditProject { id } => {
                let index = self.position(id)?;
                let project = self.projects.remove(index);
                self.draft = ProjectDraft::from_project(project);
            }
        }
        Ok(())
    }
}

impl ProjectsForm {
    fn add_project(&mut self) -> Result<(), WizardError> {
        if self.projects.len() >= MAX_PROJECTS {
            return Err(WizardError::CapacityExceeded {
                field: "projects",
                max: MAX_PROJECTS,
            });
        }
        if word_count(&self.draft.description) > DESCRIPTION_WORD_CAP {
            return Err(FieldErrors::single(
                "description",
                "Project description cannot exceed 25 words.",
            ));
        }

        let id = next_id(self.projects.iter().map(|p| p.project_id));
        let draft = std::mem::take(&mut self.draft);
        self.projects.push(draft.into_project(id));
        Ok(())
    }

    fn position(&self, id: u64) -> Result<usize, WizardError> {
        self.projects
            .iter()
            .position(|p| p.project_id == id)
            .ok_or(WizardError::NotFound {
                field: "project",
                position: id,
            })
    }
}

fn add_trimmed(
    list: &mut Vec<String>,
    value: &str,
    max: usize,
    field: &'static str,
) -> Result<(), WizardError> {
    if list.len() >= max {
        return Err(WizardError::CapacityExceeded { field, max });
    }
    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }
    push_capped(list, value.to_string(), max, field)
}
