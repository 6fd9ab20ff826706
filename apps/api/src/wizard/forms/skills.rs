//! The three plain string-list pages: technical skills, platforms/tools, core skills.

use serde::{Deserialize, Serialize};

use super::{FormActions, StepForm};
use crate::wizard::records::{is_blank, CoreSkills, Platforms, TechnicalSkills, PLACEHOLDER};
use crate::wizard::steps::Step;
use crate::wizard::validation::{
    check_cap, push_capped, remove_at, WizardError, MAX_CORE_SKILLS, MAX_PLATFORMS,
    MAX_TECHNICAL_SKILLS,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ListAction {
    /// Trimmed before insertion; blank input is ignored.
    Add { value: String },
    Delete { index: usize },
}

fn apply_list_action(
    items: &mut Vec<String>,
    action: ListAction,
    max: usize,
    field: &'static str,
) -> Result<(), WizardError> {
    match action {
        ListAction::Add { value } => {
            // Cap is checked before the input, so a full list reports it even for blank input.
            if items.len() >= max {
                return Err(WizardError::CapacityExceeded { field, max });
            }
            let value = value.trim();
            if !value.is_empty() {
                push_capped(items, value.to_string(), max, field)?;
            }
        }
        ListAction::Delete { index } => {
            remove_at(items, index, field)?;
        }
    }
    Ok(())
}

fn hydrate_items(items: Vec<String>) -> Vec<String> {
    items.into_iter().filter(|s| !is_blank(s)).collect()
}

/// Submission value: the list itself, or a single placeholder entry when empty.
fn stored_items(
    items: &[String],
    max: usize,
    field: &'static str,
) -> Result<Vec<String>, WizardError> {
    check_cap(items, max, field)?;
    if items.is_empty() {
        return Ok(vec![PLACEHOLDER.to_string()]);
    }
    Ok(items.to_vec())
}

// ────────────────────────────────────────────────────────────────────────────
// Technical skills (cap 8)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechnicalSkillsForm {
    pub skills: Vec<String>,
}

impl StepForm for TechnicalSkillsForm {
    type Record = TechnicalSkills;

    const STEP: Step = Step::TechnicalSkills;

    fn from_record(record: Option<TechnicalSkills>) -> Self {
        TechnicalSkillsForm {
            skills: hydrate_items(record.unwrap_or_default().skills),
        }
    }

    fn to_record(&self) -> Result<TechnicalSkills, WizardError> {
        Ok(TechnicalSkills {
            skills: stored_items(&self.skills, MAX_TECHNICAL_SKILLS, "technical skills")?,
        })
    }
}

impl FormActions for TechnicalSkillsForm {
    type Action = ListAction;

    fn apply(&mut self, action: ListAction) -> Result<(), WizardError> {
        apply_list_action(
            &mut self.skills,
            action,
            MAX_TECHNICAL_SKILLS,
            "technical skills",
        )
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Platforms / tools (cap 10)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformsForm {
    pub platforms: Vec<String>,
}

impl StepForm for PlatformsForm {
    type Record = Platforms;

    const STEP: Step = Step::Platform;

    fn from_record(record: Option<Platforms>) -> Self {
        PlatformsForm {
            platforms: hydrate_items(record.unwrap_or_default().platform_use),
        }
    }

    fn to_record(&self) -> Result<Platforms, WizardError> {
        Ok(Platforms {
            platform_use: stored_items(&self.platforms, MAX_PLATFORMS, "platforms")?,
        })
    }
}

impl FormActions for PlatformsForm {
    type Action = ListAction;

    fn apply(&mut self, action: ListAction) -> Result<(), WizardError> {
        apply_list_action(&mut self.platforms, action, MAX_PLATFORMS, "platforms")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core skills (cap 6)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreSkillsForm {
    pub core_skills: Vec<String>,
}

impl StepForm for CoreSkillsForm {
    type Record = CoreSkills;

    const STEP: Step = Step::CoreSkills;

    fn from_record(record: Option<CoreSkills>) -> Self {
        CoreSkillsForm {
            core_skills: hydrate_items(record.unwrap_or_default().core_skills),
        }
    }

    fn to_record(&self) -> Result<CoreSkills, WizardError> {
        Ok(CoreSkills {
            core_skills: stored_items(&self.core_skills, MAX_CORE_SKILLS, "core skills")?,
        })
    }
}

impl FormActions for CoreSkillsForm {
    type Action = ListAction;

    fn apply(&mut self, action: ListAction) -> Result<(), WizardError> {
        apply_list_action(&mut self.core_skills, action, MAX_CORE_SKILLS, "core skills")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::forms::test_support::session_store;
    use crate::wizard::forms::{hydrate, submit};

    fn add(value: &str) -> ListAction {
        ListAction::Add {
            value: value.to_string(),
        }
    }

    #[test]
    fn test_seventh_core_skill_is_rejected() {
        let mut form = CoreSkillsForm::default();
        for i in 0..6 {
            form.apply(add(&format!("skill {i}"))).unwrap();
        }
        let err = form.apply(add("one too many")).unwrap_err();
        assert_eq!(
            err,
            WizardError::CapacityExceeded {
                field: "core skills",
                max: 6
            }
        );
        assert_eq!(form.core_skills.len(), 6);
    }

    #[test]
    fn test_every_list_cap_holds() {
        let mut tech = TechnicalSkillsForm::default();
        for i in 0..MAX_TECHNICAL_SKILLS {
            tech.apply(add(&i.to_string())).unwrap();
        }
        assert!(tech.apply(add("x")).is_err());
        assert_eq!(tech.skills.len(), MAX_TECHNICAL_SKILLS);

        let mut platforms = PlatformsForm::default();
        for i in 0..MAX_PLATFORMS {
            platforms.apply(add(&i.to_string())).unwrap();
        }
        assert!(platforms.apply(add("x")).is_err());
        assert_eq!(platforms.platforms.len(), MAX_PLATFORMS);
    }

    #[test]
    fn test_add_trims_and_ignores_blank_input() {
        let mut form = TechnicalSkillsForm::default();
        form.apply(add("  Rust  ")).unwrap();
        form.apply(add("   ")).unwrap();
        assert_eq!(form.skills, vec!["Rust"]);
    }

    #[test]
    fn test_delete_then_add_after_cap() {
        let mut form = CoreSkillsForm::default();
        for i in 0..6 {
            form.apply(add(&i.to_string())).unwrap();
        }
        form.apply(ListAction::Delete { index: 0 }).unwrap();
        form.apply(add("replacement")).unwrap();
        assert_eq!(form.core_skills.last().map(String::as_str), Some("replacement"));
    }

    #[tokio::test]
    async fn test_empty_submission_stores_placeholder_for_every_list_step() {
        let store = session_store();

        submit(&store, &TechnicalSkillsForm::default()).await.unwrap();
        submit(&store, &PlatformsForm::default()).await.unwrap();
        submit(&store, &CoreSkillsForm::default()).await.unwrap();

        let tech = store.load::<TechnicalSkills>().await.unwrap().unwrap();
        let platforms = store.load::<Platforms>().await.unwrap().unwrap();
        let core = store.load::<CoreSkills>().await.unwrap().unwrap();
        assert_eq!(tech.skills, vec![" "]);
        assert_eq!(platforms.platform_use, vec![" "]);
        assert_eq!(core.core_skills, vec![" "]);
    }

    #[tokio::test]
    async fn test_placeholder_hydrates_as_empty_list() {
        let store = session_store();
        submit(&store, &CoreSkillsForm::default()).await.unwrap();
        let hydrated: CoreSkillsForm = hydrate(&store).await.unwrap();
        assert!(hydrated.core_skills.is_empty());
    }

    #[tokio::test]
    async fn test_navigation_order_through_list_steps() {
        let store = session_store();
        assert_eq!(
            submit(&store, &TechnicalSkillsForm::default()).await.unwrap(),
            Step::Platform
        );
        assert_eq!(
            submit(&store, &PlatformsForm::default()).await.unwrap(),
            Step::CoreSkills
        );
        assert_eq!(
            submit(&store, &CoreSkillsForm::default()).await.unwrap(),
            Step::Projects
        );
    }
}
