//! Field checks and list caps shared by every step form.
//!
//! Three kinds of rejection come out of here:
//! - `Validation`: required or malformed fields, keyed by field name
//! - `CapacityExceeded`: adding past a list's fixed cap
//! - `AlreadyExists`: creating a second singular entry
//!
//! A rejected operation never modifies the form it was applied to.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::wizard::records::is_blank;

pub const DESCRIPTION_WORD_CAP: usize = 25;
pub const SUMMARY_WORD_CAP: usize = 100;

pub const MAX_TECHNICAL_SKILLS: usize = 8;
pub const MAX_PLATFORMS: usize = 10;
pub const MAX_CORE_SKILLS: usize = 6;
pub const MAX_CERTIFICATES: usize = 5;
pub const MAX_EXPERIENCE_DETAILS: usize = 3;
pub const MAX_PROJECTS: usize = 2;
pub const MAX_PROJECT_PLATFORMS: usize = 10;
pub const MAX_PROJECT_DETAILS: usize = 5;
pub const MAX_ACTIVITY_DETAILS: usize = 3;
pub const MAX_SCREENSHOTS: usize = 15;

/// Field name → user-facing message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldErrors(pub BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: &str) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }

    /// Records `message` against `field` when `value` is blank.
    pub fn require(&mut self, field: &str, value: &str, message: &str) {
        if is_blank(value) {
            self.add(field, message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// `Ok(())` when no errors were recorded.
    pub fn into_result(self) -> Result<(), WizardError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(WizardError::Validation(self))
        }
    }

    pub fn single(field: &str, message: &str) -> WizardError {
        let mut errors = FieldErrors::new();
        errors.add(field, message);
        WizardError::Validation(errors)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WizardError {
    #[error("Validation failed: {}", summarize(.0))]
    Validation(FieldErrors),

    #[error("Maximum of {max} {field} reached")]
    CapacityExceeded { field: &'static str, max: usize },

    #[error("An {0} entry already exists; delete it before adding another")]
    AlreadyExists(&'static str),

    #[error("No {field} at position {position}")]
    NotFound { field: &'static str, position: u64 },
}

fn summarize(errors: &FieldErrors) -> String {
    errors
        .0
        .iter()
        .map(|(field, msg)| format!("{field}: {msg}"))
        .collect::<Vec<_>>()
        .join("; ")
}

// ────────────────────────────────────────────────────────────────────────────
// Format checks
// ────────────────────────────────────────────────────────────────────────────

fn email_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("valid email regex"))
}

fn phone_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{11}$").expect("valid phone regex"))
}

pub fn is_valid_email(email: &str) -> bool {
    !is_blank(email) && email_pattern().is_match(email)
}

/// Exactly eleven ASCII digits, nothing else.
pub fn is_valid_phone(phone: &str) -> bool {
    phone_pattern().is_match(phone)
}

/// Keeps only the digits of a phone number as typed.
pub fn digits_only(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Word caps
// ────────────────────────────────────────────────────────────────────────────

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Input filter for word-capped fields: replaces `field` with `input` only when
/// `input` stays within `cap` words. Returns whether the edit was applied.
pub fn apply_word_capped(field: &mut String, input: &str, cap: usize) -> bool {
    if word_count(input) > cap {
        return false;
    }
    *field = input.to_string();
    true
}

/// Submission-time guard for a word-capped field the client may have bypassed.
pub fn check_word_cap(errors: &mut FieldErrors, field: &str, text: &str, cap: usize) {
    if word_count(text) > cap {
        errors.add(field, &format!("Cannot exceed {cap} words"));
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Bounded lists
// ────────────────────────────────────────────────────────────────────────────

/// Appends `item` unless the list already holds `max` entries.
pub fn push_capped<T>(
    list: &mut Vec<T>,
    item: T,
    max: usize,
    field: &'static str,
) -> Result<(), WizardError> {
    if list.len() >= max {
        return Err(WizardError::CapacityExceeded { field, max });
    }
    list.push(item);
    Ok(())
}

/// Rejects a list that is over its cap at submission time.
pub fn check_cap<T>(list: &[T], max: usize, field: &'static str) -> Result<(), WizardError> {
    if list.len() > max {
        return Err(WizardError::CapacityExceeded { field, max });
    }
    Ok(())
}

pub fn remove_at<T>(
    list: &mut Vec<T>,
    index: usize,
    field: &'static str,
) -> Result<T, WizardError> {
    if index >= list.len() {
        return Err(WizardError::NotFound {
            field,
            position: index as u64,
        });
    }
    Ok(list.remove(index))
}

/// Next id for an entry list: one past the current maximum, starting at 1.
pub fn next_id(ids: impl Iterator<Item = u64>) -> u64 {
    ids.max().map_or(1, |max| max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_accepts_simple_address() {
        assert!(is_valid_email("ana@x.com"));
    }

    #[test]
    fn test_email_rejects_missing_domain_dot() {
        assert!(!is_valid_email("ana@localhost"));
        assert!(!is_valid_email("   "));
    }

    #[test]
    fn test_phone_requires_exactly_eleven_digits() {
        assert!(is_valid_phone("09171234567"));
        assert!(!is_valid_phone("123"));
        assert!(!is_valid_phone("091712345678"));
        assert!(!is_valid_phone("0917-123-4567"));
    }

    #[test]
    fn test_digits_only_strips_formatting() {
        assert_eq!(digits_only("0917-123 4567"), "09171234567");
    }

    #[test]
    fn test_word_count_ignores_surrounding_whitespace() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("  built   a  thing "), 3);
    }

    #[test]
    fn test_word_cap_accepts_exactly_at_cap() {
        let mut field = String::new();
        let at_cap = vec!["word"; 25].join(" ");
        assert!(apply_word_capped(&mut field, &at_cap, DESCRIPTION_WORD_CAP));
        assert_eq!(field, at_cap);
    }

    #[test]
    fn test_word_cap_rejects_edit_past_cap_and_keeps_value() {
        let mut field = vec!["word"; 25].join(" ");
        let before = field.clone();
        let over = format!("{before} extra");
        assert!(!apply_word_capped(&mut field, &over, DESCRIPTION_WORD_CAP));
        assert_eq!(field, before);
    }

    #[test]
    fn test_summary_cap_is_one_hundred_words() {
        let mut field = String::new();
        assert!(apply_word_capped(
            &mut field,
            &vec!["w"; 100].join(" "),
            SUMMARY_WORD_CAP
        ));
        assert!(!apply_word_capped(
            &mut field,
            &vec!["w"; 101].join(" "),
            SUMMARY_WORD_CAP
        ));
        assert_eq!(word_count(&field), 100);
    }

    #[test]
    fn test_push_capped_rejects_at_cap() {
        let mut list: Vec<u8> = (0..6).collect();
        let err = push_capped(&mut list, 7, MAX_CORE_SKILLS, "core skills").unwrap_err();
        assert_eq!(
            err,
            WizardError::CapacityExceeded {
                field: "core skills",
                max: 6
            }
        );
        assert_eq!(list.len(), 6);
    }

    #[test]
    fn test_remove_at_out_of_range() {
        let mut list = vec!["a"];
        assert!(remove_at(&mut list, 3, "skills").is_err());
        assert_eq!(list, vec!["a"]);
    }

    #[test]
    fn test_next_id() {
        assert_eq!(next_id(std::iter::empty()), 1);
        assert_eq!(next_id([1, 4, 2].into_iter()), 5);
    }

    #[test]
    fn test_field_errors_keep_first_message() {
        let mut errors = FieldErrors::new();
        errors.require("email", "", "Valid email is required");
        errors.add("email", "second");
        assert_eq!(errors.get("email"), Some("Valid email is required"));
        assert!(errors.into_result().is_err());
    }
}
