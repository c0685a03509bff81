//! Landing-page form state and validation
//!
//! [`FormState`] owns the four field values and a derived `is_valid` flag
//! that is recomputed synchronously on every mutation. A form that passes
//! validation can be frozen into a [`ValidForm`], the only value a
//! submission accepts.

use serde::{Deserialize, Serialize};

use crate::types::{FocusArea, OrganizationType};

/// The project summary must be strictly longer than this (after trimming).
///
/// Counted in Unicode scalar values, so an emoji is one character.
pub const MIN_SUMMARY_CHARS: usize = 10;

/// Identifies one field of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    ProjectSummary,
    OrganizationType,
    FocusArea,
    Email,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::ProjectSummary,
        FormField::OrganizationType,
        FormField::FocusArea,
        FormField::Email,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::ProjectSummary => "Project Summary",
            FormField::OrganizationType => "Organization Type",
            FormField::FocusArea => "Focus Area",
            FormField::Email => "Email Address",
        }
    }

    /// Free-text fields accept typed characters; the others are selects
    pub fn is_text(&self) -> bool {
        matches!(self, FormField::ProjectSummary | FormField::Email)
    }

    pub fn next(&self) -> Option<FormField> {
        match self {
            FormField::ProjectSummary => Some(FormField::OrganizationType),
            FormField::OrganizationType => Some(FormField::FocusArea),
            FormField::FocusArea => Some(FormField::Email),
            FormField::Email => None,
        }
    }

    pub fn prev(&self) -> Option<FormField> {
        match self {
            FormField::ProjectSummary => None,
            FormField::OrganizationType => Some(FormField::ProjectSummary),
            FormField::FocusArea => Some(FormField::OrganizationType),
            FormField::Email => Some(FormField::FocusArea),
        }
    }
}

/// A requirement the form does not meet yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormIssue {
    SummaryTooShort,
    OrganizationTypeMissing,
    FocusAreaMissing,
    EmailInvalid,
}

impl FormIssue {
    pub fn field(&self) -> FormField {
        match self {
            FormIssue::SummaryTooShort => FormField::ProjectSummary,
            FormIssue::OrganizationTypeMissing => FormField::OrganizationType,
            FormIssue::FocusAreaMissing => FormField::FocusArea,
            FormIssue::EmailInvalid => FormField::Email,
        }
    }
}

/// Field values of the landing-page form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    project_summary: String,
    organization_type: Option<OrganizationType>,
    focus_area: Option<FocusArea>,
    email: String,
    is_valid: bool,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn project_summary(&self) -> &str {
        &self.project_summary
    }

    pub fn organization_type(&self) -> Option<OrganizationType> {
        self.organization_type
    }

    pub fn focus_area(&self) -> Option<FocusArea> {
        self.focus_area
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Derived validity, always consistent with the current field values
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn set_project_summary(&mut self, value: impl Into<String>) {
        self.project_summary = value.into();
        self.revalidate();
    }

    pub fn set_organization_type(&mut self, value: Option<OrganizationType>) {
        self.organization_type = value;
        self.revalidate();
    }

    pub fn set_focus_area(&mut self, value: Option<FocusArea>) {
        self.focus_area = value;
        self.revalidate();
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.email = value.into();
        self.revalidate();
    }

    /// Append a typed character to a text field. Select fields ignore it.
    pub fn push_char(&mut self, field: FormField, c: char) {
        match field {
            FormField::ProjectSummary => self.project_summary.push(c),
            FormField::Email => self.email.push(c),
            FormField::OrganizationType | FormField::FocusArea => return,
        }
        self.revalidate();
    }

    /// Remove the last character of a text field, or clear a select field.
    pub fn backspace(&mut self, field: FormField) {
        match field {
            FormField::ProjectSummary => {
                self.project_summary.pop();
            }
            FormField::Email => {
                self.email.pop();
            }
            FormField::OrganizationType => self.organization_type = None,
            FormField::FocusArea => self.focus_area = None,
        }
        self.revalidate();
    }

    /// Step a select field through its options (wrapping).
    ///
    /// An empty select moves to the first option going forward and to the
    /// last option going backward.
    pub fn cycle_option(&mut self, field: FormField, forward: bool) {
        match field {
            FormField::OrganizationType => {
                self.organization_type =
                    Some(cycle(&OrganizationType::ALL, self.organization_type, forward));
            }
            FormField::FocusArea => {
                self.focus_area = Some(cycle(&FocusArea::ALL, self.focus_area, forward));
            }
            FormField::ProjectSummary | FormField::Email => return,
        }
        self.revalidate();
    }

    /// Requirements that are not met, in field order
    pub fn issues(&self) -> Vec<FormIssue> {
        let mut issues = Vec::new();
        if self.project_summary.trim().chars().count() <= MIN_SUMMARY_CHARS {
            issues.push(FormIssue::SummaryTooShort);
        }
        if self.organization_type.is_none() {
            issues.push(FormIssue::OrganizationTypeMissing);
        }
        if self.focus_area.is_none() {
            issues.push(FormIssue::FocusAreaMissing);
        }
        if !self.email.contains('@') {
            issues.push(FormIssue::EmailInvalid);
        }
        issues
    }

    /// Freeze the current values for submission, if they are valid
    pub fn validated(&self) -> Option<ValidForm> {
        if !self.is_valid {
            return None;
        }
        Some(ValidForm {
            project_summary: self.project_summary.clone(),
            organization_type: self.organization_type?,
            focus_area: self.focus_area?,
            email: self.email.clone(),
        })
    }

    fn revalidate(&mut self) {
        self.is_valid = self.issues().is_empty();
    }
}

fn cycle<T: Copy + PartialEq>(options: &[T], current: Option<T>, forward: bool) -> T {
    let len = options.len();
    let index = match current.and_then(|c| options.iter().position(|o| *o == c)) {
        Some(i) if forward => (i + 1) % len,
        Some(i) => (i + len - 1) % len,
        None if forward => 0,
        None => len - 1,
    };
    options[index]
}

/// A snapshot of a form that passed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidForm {
    pub project_summary: String,
    pub organization_type: OrganizationType,
    pub focus_area: FocusArea,
    pub email: String,
}
