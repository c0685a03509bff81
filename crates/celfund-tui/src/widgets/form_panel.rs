//! Landing page form
//!
//! Four fields and the submit button. Text fields show their tail when the
//! value is wider than the panel; select fields show `◀ option ▶`.

use celfund_app::state::{AppState, LandingFocus};
use celfund_core::{FormField, FormIssue, FormState, MIN_SUMMARY_CHARS};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthChar;

use crate::theme::{palette, styles};

use super::spinner_frame;

const FIELDS: [FormField; 4] = [
    FormField::ProjectSummary,
    FormField::OrganizationType,
    FormField::FocusArea,
    FormField::Email,
];

pub struct FormPanel<'a> {
    form: &'a FormState,
    focus: LandingFocus,
    submitting: bool,
    tick: u64,
}

impl<'a> FormPanel<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self {
            form: &state.form,
            focus: state.focus,
            submitting: state.is_submitting(),
            tick: state.tick,
        }
    }

    fn field_value(&self, field: FormField) -> Option<String> {
        match field {
            FormField::ProjectSummary => {
                Some(self.form.project_summary().to_string()).filter(|s| !s.is_empty())
            }
            FormField::Email => Some(self.form.email().to_string()).filter(|s| !s.is_empty()),
            FormField::OrganizationType => self.form.organization_type().map(|o| o.label().into()),
            FormField::FocusArea => self.form.focus_area().map(|f| f.label().into()),
        }
    }

    fn placeholder(field: FormField) -> &'static str {
        match field {
            FormField::ProjectSummary => "Describe your project",
            FormField::OrganizationType => "Select organization type",
            FormField::FocusArea => "Select focus area",
            FormField::Email => "you@organization.org",
        }
    }

    fn label_line(&self, field: FormField, issues: &[FormIssue]) -> Line<'static> {
        let focused = self.focus == LandingFocus::Field(field);
        let label_style = if focused {
            styles::accent_bold()
        } else {
            styles::text_secondary()
        };
        let mut spans = vec![Span::styled(field.label().to_string(), label_style)];
        if let Some(issue) = issues.iter().find(|i| i.field() == field) {
            spans.push(Span::styled(
                format!("  {}", issue_hint(*issue)),
                styles::text_muted(),
            ));
        }
        Line::from(spans)
    }

    fn value_line(&self, field: FormField, width: u16) -> Line<'static> {
        let focused = self.focus == LandingFocus::Field(field);
        let marker = if focused { "› " } else { "  " };
        let marker = Span::styled(marker, styles::accent());

        let value = self.field_value(field);
        if field.is_text() {
            let cursor = if focused { "▏" } else { "" };
            let room = (width as usize).saturating_sub(3);
            return match value {
                Some(text) => Line::from(vec![
                    marker,
                    Span::styled(fit_tail(&text, room), styles::text_primary()),
                    Span::styled(cursor, styles::accent()),
                ]),
                None => Line::from(vec![
                    marker,
                    Span::styled(cursor, styles::accent()),
                    Span::styled(Self::placeholder(field), styles::text_muted()),
                ]),
            };
        }

        let arrow_style = if focused {
            styles::accent()
        } else {
            styles::text_muted()
        };
        let (text, text_style) = match value {
            Some(label) => (label, styles::text_primary()),
            None => (Self::placeholder(field).to_string(), styles::text_muted()),
        };
        Line::from(vec![
            marker,
            Span::styled("◀ ", arrow_style),
            Span::styled(text, text_style),
            Span::styled(" ▶", arrow_style),
        ])
    }

    fn submit_line(&self) -> Line<'static> {
        let focused = self.focus == LandingFocus::Submit;
        if self.submitting {
            return Line::from(vec![
                Span::styled(format!("  {} ", spinner_frame(self.tick)), styles::accent()),
                Span::styled("Finding matches…", styles::text_secondary()),
            ]);
        }
        let style = styles::button(self.form.is_valid(), focused);
        Line::from(vec![
            Span::raw("  "),
            Span::styled(" Find matching grants ", style),
        ])
    }
}

impl Widget for FormPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let focused = !matches!(self.focus, LandingFocus::Results);
        let block = styles::glass_block(focused)
            .title(Span::styled(" Tell us about your project ", styles::text_bright()))
            .style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let issues = self.form.issues();
        let mut lines = Vec::with_capacity(FIELDS.len() * 2 + 2);
        for field in FIELDS {
            lines.push(self.label_line(field, &issues));
            lines.push(self.value_line(field, inner.width));
        }
        lines.push(Line::default());
        lines.push(self.submit_line());

        Paragraph::new(lines).render(inner, buf);
    }
}

/// Short requirement shown beside a field label
pub fn issue_hint(issue: FormIssue) -> String {
    match issue {
        FormIssue::SummaryTooShort => format!("more than {} characters", MIN_SUMMARY_CHARS),
        FormIssue::OrganizationTypeMissing | FormIssue::FocusAreaMissing => {
            "required".to_string()
        }
        FormIssue::EmailInvalid => "must contain @".to_string(),
    }
}

/// The longest suffix of `text` that fits in `width` columns, prefixed with
/// `…` when anything was cut.
fn fit_tail(text: &str, width: usize) -> String {
    let total: usize = text.chars().filter_map(|c| c.width()).sum();
    if total <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut used = 1; // room for the ellipsis
    let mut tail = Vec::new();
    for c in text.chars().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        tail.push(c);
    }
    std::iter::once('…').chain(tail.into_iter().rev()).collect()
}
