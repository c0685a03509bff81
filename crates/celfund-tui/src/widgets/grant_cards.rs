//! Result cards
//!
//! Before a submission the panel shows a prompt, while a match is in flight a
//! spinner, and afterwards one card per grant. Cards scroll so the selected
//! one stays visible.

use celfund_app::state::{AppState, LandingFocus, ResultSource, ResultsState, SubmissionStatus};
use celfund_core::GrantMatch;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::theme::{palette, styles};

use super::spinner_frame;

/// Rows used by one card, including the spacer
const CARD_HEIGHT: u16 = 4;

pub const DISCLAIMER: &str =
    "⚠ Grant matches are templates: review and rewrite in your own words before submission.";

pub struct GrantCards<'a> {
    results: &'a ResultsState,
    submission: SubmissionStatus,
    focused: bool,
    tick: u64,
}

impl<'a> GrantCards<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self {
            results: &state.results,
            submission: state.submission,
            focused: state.focus == LandingFocus::Results,
            tick: state.tick,
        }
    }

    fn title(&self) -> Line<'static> {
        if self.submission != SubmissionStatus::Complete {
            return Line::from(Span::styled(" Grant Matches ", styles::text_bright()));
        }
        let mut spans = vec![Span::styled(
            format!(" Your Top {} Grant Matches ", self.results.grants.len()),
            styles::text_bright(),
        )];
        if let Some(focus) = self.results.focus_area {
            spans.push(Span::styled(
                format!("· {} ", focus.label()),
                styles::accent(),
            ));
        }
        Line::from(spans)
    }

    fn render_placeholder(&self, inner: Rect, buf: &mut Buffer) {
        let line = match self.submission {
            SubmissionStatus::Loading { .. } => Line::from(vec![
                Span::styled(format!("{} ", spinner_frame(self.tick)), styles::accent()),
                Span::styled("Searching grant databases…", styles::text_secondary()),
            ]),
            _ => Line::from(Span::styled(
                "Fill in the form and submit to see your matches",
                styles::text_muted(),
            )),
        };
        let y = inner.y + inner.height / 2;
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .render(Rect::new(inner.x, y, inner.width, 1), buf);
    }

    fn card_lines(&self, index: usize, grant: &GrantMatch, width: u16) -> Vec<Line<'static>> {
        let selected = self.focused && index == self.results.selected;
        let saved = self.results.is_saved(grant.id);

        let marker = if selected { "▌" } else { " " };
        let title_style = if selected {
            styles::accent_bold()
        } else {
            styles::text_bright()
        };

        let mut title = vec![
            Span::styled(marker, styles::accent()),
            Span::styled(grant.title.clone(), title_style),
        ];
        if saved {
            title.push(Span::styled(" ★ saved", styles::status_yellow()));
        }

        let meta = Line::from(vec![
            Span::raw(" "),
            Span::styled(grant.funder.clone(), styles::text_secondary()),
            Span::styled(" · Deadline: ", styles::text_muted()),
            Span::styled(grant.deadline.display(), styles::status_yellow()),
            Span::styled(" · ", styles::text_muted()),
            Span::styled(grant.amount.clone(), styles::status_green()),
        ]);

        let description = truncate(&grant.description, width.saturating_sub(2) as usize);
        vec![
            Line::from(title),
            meta,
            Line::from(vec![
                Span::raw(" "),
                Span::styled(description, styles::text_secondary()),
            ]),
            Line::default(),
        ]
    }

    fn render_cards(&self, inner: Rect, buf: &mut Buffer) {
        let mut header = vec![Line::from(Span::styled(
            DISCLAIMER,
            Style::default()
                .fg(palette::STATUS_YELLOW)
                .add_modifier(Modifier::ITALIC),
        ))];
        if self.results.source == ResultSource::Templates {
            header.push(Line::from(Span::styled(
                "Live matching is unavailable, showing curated templates for your focus area.",
                styles::text_muted(),
            )));
        }
        let header_height = (header.len() as u16 + 1).min(inner.height);
        Paragraph::new(header)
            .wrap(Wrap { trim: true })
            .render(Rect::new(inner.x, inner.y, inner.width, header_height), buf);

        let hint_height = u16::from(self.focused);
        let list_area = Rect::new(
            inner.x,
            inner.y + header_height,
            inner.width,
            inner
                .height
                .saturating_sub(header_height)
                .saturating_sub(hint_height),
        );

        let visible = (list_area.height / CARD_HEIGHT).max(1) as usize;
        let first = first_visible(self.results.selected, visible);
        let lines: Vec<Line> = self
            .results
            .grants
            .iter()
            .enumerate()
            .skip(first)
            .take(visible)
            .flat_map(|(i, grant)| self.card_lines(i, grant, list_area.width))
            .collect();
        Paragraph::new(lines).render(list_area, buf);

        if self.focused && inner.height > header_height {
            let hint = Line::from(vec![
                Span::styled("↑↓", styles::keybinding()),
                Span::styled(" select  ", styles::text_muted()),
                Span::styled("v", styles::keybinding()),
                Span::styled(" view  ", styles::text_muted()),
                Span::styled("c", styles::keybinding()),
                Span::styled(" copy  ", styles::text_muted()),
                Span::styled("s", styles::keybinding()),
                Span::styled(" save", styles::text_muted()),
            ]);
            let y = inner.bottom().saturating_sub(1);
            Paragraph::new(hint).render(Rect::new(inner.x, y, inner.width, 1), buf);
        }
    }
}

impl Widget for GrantCards<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(self.focused)
            .title(self.title())
            .style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        if self.submission == SubmissionStatus::Complete {
            self.render_cards(inner, buf);
        } else {
            self.render_placeholder(inner, buf);
        }
    }
}

/// First card index of a window of `visible` cards that contains `selected`
fn first_visible(selected: usize, visible: usize) -> usize {
    selected.saturating_sub(visible.saturating_sub(1))
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
