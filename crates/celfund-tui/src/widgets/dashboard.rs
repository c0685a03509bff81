//! Scraping dashboard
//!
//! Three tabs over the polled status and stats. Everything here is read-only
//! display; commands go through the app handlers.

use celfund_api::{
    progress_percent, ScrapingProgress, ScrapingStats, ScrapingStatus, SystemStatus,
    MILESTONE_GRANTS, TARGET_GRANTS,
};
use celfund_app::dashboard_state::{DashboardCommand, DashboardState, DashboardTab};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Gauge, Paragraph, Tabs, Widget},
};

use crate::theme::{palette, styles};

use super::spinner_frame;

pub struct Dashboard<'a> {
    dashboard: &'a DashboardState,
    grants_limit: u32,
    stats_days: u32,
    tick: u64,
}

impl<'a> Dashboard<'a> {
    pub fn new(dashboard: &'a DashboardState, grants_limit: u32, stats_days: u32) -> Self {
        Self {
            dashboard,
            grants_limit,
            stats_days,
            tick: 0,
        }
    }

    pub fn tick(mut self, tick: u64) -> Self {
        self.tick = tick;
        self
    }

    fn render_tabs(&self, area: Rect, buf: &mut Buffer) {
        let titles = DashboardTab::ALL
            .iter()
            .enumerate()
            .map(|(i, tab)| format!("{} {}", i + 1, tab.label()));
        Tabs::new(titles)
            .select(self.dashboard.tab.index())
            .style(styles::text_secondary())
            .highlight_style(styles::focused_selected())
            .divider(Span::styled("│", styles::text_muted()))
            .render(area, buf);
    }

    fn render_footer(&self, area: Rect, buf: &mut Buffer) {
        let line = match (&self.dashboard.last_error, &self.dashboard.last_updated) {
            (Some(error), _) => Line::from(vec![
                Span::styled("✗ ", styles::status_red()),
                Span::styled(format!("Backend unreachable: {}", error), styles::status_red()),
            ]),
            (None, Some(updated)) => Line::from(Span::styled(
                format!("Updated {}", updated.format("%H:%M:%S")),
                styles::text_muted(),
            )),
            (None, None) => Line::default(),
        };
        Paragraph::new(line)
            .alignment(Alignment::Right)
            .render(area, buf);
    }

    fn render_loading(&self, area: Rect, buf: &mut Buffer) {
        let line = Line::from(vec![
            Span::styled(format!("{} ", spinner_frame(self.tick)), styles::accent()),
            Span::styled("Loading scraping status…", styles::text_secondary()),
        ]);
        let y = area.y + area.height / 2;
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .render(Rect::new(area.x, y, area.width, 1), buf);
    }

    // ─────────────────────────────────────────────────────────
    // Overview
    // ─────────────────────────────────────────────────────────

    fn render_overview(&self, area: Rect, buf: &mut Buffer) {
        let Some(status) = &self.dashboard.status else {
            Paragraph::new(Span::styled("No status yet. Press r to retry.", styles::text_muted()))
                .render(area, buf);
            return;
        };

        let [system, metrics, milestone, target, recent] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .areas(area);

        Paragraph::new(system_lines(&status.system_status)).render(system, buf);
        Paragraph::new(metrics_line(&status.progress)).render(metrics, buf);

        let progress = &status.progress;
        render_gauge(
            milestone,
            buf,
            progress.total_grants,
            MILESTONE_GRANTS,
            progress.estimated_days_to_2000,
        );
        render_gauge(
            target,
            buf,
            progress.total_grants,
            TARGET_GRANTS,
            progress.estimated_days_to_5000,
        );

        self.render_recent_sessions(status, recent, buf);
    }

    fn render_recent_sessions(&self, status: &ScrapingStatus, area: Rect, buf: &mut Buffer) {
        let mut lines = vec![Line::from(Span::styled(
            "Recent sessions",
            styles::text_bright(),
        ))];
        if status.recent_sessions.is_empty() {
            lines.push(Line::from(Span::styled("none yet", styles::text_muted())));
        }
        for session in &status.recent_sessions {
            let status_style = match session.status.as_str() {
                "completed" => styles::status_green(),
                "failed" => styles::status_red(),
                _ => styles::status_yellow(),
            };
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{:<12} ", session.start_time.as_deref().unwrap_or("-")),
                    styles::text_muted(),
                ),
                Span::styled(format!("{:<10} ", session.status), status_style),
                Span::styled(
                    format!("{} grants", session.grants_scraped),
                    styles::text_secondary(),
                ),
            ]));
        }
        Paragraph::new(lines).render(area, buf);
    }

    // ─────────────────────────────────────────────────────────
    // Control
    // ─────────────────────────────────────────────────────────

    fn render_control(&self, area: Rect, buf: &mut Buffer) {
        let controls = DashboardCommand::controls(self.grants_limit);
        let mut lines: Vec<Line> = controls
            .iter()
            .enumerate()
            .map(|(i, command)| {
                let selected = i == self.dashboard.selected_control;
                let style = if selected {
                    styles::focused_selected()
                } else {
                    styles::text_primary()
                };
                let marker = if selected { "› " } else { "  " };
                let mut spans = vec![
                    Span::styled(marker, styles::accent()),
                    Span::styled(format!(" {} ", command.label()), style),
                ];
                if command.needs_confirmation() {
                    spans.push(Span::styled(" (asks first)", styles::text_muted()));
                }
                Line::from(spans)
            })
            .collect();

        lines.push(Line::default());
        if self.dashboard.command_in_flight {
            lines.push(Line::from(vec![
                Span::styled(format!("{} ", spinner_frame(self.tick)), styles::accent()),
                Span::styled("Running command…", styles::text_secondary()),
            ]));
        } else if let Some(notice) = &self.dashboard.notice {
            lines.push(Line::from(Span::styled(notice.clone(), styles::accent())));
        }

        if let Some(system) = self.dashboard.status.as_ref().map(|s| &s.system_status) {
            lines.push(Line::default());
            lines.extend(system_lines(system));
        }

        Paragraph::new(lines).render(area, buf);
    }

    // ─────────────────────────────────────────────────────────
    // Statistics
    // ─────────────────────────────────────────────────────────

    fn render_statistics(&self, area: Rect, buf: &mut Buffer) {
        let Some(stats) = &self.dashboard.stats else {
            Paragraph::new(Span::styled("No statistics yet.", styles::text_muted()))
                .render(area, buf);
            return;
        };

        let [analytics, chart] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);

        Paragraph::new(analytics_lines(stats)).render(analytics, buf);

        let bars: Vec<Bar> = stats
            .grants_by_day
            .iter()
            .map(|day| {
                Bar::default()
                    .value(day.grants)
                    .label(Line::from(short_date(&day.date)))
            })
            .collect();

        BarChart::default()
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(styles::border_inactive())
                    .title(Span::styled(
                        format!(" Grants per day (last {} days) ", self.stats_days),
                        styles::text_secondary(),
                    )),
            )
            .data(BarGroup::default().bars(&bars))
            .bar_width(5)
            .bar_gap(1)
            .bar_style(styles::accent())
            .value_style(styles::focused_selected())
            .render(chart, buf);
    }
}

impl Widget for Dashboard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(true)
            .title(Span::styled(" Scraping Pipeline ", styles::text_bright()))
            .style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 3 || inner.width == 0 {
            return;
        }

        let [tabs, content, footer] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        self.render_tabs(tabs, buf);
        self.render_footer(footer, buf);

        if self.dashboard.loading {
            self.render_loading(content, buf);
            return;
        }

        match self.dashboard.tab {
            DashboardTab::Overview => self.render_overview(content, buf),
            DashboardTab::Control => self.render_control(content, buf),
            DashboardTab::Statistics => self.render_statistics(content, buf),
        }
    }
}

fn system_lines(system: &SystemStatus) -> Vec<Line<'static>> {
    let (scheduler, scheduler_style) = if system.scheduler_running {
        ("● Running", styles::status_green())
    } else {
        ("○ Stopped", styles::text_muted())
    };
    let (session, session_style) = if system.session_active {
        ("● Active", styles::status_green())
    } else {
        ("○ Idle", styles::text_muted())
    };
    let mode = if system.mode.is_empty() {
        "-"
    } else {
        system.mode.as_str()
    };

    vec![
        Line::from(vec![
            Span::styled("Scheduler ", styles::text_secondary()),
            Span::styled(scheduler, scheduler_style),
            Span::styled("   Session ", styles::text_secondary()),
            Span::styled(session, session_style),
            Span::styled("   Mode ", styles::text_secondary()),
            Span::styled(mode.to_string(), styles::text_primary()),
        ]),
        Line::from(Span::styled(
            format!(
                "Last session: {}",
                system.last_session.as_deref().unwrap_or("never")
            ),
            styles::text_muted(),
        )),
    ]
}

fn metrics_line(progress: &ScrapingProgress) -> Line<'static> {
    Line::from(vec![
        Span::styled("Total grants ", styles::text_secondary()),
        Span::styled(
            thousands(progress.total_grants),
            styles::accent().add_modifier(Modifier::BOLD),
        ),
        Span::styled("  Today ", styles::text_secondary()),
        Span::styled(thousands(progress.grants_today), styles::text_primary()),
        Span::styled("  Sessions today ", styles::text_secondary()),
        Span::styled(progress.sessions_today.to_string(), styles::text_primary()),
        Span::styled("  Success ", styles::text_secondary()),
        Span::styled(
            format!("{:.1}%", progress.success_rate),
            styles::text_primary(),
        ),
    ])
}

fn analytics_lines(stats: &ScrapingStats) -> Vec<Line<'static>> {
    let analytics = &stats.session_analytics;
    vec![
        Line::from(vec![
            Span::styled("Sessions ", styles::text_secondary()),
            Span::styled(analytics.total_sessions.to_string(), styles::text_primary()),
            Span::styled("  Successful ", styles::text_secondary()),
            Span::styled(analytics.successful.to_string(), styles::status_green()),
            Span::styled("  Failed ", styles::text_secondary()),
            Span::styled(analytics.failed.to_string(), styles::status_red()),
        ]),
        Line::from(vec![
            Span::styled("Success rate ", styles::text_secondary()),
            Span::styled(
                format!("{:.1}%", analytics.success_rate),
                styles::text_primary(),
            ),
            Span::styled("  Avg grants/session ", styles::text_secondary()),
            Span::styled(
                format!("{:.1}", analytics.avg_grants_per_session),
                styles::text_primary(),
            ),
        ]),
    ]
}

fn render_gauge(area: Rect, buf: &mut Buffer, current: u64, target: u64, days: u64) {
    let percent = progress_percent(current, target);
    let eta = if current >= target {
        "reached".to_string()
    } else {
        format!("~{} days", days)
    };
    let label = format!(
        "{} / {} ({:.1}%) · {}",
        thousands(current.min(target)),
        thousands(target),
        percent,
        eta
    );

    let [title, bar] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);
    Paragraph::new(Span::styled(
        format!("Progress to {}", thousands(target)),
        styles::text_secondary(),
    ))
    .render(title, buf);
    Gauge::default()
        .gauge_style(Style::default().fg(palette::ACCENT).bg(palette::POPUP_BG))
        .ratio(percent / 100.0)
        .label(label)
        .render(bar, buf);
}

/// `1500` -> `1,500`
pub fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// `2025-08-01` -> `08-01`; anything else is kept as is
fn short_date(date: &str) -> String {
    match date.get(5..10) {
        Some(rest) if date.len() == 10 => rest.to_string(),
        _ => date.to_string(),
    }
}
