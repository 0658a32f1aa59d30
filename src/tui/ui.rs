//! UI rendering for the terminal widget.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::features::focus::{format_duration_mmss, SessionType};
use crate::features::history::{ChartView, DayEntry};
use crate::tui::app::App;

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    let chart_height = if app.show_chart() {
        Constraint::Min(8)
    } else {
        Constraint::Min(0)
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Progress
            chart_height,          // Chart
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_gauge(frame, app, chunks[1]);
    if app.show_chart() {
        render_chart(frame, app, chunks[2]);
    }
    render_status_bar(frame, app, chunks[3]);
}

const fn session_color(session_type: SessionType) -> Color {
    match session_type {
        SessionType::Work => Color::Red,
        SessionType::ShortBreak => Color::Green,
        SessionType::LongBreak => Color::Blue,
    }
}

fn render_header(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(rendered) = app.frame() else {
        return;
    };
    let color = session_color(rendered.session_type);
    let state = if app.is_running() { "running" } else { "paused" };
    let today = app.widget().history().count_on(app.widget().today());

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", rendered.session_type),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format_duration_mmss(rendered.remaining_seconds),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  ({state})"), Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("  today: {today}"),
            Style::default().fg(Color::Yellow),
        ),
    ]);

    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );

    frame.render_widget(header, area);
}

fn render_gauge(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(rendered) = app.frame() else {
        return;
    };

    let ratio = rendered.progress.clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(session_color(rendered.session_type)))
        .ratio(ratio)
        .label(format!("{:.0}%", ratio * 100.0));

    frame.render_widget(gauge, area);
}

fn bar_for(entry: &DayEntry) -> Bar<'static> {
    let style = if entry.is_today {
        Style::default().fg(Color::Green)
    } else if entry.is_future {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Cyan)
    };

    Bar::default()
        .value(u64::from(entry.count))
        .label(Line::from(entry.weekday_label()))
        .style(style)
}

fn render_chart(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let entries = app.series();
    let bars: Vec<Bar<'static>> = entries.iter().map(bar_for).collect();
    let max = entries.iter().map(|e| u64::from(e.count)).max().unwrap_or(0).max(1);

    let title = match app.view {
        ChartView::Week => " This week ".to_string(),
        ChartView::Trailing => format!(" Last {} days ", app.trailing_days),
    };

    let chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .data(BarGroup::default().bars(&bars))
        .bar_width(3)
        .bar_gap(1)
        .max(max);

    frame.render_widget(chart, area);
}

fn render_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let status_text = app.status.as_deref().unwrap_or(App::HELP);
    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}
