use chrono::{DateTime, Utc};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Cell, Clear, List, ListItem, Paragraph, Row, Table, Wrap};

use super::app::{DiffTarget, MessageType, Panel, SETTINGS_ROWS, SettingsRow, StatusMessage};
use super::editor::Editor;
use super::layout::{AppLayout, GUTTER_WIDTH, popup_area};
use super::timestamps::format_age;
use crate::models::{HistoryEntry, Settings, Theme};
use crate::playground::diff::{DiffKind, DiffLine};
use crate::playground::metrics::{CodeMetrics, ComplexityLabel};
use crate::playground::view::{BUG_TABLE_COLUMNS, BugCategory, BugTableRow, NO_BUGS_MESSAGE};
use crate::playground::{AnalysisView, Status, StatusKind};
use crate::utils::sanitize_remote_text;

/// Everything one frame needs, borrowed from the app
pub struct RenderState<'a> {
    pub settings: &'a Settings,
    pub language: &'a str,
    pub editor: &'a Editor,
    pub gutter_lines: usize,
    pub analyzing: bool,
    pub cycle_status: Option<&'a Status>,
    pub view: Option<&'a AnalysisView>,
    pub results_scroll: u16,
    pub diff_target: DiffTarget,
    pub diff: Option<&'a [DiffLine]>,
    /// None when metrics are hidden
    pub metrics: Option<&'a CodeMetrics>,
    pub status_message: Option<&'a StatusMessage>,
    pub panel: &'a Panel,
    pub history: &'a [HistoryEntry],
    pub now: DateTime<Utc>,
}

/// Colours for one theme
struct Palette {
    bg: Color,
    fg: Color,
    muted: Color,
    accent: Color,
    error: Color,
    bar_bg: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                bg: Color::Rgb(9, 9, 11),
                fg: Color::Rgb(250, 250, 250),
                muted: Color::Rgb(113, 113, 122),
                accent: Color::Rgb(16, 185, 129),
                error: Color::Rgb(239, 68, 68),
                bar_bg: Color::Rgb(24, 24, 27),
            },
            Theme::Light => Self {
                bg: Color::Rgb(250, 250, 250),
                fg: Color::Rgb(24, 24, 27),
                muted: Color::Rgb(113, 113, 122),
                accent: Color::Rgb(5, 150, 105),
                error: Color::Rgb(220, 38, 38),
                bar_bg: Color::Rgb(228, 228, 231),
            },
        }
    }

    fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    fn block<'a>(&self, title: &'a str) -> Block<'a> {
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.muted))
            .title(title)
    }

    fn category(&self, category: BugCategory) -> Color {
        match category {
            BugCategory::Syntax => Color::Rgb(239, 68, 68),
            BugCategory::Logic => Color::Rgb(245, 158, 11),
            BugCategory::Performance => Color::Rgb(59, 130, 246),
            BugCategory::Style => Color::Rgb(168, 85, 247),
            BugCategory::Other => Color::Rgb(20, 184, 166),
            BugCategory::Unclassified => self.muted,
        }
    }

    fn diff(&self, kind: DiffKind) -> Style {
        match kind {
            DiffKind::Removed => Style::default().fg(self.error),
            DiffKind::Added => Style::default().fg(self.accent),
            DiffKind::Neutral => Style::default().fg(self.muted),
        }
    }
}

/// Render the entire UI
pub fn render_ui(frame: &mut Frame, state: &RenderState) {
    let palette = Palette::for_theme(state.settings.theme);
    let area = frame.area();
    let layout = AppLayout::new(area, state.metrics.is_some());

    frame.render_widget(Block::default().style(palette.base()), area);
    render_header(frame, layout.header_area, state, &palette);
    render_editor(frame, layout.editor_area, state, &palette);
    render_results(frame, layout.results_area, state, &palette);
    if let (Some(metrics_area), Some(metrics)) = (layout.metrics_area, state.metrics) {
        render_metrics_bar(frame, metrics_area, metrics, &palette);
    }
    render_status_bar(frame, layout.status_area, state, &palette);

    match state.panel {
        Panel::History { selected, confirm_clear } => {
            render_history_panel(frame, area, state, *selected, *confirm_clear, &palette)
        }
        Panel::Settings { selected } => {
            render_settings_panel(frame, area, state.settings, *selected, &palette)
        }
        Panel::Closed => {}
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &RenderState, palette: &Palette) {
    let mut spans = vec![
        Span::styled(
            " AI Debug Playground ",
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled("| Language: ", Style::default().fg(palette.muted)),
        Span::raw(state.language.to_string()),
        Span::styled(" | Theme: ", Style::default().fg(palette.muted)),
        Span::raw(state.settings.theme.to_string()),
    ];
    if state.settings.auto_analyze {
        spans.push(Span::styled(" | auto-analyze", Style::default().fg(palette.muted)));
    }
    if state.analyzing {
        spans.push(Span::styled(
            " | Analyzing...",
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(palette.bar_bg));
    frame.render_widget(paragraph, area);
}

fn render_editor(frame: &mut Frame, area: Rect, state: &RenderState, palette: &Palette) {
    let block = palette.block(" Code ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(GUTTER_WIDTH), Constraint::Min(1)])
        .split(inner);
    let (gutter_area, text_area) = (columns[0], columns[1]);

    let editor = state.editor;
    let scroll = editor.scroll();
    let height = inner.height as usize;

    let gutter: Vec<Line> = (scroll + 1..=state.gutter_lines)
        .take(height)
        .map(|n| Line::from(format!("{:>width$} ", n, width = GUTTER_WIDTH as usize - 1)))
        .collect();
    frame.render_widget(Paragraph::new(gutter).style(Style::default().fg(palette.muted)), gutter_area);

    let lines: Vec<Line> = editor
        .lines()
        .iter()
        .skip(scroll)
        .take(height)
        .map(|l| Line::from(l.as_str()))
        .collect();
    frame.render_widget(Paragraph::new(lines).style(palette.base()), text_area);

    if matches!(state.panel, Panel::Closed) {
        let (row, col) = editor.cursor();
        if row >= scroll && row < scroll + height && text_area.width > 0 {
            let x = text_area.x + (col as u16).min(text_area.width - 1);
            let y = text_area.y + (row - scroll) as u16;
            frame.set_cursor_position((x, y));
        }
    }
}

fn render_results(frame: &mut Frame, area: Rect, state: &RenderState, palette: &Palette) {
    let block = palette.block(" Results ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let status_height = if state.cycle_status.is_some() { 1 } else { 0 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(status_height), Constraint::Min(0)])
        .split(inner);

    if let Some(status) = state.cycle_status {
        let color = match status.kind {
            StatusKind::Info => palette.accent,
            StatusKind::Error => palette.error,
        };
        let line = Paragraph::new(sanitize_remote_text(&status.text))
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD));
        frame.render_widget(line, rows[0]);
    }

    let content = rows[1];
    if state.diff_target != DiffTarget::Off {
        render_diff(frame, content, state, palette);
        return;
    }

    let Some(view) = state.view else {
        let hint = Paragraph::new("Press F5 or Ctrl+Enter to analyze the code.")
            .style(Style::default().fg(palette.muted))
            .wrap(Wrap { trim: true });
        frame.render_widget(hint, content);
        return;
    };

    let table_height = (view.bug_rows.len() as u16 + 1).min(content.height / 2).max(2);
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(table_height), Constraint::Min(0)])
        .split(content);

    render_bug_table(frame, sections[0], &view.bug_rows, palette);
    render_details(frame, sections[1], view, state.results_scroll, palette);
}

fn render_bug_table(frame: &mut Frame, area: Rect, rows: &[BugTableRow], palette: &Palette) {
    let header = Row::new(BUG_TABLE_COLUMNS.iter().map(|c| Cell::from(*c)))
        .style(Style::default().fg(palette.muted).add_modifier(Modifier::BOLD));
    let line_width = rows
        .iter()
        .filter_map(|row| match row {
            BugTableRow::Bug(bug) => Some(bug.line.to_string().chars().count()),
            BugTableRow::NoBugs => None,
        })
        .chain([BUG_TABLE_COLUMNS[0].len()])
        .max()
        .unwrap_or(0)
        .max(5) as u16;
    let widths = [
        Constraint::Length(line_width),
        Constraint::Length(12),
        Constraint::Fill(1),
        Constraint::Length(7),
    ];

    let body: Vec<Row> = rows
        .iter()
        .filter_map(|row| match row {
            BugTableRow::Bug(bug) => Some(bug),
            BugTableRow::NoBugs => None,
        })
        .map(|bug| {
            let line_style = if bug.line.is_emphasized() {
                Style::default().add_modifier(Modifier::BOLD)
            } else if bug.line.is_dimmed() {
                Style::default().fg(palette.muted).add_modifier(Modifier::DIM)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(bug.line.to_string()).style(line_style),
                Cell::from(sanitize_remote_text(&bug.kind))
                    .style(Style::default().fg(palette.category(bug.category))),
                Cell::from(sanitize_remote_text(&bug.message)),
                Cell::from("[i]").style(Style::default().fg(palette.muted)),
            ])
        })
        .collect();

    let no_bugs = body.is_empty();
    frame.render_widget(Table::new(body, widths).header(header).column_spacing(1), area);

    // The informational row spans every column, which Table cells cannot do
    if no_bugs && area.height > 1 {
        let row_area = Rect { y: area.y + 1, height: 1, ..area };
        let message = Paragraph::new(NO_BUGS_MESSAGE)
            .alignment(Alignment::Center)
            .style(Style::default().fg(palette.muted));
        frame.render_widget(message, row_area);
    }
}

fn section_title<'a>(title: &'a str, palette: &Palette) -> Line<'a> {
    Line::from(Span::styled(
        title,
        Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
    ))
}

fn push_block<'a>(lines: &mut Vec<Line<'a>>, title: &'a str, body: &str, palette: &Palette) {
    lines.push(Line::from(""));
    lines.push(section_title(title, palette));
    for line in sanitize_remote_text(body).lines() {
        lines.push(Line::from(line.to_string()));
    }
}

fn render_details(
    frame: &mut Frame,
    area: Rect,
    view: &AnalysisView,
    scroll: u16,
    palette: &Palette,
) {
    let mut lines: Vec<Line> = Vec::new();

    if let Some(explanation) = &view.explanation {
        push_block(&mut lines, "Explanation", explanation, palette);
    }
    if let Some(fixed) = &view.fixed_code {
        push_block(&mut lines, "Fixed code (Ctrl+Y to copy)", fixed, palette);
    }
    if let Some(optimized) = &view.optimized_code {
        push_block(&mut lines, "Optimized code (Ctrl+U to copy)", optimized, palette);
    }

    if view.time_complexity.is_some() || view.space_complexity.is_some() {
        lines.push(Line::from(""));
        lines.push(section_title("Complexity", palette));
        if let Some(time) = &view.time_complexity {
            lines.push(Line::from(format!("Time: {}", sanitize_remote_text(time))));
        }
        if let Some(space) = &view.space_complexity {
            lines.push(Line::from(format!("Space: {}", sanitize_remote_text(space))));
        }
    }

    if !view.tests.is_empty() {
        lines.push(Line::from(""));
        lines.push(section_title("Generated tests", palette));
        for test in &view.tests {
            lines.push(Line::from(format!("- {}", sanitize_remote_text(test))));
        }
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

fn render_diff(frame: &mut Frame, area: Rect, state: &RenderState, palette: &Palette) {
    let title = format!("Diff against {} (F6 next, Esc close)", state.diff_target.label());
    let mut lines = vec![Line::styled(
        title,
        Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
    )];

    match state.diff {
        Some(diff) if !diff.is_empty() => {
            for line in diff {
                lines.push(Line::styled(sanitize_remote_text(&line.render()), palette.diff(line.kind)));
            }
        }
        Some(_) => lines.push(Line::styled("No differences.", Style::default().fg(palette.muted))),
        None => lines.push(Line::styled(
            format!("No {} to compare.", state.diff_target.label()),
            Style::default().fg(palette.muted),
        )),
    }

    let paragraph = Paragraph::new(Text::from(lines)).scroll((state.results_scroll, 0));
    frame.render_widget(paragraph, area);
}

fn render_metrics_bar(frame: &mut Frame, area: Rect, metrics: &CodeMetrics, palette: &Palette) {
    let complexity_color = match metrics.complexity {
        ComplexityLabel::Low => palette.accent,
        ComplexityLabel::Medium => Color::Rgb(245, 158, 11),
        ComplexityLabel::High => palette.error,
    };
    let label = Style::default().fg(palette.muted);
    let line = Line::from(vec![
        Span::styled(" Lines: ", label),
        Span::raw(metrics.lines.to_string()),
        Span::styled(" | Chars: ", label),
        Span::raw(metrics.chars.to_string()),
        Span::styled(" | Functions: ", label),
        Span::raw(metrics.functions.to_string()),
        Span::styled(" | Complexity: ", label),
        Span::styled(metrics.complexity.to_string(), Style::default().fg(complexity_color)),
    ]);
    frame.render_widget(Paragraph::new(line).style(Style::default().bg(palette.bar_bg)), area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &RenderState, palette: &Palette) {
    let (status_text, style) = if let Some(message) = state.status_message {
        let color = match message.message_type {
            MessageType::Success => palette.accent,
            MessageType::Error => palette.error,
        };
        (format!(" {} ", message.text), Style::default().fg(color).bg(palette.bar_bg))
    } else {
        let hints = match state.panel {
            Panel::History { confirm_clear: true, .. } => "Clear all history? y: yes | n: no",
            Panel::History { .. } => "Enter: load | c: clear | Esc/F3: close",
            Panel::Settings { .. } => "Enter/Space: change | Esc/F4: close",
            Panel::Closed => {
                "F5: analyze | Ctrl+K: clear | F2: language | F3: history | F4: settings | F6: diff | F8: theme | Ctrl+E/G: export | Ctrl+Q: quit"
            }
        };
        (format!(" {} ", hints), Style::default().fg(palette.fg).bg(palette.bar_bg))
    };

    frame.render_widget(Paragraph::new(status_text).style(style), area);
}

fn render_history_panel(
    frame: &mut Frame,
    area: Rect,
    state: &RenderState,
    selected: usize,
    confirm_clear: bool,
    palette: &Palette,
) {
    let popup = popup_area(area, 70, 70);
    frame.render_widget(Clear, popup);

    let title = if confirm_clear { " History: clear all? (y/n) " } else { " History " };
    let block = palette.block(title).style(palette.base());

    if state.history.is_empty() {
        let empty = Paragraph::new("No history yet").style(Style::default().fg(palette.muted)).block(block);
        frame.render_widget(empty, popup);
        return;
    }

    let items: Vec<ListItem> = state
        .history
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let age = entry
                .created_at()
                .map(|created| format_age(&created, &state.now))
                .unwrap_or_else(|| entry.timestamp.clone());
            let first_line = entry.code.lines().next().unwrap_or("");
            let content = format!(
                "{} | {} | {} bugs | {}",
                age,
                entry.language,
                entry.bug_count,
                sanitize_remote_text(first_line)
            );

            let style = if idx == selected {
                Style::default().fg(palette.bg).bg(palette.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.fg)
            };
            ListItem::new(content).style(style)
        })
        .collect();

    frame.render_widget(List::new(items).block(block), popup);
}

fn settings_value(settings: &Settings, row: SettingsRow) -> String {
    let on_off = |on: bool| String::from(if on { "on" } else { "off" });
    match row {
        SettingsRow::Theme => settings.theme.to_string(),
        SettingsRow::DefaultLanguage => settings.default_language.clone(),
        SettingsRow::AutoAnalyze => on_off(settings.auto_analyze),
        SettingsRow::AutoSave => on_off(settings.auto_save),
        SettingsRow::ShowMetrics => on_off(settings.show_metrics),
    }
}

fn render_settings_panel(
    frame: &mut Frame,
    area: Rect,
    settings: &Settings,
    selected: usize,
    palette: &Palette,
) {
    let popup = popup_area(area, 50, 40);
    frame.render_widget(Clear, popup);

    let items: Vec<ListItem> = SETTINGS_ROWS
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let content = format!("{:<18}{}", row.label(), settings_value(settings, *row));
            let style = if idx == selected {
                Style::default().fg(palette.bg).bg(palette.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.fg)
            };
            ListItem::new(content).style(style)
        })
        .collect();

    let block = palette.block(" Settings ").style(palette.base());
    frame.render_widget(List::new(items).block(block), popup);
}
