use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of the line-number gutter, including its separator
pub const GUTTER_WIDTH: u16 = 5;

/// Screen regions of the playground
pub struct AppLayout {
    pub header_area: Rect,
    pub editor_area: Rect,
    pub results_area: Rect,
    pub metrics_area: Option<Rect>,
    pub status_area: Rect,
}

impl AppLayout {
    /// - Header: top row (language, theme, state)
    /// - Editor: 50% width (left), results: 50% width (right)
    /// - Metrics bar: one row, only when metrics are shown
    /// - Status bar: bottom row
    pub fn new(area: Rect, show_metrics: bool) -> Self {
        let metrics_height = if show_metrics { 1 } else { 0 };
        let vertical_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(metrics_height),
                Constraint::Length(1),
            ])
            .split(area);

        let horizontal_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(vertical_chunks[1]);

        Self {
            header_area: vertical_chunks[0],
            editor_area: horizontal_chunks[0],
            results_area: horizontal_chunks[1],
            metrics_area: show_metrics.then_some(vertical_chunks[2]),
            status_area: vertical_chunks[3],
        }
    }
}

/// Centered rectangle covering `percent_x` by `percent_y` of `area`
pub fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
