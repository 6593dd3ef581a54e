//! Line charts of per-day series, one panel per series.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use inflammation_core::formatting::{format_reading, value_bounds};
use inflammation_core::graph::GraphData;

use crate::themes::Theme;

/// Render every series in `data` as its own line chart, stacked vertically
/// below a one-line title.
pub fn render_graph(frame: &mut Frame, area: Rect, data: &GraphData, theme: &Theme) {
    if data.is_empty() {
        render_no_data(frame, area, theme);
        return;
    }

    let [title_area, charts_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);

    let title = data.title.as_deref().unwrap_or("Inflammation");
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(format!(" {title} "), theme.title),
            Span::styled("  (q to quit)", theme.dim),
        ])),
        title_area,
    );

    let n = data.len() as u32;
    let panels = Layout::vertical((0..n).map(|_| Constraint::Ratio(1, n))).split(charts_area);

    for (index, (series, panel)) in data.series.iter().zip(panels.iter()).enumerate() {
        let points = to_points(&series.values);
        render_series(
            frame,
            *panel,
            &series.label,
            &points,
            Style::default().fg(theme.series_color(index)),
            theme,
        );
    }
}

/// Placeholder shown when there is nothing to plot.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No inflammation data to plot", theme.warning)),
        Line::from(""),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(text).block(Block::default().borders(Borders::ALL).title(" Inflammation ")),
        area,
    );
}

/// `(day, value)` pairs with zero-based day indices.
pub fn to_points(values: &[f64]) -> Vec<(f64, f64)> {
    values
        .iter()
        .enumerate()
        .map(|(day, &v)| (day as f64, v))
        .collect()
}

/// Axis bounds for a series, padded so flat lines stay visible.
pub fn y_bounds(values: &[f64]) -> [f64; 2] {
    match value_bounds(values) {
        Some((lo, hi)) if hi > lo => [lo, hi],
        Some((lo, _)) => [lo - 1.0, lo + 1.0],
        None => [0.0, 1.0],
    }
}

fn render_series(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    points: &[(f64, f64)],
    style: Style,
    theme: &Theme,
) {
    let values: Vec<f64> = points.iter().map(|(_, y)| *y).collect();
    let [y_lo, y_hi] = y_bounds(&values);
    let x_hi = (points.len().saturating_sub(1)).max(1) as f64;

    let dataset = Dataset::default()
        .name(label.to_string())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(style)
        .data(points);

    let chart = Chart::new(vec![dataset])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {label} ")),
        )
        .x_axis(
            Axis::default()
                .title("day")
                .style(theme.axis)
                .bounds([0.0, x_hi])
                .labels(vec!["0".to_string(), format!("{}", x_hi as usize)]),
        )
        .y_axis(
            Axis::default()
                .style(theme.axis)
                .bounds([y_lo, y_hi])
                .labels(vec![format_reading(y_lo, 2), format_reading(y_hi, 2)]),
        );

    frame.render_widget(chart, area);
}

// ── Tests ──────────────────────────────────────────────────────────────────────
