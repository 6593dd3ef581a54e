//! Tabular view of a matrix: one row per patient, one column per day.

use ratatui::{
    layout::{Constraint, Rect},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use inflammation_core::formatting::format_reading;
use inflammation_core::models::Matrix;

use crate::themes::Theme;

/// Width of one day column, in cells.
const DAY_COLUMN_WIDTH: u16 = 7;

/// Render `matrix` into `area` as a bordered table titled `title`.
///
/// `first_patient` is the index of the matrix's first row in the full
/// dataset, so a single selected patient keeps its real label.
pub fn render_matrix_table(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    matrix: &Matrix,
    first_patient: usize,
    decimals: usize,
    theme: &Theme,
) {
    let header_cells = std::iter::once(Cell::from("patient")).chain(
        (0..matrix.columns()).map(|day| Cell::from(format!("d{}", day + 1))),
    );
    let header = Row::new(header_cells).style(theme.table_header).height(1);

    let rows: Vec<Row> = matrix
        .iter_rows()
        .enumerate()
        .map(|(i, readings)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            let cells = std::iter::once(Cell::from(format!("{}", first_patient + i))).chain(
                readings
                    .iter()
                    .map(|v| Cell::from(format_reading(*v, decimals))),
            );
            Row::new(cells).style(style)
        })
        .collect();

    let widths = std::iter::once(Constraint::Length(8)).chain(
        (0..matrix.columns()).map(|_| Constraint::Length(DAY_COLUMN_WIDTH)),
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", title)),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

// ── Tests ──────────────────────────────────────────────────────────────────────
