//! Rendering of table shapes into escaped cell grids.

use crate::constants::EMPTY_CELL;
use crate::format::escape_html;
use crate::record::TableGrid;
use crate::Table;

/// Renders a table into a rectangular grid.
///
/// Cell text is trimmed and escaped; empty cells become [`EMPTY_CELL`]. Rows that
/// do not match the grid's column count are padded or truncated.
pub fn render_table(table: &Table) -> TableGrid {
    let columns = if table.columns > 0 {
        table.columns
    } else {
        table.rows.iter().map(|row| row.cells.len()).max().unwrap_or(0)
    };

    let mut lengths = vec![0usize; columns];
    let mut rows = Vec::with_capacity(table.rows.len());

    for row in &table.rows {
        if row.cells.len() != columns {
            log::debug!("table row has {} cells, grid has {} columns", row.cells.len(), columns);
        }

        let mut cells = Vec::with_capacity(columns);
        for column in 0..columns {
            let text = row.cells.get(column).map(|cell| cell.text()).unwrap_or_default();
            let text = text.trim();

            lengths[column] = lengths[column].max(text.chars().count());
            if text.is_empty() {
                cells.push(EMPTY_CELL.to_string());
            } else {
                cells.push(escape_html(text));
            }
        }
        rows.push(cells);
    }

    TableGrid { rows, column_widths: column_widths(&lengths) }
}

/// Converts the longest text per column into width percentages summing to 100.
/// Columns are equally wide when every column is empty.
pub fn column_widths(lengths: &[usize]) -> Vec<f64> {
    if lengths.is_empty() {
        return Vec::new();
    }

    let total: usize = lengths.iter().sum();
    if total == 0 {
        let equal = 100.0 / lengths.len() as f64;
        return vec![equal; lengths.len()];
    }

    lengths.iter().map(|&length| length as f64 / total as f64 * 100.0).collect()
}
