use crate::model::{PageText, TableGrid};
use crate::table_parse::{LineCells, row_cells};

fn is_numeric_cell(cell: &str) -> bool {
    cell.chars().any(|ch| ch.is_ascii_digit())
}

/// Column-title rows open a new grid even when they directly follow other
/// multi-cell lines, such as an address block above the activity table.
fn looks_like_header(cells: &[String]) -> bool {
    !cells.iter().any(|cell| is_numeric_cell(cell))
        && cells
            .iter()
            .any(|cell| cell.to_ascii_lowercase().contains("date"))
}

pub(crate) fn detect_tables_in_page(page: &PageText, min_cols: usize) -> Vec<TableGrid> {
    let mut tables = Vec::new();
    let mut current_rows: Vec<Vec<String>> = Vec::new();

    let flush_current = |rows: &mut Vec<Vec<String>>, tables: &mut Vec<TableGrid>| {
        if let Some(grid) = TableGrid::from_rows(page.page_number, std::mem::take(rows)) {
            tables.push(grid);
        }
    };

    for line in page.text.lines() {
        let LineCells { cells, soft } = row_cells(line, min_cols);
        if cells.len() < min_cols {
            flush_current(&mut current_rows, &mut tables);
            continue;
        }

        // A whitespace-split row that does not line up with the grid's first
        // row cannot be mapped onto its columns.
        let misaligned = soft
            && current_rows
                .first()
                .is_some_and(|first| first.len() != cells.len());
        if !current_rows.is_empty() && (misaligned || looks_like_header(&cells)) {
            flush_current(&mut current_rows, &mut tables);
        }
        current_rows.push(cells);
    }

    flush_current(&mut current_rows, &mut tables);
    tables
}
