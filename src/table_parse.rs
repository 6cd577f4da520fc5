/// Splits a layout line into cells on tabs or runs of two or more spaces.
///
/// Single spaces stay inside a cell, so `"03/01/2024  COFFEE SHOP  $4.50"`
/// yields three cells.
pub(crate) fn split_line_into_cells(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut pending_spaces = 0_usize;

    let flush = |current: &mut String, cells: &mut Vec<String>| {
        if !current.is_empty() {
            cells.push(std::mem::take(current));
        }
    };

    for ch in line.trim().chars() {
        if ch == '\t' {
            pending_spaces = 0;
            flush(&mut current, &mut cells);
        } else if ch.is_whitespace() {
            pending_spaces += 1;
        } else {
            match pending_spaces {
                0 => {}
                1 => current.push(' '),
                _ => flush(&mut current, &mut cells),
            }
            pending_spaces = 0;
            current.push(ch);
        }
    }
    flush(&mut current, &mut cells);

    cells
}

pub(crate) fn soft_split_line_into_cells(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

/// Cells of one candidate table line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LineCells {
    pub cells: Vec<String>,
    /// Cells came from the whitespace split, so their positions are only
    /// trustworthy when the count matches the header.
    pub soft: bool,
}

/// Cells for table detection: the layout split, or the whitespace split for
/// short, numeric-looking lines that lost their column padding.
pub(crate) fn row_cells(line: &str, min_cols: usize) -> LineCells {
    let cells = split_line_into_cells(line);
    if cells.len() >= min_cols {
        return LineCells { cells, soft: false };
    }

    let soft_cells = soft_split_line_into_cells(line);
    let has_numeric = soft_cells
        .iter()
        .any(|cell| cell.chars().any(|ch| ch.is_ascii_digit()));
    let looks_like_sentence = line
        .trim_end()
        .ends_with(|ch: char| matches!(ch, '.' | '!' | '?'));

    if soft_cells.len() >= min_cols
        && !looks_like_sentence
        && (has_numeric || soft_cells.len() <= 6)
    {
        LineCells {
            cells: soft_cells,
            soft: true,
        }
    } else {
        LineCells { cells, soft: false }
    }
}
