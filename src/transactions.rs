//! Transaction list reconciliation.
//!
//! Two strategies run in order: the first table grid that looks like an
//! activity table, then a line-by-line scan of the document text. The first
//! one that yields any rows wins.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::amount::{normalize_cell_amount, strip_currency};
use crate::dates::parse_fuzzy_date;
use crate::model::{TableGrid, TransactionDate, TransactionRow};

const MIN_LINE_LEN: usize = 8;

static STRICT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})\s+(.+?)\s+(-?\$?\d{1,3}[,\d]*\.\d{2})$")
        .expect("valid strict transaction regex")
});

static LOOSE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,2}[/-]\d{1,2}[/-]\d{2,4}).*?(-?\$?\d{1,3}[,\d]*\.\d{2})$")
        .expect("valid loose transaction regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnRole {
    Date,
    Description,
    Amount,
}

/// Role of a header cell. Keywords are checked date, then description, then
/// amount, so "Trans Date" is a date column.
fn column_role(header: &str) -> Option<ColumnRole> {
    let lower = header.to_lowercase();
    let has_any = |keywords: &[&str]| keywords.iter().any(|keyword| lower.contains(keyword));

    if has_any(&["date"]) {
        Some(ColumnRole::Date)
    } else if has_any(&["description", "merchant", "trans"]) {
        Some(ColumnRole::Description)
    } else if has_any(&["amount", "charge", "debit", "credit"]) {
        Some(ColumnRole::Amount)
    } else {
        None
    }
}

fn is_activity_header(header: &[String]) -> bool {
    let lowered = header
        .iter()
        .map(|cell| cell.to_lowercase())
        .collect::<Vec<_>>();
    lowered.iter().any(|cell| cell.contains("date"))
        && lowered
            .iter()
            .any(|cell| ["amount", "charge", "credit"].iter().any(|k| cell.contains(k)))
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct ColumnMap {
    date: Option<usize>,
    description: Option<usize>,
    amount: Option<usize>,
}

impl ColumnMap {
    /// Leftmost column wins when several claim the same role.
    fn from_header(header: &[String]) -> Self {
        let mut map = Self::default();
        for (index, cell) in header.iter().enumerate() {
            let slot = match column_role(cell) {
                Some(ColumnRole::Date) => &mut map.date,
                Some(ColumnRole::Description) => &mut map.description,
                Some(ColumnRole::Amount) => &mut map.amount,
                None => continue,
            };
            slot.get_or_insert(index);
        }
        map
    }
}

fn cell(row: &[String], index: Option<usize>) -> Option<&str> {
    index
        .and_then(|index| row.get(index))
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}

fn transaction_date(raw: &str) -> TransactionDate {
    parse_fuzzy_date(raw).map_or_else(
        || TransactionDate::Raw(raw.to_string()),
        TransactionDate::Parsed,
    )
}

fn rows_from_grid(grid: &TableGrid, columns: ColumnMap) -> Vec<TransactionRow> {
    grid.rows
        .iter()
        .filter_map(|row| {
            let date = cell(row, columns.date);
            let amount = cell(row, columns.amount);
            if date.is_none() && amount.is_none() {
                return None;
            }

            Some(TransactionRow {
                date: transaction_date(date.unwrap_or_default()),
                description: cell(row, columns.description)
                    .unwrap_or_default()
                    .to_string(),
                amount: amount.and_then(normalize_cell_amount),
            })
        })
        .collect()
}

fn is_complete(row: &TransactionRow) -> bool {
    row.date.as_date().is_some() && row.amount.is_some()
}

/// Rows from the first grid whose header names a date and an amount column
/// and where at least one row reads as a dated amount. Later grids are
/// ignored even when they would also qualify.
#[must_use]
pub fn transactions_from_tables(tables: &[TableGrid]) -> Vec<TransactionRow> {
    for grid in tables {
        if !is_activity_header(&grid.header) {
            continue;
        }

        let columns = ColumnMap::from_header(&grid.header);
        if columns.date.is_none() || columns.amount.is_none() {
            debug!(page = grid.page, header = ?grid.header, "activity header without date/amount roles");
            continue;
        }

        let rows = rows_from_grid(grid, columns);
        if !rows.iter().any(is_complete) {
            debug!(
                page = grid.page,
                header = ?grid.header,
                "activity grid has no row with a date and an amount"
            );
            continue;
        }

        debug!(page = grid.page, rows = rows.len(), "using table grid for transactions");
        return rows;
    }

    Vec::new()
}

fn row_from_line(line: &str) -> Option<TransactionRow> {
    if let Some(caps) = STRICT_LINE.captures(line) {
        return Some(TransactionRow {
            date: transaction_date(&caps[1]),
            description: caps[2].trim().to_string(),
            amount: Some(strip_currency(&caps[3])),
        });
    }

    let caps = LOOSE_LINE.captures(line)?;
    let amount = caps.get(2)?;
    Some(TransactionRow {
        date: transaction_date(&caps[1]),
        description: line[..amount.start()].trim().to_string(),
        amount: Some(strip_currency(amount.as_str())),
    })
}

/// Rows from lines shaped like `date description amount`.
#[must_use]
pub fn transactions_from_text(text: &str) -> Vec<TransactionRow> {
    text.lines()
        .map(str::trim)
        .filter(|line| line.chars().count() >= MIN_LINE_LEN)
        .filter_map(row_from_line)
        .collect()
}

/// Table rows when any grid qualifies and yields rows, otherwise text rows.
#[must_use]
pub fn reconcile_transactions(text: &str, tables: &[TableGrid]) -> Vec<TransactionRow> {
    let from_tables = transactions_from_tables(tables);
    if !from_tables.is_empty() {
        return from_tables;
    }

    let from_text = transactions_from_text(text);
    debug!(rows = from_text.len(), "no usable table grid; scanned text lines");
    from_text
}
