//! Amount cleanup shared by the text and table strategies.

/// Drops currency symbols and thousands separators from an amount matched by
/// a money pattern: `-$1,234.56` becomes `-1234.56`.
#[must_use]
pub fn strip_currency(raw: &str) -> String {
    raw.chars()
        .filter(|ch| !matches!(ch, '$' | ',') && !ch.is_whitespace())
        .collect()
}

/// Normalizes a free-form table cell to `-?\d+\.\d{2}`.
///
/// Everything except digits, `.` and `-` is removed first. A trailing `-`
/// (`12.00-`) or parentheses (`(12.00)`) mark a credit. Cells that do not
/// reduce to a single decimal with at most two fractional digits yield `None`.
#[must_use]
pub fn normalize_cell_amount(cell: &str) -> Option<String> {
    let trimmed = cell.trim();
    let parenthesized = trimmed.starts_with('(') && trimmed.ends_with(')');
    let kept: String = trimmed
        .chars()
        .filter(|ch| ch.is_ascii_digit() || matches!(ch, '.' | '-'))
        .collect();

    let (negative, unsigned) = match (kept.strip_prefix('-'), kept.strip_suffix('-')) {
        (Some(rest), _) => (true, rest),
        (None, Some(rest)) => (true, rest),
        (None, None) => (parenthesized, kept.as_str()),
    };

    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let valid_whole = !whole.is_empty() && whole.chars().all(|ch| ch.is_ascii_digit());
    let valid_fraction = fraction.len() <= 2 && fraction.chars().all(|ch| ch.is_ascii_digit());
    if !valid_whole || !valid_fraction {
        return None;
    }

    let sign = if negative { "-" } else { "" };
    Some(format!("{sign}{whole}.{fraction:0<2}"))
}
