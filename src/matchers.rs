//! Generic summary-field matchers.
//!
//! Each field has an ordered list of candidate patterns. The first pattern
//! that matches decides the value; later patterns are never consulted, even
//! when they would match earlier in the text.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use crate::dates::{parse_fuzzy_date, to_iso};

pub(crate) fn compile_patterns(sources: &[&str], case_insensitive: bool) -> Vec<Regex> {
    sources
        .iter()
        .map(|source| {
            RegexBuilder::new(source)
                .case_insensitive(case_insensitive)
                .build()
                .expect("valid field pattern")
        })
        .collect()
}

static CARD_MASKED: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile_patterns(&[r"(\*{2,4}|X{2,4}|#){0,4}\s*(\d{4})\b"], false));

static CARD_LABELLED: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile_patterns(&[r"(?:Account|Card).*?(\d{4})"], true));

static TOTAL_BALANCE: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(
        &[
            r"New\s+Balance[:\s$]*([\d,]+\.\d{2})",
            r"Total\s+Balance[:\s$]*([\d,]+\.\d{2})",
            r"Amount\s+Due[:\s$]*([\d,]+\.\d{2})",
            r"Statement\s+Balance[:\s$]*([\d,]+\.\d{2})",
        ],
        true,
    )
});

static DUE_DATE: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(
        &[
            r"Payment\s+Due\s+Date[:\s]*([A-Za-z0-9,/\- \t]+)",
            r"Due\s+Date[:\s]*([A-Za-z0-9,/\- \t]+)",
            r"Payment\s+Due[:\s]*([A-Za-z0-9,/\- \t]+)",
        ],
        true,
    )
});

static DUE_NEARBY_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bDue\b[^\n]{0,40}?\b(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})\b")
        .expect("valid due-date fallback regex")
});

/// Returns the value of the first pattern that matches `text`.
///
/// The value is the first capture group with non-blank content, or the whole
/// match when every group is blank.
#[must_use]
pub fn first_match(patterns: &[Regex], text: &str) -> Option<String> {
    patterns.iter().find_map(|pattern| {
        let caps = pattern.captures(text)?;
        let group = caps
            .iter()
            .skip(1)
            .flatten()
            .map(|group| group.as_str().trim())
            .find(|value| !value.is_empty());
        let value = match group {
            Some(value) => value,
            None => caps.get(0)?.as_str().trim(),
        };
        Some(value.to_string())
    })
}

/// Last four card digits: a (possibly masked) four-digit run, then digits
/// following "Account" or "Card".
#[must_use]
pub fn card_last4(text: &str) -> Option<String> {
    CARD_MASKED
        .iter()
        .chain(CARD_LABELLED.iter())
        .find_map(|pattern| {
            let caps = pattern.captures(text)?;
            let digits = caps.iter().skip(1).flatten().last()?;
            Some(digits.as_str().to_string())
        })
}

#[must_use]
pub fn total_balance(text: &str) -> Option<String> {
    first_match(&TOTAL_BALANCE, text).map(|value| value.replace(',', ""))
}

/// Payment due date as `YYYY-MM-DD`, or the raw captured text when it does not
/// read as a date.
#[must_use]
pub fn payment_due_date(text: &str) -> Option<String> {
    if let Some(raw) = first_match(&DUE_DATE, text) {
        return Some(parse_fuzzy_date(&raw).map_or(raw, to_iso));
    }

    let raw = DUE_NEARBY_DATE.captures(text)?.get(1)?.as_str().to_string();
    Some(parse_fuzzy_date(&raw).map_or(raw, to_iso))
}

#[cfg(test)]
mod tests {
    use super::{card_last4, compile_patterns, first_match, payment_due_date, total_balance};

    #[test]
    fn first_pattern_in_list_wins_over_text_position() {
        let patterns = compile_patterns(&[r"second:\s*(\w+)", r"first:\s*(\w+)"], true);
        let text = "first: alpha\nsecond: beta";
        assert_eq!(first_match(&patterns, text).as_deref(), Some("beta"));
    }

    #[test]
    fn blank_groups_fall_back_to_whole_match() {
        let patterns = compile_patterns(&[r"Total(\s*)"], true);
        assert_eq!(first_match(&patterns, "Total  ").as_deref(), Some("Total"));
    }

    #[test]
    fn masked_card_digits() {
        assert_eq!(card_last4("Card number ****1234").as_deref(), Some("1234"));
        assert_eq!(card_last4("XXXX XXXX XXXX 9876").as_deref(), Some("9876"));
    }

    #[test]
    fn labelled_card_digits_when_no_standalone_run() {
        assert_eq!(card_last4("Card ref 1234AB").as_deref(), Some("1234"));
        assert_eq!(card_last4("No digits here"), None);
    }

    #[test]
    fn balance_prefers_new_balance_and_strips_commas() {
        let text = "Statement Balance: $9.99\nNew Balance: $1,234.56";
        assert_eq!(total_balance(text).as_deref(), Some("1234.56"));
        assert_eq!(total_balance("Amount Due 45.00").as_deref(), Some("45.00"));
        assert_eq!(total_balance("Balance unknown"), None);
    }

    #[test]
    fn due_date_phrasings_follow_pattern_order() {
        let text = "Payment Due: 04/01/2024\nDue Date: 03/15/2024";
        assert_eq!(payment_due_date(text).as_deref(), Some("2024-03-15"));
    }

    #[test]
    fn due_date_keeps_unparsable_text() {
        assert_eq!(
            payment_due_date("Payment Due Date: upon receipt").as_deref(),
            Some("upon receipt")
        );
    }

    #[test]
    fn due_date_falls_back_to_nearby_date_literal() {
        let text = "Amount is due (see terms) 12/15/2024";
        assert_eq!(payment_due_date(text).as_deref(), Some("2024-12-15"));

        let text = "Due notice: this line has plenty of words before the date 12/15/2024";
        assert_eq!(payment_due_date(text), None);
    }
}
