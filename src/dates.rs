//! Best-effort date parsing for statement text.
//!
//! All numeric dates are read month-first (`03/04/2024` is March 4th). A
//! string without a year never parses.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::{Captures, Regex};

const MONTH_NAMES: &str = r"(jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)";

static ISO_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{4})[-/](\d{1,2})[-/](\d{1,2})\b").expect("valid iso date regex")
});

static NUMERIC_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{1,2})[/-](\d{1,2})[/-](\d{4}|\d{2})\b").expect("valid numeric date regex")
});

static MONTH_FIRST_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b{MONTH_NAMES}\.?\s+(\d{{1,2}})(?:st|nd|rd|th)?,?\s+(\d{{4}})\b"
    ))
    .expect("valid month-first date regex")
});

static DAY_FIRST_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b(\d{{1,2}})(?:st|nd|rd|th)?\s+{MONTH_NAMES}\.?,?\s+(\d{{4}})\b"
    ))
    .expect("valid day-first date regex")
});

fn month_from_name(name: &str) -> Option<u32> {
    let prefix = name.get(..3)?.to_ascii_lowercase();
    let month = match prefix.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

fn expand_year(raw: &str) -> Option<i32> {
    let year: i32 = raw.parse().ok()?;
    Some(match raw.len() {
        2 if year < 69 => 2000 + year,
        2 => 1900 + year,
        _ => year,
    })
}

fn number(caps: &Captures<'_>, index: usize) -> Option<u32> {
    caps.get(index)?.as_str().parse().ok()
}

fn first_valid<F>(re: &Regex, input: &str, build: F) -> Option<NaiveDate>
where
    F: Fn(&Captures<'_>) -> Option<NaiveDate>,
{
    re.captures_iter(input).find_map(|caps| build(&caps))
}

/// Finds the first recognizable calendar date anywhere in `input`.
#[must_use]
pub fn parse_fuzzy_date(input: &str) -> Option<NaiveDate> {
    first_valid(&ISO_DATE, input, |caps| {
        NaiveDate::from_ymd_opt(caps[1].parse().ok()?, number(caps, 2)?, number(caps, 3)?)
    })
    .or_else(|| {
        first_valid(&NUMERIC_DATE, input, |caps| {
            NaiveDate::from_ymd_opt(expand_year(&caps[3])?, number(caps, 1)?, number(caps, 2)?)
        })
    })
    .or_else(|| {
        first_valid(&MONTH_FIRST_DATE, input, |caps| {
            NaiveDate::from_ymd_opt(
                caps[3].parse().ok()?,
                month_from_name(&caps[1])?,
                number(caps, 2)?,
            )
        })
    })
    .or_else(|| {
        first_valid(&DAY_FIRST_DATE, input, |caps| {
            NaiveDate::from_ymd_opt(
                caps[3].parse().ok()?,
                month_from_name(&caps[2])?,
                number(caps, 1)?,
            )
        })
    })
}

#[must_use]
pub fn to_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
