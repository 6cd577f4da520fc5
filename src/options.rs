use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::ExtractError;

/// 1-based set of pages to read, parsed from specs like `1-3,5`.
/// Kept as sorted, non-overlapping ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSelection {
    ranges: Vec<RangeInclusive<u32>>,
}

impl PageSelection {
    fn from_ranges(mut ranges: Vec<RangeInclusive<u32>>) -> Self {
        ranges.sort_by_key(|range| *range.start());
        let mut merged: Vec<RangeInclusive<u32>> = Vec::with_capacity(ranges.len());
        for range in ranges {
            if let Some(last) = merged.last_mut()
                && *range.start() <= last.end().saturating_add(1)
            {
                let end = (*last.end()).max(*range.end());
                *last = *last.start()..=end;
                continue;
            }
            merged.push(range);
        }
        Self { ranges: merged }
    }

    #[must_use]
    pub fn contains(&self, page: u32) -> bool {
        self.ranges.iter().any(|range| range.contains(&page))
    }

    /// Number of selected pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ranges
            .iter()
            .map(|range| {
                usize::try_from(range.end() - range.start())
                    .map_or(usize::MAX, |span| span.saturating_add(1))
            })
            .fold(0, usize::saturating_add)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

fn parse_page_number(token: &str, what: &str) -> Result<u32, String> {
    let page: u32 = token
        .trim()
        .parse()
        .map_err(|_| format!("invalid {what}: '{}'", token.trim()))?;
    if page == 0 {
        return Err("pages are 1-based".to_string());
    }
    Ok(page)
}

impl FromStr for PageSelection {
    type Err = String;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let mut ranges = Vec::new();
        for token in spec.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            match token.split_once('-') {
                Some((start, end)) => {
                    let start = parse_page_number(start, "page range start")?;
                    let end = parse_page_number(end, "page range end")?;
                    if end < start {
                        return Err(format!(
                            "invalid range '{token}': end is smaller than start"
                        ));
                    }
                    ranges.push(start..=end);
                }
                None => {
                    let page = parse_page_number(token, "page number")?;
                    ranges.push(page..=page);
                }
            }
        }

        if ranges.is_empty() {
            return Err("page selection cannot be empty".to_string());
        }

        Ok(Self::from_ranges(ranges))
    }
}

/// Knobs for the extractor. The defaults read every page and accept
/// two-column tables, which is what [`crate::parse_statement`] uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    pub pages: Option<PageSelection>,
    pub min_cols: usize,
}

impl ExtractOptions {
    pub(crate) fn validate(&self) -> Result<(), ExtractError> {
        if self.min_cols < 2 {
            return Err(ExtractError::InvalidOption(
                "min_cols must be at least 2".to_string(),
            ));
        }
        if self.pages.as_ref().is_some_and(PageSelection::is_empty) {
            return Err(ExtractError::InvalidPageSelection(
                "page selection cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            pages: None,
            min_cols: 2,
        }
    }
}
