use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use crate::warning::ExtractWarning;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    pub page_number: u32,
    pub text: String,
}

/// A header row plus data rows detected on one page.
///
/// Columns are positional; header names are whatever the issuer printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableGrid {
    pub page: u32,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableGrid {
    /// Splits raw rows into header and data rows. Grids without data rows are
    /// not tables.
    #[must_use]
    pub fn from_rows(page: u32, mut rows: Vec<Vec<String>>) -> Option<Self> {
        if rows.len() < 2 {
            return None;
        }
        let data = rows.split_off(1);
        let header = rows.pop()?;
        Some(Self {
            page,
            header,
            rows: data,
        })
    }
}

/// Everything the extractor pulled out of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedDocument {
    pub pages: Vec<PageText>,
    /// Page texts joined with `\n`, in page order.
    pub text: String,
    pub tables: Vec<TableGrid>,
    pub warnings: Vec<ExtractWarning>,
}

impl ExtractedDocument {
    /// Builds a document from already extracted text and tables.
    #[must_use]
    pub fn from_parts(text: impl Into<String>, tables: Vec<TableGrid>) -> Self {
        let text = text.into();
        let pages = if text.is_empty() {
            Vec::new()
        } else {
            vec![PageText {
                page_number: 1,
                text: text.clone(),
            }]
        };
        Self {
            pages,
            text,
            tables,
            warnings: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionDate {
    Parsed(NaiveDate),
    Raw(String),
}

impl TransactionDate {
    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Parsed(date) => Some(*date),
            Self::Raw(_) => None,
        }
    }
}

impl Display for TransactionDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parsed(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Raw(raw) => f.write_str(raw),
        }
    }
}

impl Serialize for TransactionDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionRow {
    pub date: TransactionDate,
    pub description: String,
    /// Signed, two fractional digits, no currency symbol or separators.
    pub amount: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementRecord {
    pub issuer: String,
    pub card_last4: Option<String>,
    pub card_variant: Option<String>,
    pub total_balance: Option<String>,
    pub payment_due_date: Option<String>,
    pub billing_cycle: Option<String>,
    pub transactions: Vec<TransactionRow>,
    pub raw_text_snippet: Option<String>,
}
