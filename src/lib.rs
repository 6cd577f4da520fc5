//! Best-effort extraction of credit-card statement data from PDFs.
//!
//! [`parse_statement`] opens the document, reads page text and table grids,
//! and assembles a [`StatementRecord`]. Only an unopenable document is an
//! error; every field the heuristics cannot find is simply left empty.

mod amount;
mod csv_out;
mod dates;
mod error;
mod extract;
mod issuer;
mod matchers;
mod model;
mod options;
mod pdf_reader;
mod statement;
mod table_detect;
mod table_parse;
mod transactions;
mod warning;

use std::path::Path;

pub use amount::{normalize_cell_amount, strip_currency};
pub use csv_out::{transactions_to_csv_string, write_transactions_csv};
pub use dates::{parse_fuzzy_date, to_iso};
pub use error::ExtractError;
pub use extract::extract_document;
pub use issuer::{ISSUER_ALIASES, Issuer, IssuerProfile, UNKNOWN_ISSUER, resolve_issuer};
pub use matchers::{card_last4, first_match, payment_due_date, total_balance};
pub use model::{
    ExtractedDocument, PageText, StatementRecord, TableGrid, TransactionDate, TransactionRow,
};
pub use options::{ExtractOptions, PageSelection};
pub use statement::{SNIPPET_CHARS, assemble_statement};
pub use transactions::{reconcile_transactions, transactions_from_tables, transactions_from_text};
pub use warning::{ExtractWarning, WarningCode as ExtractWarningCode};

/// Parses one statement held in memory with default options.
///
/// # Errors
///
/// Returns [`ExtractError::PdfLoad`] when the bytes are not a readable PDF.
pub fn parse_statement(input_pdf: &[u8]) -> Result<StatementRecord, ExtractError> {
    parse_statement_with_options(input_pdf, &ExtractOptions::default())
}

/// # Errors
///
/// Fails when the PDF cannot be opened or the options are invalid.
pub fn parse_statement_with_options(
    input_pdf: &[u8],
    options: &ExtractOptions,
) -> Result<StatementRecord, ExtractError> {
    let document = extract_document(input_pdf, options)?;
    Ok(assemble_statement(&document))
}

/// Reads a statement from disk. The extracted document is returned alongside
/// the record so callers can report extraction warnings.
///
/// # Errors
///
/// Fails when the file cannot be read or is not a readable PDF.
pub fn parse_statement_file(
    input_pdf: &Path,
    options: &ExtractOptions,
) -> Result<(StatementRecord, ExtractedDocument), ExtractError> {
    let bytes = std::fs::read(input_pdf)?;
    let document = extract_document(&bytes, options)?;
    Ok((assemble_statement(&document), document))
}
