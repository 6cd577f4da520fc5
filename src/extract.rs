use tracing::debug;

use crate::error::ExtractError;
use crate::model::{ExtractedDocument, PageText, TableGrid};
use crate::options::ExtractOptions;
use crate::pdf_reader::read_pdf_pages_from_bytes;
use crate::table_detect::detect_tables_in_page;
use crate::warning::{ExtractWarning, WarningCode};

fn join_page_text(pages: &[PageText]) -> String {
    pages
        .iter()
        .map(|page| page.text.as_str())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn detect_tables(
    pages: &[PageText],
    min_cols: usize,
    warnings: &mut Vec<ExtractWarning>,
) -> Vec<TableGrid> {
    let mut tables = Vec::new();
    for page in pages {
        if page.text.trim().is_empty() {
            warnings.push(
                ExtractWarning::new(
                    WarningCode::PageTablesUnavailable,
                    "page has no text to detect tables in",
                )
                .with_page(page.page_number),
            );
            continue;
        }

        let found = detect_tables_in_page(page, min_cols);
        debug!(page = page.page_number, tables = found.len(), "detected table grids");
        tables.extend(found);
    }

    if tables.is_empty() {
        warnings.push(ExtractWarning::new(
            WarningCode::NoTablesDetected,
            "no table grids were detected in the selected pages",
        ));
    }

    tables
}

/// Pulls page text and table grids out of a PDF held in memory.
///
/// # Errors
///
/// Fails when the bytes cannot be opened as a PDF, when the options are
/// invalid, or when the page selection leaves nothing to read.
pub fn extract_document(
    input_pdf: &[u8],
    options: &ExtractOptions,
) -> Result<ExtractedDocument, ExtractError> {
    options.validate()?;

    let (pages, mut warnings) = read_pdf_pages_from_bytes(input_pdf, options.pages.as_ref())?;
    let tables = detect_tables(&pages, options.min_cols, &mut warnings);
    let text = join_page_text(&pages);

    for warning in &warnings {
        debug!(code = ?warning.code, page = ?warning.page, "{}", warning.message);
    }

    Ok(ExtractedDocument {
        pages,
        text,
        tables,
        warnings,
    })
}
