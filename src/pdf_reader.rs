use std::collections::BTreeMap;
use std::panic::{AssertUnwindSafe, catch_unwind};

use encoding_rs::UTF_16BE;
use lopdf::content::Content;
use lopdf::{Document, Object, ObjectId};
use tracing::debug;

use crate::error::ExtractError;
use crate::model::PageText;
use crate::options::PageSelection;
use crate::table_parse::{soft_split_line_into_cells, split_line_into_cells};
use crate::warning::{ExtractWarning, WarningCode};

const FORM_FEED: char = '\u{000C}';

fn split_text_into_pages(raw_text: &str) -> Vec<String> {
    let mut pages = raw_text.split(FORM_FEED).map(str::to_string).collect::<Vec<_>>();
    if pages.last().is_some_and(String::is_empty) {
        pages.pop();
    }
    pages
}

fn looks_decoding_broken(text: &str) -> bool {
    let total = text.chars().count();
    if total == 0 {
        return false;
    }

    let replacement = text.matches('\u{FFFD}').count();
    let control = text
        .chars()
        .filter(|ch| ch.is_control() && !matches!(ch, '\n' | '\r' | '\t'))
        .count();

    text.contains("?Identity-H Unimplemented?") || replacement * 8 > total || control * 5 > total
}

fn decode_pdf_bytes(encoding: Option<&str>, bytes: &[u8]) -> String {
    let decoded = Document::decode_text(encoding, bytes);
    if !looks_decoding_broken(&decoded) {
        return decoded;
    }

    let has_bom = bytes.starts_with(&[0xFE, 0xFF]);
    let wide_encoding = encoding.is_some_and(|name| {
        let lower = name.to_ascii_lowercase();
        ["utf16", "ucs2", "identity-h", "unicode"]
            .iter()
            .any(|hint| lower.contains(hint))
    });

    if has_bom || wide_encoding {
        let payload = if has_bom { &bytes[2..] } else { bytes };
        let (utf16, had_errors) = UTF_16BE.decode_without_bom_handling(payload);
        if !had_errors && !utf16.is_empty() {
            return utf16.into_owned();
        }
    }

    String::from_utf8_lossy(bytes).into_owned()
}

/// Ranks competing text renderings of the same page. Statements are mostly
/// columnar rows with dates and amounts, so those lines weigh the most.
fn extraction_quality_score(text: &str) -> i64 {
    if text.trim().is_empty() {
        return i64::MIN / 4;
    }

    let mut non_empty_lines = 0_i64;
    let mut multi_cell_lines = 0_i64;
    let mut money_or_date_lines = 0_i64;

    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        non_empty_lines += 1;

        if split_line_into_cells(line).len() >= 2 || soft_split_line_into_cells(line).len() >= 3 {
            multi_cell_lines += 1;
        }

        let has_digit = line.chars().any(|ch| ch.is_ascii_digit());
        if has_digit && (line.contains('/') || line.contains('.')) {
            money_or_date_lines += 1;
        }
    }

    let broken_penalty = if looks_decoding_broken(text) { 800 } else { 0 };
    multi_cell_lines * 50 + money_or_date_lines * 15 + non_empty_lines - broken_penalty
}

fn extract_text_from_page_content(document: &Document, page_id: ObjectId) -> Option<String> {
    fn collect_text(text: &mut String, encoding: Option<&str>, operands: &[Object]) {
        for operand in operands {
            match operand {
                Object::String(bytes, _) => text.push_str(&decode_pdf_bytes(encoding, bytes)),
                Object::Array(items) => collect_text(text, encoding, items),
                // Large negative kerning in a TJ array is a visual word gap.
                Object::Integer(value) if *value < -100 => text.push(' '),
                Object::Real(value) if *value < -100.0 => text.push(' '),
                _ => {}
            }
        }
    }

    let raw_content = document.get_page_content(page_id).ok()?;
    let content = Content::decode(&raw_content).ok()?;
    let encodings = document
        .get_page_fonts(page_id)
        .into_iter()
        .map(|(name, font)| (name, font.get_font_encoding()))
        .collect::<BTreeMap<Vec<u8>, &str>>();

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_encoding = None;
    for operation in content.operations {
        match operation.operator.as_str() {
            "Tf" => {
                current_encoding = operation
                    .operands
                    .first()
                    .and_then(|operand| operand.as_name().ok())
                    .and_then(|font_name| encodings.get(font_name).copied());
            }
            "Tj" | "TJ" | "'" | "\"" => {
                collect_text(&mut current, current_encoding, &operation.operands);
            }
            "T*" | "Td" | "TD" | "ET" => {
                if !current.trim().is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                current.clear();
            }
            _ => {}
        }
    }

    if !current.trim().is_empty() {
        lines.push(current);
    }

    (!lines.is_empty()).then(|| lines.join("\n"))
}

/// Whole-document text from `pdf-extract`, which can panic on fonts it does
/// not understand.
fn pdf_extract_text(input_pdf: &[u8]) -> Option<String> {
    match catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(input_pdf))) {
        Ok(Ok(text)) => Some(text),
        Ok(Err(error)) => {
            debug!("pdf-extract failed: {error}");
            None
        }
        Err(_) => {
            debug!("pdf-extract panicked; continuing with lopdf text only");
            None
        }
    }
}

fn read_page_text(
    document: &Document,
    page_no: u32,
    page_id: ObjectId,
    pdf_extract_page: Option<&String>,
) -> Option<String> {
    let mut candidates = Vec::new();
    if let Some(text) = pdf_extract_page.filter(|text| !text.trim().is_empty()) {
        candidates.push(text.clone());
    }
    if let Some(text) = extract_text_from_page_content(document, page_id) {
        candidates.push(text);
    }
    match document.extract_text(&[page_no]) {
        Ok(text) if !text.trim().is_empty() => candidates.push(text),
        Ok(_) => {}
        Err(error) => debug!(page = page_no, "lopdf text extraction failed: {error}"),
    }

    candidates
        .into_iter()
        .max_by_key(|text| extraction_quality_score(text))
        .filter(|text| !text.trim().is_empty())
}

/// Reads the text of every selected page.
///
/// Only an unopenable container (or an empty selection) is an error. Pages
/// without extractable text come back with empty text and a warning.
pub(crate) fn read_pdf_pages_from_bytes(
    input_pdf: &[u8],
    page_selection: Option<&PageSelection>,
) -> Result<(Vec<PageText>, Vec<ExtractWarning>), ExtractError> {
    let document = Document::load_mem(input_pdf)?;
    let pages_map = document.get_pages();

    let whole_text = pdf_extract_text(input_pdf);
    let per_page = whole_text
        .as_deref()
        .map(split_text_into_pages)
        .filter(|pages| pages.len() == pages_map.len());

    let mut pages = Vec::new();
    let mut warnings = Vec::new();
    for (index, (page_no, page_id)) in pages_map.iter().enumerate() {
        if page_selection.is_some_and(|selection| !selection.contains(*page_no)) {
            continue;
        }

        let pdf_extract_page = per_page.as_ref().and_then(|texts| texts.get(index));
        let text = read_page_text(&document, *page_no, *page_id, pdf_extract_page)
            .unwrap_or_else(|| {
                debug!(page = page_no, "no extractable text on page");
                warnings.push(
                    ExtractWarning::new(WarningCode::PageTextUnavailable, "no extractable text")
                        .with_page(*page_no),
                );
                String::new()
            });

        pages.push(PageText {
            page_number: *page_no,
            text,
        });
    }

    if pages.is_empty() {
        return Err(ExtractError::NoPagesSelected);
    }

    // pdf-extract sometimes reads text that lopdf cannot, but without page
    // breaks we can only attach it when reading the whole document.
    let all_empty = pages.iter().all(|page| page.text.is_empty());
    if all_empty
        && page_selection.is_none()
        && per_page.is_none()
        && let Some(text) = whole_text.filter(|text| !text.trim().is_empty())
    {
        warnings.push(ExtractWarning::new(
            WarningCode::DocumentTextFallback,
            "page-level text was empty; using document-level text extraction",
        ));
        pages.truncate(1);
        pages[0].text = text.replace(FORM_FEED, "\n");
    }

    Ok((pages, warnings))
}
