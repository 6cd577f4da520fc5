use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

/// Builds a text PDF with one page per entry, one `Tj` line per string, set in
/// Courier so column padding survives extraction.
pub fn build_test_pdf(pages: &[Vec<&str>]) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let mut doc = Document::with_version("1.5");

    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut page_ids = Vec::new();
    for lines in pages {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 10.into()]),
            Operation::new("TL", vec![14.into()]),
            Operation::new("Td", vec![40.into(), 800.into()]),
        ];
        for (index, line) in lines.iter().enumerate() {
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            if index + 1 < lines.len() {
                operations.push(Operation::new("T*", vec![]));
            }
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        page_ids.push(doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        }));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids.iter().map(|id| (*id).into()).collect::<Vec<_>>(),
            "Count" => i64::try_from(page_ids.len())?,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

pub fn create_test_pdf(path: &Path, pages: &[Vec<&str>]) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::write(path, build_test_pdf(pages)?)?;
    Ok(())
}

pub fn unknown_issuer_statement() -> Vec<Vec<&'static str>> {
    vec![vec![
        "ACME CREDIT UNION VISA",
        "Account ****4321",
        "New Balance: $1,234.56",
        "Payment Due Date: 04/10/2024",
        "Activity for this period follows.",
        "03/01/2024 COFFEE SHOP $4.50",
    ]]
}

pub fn chase_statement_with_table() -> Vec<Vec<&'static str>> {
    vec![vec![
        "JPMorgan Chase Bank",
        "Account number: XXXX XXXX XXXX 9876",
        "Chase Freedom Unlimited Card",
        "Statement period: February 5, 2024 - March 4, 2024",
        "New Balance: $16.50",
        "Due Date: 03/15/2024",
        "Please review your account activity below.",
        "Trans Date  Merchant  Charge",
        "03/01/2024  COFFEE SHOP  $4.50",
        "03/02/2024  BOOK STORE  $12.00",
        "Thank you for your business.",
        "03/20/2024 NOT IN TABLE $99.99",
    ]]
}

pub fn single_spaced_statement() -> Vec<Vec<&'static str>> {
    vec![vec![
        "Acme Bank",
        "Date Description Amount",
        "03/01/2024 COFFEE SHOP $4.50",
        "03/02/2024 BOOK STORE $12.00",
    ]]
}

pub fn single_spaced_aligned_table() -> Vec<Vec<&'static str>> {
    vec![vec![
        "Activity for this period follows.",
        "Date Merchant Amount",
        "03/01/2024 COFFEE $4.50",
        "03/02/2024 BOOKS $12.00",
        "Thank you for your business.",
        "03/20/2024 NOT IN TABLE $99.99",
    ]]
}

pub fn unusable_activity_table() -> Vec<Vec<&'static str>> {
    vec![vec![
        "Post Date  Amount",
        "Pending  N/A",
        "Details follow.",
        "03/05/2024 GROCERY MART $23.10",
    ]]
}
