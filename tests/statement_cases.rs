use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use regex::Regex;

use statement_lens::{
    ExtractedDocument, StatementRecord, TableGrid, TransactionDate, TransactionRow,
    assemble_statement,
};

fn strings(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|cell| (*cell).to_string()).collect()
}

fn grid(header: &[&str], rows: &[&[&str]]) -> TableGrid {
    TableGrid {
        page: 1,
        header: strings(header),
        rows: rows.iter().map(|row| strings(row)).collect(),
    }
}

fn assemble(text: &str, tables: Vec<TableGrid>) -> StatementRecord {
    assemble_statement(&ExtractedDocument::from_parts(text, tables))
}

fn parsed(y: i32, m: u32, d: u32) -> TransactionDate {
    TransactionDate::Parsed(NaiveDate::from_ymd_opt(y, m, d).expect("valid date"))
}

#[test]
fn new_balance_is_normalized() {
    let record = assemble("Summary\nNew Balance: $1,234.56\n", Vec::new());
    assert_eq!(record.total_balance.as_deref(), Some("1234.56"));
}

#[test]
fn chase_due_date_is_iso() {
    let record = assemble("Chase\nDue Date: 03/15/2024\n", Vec::new());
    assert_eq!(record.issuer, "Chase");
    assert_eq!(record.payment_due_date.as_deref(), Some("2024-03-15"));
    assert_eq!(record.card_variant.as_deref(), Some("Chase Card"));
}

#[test]
fn single_text_line_becomes_one_transaction() {
    let record = assemble("03/01/2024 COFFEE SHOP $4.50", Vec::new());
    assert_eq!(
        record.transactions,
        vec![TransactionRow {
            date: parsed(2024, 3, 1),
            description: "COFFEE SHOP".to_string(),
            amount: Some("4.50".to_string()),
        }]
    );
}

#[test]
fn empty_document_gives_empty_unknown_record() {
    let record = assemble("", Vec::new());
    assert_eq!(
        record,
        StatementRecord {
            issuer: "Unknown".to_string(),
            card_last4: None,
            card_variant: None,
            total_balance: None,
            payment_due_date: None,
            billing_cycle: None,
            transactions: Vec::new(),
            raw_text_snippet: None,
        }
    );
}

#[test]
fn merchant_charge_table_maps_to_canonical_roles() {
    let tables = vec![grid(
        &["Trans Date", "Merchant", "Charge"],
        &[&["03/01/2024", "COFFEE SHOP", "$4.50"]],
    )];
    let record = assemble("", tables);
    assert_eq!(
        record.transactions,
        vec![TransactionRow {
            date: parsed(2024, 3, 1),
            description: "COFFEE SHOP".to_string(),
            amount: Some("4.50".to_string()),
        }]
    );
}

#[test]
fn unknown_issuer_has_no_variant_or_cycle() {
    let text = "Acme Credit Union\nStatement period: January 5, 2024 - February 4, 2024\n";
    let record = assemble(text, Vec::new());
    assert_eq!(record.issuer, "Unknown");
    assert_eq!(record.card_variant, None);
    assert_eq!(record.billing_cycle, None);
}

#[test]
fn extracted_amounts_are_plain_two_decimal_numbers() {
    let amount_re = Regex::new(r"^-?\d+\.\d{2}$").expect("valid regex");
    let text = "01/02/2024 RENT -$1,500.00\n01/03/2024 GAS 40.1\nposted 01/04/2024 REFUND $12,345.67";
    let tables = vec![grid(
        &["Date", "Description", "Amount"],
        &[
            &["01/05/2024", "A", "$1,000"],
            &["01/06/2024", "B", "(3.5)"],
            &["01/07/2024", "C", "USD 7.25"],
        ],
    )];

    for record in [assemble(text, Vec::new()), assemble("", tables)] {
        assert!(!record.transactions.is_empty());
        for row in &record.transactions {
            let amount = row.amount.as_deref().expect("amount");
            assert!(amount_re.is_match(amount), "bad amount {amount:?}");
        }
    }
}

#[test]
fn qualifying_table_excludes_text_rows() {
    let text = "03/01/2024 COFFEE SHOP $4.50\n03/02/2024 BAKERY $3.00";
    let tables = vec![grid(&["Post Date", "Amount"], &[&["03/09/2024", "9.00"]])];
    let record = assemble(text, tables);
    assert_eq!(record.transactions.len(), 1);
    assert_eq!(record.transactions[0].date, parsed(2024, 3, 9));
}

#[test]
fn due_date_phrase_order_ignores_text_position() {
    let text = "Payment Due: 04/01/2024\nLate fee applies after the Due Date: 03/15/2024";
    let record = assemble(text, Vec::new());
    assert_eq!(record.payment_due_date.as_deref(), Some("2024-03-15"));
}

#[test]
fn issuer_bundle_supplies_variant_and_cycle() {
    let text = "American Express Gold Card\nPeriod Covered: January 5, 2024 - February 4, 2024\nNew Balance $89.10";
    let record = assemble(text, Vec::new());
    assert_eq!(record.issuer, "American Express");
    assert_eq!(record.card_variant.as_deref(), Some("Gold Card"));
    assert_eq!(
        record.billing_cycle.as_deref(),
        Some("January 5, 2024 - February 4, 2024")
    );
    assert_eq!(record.total_balance.as_deref(), Some("89.10"));
}

#[test]
fn assembly_is_deterministic() {
    let text = "Capital One Venture Card\nNew Balance: $10.00\n03/01/2024 COFFEE SHOP $4.50";
    let first = assemble(text, Vec::new());
    let second = assemble(text, Vec::new());
    assert_eq!(first, second);
    assert_eq!(first.card_variant.as_deref(), Some("Venture"));
}
