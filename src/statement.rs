use tracing::info;

use crate::issuer::{UNKNOWN_ISSUER, resolve_issuer};
use crate::matchers::{card_last4, payment_due_date, total_balance};
use crate::model::{ExtractedDocument, StatementRecord};
use crate::transactions::reconcile_transactions;

pub const SNIPPET_CHARS: usize = 500;
const SNIPPET_MARKER: &str = "...";

fn raw_text_snippet(text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }
    let head = text.chars().take(SNIPPET_CHARS).collect::<String>();
    Some(format!("{head}{SNIPPET_MARKER}"))
}

/// Builds the statement record from extracted content. Never fails: anything
/// the heuristics cannot find is left empty.
#[must_use]
pub fn assemble_statement(document: &ExtractedDocument) -> StatementRecord {
    let text = document.text.as_str();
    let issuer = resolve_issuer(text);

    let (issuer_label, card_variant, billing_cycle) = match issuer {
        Some(issuer) => {
            let profile = issuer.profile();
            (
                profile.label.to_string(),
                Some(profile.card_variant(text)),
                profile.billing_cycle(text),
            )
        }
        None => (UNKNOWN_ISSUER.to_string(), None, None),
    };

    let record = StatementRecord {
        issuer: issuer_label,
        card_last4: card_last4(text),
        card_variant,
        total_balance: total_balance(text),
        payment_due_date: payment_due_date(text),
        billing_cycle,
        transactions: reconcile_transactions(text, &document.tables),
        raw_text_snippet: raw_text_snippet(text),
    };

    info!(
        issuer = %record.issuer,
        transactions = record.transactions.len(),
        has_balance = record.total_balance.is_some(),
        has_due_date = record.payment_due_date.is_some(),
        "statement assembled"
    );

    record
}
