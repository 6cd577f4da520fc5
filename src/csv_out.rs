use std::io::{self, Write};
use std::path::Path;
use std::string::FromUtf8Error;

use csv::{Writer, WriterBuilder};

use crate::error::ExtractError;
use crate::model::TransactionRow;

const HEADERS: [&str; 3] = ["date", "description", "amount"];

fn write_rows<W: Write>(
    writer: &mut Writer<W>,
    transactions: &[TransactionRow],
) -> Result<(), ExtractError> {
    writer.write_record(HEADERS)?;
    for row in transactions {
        writer.write_record([
            row.date.to_string().as_str(),
            row.description.as_str(),
            row.amount.as_deref().unwrap_or_default(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn invalid_utf8(error: &FromUtf8Error) -> ExtractError {
    ExtractError::Io(io::Error::new(
        io::ErrorKind::InvalidData,
        format!("CSV output is not valid UTF-8: {error}"),
    ))
}

/// Writes the transaction table as `date,description,amount` CSV.
///
/// # Errors
///
/// Fails when the file cannot be created or written.
pub fn write_transactions_csv(
    path: &Path,
    transactions: &[TransactionRow],
) -> Result<(), ExtractError> {
    let mut writer = WriterBuilder::new().from_path(path)?;
    write_rows(&mut writer, transactions)
}

/// Same as [`write_transactions_csv`], into a string.
///
/// # Errors
///
/// Fails only if the CSV writer itself errors.
pub fn transactions_to_csv_string(transactions: &[TransactionRow]) -> Result<String, ExtractError> {
    let mut writer = WriterBuilder::new().from_writer(Vec::<u8>::new());
    write_rows(&mut writer, transactions)?;

    let bytes = writer
        .into_inner()
        .map_err(|error| ExtractError::Io(error.into_error()))?;
    String::from_utf8(bytes).map_err(|error| invalid_utf8(&error))
}
