//! Delimited text format for transaction history.
//!
//! The layout is fixed: a `Type,Category,Amount,Description,Date` header and
//! one unquoted row per transaction. Commas in descriptions are written as
//! semicolons and turned back into commas on import, so a literal semicolon
//! comes back as a comma. Line breaks in descriptions are written as spaces
//! and do not come back. Category names cannot hold either.

use std::io::{Read, Write};

use chrono::NaiveDate;
use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, WriterBuilder};

use crate::errors::{LedgerError, Result};
use crate::ledger::{Category, Transaction, TransactionType};

pub const CSV_HEADER: &str = "Type,Category,Amount,Description,Date";
pub const DATE_FORMAT: &str = "%Y-%m-%d";
const FIELD_COUNT: usize = 5;

/// One parsed data row.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvRecord {
    pub kind: TransactionType,
    pub category: String,
    pub amount: f64,
    pub description: String,
    pub date: NaiveDate,
}

/// Per-row import outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum CsvRow {
    Parsed(CsvRecord),
    Skipped { line: u64, reason: String },
}

/// Writes the header and one row per transaction.
pub fn write_transactions<W: Write>(writer: W, transactions: &[Transaction]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);
    writer.write_record(CSV_HEADER.split(','))?;
    for txn in transactions {
        let amount = format!("{:.2}", txn.amount());
        let description = txn.description().replace(',', ";").replace(['\r', '\n'], " ");
        let date = txn.date().format(DATE_FORMAT).to_string();
        writer.write_record([
            txn.kind().as_str(),
            txn.category().name(),
            amount.as_str(),
            description.as_str(),
            date.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads every row after the header.
///
/// The whole input is rejected only when the header line is missing or differs.
pub fn read_transactions<R: Read>(reader: R) -> Result<Vec<CsvRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);
    let mut records = reader.records();

    let header = match records.next() {
        Some(record) => record?,
        None => return Err(invalid_header()),
    };
    if header.iter().collect::<Vec<_>>().join(",") != CSV_HEADER {
        return Err(invalid_header());
    }

    let mut rows = Vec::new();
    for result in records {
        let row = match result {
            Ok(record) => {
                let line = record.position().map_or(0, |pos| pos.line());
                match parse_record(&record) {
                    Ok(parsed) => CsvRow::Parsed(parsed),
                    Err(reason) => CsvRow::Skipped { line, reason },
                }
            }
            Err(err) if matches!(err.kind(), csv::ErrorKind::Utf8 { .. }) => CsvRow::Skipped {
                line: err.position().map_or(0, |pos| pos.line()),
                reason: err.to_string(),
            },
            Err(err) => return Err(err.into()),
        };
        rows.push(row);
    }
    Ok(rows)
}

fn parse_record(record: &StringRecord) -> std::result::Result<CsvRecord, String> {
    if record.len() != FIELD_COUNT {
        return Err(format!(
            "expected {FIELD_COUNT} fields, found {}",
            record.len()
        ));
    }
    let field = |index: usize| record.get(index).unwrap_or_default().trim();

    let kind = field(0)
        .parse::<TransactionType>()
        .map_err(|err| err.to_string())?;
    let category = Category::new(field(1)).map_err(|err| err.to_string())?;
    let amount = field(2)
        .parse::<f64>()
        .map_err(|err| format!("bad amount `{}`: {err}", field(2)))?;
    if !(amount.is_finite() && amount > 0.0) {
        return Err(format!("amount must be positive, got {amount}"));
    }
    let description = field(3).replace(';', ",");
    let date = NaiveDate::parse_from_str(field(4), DATE_FORMAT)
        .map_err(|err| format!("bad date `{}`: {err}", field(4)))?;

    Ok(CsvRecord {
        kind,
        category: category.name().to_string(),
        amount,
        description,
        date,
    })
}

fn invalid_header() -> LedgerError {
    LedgerError::InvalidInput(format!("invalid CSV format, expected header `{CSV_HEADER}`"))
}
