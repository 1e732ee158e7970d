use crate::db::store::Store;
use crate::error::{LedgerError, LedgerResult};
use crate::models::transaction::NewTransaction;
use crate::operations::categorize::categorize;
use chrono::NaiveDate;
use csv::StringRecord;
use rust_decimal::Decimal;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

/// A data row that failed validation and was left out of the batch.
#[derive(Debug)]
pub struct RowError {
    /// 1-based data line number, not counting the header.
    pub line: usize,
    pub message: String,
}

#[derive(Debug)]
pub struct ImportSummary {
    pub imported: usize,
    pub row_errors: Vec<RowError>,
}

struct ColumnIndexes {
    date: usize,
    description: usize,
    amount: usize,
}

/// Reads a CSV file, categorizes every row by its description and
/// appends the valid rows to the store in one batch. Existing stored
/// transactions are preserved. Header-level problems abort before any
/// write; invalid data rows are collected in the summary instead.
pub fn import_csv(store: &Store, path: impl AsRef<Path>) -> LedgerResult<ImportSummary> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| LedgerError::Import(format!("Failed to open file '{}': {}", path.display(), e)))?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| LedgerError::Import(format!("Failed to read CSV header: {}", e)))?
        .clone();
    let columns = locate_columns(&headers)?;

    let mut rows = Vec::new();
    let mut row_errors = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let line = index + 1;
        let record = result
            .map_err(|e| LedgerError::Import(format!("CSV parse error on line {}: {}", line, e)))?;
        match parse_row(&record, &columns) {
            Ok(row) => rows.push(row),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    let imported = store.append_all(&rows)?;
    Ok(ImportSummary {
        imported,
        row_errors,
    })
}

fn locate_columns(headers: &StringRecord) -> LedgerResult<ColumnIndexes> {
    // The description header is matched exactly; date and amount are
    // accepted in any case.
    let description = headers
        .iter()
        .position(|header| header == "Description")
        .ok_or_else(|| LedgerError::Import("Missing required 'Description' column".to_string()))?;
    let date = headers
        .iter()
        .position(|header| header.eq_ignore_ascii_case("date"))
        .ok_or_else(|| LedgerError::Import("Missing required 'Date' column".to_string()))?;
    let amount = headers
        .iter()
        .position(|header| header.eq_ignore_ascii_case("amount"))
        .ok_or_else(|| LedgerError::Import("Missing required 'Amount' column".to_string()))?;

    Ok(ColumnIndexes {
        date,
        description,
        amount,
    })
}

fn parse_row(record: &StringRecord, columns: &ColumnIndexes) -> Result<NewTransaction, String> {
    let date_field = record
        .get(columns.date)
        .ok_or_else(|| "Missing date field".to_string())?;
    let description = record
        .get(columns.description)
        .ok_or_else(|| "Missing description field".to_string())?;
    let amount_field = record
        .get(columns.amount)
        .ok_or_else(|| "Missing amount field".to_string())?;

    let date = NaiveDate::parse_from_str(date_field, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date '{}'. Please use YYYY-MM-DD", date_field))?;
    let amount = Decimal::from_str(amount_field).map_err(|_| {
        format!(
            "Invalid amount '{}'. Must be a valid decimal number",
            amount_field
        )
    })?;

    let category = categorize(description);
    Ok(NewTransaction::new(
        date,
        description.to_string(),
        amount,
        category,
    ))
}
