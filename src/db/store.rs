use crate::db::connection;
use crate::error::{LedgerError, LedgerResult};
use crate::models::transaction::{Category, NewTransaction, Transaction};
use chrono::{Months, NaiveDate};
use rusqlite::Connection;
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use std::path::PathBuf;

/// Handle on the transactions table. Holds only the database path;
/// every operation opens and releases its own connection.
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Safe to call on every startup.
    pub fn initialize(&self) -> LedgerResult<()> {
        let conn = self.connect_for_write()?;
        connection::ensure_schema(&conn)
            .map_err(|e| LedgerError::StoreWrite(format!("Failed to create schema: {}", e)))
    }

    /// Inserts the whole batch inside one transaction; ids are assigned
    /// sequentially by the engine. A failed insert rolls every row of
    /// the batch back.
    pub fn append_all(&self, rows: &[NewTransaction]) -> LedgerResult<usize> {
        let mut conn = self.connect_for_write()?;
        let tx = conn
            .transaction()
            .map_err(|e| LedgerError::StoreWrite(format!("Failed to begin transaction: {}", e)))?;

        for row in rows {
            let amount = row.amount.to_f64().ok_or_else(|| {
                LedgerError::StoreWrite(format!("Unrepresentable amount: {}", row.amount))
            })?;
            tx.execute(
                "INSERT INTO transactions (date, description, amount, category) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![
                    row.date.to_string(),
                    &row.description,
                    amount,
                    row.category.as_str(),
                ],
            )
            .map_err(|e| LedgerError::StoreWrite(format!("Failed to insert transaction: {}", e)))?;
        }

        tx.commit()
            .map_err(|e| LedgerError::StoreWrite(format!("Failed to commit batch: {}", e)))?;
        Ok(rows.len())
    }

    /// All transactions dated inside the given calendar month, in
    /// insertion order. An empty month is an empty vec, not an error.
    pub fn transactions_for_month(&self, month: u32, year: i32) -> LedgerResult<Vec<Transaction>> {
        let (start, end) = month_bounds(month, year)?;
        let conn = self.connect_for_read()?;

        let mut stmt = conn
            .prepare(
                "SELECT id, date, description, amount, category FROM transactions \
                 WHERE date >= ?1 AND date <= ?2 ORDER BY id ASC",
            )
            .map_err(|e| LedgerError::StoreQuery(format!("Failed to prepare statement: {}", e)))?;

        let transaction_iter = stmt
            .query_map([start.to_string(), end.to_string()], |row| {
                let date_str: String = row.get(1)?;
                let amount: f64 = row.get(3)?;
                let category_str: String = row.get(4)?;

                Ok(Transaction {
                    id: row.get(0)?,
                    date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
                        .map_err(|e| rusqlite::Error::InvalidParameterName(e.to_string()))?,
                    description: row.get(2)?,
                    amount: Decimal::from_f64(amount).ok_or_else(|| {
                        rusqlite::Error::InvalidParameterName(format!("Invalid amount {}", amount))
                    })?,
                    category: Category::from_label(&category_str).ok_or_else(|| {
                        rusqlite::Error::InvalidParameterName(format!(
                            "Unknown category '{}'",
                            category_str
                        ))
                    })?,
                })
            })
            .map_err(|e| LedgerError::StoreQuery(format!("Failed to query transactions: {}", e)))?;

        let mut transactions = Vec::new();
        for transaction in transaction_iter {
            transactions.push(transaction.map_err(|e| {
                LedgerError::StoreQuery(format!("Failed to read transaction: {}", e))
            })?);
        }
        Ok(transactions)
    }

    fn connect_for_write(&self) -> LedgerResult<Connection> {
        connection::open(&self.path).map_err(|e| {
            LedgerError::StoreWrite(format!(
                "Failed to open database '{}': {}",
                self.path.display(),
                e
            ))
        })
    }

    fn connect_for_read(&self) -> LedgerResult<Connection> {
        connection::open(&self.path).map_err(|e| {
            LedgerError::StoreQuery(format!(
                "Failed to open database '{}': {}",
                self.path.display(),
                e
            ))
        })
    }
}

// Dates are ISO text, so lexicographic range comparison is chronological.
fn month_bounds(month: u32, year: i32) -> LedgerResult<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| LedgerError::StoreQuery(format!("Invalid month/year: {}/{}", month, year)))?;
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| LedgerError::StoreQuery(format!("Invalid month/year: {}/{}", month, year)))?;
    Ok((start, end))
}
