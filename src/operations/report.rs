use crate::db::store::Store;
use crate::error::LedgerResult;
use crate::models::transaction::Transaction;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Detail rows plus per-category sums for one calendar month.
pub struct MonthlyReport {
    pub month: u32,
    pub year: i32,
    pub transactions: Vec<Transaction>,
    pub category_totals: Vec<(String, Decimal)>,
}

impl MonthlyReport {
    /// Returns Ok(None) when the month holds no transactions; that is
    /// the "no data" condition, not an error.
    pub fn generate(store: &Store, month: u32, year: i32) -> LedgerResult<Option<MonthlyReport>> {
        let transactions = store.transactions_for_month(month, year)?;
        if transactions.is_empty() {
            return Ok(None);
        }

        let mut totals: HashMap<String, Decimal> = HashMap::new();
        for transaction in &transactions {
            let entry = totals
                .entry(transaction.category.as_str().to_string())
                .or_insert(Decimal::ZERO);
            *entry += transaction.amount;
        }

        let mut category_totals: Vec<(String, Decimal)> = totals.into_iter().collect();
        category_totals.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(Some(MonthlyReport {
            month,
            year,
            transactions,
            category_totals,
        }))
    }

    /// Renders the detail table followed by the summary table.
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "All Transactions for {:02}/{}:\n\n",
            self.month, self.year
        ));
        output.push_str(&format!(
            "{:<12} {:<30} {:>12} {:<10}\n",
            "Date", "Description", "Amount", "Category"
        ));
        output.push_str(&"-".repeat(67));
        output.push('\n');
        for transaction in &self.transactions {
            output.push_str(&format!(
                "{:<12} {:<30} {:>12} {:<10}\n",
                transaction.date.to_string(),
                transaction.description,
                transaction.amount.to_string(),
                transaction.category.as_str(),
            ));
        }

        output.push_str("\nSummary:\n\n");
        output.push_str(&format!("{:<10} {:>12}\n", "Category", "Amount"));
        output.push_str(&"-".repeat(23));
        output.push('\n');
        for (category, total) in &self.category_totals {
            output.push_str(&format!("{:<10} {:>12}\n", category, total.to_string()));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::transaction::{Category, NewTransaction};
    use chrono::NaiveDate;
    use std::str::FromStr;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, Store) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = Store::new(dir.path().join("test.db"));
        store.initialize().unwrap();
        (dir, store)
    }

    fn sample_row(date: &str, description: &str, amount: &str, category: Category) -> NewTransaction {
        NewTransaction::new(
            NaiveDate::from_str(date).unwrap(),
            description.to_string(),
            Decimal::from_str(amount).unwrap(),
            category,
        )
    }

    #[test]
    fn test_empty_month_signals_no_data() {
        let (_dir, store) = create_test_store();
        let report = MonthlyReport::generate(&store, 1, 2024).unwrap();
        assert!(report.is_none());
    }

    #[test]
    fn test_summary_sums_per_category() {
        let (_dir, store) = create_test_store();
        store
            .append_all(&[
                sample_row("2024-01-05", "Restaurant bill", "10", Category::Food),
                sample_row("2024-01-09", "Coffee", "5", Category::Food),
                sample_row("2024-01-12", "Grocery store", "3", Category::Other),
            ])
            .unwrap();

        let report = MonthlyReport::generate(&store, 1, 2024).unwrap().unwrap();
        assert_eq!(
            report.category_totals,
            vec![
                ("Food".to_string(), Decimal::from(15)),
                ("Other".to_string(), Decimal::from(3)),
            ]
        );
    }

    #[test]
    fn test_summary_groups_sorted_by_label() {
        let (_dir, store) = create_test_store();
        store
            .append_all(&[
                sample_row("2024-01-05", "Grocery store", "3", Category::Other),
                sample_row("2024-01-06", "Monthly salary", "2500", Category::Income),
                sample_row("2024-01-07", "Rent", "-900", Category::Housing),
                sample_row("2024-01-08", "Coffee", "-4", Category::Food),
            ])
            .unwrap();

        let report = MonthlyReport::generate(&store, 1, 2024).unwrap().unwrap();
        let labels: Vec<&str> = report
            .category_totals
            .iter()
            .map(|(label, _)| label.as_str())
            .collect();
        assert_eq!(labels, vec!["Food", "Housing", "Income", "Other"]);
    }

    #[test]
    fn test_detail_rows_keep_query_order() {
        let (_dir, store) = create_test_store();
        store
            .append_all(&[
                sample_row("2024-01-20", "Second by date", "1", Category::Other),
                sample_row("2024-01-05", "First by date", "2", Category::Other),
            ])
            .unwrap();

        let report = MonthlyReport::generate(&store, 1, 2024).unwrap().unwrap();
        assert_eq!(report.transactions[0].description, "Second by date");
        assert_eq!(report.transactions[1].description, "First by date");
    }

    #[test]
    fn test_only_matching_month_is_reported() {
        let (_dir, store) = create_test_store();
        store
            .append_all(&[
                sample_row("2024-01-05", "Coffee", "-4", Category::Food),
                sample_row("2024-02-05", "Coffee", "-4", Category::Food),
            ])
            .unwrap();

        let report = MonthlyReport::generate(&store, 2, 2024).unwrap().unwrap();
        assert_eq!(report.transactions.len(), 1);
        assert_eq!(
            report.transactions[0].date,
            NaiveDate::from_str("2024-02-05").unwrap()
        );
    }

    #[test]
    fn test_format_terminal_contains_both_tables() {
        let (_dir, store) = create_test_store();
        store
            .append_all(&[
                sample_row("2024-01-05", "Restaurant bill", "10", Category::Food),
                sample_row("2024-01-12", "Grocery store", "3", Category::Other),
            ])
            .unwrap();

        let report = MonthlyReport::generate(&store, 1, 2024).unwrap().unwrap();
        let rendered = report.format_terminal();

        assert!(rendered.contains("All Transactions for 01/2024"));
        assert!(rendered.contains("Restaurant bill"));
        assert!(rendered.contains("2024-01-05"));
        assert!(rendered.contains("Summary:"));
        assert!(rendered.contains("Food"));
        assert!(rendered.contains("Other"));
    }
}
