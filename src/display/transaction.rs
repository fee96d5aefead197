//! Transaction display formatting

use std::collections::HashMap;

use crate::config::Settings;
use crate::models::{CategoryId, LedgerTransaction};

use super::{column_width, money};

/// Format transactions as a register, resolving category names through `categories`
pub fn format_transaction_list(
    settings: &Settings,
    transactions: &[LedgerTransaction],
    categories: &HashMap<CategoryId, String>,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.".to_string();
    }

    let category_names: Vec<&str> = transactions
        .iter()
        .map(|t| match t.category_id {
            Some(id) => categories.get(&id).map(String::as_str).unwrap_or("Unknown"),
            None => "",
        })
        .collect();
    let payee_width = column_width(transactions.iter().map(|t| t.payee.as_str()), 5);
    let category_width = column_width(category_names.iter().copied(), 8);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<10}  {:<payee_width$}  {:<category_width$}  {:>12}  {}\n",
        "Date", "Payee", "Category", "Amount", "ID",
    ));
    output.push_str(&format!(
        "{:-<10}  {:-<payee_width$}  {:-<category_width$}  {:->12}  {:-<12}\n",
        "", "", "", "", "",
    ));

    for (txn, category) in transactions.iter().zip(category_names) {
        output.push_str(&format!(
            "{:<10}  {:<payee_width$}  {:<category_width$}  {:>12}  {}\n",
            txn.date.format(&settings.date_format).to_string(),
            txn.payee,
            category,
            money(settings, txn.amount),
            txn.id.short(),
        ));
    }

    output
}
