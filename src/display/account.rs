//! Account display formatting

use crate::config::Settings;
use crate::models::Money;
use crate::services::AccountSummary;

use super::{column_width, money};

/// Format a list of accounts with balances as a table
pub fn format_account_list(settings: &Settings, summaries: &[AccountSummary]) -> String {
    if summaries.is_empty() {
        return "No accounts found.".to_string();
    }

    let name_width = column_width(summaries.iter().map(|s| s.account.name.as_str()), 4);
    let types: Vec<String> = summaries
        .iter()
        .map(|s| s.account.account_type.to_string())
        .collect();
    let type_width = column_width(types.iter().map(String::as_str), 4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:<type_width$}  {:>14}  {}\n",
        "Name",
        "Type",
        "Balance",
        "Status",
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:-<type_width$}  {:->14}  {:-<10}\n",
        "", "", "", "",
    ));

    for (summary, account_type) in summaries.iter().zip(&types) {
        let status = if summary.account.archived {
            "Archived"
        } else if !summary.account.on_budget {
            "Off-Budget"
        } else {
            ""
        };

        output.push_str(&format!(
            "{:<name_width$}  {:<type_width$}  {:>14}  {}\n",
            summary.account.name,
            account_type,
            money(settings, summary.balance),
            status,
        ));
    }

    let total: Money = summaries.iter().map(|s| s.balance).sum();
    output.push_str(&format!(
        "{:<name_width$}  {:<type_width$}  {:>14}\n",
        "Total",
        "",
        money(settings, total),
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, AccountType, UserId};

    #[test]
    fn test_empty_list() {
        assert_eq!(format_account_list(&Settings::default(), &[]), "No accounts found.");
    }

    #[test]
    fn test_rows_and_total() {
        let owner = UserId::new();
        let mut settings = Settings::default();
        settings.currency_symbol = "€".into();
        settings.decimal_separator = ',';

        let mut card = Account::new(owner, "Visa", AccountType::Credit);
        card.on_budget = false;
        let summaries = vec![
            AccountSummary {
                account: Account::new(owner, "Checking", AccountType::Checking),
                balance: Money::from_cents(150_000),
            },
            AccountSummary {
                account: card,
                balance: Money::from_cents(-20_050),
            },
        ];

        let output = format_account_list(&settings, &summaries);
        assert!(output.contains("€1500,00"));
        assert!(output.contains("-€200,50"));
        assert!(output.contains("Off-Budget"));
        assert!(output.contains("€1299,50"));
    }
}
