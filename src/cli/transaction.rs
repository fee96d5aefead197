//! Transaction CLI commands

use std::collections::HashMap;

use chrono::Local;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_transaction_list, money};
use crate::error::PlannerResult;
use crate::services::{AccountService, CategoryService, NewTransaction, TransactionService};
use crate::storage::Storage;

use super::{month_or_current, parse_date, parse_money};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a transaction (negative amounts are outflows)
    Add {
        /// Account name or ID
        account: String,
        /// Amount (e.g., "-30.00" for spending, "2500" for income)
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Category name or ID (omit for income)
        #[arg(short, long)]
        category: Option<String>,
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Payee
        #[arg(short, long, default_value = "")]
        payee: String,
        /// Memo
        #[arg(short, long, default_value = "")]
        memo: String,
    },
    /// List transactions for an account, or for a month
    List {
        /// Account name or ID
        #[arg(short, long)]
        account: Option<String>,
        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short = 'M', long)]
        month: Option<String>,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID (full or short)
        id: String,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> PlannerResult<()> {
    let service = TransactionService::new(storage);
    let accounts = AccountService::new(storage);
    let categories = CategoryService::new(storage);
    let owner = settings.user_id;

    match cmd {
        TransactionCommands::Add {
            account,
            amount,
            category,
            date,
            payee,
            memo,
        } => {
            let account = accounts.find(owner, &account)?;
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => Local::now().date_naive(),
            };

            let mut input = NewTransaction::new(account.id, date, parse_money(&amount)?);
            input.category_id = match category {
                Some(c) => Some(categories.find_category(owner, &c)?.id),
                None => None,
            };
            input.payee = payee;
            input.memo = memo;

            let txn = service.add(owner, input)?;
            println!(
                "Recorded {} on {} in {} ({})",
                money(settings, txn.amount),
                txn.date,
                account.name,
                txn.id.short()
            );
        }

        TransactionCommands::List { account, month } => {
            let transactions = match account {
                Some(a) => {
                    let account = accounts.find(owner, &a)?;
                    service.list_for_account(owner, account.id)?
                }
                None => service.list_for_month(owner, month_or_current(month.as_deref())?)?,
            };
            let names: HashMap<_, _> = categories
                .list_categories(owner)?
                .into_iter()
                .map(|c| (c.id, c.name))
                .collect();
            print!("{}", format_transaction_list(settings, &transactions, &names));
        }

        TransactionCommands::Delete { id } => {
            let txn = service.find(owner, &id)?;
            let deleted = service.delete(owner, txn.id)?;
            println!("Deleted transaction: {}", deleted);
        }
    }

    Ok(())
}
