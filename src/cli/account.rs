//! Account CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_account_list, money};
use crate::error::{PlannerError, PlannerResult};
use crate::models::AccountType;
use crate::services::AccountService;
use crate::storage::Storage;

use super::{month_or_current, parse_money};

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create a new account
    Create {
        /// Account name
        name: String,
        /// Account type (checking, savings, credit, cash, investment)
        #[arg(short = 't', long, default_value = "checking")]
        account_type: String,
        /// Starting balance (e.g., "1000.00" or "1000")
        #[arg(short, long, default_value = "0")]
        balance: String,
        /// Keep this account out of the budget
        #[arg(long)]
        off_budget: bool,
    },
    /// List accounts with balances
    List {
        /// Include archived accounts
        #[arg(short, long)]
        all: bool,
        /// Balances as of the end of this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Show one account's balance
    Balance {
        /// Account name or ID
        account: String,
        /// Balance as of the end of this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Archive an account
    Archive {
        /// Account name or ID
        account: String,
    },
}

/// Handle an account command
pub fn handle_account_command(
    storage: &Storage,
    settings: &Settings,
    cmd: AccountCommands,
) -> PlannerResult<()> {
    let service = AccountService::new(storage);
    let owner = settings.user_id;

    match cmd {
        AccountCommands::Create {
            name,
            account_type,
            balance,
            off_budget,
        } => {
            let account_type = AccountType::parse(&account_type).ok_or_else(|| {
                PlannerError::Validation(format!(
                    "Invalid account type: '{}'. Valid types: checking, savings, credit, cash, investment",
                    account_type
                ))
            })?;
            let starting_balance = parse_money(&balance)?;
            let on_budget = off_budget.then_some(false);

            let account = service.create(owner, &name, account_type, starting_balance, on_budget)?;

            println!("Created account: {}", account.name);
            println!("  Type: {}", account.account_type);
            println!("  Starting Balance: {}", money(settings, account.starting_balance));
            println!("  On Budget: {}", if account.on_budget { "Yes" } else { "No" });
            println!("  ID: {}", account.id);
        }

        AccountCommands::List { all, month } => {
            let month = month.as_deref().map(crate::services::parse_month).transpose()?;
            let summaries = service.list_with_balances(owner, all, month)?;
            print!("{}", format_account_list(settings, &summaries));
        }

        AccountCommands::Balance { account, month } => {
            let month = month_or_current(month.as_deref())?;
            let found = service.find(owner, &account)?;
            let balance = service.balance(owner, &found, Some(month))?;
            println!(
                "{} at end of {}: {}",
                found.name,
                month.friendly(),
                money(settings, balance)
            );
        }

        AccountCommands::Archive { account } => {
            let found = service.find(owner, &account)?;
            let archived = service.archive(owner, found.id)?;
            println!("Archived account: {}", archived.name);
        }
    }

    Ok(())
}
