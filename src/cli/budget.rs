//! Budget CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_category_list, format_month_budget, money};
use crate::error::PlannerResult;
use crate::services::{BudgetService, CategoryService};
use crate::storage::Storage;

use super::{month_or_current, parse_money};

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Show the budget for a month
    Show {
        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Set the amount assigned to a category (replaces the previous value)
    Assign {
        /// Category name or ID
        category: String,
        /// Amount (e.g., "100" or "100.00")
        amount: String,
        /// Month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Move assigned money between categories
    Move {
        /// Source category
        from: String,
        /// Destination category
        to: String,
        /// Amount
        amount: String,
        /// Month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },
    /// List overspent categories
    Overspent {
        /// Month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },
    /// List categories short of their target
    Underfunded {
        /// Month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> PlannerResult<()> {
    let service = BudgetService::new(storage);
    let categories = CategoryService::new(storage);
    let owner = settings.user_id;

    match cmd {
        BudgetCommands::Show { month } => {
            let month = month_or_current(month.as_deref())?;
            let budget = service.compute_month(owner, month)?;
            print!("{}", format_month_budget(settings, &budget));
        }

        BudgetCommands::Assign {
            category,
            amount,
            month,
        } => {
            let month = month_or_current(month.as_deref())?;
            let category = categories.find_category(owner, &category)?;
            let assignment = service.set_assigned(owner, category.id, month, parse_money(&amount)?)?;
            let ready = service.ready_to_assign(owner, month)?;

            println!(
                "Assigned {} to {} for {}",
                money(settings, assignment.assigned),
                category.name,
                month.friendly()
            );
            println!("Ready to Assign: {}", money(settings, ready));
        }

        BudgetCommands::Move {
            from,
            to,
            amount,
            month,
        } => {
            let month = month_or_current(month.as_deref())?;
            let from = categories.find_category(owner, &from)?;
            let to = categories.find_category(owner, &to)?;
            let amount = parse_money(&amount)?;

            service.move_between_categories(owner, from.id, to.id, month, amount)?;
            println!(
                "Moved {} from {} to {}",
                money(settings, amount),
                from.name,
                to.name
            );
        }

        BudgetCommands::Overspent { month } => {
            let month = month_or_current(month.as_deref())?;
            let views = service.overspent_categories(owner, month)?;
            print!("{}", format_category_list(settings, "Overspent", &views));
        }

        BudgetCommands::Underfunded { month } => {
            let month = month_or_current(month.as_deref())?;
            let views = service.underfunded_categories(owner, month)?;
            print!("{}", format_category_list(settings, "Underfunded", &views));
        }
    }

    Ok(())
}
