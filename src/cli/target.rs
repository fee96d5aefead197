//! Target CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::money;
use crate::error::{PlannerError, PlannerResult};
use crate::models::{RefillType, TargetType};
use crate::services::{CategoryService, TargetService};
use crate::storage::Storage;

use super::parse_money;

/// Target subcommands
#[derive(Subcommand)]
pub enum TargetCommands {
    /// Set (or replace) a category's target
    Set {
        /// Category name or ID
        category: String,
        /// Target amount
        amount: String,
        /// Cadence (monthly, weekly, yearly)
        #[arg(short = 't', long = "type", default_value = "monthly")]
        target_type: String,
        /// refill (carryover counts) or set-aside (full amount every month)
        #[arg(short, long, default_value = "refill")]
        refill: String,
        /// Day of month the money is due (1-31)
        #[arg(short, long)]
        day: Option<u8>,
    },
    /// Show a category's target
    Show {
        /// Category name or ID
        category: String,
    },
    /// Remove a category's target
    Clear {
        /// Category name or ID
        category: String,
    },
}

/// Handle a target command
pub fn handle_target_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TargetCommands,
) -> PlannerResult<()> {
    let service = TargetService::new(storage);
    let categories = CategoryService::new(storage);
    let owner = settings.user_id;

    match cmd {
        TargetCommands::Set {
            category,
            amount,
            target_type,
            refill,
            day,
        } => {
            let category = categories.find_category(owner, &category)?;
            let target_type = TargetType::parse(&target_type).ok_or_else(|| {
                PlannerError::Validation(format!(
                    "Invalid target type '{}'. Use monthly, weekly or yearly",
                    target_type
                ))
            })?;
            let refill = RefillType::parse(&refill).ok_or_else(|| {
                PlannerError::Validation(format!(
                    "Invalid refill mode '{}'. Use refill or set-aside",
                    refill
                ))
            })?;

            let target = service.set(owner, category.id, target_type, parse_money(&amount)?, refill, day)?;
            println!(
                "Target for {}: {} {} ({})",
                category.name,
                target.target_type,
                money(settings, target.amount),
                target.refill
            );
        }

        TargetCommands::Show { category } => {
            let category = categories.find_category(owner, &category)?;
            match service.get(owner, category.id)? {
                Some(target) => {
                    println!("Target for {}", category.name);
                    println!("  Type:   {}", target.target_type);
                    println!("  Amount: {}", money(settings, target.amount));
                    println!("  Mode:   {}", target.refill);
                    if let Some(day) = target.day_of_month {
                        println!("  Due:    day {}", day);
                    }
                }
                None => println!("{} has no target.", category.name),
            }
        }

        TargetCommands::Clear { category } => {
            let category = categories.find_category(owner, &category)?;
            if service.clear(owner, category.id)? {
                println!("Cleared target for {}", category.name);
            } else {
                println!("{} has no target.", category.name);
            }
        }
    }

    Ok(())
}
