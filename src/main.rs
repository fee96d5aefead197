use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use planner::cli::{
    handle_account_command, handle_budget_command, handle_category_command, handle_event_command,
    handle_export_command, handle_log_command, handle_target_command, handle_transaction_command,
    AccountCommands, BudgetCommands, CategoryCommands, EventCommands, ExportCommands,
    TargetCommands, TransactionCommands,
};
use planner::config::{PlannerPaths, Settings};
use planner::storage::{init::seed_default_categories, Storage};

#[derive(Parser)]
#[command(
    name = "planner",
    author = "Kaylee Beyene",
    version,
    about = "Terminal planner: recurring calendar events and envelope budgeting",
    long_about = "Planner keeps a calendar of one-off and recurring events and a \
                  zero-based envelope budget in plain JSON files. Set \
                  PLANNER_DATA_DIR to choose where they live and PLANNER_LOG to \
                  turn on diagnostic output."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create settings and the default categories
    Init,

    /// Show or change settings
    Config {
        /// Currency symbol used when printing amounts
        #[arg(long)]
        currency: Option<String>,
        /// Decimal separator ("." or ",")
        #[arg(long)]
        decimal_separator: Option<char>,
        /// Most candidate occurrences visited per series in one query
        #[arg(long)]
        iteration_cap: Option<u32>,
    },

    /// Account management commands
    #[command(subcommand)]
    Account(AccountCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Ledger transactions
    #[command(subcommand, alias = "transaction")]
    Txn(TransactionCommands),

    /// Budget commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Category targets
    #[command(subcommand)]
    Target(TargetCommands),

    /// Calendar events and agenda
    #[command(subcommand)]
    Event(EventCommands),

    /// Export budget or agenda data
    #[command(subcommand)]
    Export(ExportCommands),

    /// Show recent changes from the audit log
    Log {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },
}

fn main() -> Result<()> {
    planner::logging::init();
    let cli = Cli::parse();

    let paths = PlannerPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    let Some(command) = cli.command else {
        println!("Planner - recurring events and envelope budgeting");
        println!();
        println!("Run 'planner --help' for usage information.");
        return Ok(());
    };

    if !matches!(command, Commands::Init) && !paths.is_initialized() {
        bail!("Planner is not initialized. Run 'planner init' first.");
    }

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match command {
        Commands::Init => {
            settings.save(&paths)?;
            let seeded = seed_default_categories(&storage, settings.user_id)?;

            println!("Initialized planner at: {}", paths.base_dir().display());
            if seeded {
                println!();
                println!("Default category groups and categories have been created:");
                println!("  - Bills (Rent/Mortgage, Electric, Water, Internet, Phone, Insurance)");
                println!("  - Needs (Groceries, Transportation, Medical, Household)");
                println!("  - Wants (Dining Out, Entertainment, Shopping, Subscriptions)");
                println!("  - Savings (Emergency Fund, Vacation, Large Purchases)");
                println!();
                println!("Run 'planner category list' to see all categories.");
            }
        }
        Commands::Config {
            currency,
            decimal_separator,
            iteration_cap,
        } => {
            let changed = currency.is_some() || decimal_separator.is_some() || iteration_cap.is_some();
            if let Some(currency) = currency {
                settings.currency_symbol = currency;
            }
            if let Some(separator) = decimal_separator {
                settings.decimal_separator = separator;
            }
            if let Some(cap) = iteration_cap {
                settings.recurrence.iteration_cap = cap;
            }
            if changed {
                settings.validate()?;
                settings.save(&paths)?;
            }

            println!("Planner Configuration");
            println!("=====================");
            println!("Base directory:     {}", paths.base_dir().display());
            println!("Data directory:     {}", paths.data_dir().display());
            println!("Audit log:          {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  User:              {}", settings.user_id);
            println!("  Currency symbol:   {}", settings.currency_symbol);
            println!("  Decimal separator: {}", settings.decimal_separator);
            println!("  Date format:       {}", settings.date_format);
            println!("  Iteration cap:     {}", settings.recurrence.iteration_cap);
        }
        Commands::Account(cmd) => handle_account_command(&storage, &settings, cmd)?,
        Commands::Category(cmd) => handle_category_command(&storage, &settings, cmd)?,
        Commands::Txn(cmd) => handle_transaction_command(&storage, &settings, cmd)?,
        Commands::Budget(cmd) => handle_budget_command(&storage, &settings, cmd)?,
        Commands::Target(cmd) => handle_target_command(&storage, &settings, cmd)?,
        Commands::Event(cmd) => handle_event_command(&storage, &settings, cmd)?,
        Commands::Export(cmd) => handle_export_command(&storage, &settings, cmd)?,
        Commands::Log { count } => handle_log_command(&storage, &settings, count)?,
    }

    Ok(())
}
