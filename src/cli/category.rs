//! Category CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_category_tree;
use crate::error::PlannerResult;
use crate::services::CategoryService;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List groups and their categories
    List,
    /// Create a category group
    CreateGroup {
        /// Group name
        name: String,
    },
    /// Create a category inside a group
    Create {
        /// Category name
        name: String,
        /// Group name or ID
        #[arg(short, long)]
        group: String,
    },
    /// Hide a category from the budget view
    Hide {
        /// Category name or ID
        category: String,
    },
    /// Show a hidden category again
    Unhide {
        /// Category name or ID
        category: String,
    },
}

/// Handle a category command
pub fn handle_category_command(
    storage: &Storage,
    settings: &Settings,
    cmd: CategoryCommands,
) -> PlannerResult<()> {
    let service = CategoryService::new(storage);
    let owner = settings.user_id;

    match cmd {
        CategoryCommands::List => {
            let groups = service.list_groups_with_categories(owner)?;
            print!("{}", format_category_tree(&groups));
        }

        CategoryCommands::CreateGroup { name } => {
            let group = service.create_group(owner, &name)?;
            println!("Created group: {} ({})", group.name, group.id.short());
        }

        CategoryCommands::Create { name, group } => {
            let category = service.create_category(owner, &name, &group)?;
            println!("Created category: {} ({})", category.name, category.id.short());
        }

        CategoryCommands::Hide { category } => {
            let found = service.find_category(owner, &category)?;
            let hidden = service.set_hidden(owner, found.id, true)?;
            println!("Hid category: {}", hidden.name);
        }

        CategoryCommands::Unhide { category } => {
            let found = service.find_category(owner, &category)?;
            let shown = service.set_hidden(owner, found.id, false)?;
            println!("Unhid category: {}", shown.name);
        }
    }

    Ok(())
}
