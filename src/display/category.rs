//! Category display formatting

use crate::models::{Category, CategoryGroup};

/// Format categories as a tree grouped by category group
pub fn format_category_tree(groups: &[(CategoryGroup, Vec<Category>)]) -> String {
    if groups.is_empty() {
        return "No categories found.\n\nRun 'planner init' to create default categories."
            .to_string();
    }

    let mut output = String::new();

    for (i, (group, categories)) in groups.iter().enumerate() {
        let hidden = if group.hidden { " (hidden)" } else { "" };
        output.push_str(&format!("{}{}\n", group.name, hidden));

        if categories.is_empty() {
            output.push_str("  (no categories)\n");
        }
        for (j, category) in categories.iter().enumerate() {
            let prefix = if j == categories.len() - 1 { "└── " } else { "├── " };
            let hidden = if category.hidden { " (hidden)" } else { "" };
            output.push_str(&format!("  {}{}{}\n", prefix, category.name, hidden));
        }

        if i < groups.len() - 1 {
            output.push('\n');
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserId;

    #[test]
    fn test_tree_layout() {
        let owner = UserId::new();
        let needs = CategoryGroup::new(owner, "Needs");
        let mut rent = Category::new(owner, "Rent", needs.id);
        rent.hidden = true;
        let groceries = Category::new(owner, "Groceries", needs.id);
        let empty = CategoryGroup::new(owner, "Wants");

        let output = format_category_tree(&[(needs, vec![groceries, rent]), (empty, vec![])]);
        assert_eq!(
            output,
            "Needs\n  ├── Groceries\n  └── Rent (hidden)\n\nWants\n  (no categories)\n"
        );
    }
}
