//! Budget display formatting
//!
//! The month overview prints one section per group with assigned, activity
//! and available columns, then ready to assign. A trailing marker flags
//! overspent (`⚠`), funded (`✓`) and underfunded (`✗`) categories.

use crate::budget::CategoryBudgetView;
use crate::config::Settings;
use crate::services::MonthBudget;

use super::{column_width, money};

const RULE_WIDTH: usize = 72;

fn status(view: &CategoryBudgetView) -> &'static str {
    if view.is_overspent() {
        "⚠"
    } else {
        match &view.target {
            Some(progress) if progress.is_met() => "✓",
            Some(_) => "✗",
            None => "",
        }
    }
}

fn target_note(settings: &Settings, view: &CategoryBudgetView) -> String {
    match &view.target {
        Some(progress) if !progress.is_met() => format!(
            " needs {} ({:.0}%)",
            money(settings, progress.needed),
            progress.progress * 100.0
        ),
        _ => String::new(),
    }
}

/// Format the whole month, group by group
pub fn format_month_budget(settings: &Settings, budget: &MonthBudget) -> String {
    let mut output = String::new();
    output.push_str(&format!("Budget: {}\n", budget.month.friendly()));
    output.push_str(&format!("{}\n", "=".repeat(RULE_WIDTH)));

    let name_width = column_width(
        budget
            .category_groups
            .iter()
            .flat_map(|g| g.budgets.iter().map(|v| v.category_name.as_str())),
        24,
    );

    for group in &budget.category_groups {
        let visible: Vec<&CategoryBudgetView> = group.budgets.iter().filter(|v| !v.hidden).collect();
        if visible.is_empty() {
            continue;
        }

        output.push_str(&format!("\n{}\n", group.group.name));
        output.push_str(&format!(
            "  {:<name_width$} {:>12} {:>12} {:>12}\n",
            "", "Assigned", "Activity", "Available",
        ));
        output.push_str(&format!("{}\n", "-".repeat(RULE_WIDTH)));

        for view in visible {
            output.push_str(&format!(
                "  {:<name_width$} {:>12} {:>12} {:>12} {}{}\n",
                view.category_name,
                money(settings, view.assigned),
                money(settings, view.activity),
                money(settings, view.available),
                status(view),
                target_note(settings, view),
            ));
        }
    }

    output.push_str(&format!("\n{}\n", "=".repeat(RULE_WIDTH)));
    output.push_str(&format!(
        "Budget accounts: {}\n",
        money(settings, budget.total_budget_balance)
    ));
    output.push_str(&format!(
        "Available in categories: {}\n",
        money(settings, budget.total_available)
    ));
    output.push_str(&format!(
        "Ready to Assign: {}\n",
        money(settings, budget.ready_to_assign)
    ));
    if budget.ready_to_assign.is_negative() {
        output.push_str("⚠ More money is assigned than you have. Move some back.\n");
    }

    output
}

/// Format a flat list of category views (overspent or underfunded reports)
pub fn format_category_list(settings: &Settings, title: &str, views: &[CategoryBudgetView]) -> String {
    if views.is_empty() {
        return format!("{}: none\n", title);
    }

    let name_width = column_width(views.iter().map(|v| v.category_name.as_str()), 8);
    let mut output = format!("{}:\n", title);
    for view in views {
        output.push_str(&format!(
            "  {:<name_width$} {:>12}{}\n",
            view.category_name,
            money(settings, view.available),
            target_note(settings, view),
        ));
    }
    output
}
