//! Display formatting for terminal output
//!
//! Every formatter returns a `String`; the CLI decides where it goes.
//! Amounts are printed with the user's currency symbol and decimal separator.

pub mod account;
pub mod budget;
pub mod calendar;
pub mod category;
pub mod transaction;

pub use account::format_account_list;
pub use budget::{format_category_list, format_month_budget};
pub use calendar::{format_agenda, format_event_details, format_event_list};
pub use category::format_category_tree;
pub use transaction::format_transaction_list;

use crate::config::Settings;
use crate::models::Money;

/// Format `amount` the way the user configured
pub fn money(settings: &Settings, amount: Money) -> String {
    amount.format_with(&settings.currency_symbol, settings.decimal_separator)
}

/// Width of the widest item, but never below `min`
pub(crate) fn column_width<'a, I>(items: I, min: usize) -> usize
where
    I: IntoIterator<Item = &'a str>,
{
    items
        .into_iter()
        .map(|s| s.chars().count())
        .max()
        .unwrap_or(min)
        .max(min)
}
