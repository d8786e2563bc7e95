//! Display formatting for stored prices.
//!
//! All prices are integer minor units of a single fixed currency (USD).
//! Multi-currency support is out of scope.

use rusty_money::{iso, Money};

/// Render an amount of minor units as a user-facing price string, e.g.
/// `format_price(104999)` -> `"$1,049.99"`.
pub fn format_price(minor_units: i64) -> String {
    Money::from_minor(minor_units, iso::USD).to_string()
}
