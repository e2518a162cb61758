//! Gross and net P&L sign conventions.

use crate::domain::values::charges::round2;
use crate::domain::values::direction::Direction;

/// Price-movement profit or loss, before charges. Long/Call profit when
/// price rises, Short/Put when it falls.
pub fn gross_pnl(quantity: i64, entry_price: f64, exit_price: f64, direction: Direction) -> f64 {
    let delta = if direction.is_bullish() {
        exit_price - entry_price
    } else {
        entry_price - exit_price
    };
    round2(delta * quantity as f64)
}

/// Net P&L: gross minus total transaction charges.
pub fn net_pnl(gross: f64, charge_total: f64) -> f64 {
    round2(gross - charge_total)
}
