//! Brokerage-style transaction charge schedule.
//!
//! Flat-rate approximations of a retail brokerage fee card: brokerage with
//! a cap, a securities transaction tax that differs between equity and
//! option instruments, exchange charges, tax on the brokerage and exchange
//! legs, and stamp duty on the buy side. The rates are policy data, not
//! contract: the whole table is serde-loadable so a deployment can swap it
//! without touching code.
//!
//! Every component is rounded to 2 decimals exactly once, at the leaf, and
//! `total` is the plain sum of the rounded components. Rounding the total
//! again would let it drift from the stored components.

use crate::domain::values::direction::InstrumentClass;
use serde::{Deserialize, Serialize};

/// Round to 2 decimal places. Applied once per charge component.
pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Rate table for the charge breakdown. `Default` carries the journal's
/// fixed formulas; partial overrides deserialize on top of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargeSchedule {
    /// Brokerage as a fraction of turnover.
    pub brokerage_rate: f64,
    /// Hard cap on brokerage per trade.
    pub brokerage_cap: f64,
    /// Transaction tax on turnover for equity instruments.
    pub equity_transaction_tax_rate: f64,
    /// Transaction tax on the sell leg (quantity * exit) for options.
    pub option_transaction_tax_rate: f64,
    /// Exchange charges as a fraction of turnover.
    pub exchange_fee_rate: f64,
    /// Tax applied to brokerage + exchange fee.
    pub government_tax_rate: f64,
    /// Stamp duty on the buy leg (quantity * entry).
    pub stamp_duty_rate: f64,
}

impl Default for ChargeSchedule {
    fn default() -> Self {
        Self {
            brokerage_rate: 0.0003,
            brokerage_cap: 40.0,
            equity_transaction_tax_rate: 0.0001,
            option_transaction_tax_rate: 0.0005,
            exchange_fee_rate: 0.0000325,
            government_tax_rate: 0.18,
            stamp_duty_rate: 0.00003,
        }
    }
}

/// Per-trade charge breakdown. `total` is always the exact sum of the five
/// components; it is never stored or edited independently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChargeBreakdown {
    pub brokerage: f64,
    pub transaction_tax: f64,
    pub exchange_fee: f64,
    pub government_tax: f64,
    pub stamp_duty: f64,
    pub total: f64,
}

impl ChargeSchedule {
    /// Compute the charge breakdown for a completed round trip.
    ///
    /// The tax on brokerage and exchange charges is taken over the rounded
    /// components so the stored breakdown reconciles against itself.
    pub fn breakdown(
        &self,
        quantity: i64,
        entry_price: f64,
        exit_price: f64,
        instrument: InstrumentClass,
    ) -> ChargeBreakdown {
        let qty = quantity as f64;
        let turnover = qty * (entry_price + exit_price);

        let brokerage = round2((turnover * self.brokerage_rate).min(self.brokerage_cap));
        let transaction_tax = round2(match instrument {
            InstrumentClass::Option => qty * exit_price * self.option_transaction_tax_rate,
            InstrumentClass::Equity => turnover * self.equity_transaction_tax_rate,
        });
        let exchange_fee = round2(turnover * self.exchange_fee_rate);
        let government_tax = round2((brokerage + exchange_fee) * self.government_tax_rate);
        let stamp_duty = round2(qty * entry_price * self.stamp_duty_rate);

        ChargeBreakdown {
            brokerage,
            transaction_tax,
            exchange_fee,
            government_tax,
            stamp_duty,
            total: brokerage + transaction_tax + exchange_fee + government_tax + stamp_duty,
        }
    }
}

impl ChargeBreakdown {
    /// Sum of the five components, for reconciliation checks.
    pub fn component_sum(&self) -> f64 {
        self.brokerage + self.transaction_tax + self.exchange_fee + self.government_tax + self.stamp_duty
    }
}
