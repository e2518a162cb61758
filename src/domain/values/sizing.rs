//! Risk-based position sizing.
//!
//! Sizes a position so that a stop-loss hit loses a fixed fraction of
//! capital: `quantity = round(risk_amount / risk_per_unit)` where
//! `risk_amount = capital * risk_percent / 100` and `risk_per_unit` is the
//! distance from entry to stop. The distance is taken direction-aware
//! (Long/Call: `entry - stop`; Short/Put: `stop - entry`) so a stop placed
//! on the wrong side of the entry is reported instead of silently
//! absolute-valued away.

use crate::domain::error::DomainError;
use crate::domain::values::direction::Direction;
use serde::Serialize;

/// Result of a position-sizing calculation.
#[derive(Debug, Clone, Serialize)]
pub struct PositionSizing {
    /// Capital at risk if the stop is hit.
    pub risk_amount: f64,
    /// Loss per unit between entry and stop.
    pub risk_per_unit: f64,
    /// Units to trade, rounded to the nearest whole unit.
    pub quantity: i64,
}

/// Calculate position size from capital, risk percentage, and stop distance.
///
/// Fails with `ZeroRisk` when entry equals stop (the risk per unit would be
/// zero) and with a named `Validation` error when an input is out of range
/// or the stop sits on the wrong side of the entry.
pub fn position_size(
    capital: f64,
    risk_percent: f64,
    entry_price: f64,
    stop_loss: f64,
    direction: Direction,
) -> Result<PositionSizing, DomainError> {
    if !capital.is_finite() || capital <= 0.0 {
        return Err(DomainError::validation("capital", "must be positive"));
    }
    if !risk_percent.is_finite() || risk_percent <= 0.0 || risk_percent > 100.0 {
        return Err(DomainError::validation(
            "risk_percent",
            "must be in (0, 100]",
        ));
    }
    if !entry_price.is_finite() || entry_price <= 0.0 {
        return Err(DomainError::validation("entry_price", "must be positive"));
    }
    if !stop_loss.is_finite() || stop_loss < 0.0 {
        return Err(DomainError::validation("stop_loss", "must be non-negative"));
    }

    let risk_per_unit = if direction.is_bullish() {
        entry_price - stop_loss
    } else {
        stop_loss - entry_price
    };

    if risk_per_unit == 0.0 {
        return Err(DomainError::ZeroRisk);
    }
    if risk_per_unit < 0.0 {
        return Err(DomainError::validation(
            "stop_loss",
            format!("stop {stop_loss} is on the wrong side of entry {entry_price} for a {direction} trade"),
        ));
    }

    let risk_amount = capital * (risk_percent / 100.0);
    let quantity = (risk_amount / risk_per_unit).round() as i64;

    Ok(PositionSizing {
        risk_amount,
        risk_per_unit,
        quantity,
    })
}

/// Reward:risk ratio: distance to target over distance to stop, both taken
/// direction-aware. A zero stop distance fails with `ZeroRisk`, the same
/// signal `position_size` gives, rather than producing an infinity.
pub fn reward_to_risk(
    entry_price: f64,
    target_price: f64,
    stop_loss: f64,
    direction: Direction,
) -> Result<f64, DomainError> {
    if !entry_price.is_finite() || entry_price <= 0.0 {
        return Err(DomainError::validation("entry_price", "must be positive"));
    }
    if !target_price.is_finite() || target_price < 0.0 {
        return Err(DomainError::validation(
            "target_price",
            "must be non-negative",
        ));
    }
    if !stop_loss.is_finite() || stop_loss < 0.0 {
        return Err(DomainError::validation("stop_loss", "must be non-negative"));
    }

    let (reward, risk) = if direction.is_bullish() {
        (target_price - entry_price, entry_price - stop_loss)
    } else {
        (entry_price - target_price, stop_loss - entry_price)
    };

    if risk == 0.0 {
        return Err(DomainError::ZeroRisk);
    }
    if risk < 0.0 {
        return Err(DomainError::validation(
            "stop_loss",
            format!("stop {stop_loss} is on the wrong side of entry {entry_price} for a {direction} trade"),
        ));
    }

    Ok(reward / risk)
}
