use crate::domain::values::annotations::{MarketCondition, Psychology, SetupType};
use crate::domain::values::charges::{ChargeBreakdown, ChargeSchedule};
use crate::domain::values::direction::Direction;
use crate::domain::values::pnl;
use crate::domain::values::trade_status::TradeStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A journaled trade. `charges`, `gross_pnl`, and `net_pnl` are derived:
/// they are produced only by `recompute_economics` and are present exactly
/// when the trade is closed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub id: String,
    pub owner_id: String,
    pub symbol: String,
    pub direction: Direction,
    pub quantity: i64,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub target_price: Option<f64>,
    pub exit_price: Option<f64>,
    pub status: TradeStatus,
    pub charges: Option<ChargeBreakdown>,
    pub gross_pnl: Option<f64>,
    pub net_pnl: Option<f64>,
    pub setup_type: Option<SetupType>,
    pub market_condition: Option<MarketCondition>,
    pub psychology: Option<Psychology>,
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_image: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_image: Option<Vec<u8>>,
    pub opened_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

impl Trade {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        owner_id: String,
        symbol: String,
        direction: Direction,
        quantity: i64,
        entry_price: f64,
        stop_loss: f64,
        target_price: Option<f64>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            owner_id,
            symbol,
            direction,
            quantity,
            entry_price,
            stop_loss,
            target_price,
            exit_price: None,
            status: TradeStatus::Open,
            charges: None,
            gross_pnl: None,
            net_pnl: None,
            setup_type: None,
            market_condition: None,
            psychology: None,
            notes: None,
            entry_image: None,
            exit_image: None,
            opened_at: Utc::now(),
            closed_at: None,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.status == TradeStatus::Closed
    }

    /// Transition to Closed at the given exit price and rebuild the
    /// derived economics.
    pub fn close(&mut self, exit_price: f64, schedule: &ChargeSchedule) {
        self.exit_price = Some(exit_price);
        self.status = TradeStatus::Closed;
        if self.closed_at.is_none() {
            self.closed_at = Some(Utc::now());
        }
        self.recompute_economics(schedule);
    }

    /// Rebuild `charges`, `gross_pnl`, and `net_pnl` from the trade's
    /// current inputs. The sole producer of the derived fields: closed
    /// trades get a fresh breakdown, anything else is cleared so stale
    /// values cannot survive a price edit or a reopen.
    pub fn recompute_economics(&mut self, schedule: &ChargeSchedule) {
        match (self.status, self.exit_price) {
            (TradeStatus::Closed, Some(exit)) => {
                let charges = schedule.breakdown(
                    self.quantity,
                    self.entry_price,
                    exit,
                    self.direction.instrument_class(),
                );
                let gross = pnl::gross_pnl(self.quantity, self.entry_price, exit, self.direction);
                self.gross_pnl = Some(gross);
                self.net_pnl = Some(pnl::net_pnl(gross, charges.total));
                self.charges = Some(charges);
            }
            _ => {
                self.charges = None;
                self.gross_pnl = None;
                self.net_pnl = None;
            }
        }
    }
}
