//! Shared test helpers.

use tradelog::application::journal::TradeDraft;
use tradelog::domain::values::charges::ChargeSchedule;
use tradelog::domain::values::direction::Direction;
use tradelog::TradeJournal;

pub fn setup() -> TradeJournal {
    TradeJournal::with_schedule(":memory:", ChargeSchedule::default()).unwrap()
}

pub fn draft(
    symbol: &str,
    direction: Direction,
    quantity: i64,
    entry_price: f64,
    stop_loss: f64,
) -> TradeDraft {
    TradeDraft {
        symbol: Some(symbol.to_string()),
        direction: Some(direction),
        quantity: Some(quantity),
        entry_price: Some(entry_price),
        stop_loss: Some(stop_loss),
        ..TradeDraft::default()
    }
}
