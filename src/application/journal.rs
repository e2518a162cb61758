use crate::domain::entities::trade::Trade;
use crate::domain::error::DomainError;
use crate::domain::ports::trade_repository::{TradeFilter, TradeRepository};
use crate::domain::values::annotations::{MarketCondition, Psychology, SetupType};
use crate::domain::values::charges::ChargeSchedule;
use crate::domain::values::direction::Direction;
use crate::domain::values::sizing;
use crate::domain::values::trade_status::TradeStatus;
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;

/// Raw new-trade form input. Entry-side fields are required; exit-side
/// fields are optional. Quantity may be given directly or derived from
/// capital and risk percentage.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TradeDraft {
    pub symbol: Option<String>,
    pub direction: Option<Direction>,
    pub entry_price: Option<f64>,
    pub stop_loss: Option<f64>,
    pub target_price: Option<f64>,
    pub exit_price: Option<f64>,
    pub quantity: Option<i64>,
    pub capital: Option<f64>,
    pub risk_percent: Option<f64>,
    pub status: Option<TradeStatus>,
    pub setup_type: Option<SetupType>,
    pub market_condition: Option<MarketCondition>,
    pub psychology: Option<Psychology>,
    pub notes: Option<String>,
}

/// Partial edit of a trade. Absent fields are left untouched. The derived
/// economics fields are not representable here; `from_json` rejects any
/// attempt to patch them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TradePatch {
    pub symbol: Option<String>,
    pub direction: Option<Direction>,
    pub quantity: Option<i64>,
    pub entry_price: Option<f64>,
    pub stop_loss: Option<f64>,
    pub target_price: Option<f64>,
    pub exit_price: Option<f64>,
    pub status: Option<TradeStatus>,
    pub setup_type: Option<SetupType>,
    pub market_condition: Option<MarketCondition>,
    pub psychology: Option<Psychology>,
    pub notes: Option<String>,
    pub entry_image: Option<Vec<u8>>,
    pub exit_image: Option<Vec<u8>>,
}

/// Fields only the recomputation path may produce.
const DERIVED_FIELDS: &[&str] = &[
    "charges",
    "gross_pnl",
    "net_pnl",
    "brokerage",
    "transaction_tax",
    "exchange_fee",
    "government_tax",
    "stamp_duty",
    "total_charges",
];

/// Fields fixed at creation (or by the close transition).
const IMMUTABLE_FIELDS: &[&str] = &["id", "owner_id", "opened_at", "closed_at"];

impl TradePatch {
    /// Interpret a JSON object as a patch. Derived fields are rejected with
    /// the consistency error; identity fields with a validation error.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, DomainError> {
        let obj = value
            .as_object()
            .ok_or_else(|| DomainError::Parse("patch must be a JSON object".to_string()))?;
        for key in obj.keys() {
            if DERIVED_FIELDS.contains(&key.as_str()) {
                return Err(DomainError::DerivedField(key.clone()));
            }
            if IMMUTABLE_FIELDS.contains(&key.as_str()) {
                return Err(DomainError::validation(
                    "patch",
                    format!("field '{key}' cannot be changed after creation"),
                ));
            }
        }
        serde_json::from_value(value.clone()).map_err(|e| DomainError::Parse(e.to_string()))
    }
}

pub struct JournalUseCase {
    repo: Arc<dyn TradeRepository>,
    schedule: ChargeSchedule,
}

impl JournalUseCase {
    pub fn new(repo: Arc<dyn TradeRepository>, schedule: ChargeSchedule) -> Self {
        Self { repo, schedule }
    }

    /// Log a new trade. Validates required fields, derives the quantity
    /// from capital and risk percentage when it is not given, and computes
    /// the economics immediately when the trade arrives already closed.
    pub fn log(&self, owner_id: &str, draft: TradeDraft) -> Result<Trade, DomainError> {
        let symbol = draft
            .symbol
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| DomainError::validation("symbol", "required"))?;
        let direction = draft
            .direction
            .ok_or_else(|| DomainError::validation("direction", "required"))?;
        let entry_price = draft
            .entry_price
            .ok_or_else(|| DomainError::validation("entry_price", "required"))?;
        if !entry_price.is_finite() || entry_price <= 0.0 {
            return Err(DomainError::validation("entry_price", "must be positive"));
        }
        let stop_loss = draft
            .stop_loss
            .ok_or_else(|| DomainError::validation("stop_loss", "required"))?;
        if !stop_loss.is_finite() || stop_loss < 0.0 {
            return Err(DomainError::validation("stop_loss", "must be non-negative"));
        }
        if let Some(target) = draft.target_price {
            if !target.is_finite() || target < 0.0 {
                return Err(DomainError::validation(
                    "target_price",
                    "must be non-negative",
                ));
            }
        }
        if let Some(exit) = draft.exit_price {
            if !exit.is_finite() || exit < 0.0 {
                return Err(DomainError::validation("exit_price", "must be non-negative"));
            }
        }

        let quantity = match draft.quantity {
            Some(q) if q > 0 => q,
            Some(_) => return Err(DomainError::validation("quantity", "must be positive")),
            None => match (draft.capital, draft.risk_percent) {
                (Some(capital), Some(risk_percent)) => {
                    let sized =
                        sizing::position_size(capital, risk_percent, entry_price, stop_loss, direction)?;
                    if sized.quantity <= 0 {
                        return Err(DomainError::validation(
                            "quantity",
                            "derived position size rounds to zero; raise capital or risk",
                        ));
                    }
                    sized.quantity
                }
                _ => {
                    return Err(DomainError::validation(
                        "quantity",
                        "provide quantity, or capital and risk_percent to derive it",
                    ))
                }
            },
        };

        let mut trade = Trade::new(
            owner_id.to_string(),
            symbol,
            direction,
            quantity,
            entry_price,
            stop_loss,
            draft.target_price,
        );
        trade.setup_type = draft.setup_type;
        trade.market_condition = draft.market_condition;
        trade.psychology = draft.psychology;
        trade.notes = draft.notes;

        let status = draft
            .status
            .unwrap_or(if draft.exit_price.is_some() {
                TradeStatus::Closed
            } else {
                TradeStatus::Open
            });
        match (status, draft.exit_price) {
            (TradeStatus::Closed, Some(exit)) => trade.close(exit, &self.schedule),
            (TradeStatus::Closed, None) => {
                return Err(DomainError::validation(
                    "exit_price",
                    "required when status is closed",
                ))
            }
            // An exit price on a still-open trade is stored but carries no
            // economics until the trade actually closes.
            (TradeStatus::Open, exit) => trade.exit_price = exit,
        }

        self.repo.add(&trade)?;
        Ok(trade)
    }

    /// Apply a partial edit. The derived fields are rebuilt from scratch
    /// after every edit, so repeating a patch yields the same record and
    /// stale charges cannot outlive the inputs that produced them.
    pub fn edit(&self, id: &str, owner_id: &str, patch: TradePatch) -> Result<Trade, DomainError> {
        let mut trade = self
            .repo
            .get(id, owner_id)?
            .ok_or_else(|| DomainError::NotFound(format!("Trade not found: {id}")))?;

        if let Some(symbol) = patch.symbol {
            if symbol.trim().is_empty() {
                return Err(DomainError::validation("symbol", "must not be empty"));
            }
            trade.symbol = symbol;
        }
        if let Some(direction) = patch.direction {
            trade.direction = direction;
        }
        if let Some(quantity) = patch.quantity {
            if quantity <= 0 {
                return Err(DomainError::validation("quantity", "must be positive"));
            }
            trade.quantity = quantity;
        }
        if let Some(entry) = patch.entry_price {
            if !entry.is_finite() || entry <= 0.0 {
                return Err(DomainError::validation("entry_price", "must be positive"));
            }
            trade.entry_price = entry;
        }
        if let Some(stop) = patch.stop_loss {
            if !stop.is_finite() || stop < 0.0 {
                return Err(DomainError::validation("stop_loss", "must be non-negative"));
            }
            trade.stop_loss = stop;
        }
        if let Some(target) = patch.target_price {
            if !target.is_finite() || target < 0.0 {
                return Err(DomainError::validation(
                    "target_price",
                    "must be non-negative",
                ));
            }
            trade.target_price = Some(target);
        }
        if let Some(exit) = patch.exit_price {
            if !exit.is_finite() || exit < 0.0 {
                return Err(DomainError::validation("exit_price", "must be non-negative"));
            }
            trade.exit_price = Some(exit);
        }
        if let Some(status) = patch.status {
            trade.status = status;
        }
        if let Some(setup) = patch.setup_type {
            trade.setup_type = Some(setup);
        }
        if let Some(market) = patch.market_condition {
            trade.market_condition = Some(market);
        }
        if let Some(psych) = patch.psychology {
            trade.psychology = Some(psych);
        }
        if let Some(notes) = patch.notes {
            trade.notes = Some(notes);
        }
        if let Some(image) = patch.entry_image {
            trade.entry_image = Some(image);
        }
        if let Some(image) = patch.exit_image {
            trade.exit_image = Some(image);
        }

        match trade.status {
            TradeStatus::Closed => {
                if trade.exit_price.is_none() {
                    return Err(DomainError::validation(
                        "exit_price",
                        "required when status is closed",
                    ));
                }
                if trade.closed_at.is_none() {
                    trade.closed_at = Some(Utc::now());
                }
            }
            TradeStatus::Open => trade.closed_at = None,
        }

        trade.recompute_economics(&self.schedule);
        self.repo.update(&trade)?;
        Ok(trade)
    }

    /// Close a trade at the given exit price.
    pub fn close(&self, id: &str, owner_id: &str, exit_price: f64) -> Result<Trade, DomainError> {
        if !exit_price.is_finite() || exit_price < 0.0 {
            return Err(DomainError::validation("exit_price", "must be non-negative"));
        }
        let mut trade = self
            .repo
            .get(id, owner_id)?
            .ok_or_else(|| DomainError::NotFound(format!("Trade not found: {id}")))?;
        trade.close(exit_price, &self.schedule);
        self.repo.update(&trade)?;
        Ok(trade)
    }

    /// Attach entry/exit screenshots to a trade.
    pub fn attach(
        &self,
        id: &str,
        owner_id: &str,
        entry_image: Option<Vec<u8>>,
        exit_image: Option<Vec<u8>>,
    ) -> Result<Trade, DomainError> {
        self.edit(
            id,
            owner_id,
            TradePatch {
                entry_image,
                exit_image,
                ..TradePatch::default()
            },
        )
    }

    /// Permanently delete a trade. Irreversible.
    pub fn remove(&self, id: &str, owner_id: &str) -> Result<(), DomainError> {
        self.repo.delete(id, owner_id)
    }

    pub fn get(&self, id: &str, owner_id: &str) -> Result<Trade, DomainError> {
        self.repo
            .get(id, owner_id)?
            .ok_or_else(|| DomainError::NotFound(format!("Trade not found: {id}")))
    }

    pub fn list(&self, filter: &TradeFilter) -> Result<Vec<Trade>, DomainError> {
        self.repo.list(filter)
    }
}
