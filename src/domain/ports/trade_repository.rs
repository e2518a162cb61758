use crate::domain::entities::trade::Trade;
use crate::domain::error::DomainError;
use crate::domain::values::trade_status::TradeStatus;
use chrono::{DateTime, Utc};

/// Query filter for the trade store. `owner_id` is mandatory: every
/// statement the store runs is scoped to one owner.
#[derive(Debug, Clone)]
pub struct TradeFilter {
    pub owner_id: String,
    /// Inclusive start of the opened_at range.
    pub from: Option<DateTime<Utc>>,
    /// Inclusive end of the opened_at range.
    pub to: Option<DateTime<Utc>>,
    /// Case-insensitive substring match on the symbol.
    pub symbol: Option<String>,
    pub status: Option<TradeStatus>,
    pub limit: Option<usize>,
}

impl TradeFilter {
    pub fn for_owner(owner_id: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            from: None,
            to: None,
            symbol: None,
            status: None,
            limit: None,
        }
    }
}

pub trait TradeRepository: Send + Sync {
    fn add(&self, trade: &Trade) -> Result<(), DomainError>;
    fn get(&self, id: &str, owner_id: &str) -> Result<Option<Trade>, DomainError>;
    /// Persist the full record; `NotFound` if the id/owner pair is absent.
    fn update(&self, trade: &Trade) -> Result<(), DomainError>;
    fn delete(&self, id: &str, owner_id: &str) -> Result<(), DomainError>;
    /// Matching trades ordered by `opened_at` ascending, id as tie-break.
    fn list(&self, filter: &TradeFilter) -> Result<Vec<Trade>, DomainError>;
}
