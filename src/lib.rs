pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

use crate::application::journal::{JournalUseCase, TradeDraft, TradePatch};
use crate::application::stats::{EquityPoint, StatsUseCase, TradeStats};
use crate::domain::entities::owner::Owner;
use crate::domain::entities::trade::Trade;
use crate::domain::error::DomainError;
use crate::domain::ports::owner_repository::OwnerRepository;
use crate::domain::ports::trade_repository::{TradeFilter, TradeRepository};
use crate::domain::values::charges::ChargeSchedule;
use crate::domain::values::direction::Direction;
use crate::domain::values::sizing::{self, PositionSizing};
use crate::infrastructure::sqlite::migrations::run_migrations;
use crate::infrastructure::sqlite::owner_repo::SqliteOwnerRepo;
use crate::infrastructure::sqlite::trade_repo::SqliteTradeRepo;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

pub struct TradeJournal {
    journal_uc: JournalUseCase,
    stats_uc: StatsUseCase,
    owner_repo: Arc<dyn OwnerRepository>,
}

impl TradeJournal {
    /// Open (or create) the journal at `db_path`. The charge schedule comes
    /// from the JSON file named by `TRADELOG_CHARGES` when set, otherwise
    /// the built-in rate table.
    pub fn new(db_path: &str) -> Result<Self, DomainError> {
        let schedule = match std::env::var("TRADELOG_CHARGES") {
            Ok(path) => {
                let text = std::fs::read_to_string(&path)
                    .map_err(|e| DomainError::Parse(format!("charge schedule {path}: {e}")))?;
                serde_json::from_str(&text)
                    .map_err(|e| DomainError::Parse(format!("charge schedule {path}: {e}")))?
            }
            Err(_) => ChargeSchedule::default(),
        };
        Self::with_schedule(db_path, schedule)
    }

    pub fn with_schedule(db_path: &str, schedule: ChargeSchedule) -> Result<Self, DomainError> {
        let conn = Connection::open(db_path)
            .map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;
        run_migrations(&conn)?;

        // One connection shared across repos; the store is interactive and
        // low-volume, and `:memory:` databases only exist per-connection.
        let conn = Arc::new(Mutex::new(conn));
        let trade_repo: Arc<dyn TradeRepository> = Arc::new(SqliteTradeRepo::new(conn.clone()));
        let owner_repo: Arc<dyn OwnerRepository> = Arc::new(SqliteOwnerRepo::new(conn));

        Ok(Self {
            journal_uc: JournalUseCase::new(trade_repo.clone(), schedule),
            stats_uc: StatsUseCase::new(trade_repo),
            owner_repo,
        })
    }

    /// Resolve an owner name to its identity record, creating it on first
    /// use. Credential checking is the caller's concern.
    pub fn resolve_owner(&self, name: &str) -> Result<Owner, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::validation("owner", "required"));
        }
        if let Some(owner) = self.owner_repo.find_by_name(name)? {
            return Ok(owner);
        }
        let owner = Owner::new(name.to_string());
        self.owner_repo.add(&owner)?;
        Ok(owner)
    }

    // Delegating methods
    pub fn log_trade(&self, owner_id: &str, draft: TradeDraft) -> Result<Trade, DomainError> {
        self.journal_uc.log(owner_id, draft)
    }

    pub fn edit_trade(
        &self,
        id: &str,
        owner_id: &str,
        patch: TradePatch,
    ) -> Result<Trade, DomainError> {
        self.journal_uc.edit(id, owner_id, patch)
    }

    pub fn close_trade(
        &self,
        id: &str,
        owner_id: &str,
        exit_price: f64,
    ) -> Result<Trade, DomainError> {
        self.journal_uc.close(id, owner_id, exit_price)
    }

    pub fn attach_images(
        &self,
        id: &str,
        owner_id: &str,
        entry_image: Option<Vec<u8>>,
        exit_image: Option<Vec<u8>>,
    ) -> Result<Trade, DomainError> {
        self.journal_uc.attach(id, owner_id, entry_image, exit_image)
    }

    pub fn delete_trade(&self, id: &str, owner_id: &str) -> Result<(), DomainError> {
        self.journal_uc.remove(id, owner_id)
    }

    pub fn get_trade(&self, id: &str, owner_id: &str) -> Result<Trade, DomainError> {
        self.journal_uc.get(id, owner_id)
    }

    pub fn list_trades(&self, filter: &TradeFilter) -> Result<Vec<Trade>, DomainError> {
        self.journal_uc.list(filter)
    }

    pub fn stats(&self, owner_id: &str) -> Result<TradeStats, DomainError> {
        self.stats_uc.stats(owner_id)
    }

    pub fn equity_curve(&self, owner_id: &str) -> Result<Vec<EquityPoint>, DomainError> {
        self.stats_uc.equity_curve(owner_id)
    }

    pub fn position_size(
        &self,
        capital: f64,
        risk_percent: f64,
        entry_price: f64,
        stop_loss: f64,
        direction: Direction,
    ) -> Result<PositionSizing, DomainError> {
        sizing::position_size(capital, risk_percent, entry_price, stop_loss, direction)
    }

    pub fn reward_to_risk(
        &self,
        entry_price: f64,
        target_price: f64,
        stop_loss: f64,
        direction: Direction,
    ) -> Result<f64, DomainError> {
        sizing::reward_to_risk(entry_price, target_price, stop_loss, direction)
    }
}
