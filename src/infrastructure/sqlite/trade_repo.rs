use crate::domain::entities::trade::Trade;
use crate::domain::error::DomainError;
use crate::domain::ports::trade_repository::{TradeFilter, TradeRepository};
use crate::domain::values::charges::ChargeBreakdown;
use crate::domain::values::direction::Direction;
use crate::domain::values::trade_status::TradeStatus;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

const TRADE_COLUMNS: &str = "id, owner_id, symbol, direction, quantity, entry_price, stop_loss, \
     target_price, exit_price, status, brokerage, transaction_tax, exchange_fee, government_tax, \
     stamp_duty, total_charges, gross_pnl, net_pnl, setup_type, market_condition, psychology, \
     notes, entry_image, exit_image, opened_at, closed_at";

pub struct SqliteTradeRepo {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteTradeRepo {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn parse_timestamp(column: &str, value: &str) -> Result<DateTime<Utc>, rusqlite::Error> {
        DateTime::parse_from_rfc3339(value)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| rusqlite::Error::InvalidParameterName(format!("{column}: {value}")))
    }

    fn row_to_trade(row: &rusqlite::Row) -> Result<Trade, rusqlite::Error> {
        let dir_str: String = row.get(3)?;
        let status_str: String = row.get(9)?;
        let setup_str: Option<String> = row.get(18)?;
        let market_str: Option<String> = row.get(19)?;
        let psych_str: Option<String> = row.get(20)?;
        let opened_str: String = row.get(24)?;
        let closed_str: Option<String> = row.get(25)?;

        let direction: Direction = dir_str
            .parse()
            .map_err(|_| rusqlite::Error::InvalidParameterName(format!("direction: {dir_str}")))?;
        let status: TradeStatus = status_str
            .parse()
            .map_err(|_| rusqlite::Error::InvalidParameterName(format!("status: {status_str}")))?;

        let brokerage: Option<f64> = row.get(10)?;
        let transaction_tax: Option<f64> = row.get(11)?;
        let exchange_fee: Option<f64> = row.get(12)?;
        let government_tax: Option<f64> = row.get(13)?;
        let stamp_duty: Option<f64> = row.get(14)?;
        let total_charges: Option<f64> = row.get(15)?;
        let charges = match (
            brokerage,
            transaction_tax,
            exchange_fee,
            government_tax,
            stamp_duty,
            total_charges,
        ) {
            (Some(b), Some(t), Some(x), Some(g), Some(s), Some(total)) => Some(ChargeBreakdown {
                brokerage: b,
                transaction_tax: t,
                exchange_fee: x,
                government_tax: g,
                stamp_duty: s,
                total,
            }),
            _ => None,
        };

        Ok(Trade {
            id: row.get(0)?,
            owner_id: row.get(1)?,
            symbol: row.get(2)?,
            direction,
            quantity: row.get(4)?,
            entry_price: row.get(5)?,
            stop_loss: row.get(6)?,
            target_price: row.get(7)?,
            exit_price: row.get(8)?,
            status,
            charges,
            gross_pnl: row.get(16)?,
            net_pnl: row.get(17)?,
            setup_type: setup_str.and_then(|s| s.parse().ok()),
            market_condition: market_str.and_then(|s| s.parse().ok()),
            psychology: psych_str.and_then(|s| s.parse().ok()),
            notes: row.get(21)?,
            entry_image: row.get(22)?,
            exit_image: row.get(23)?,
            opened_at: Self::parse_timestamp("opened_at", &opened_str)?,
            closed_at: closed_str
                .map(|s| Self::parse_timestamp("closed_at", &s))
                .transpose()?,
        })
    }
}

impl TradeRepository for SqliteTradeRepo {
    fn add(&self, trade: &Trade) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.execute(
            "INSERT INTO trades (id, owner_id, symbol, direction, quantity, entry_price, stop_loss, \
             target_price, exit_price, status, brokerage, transaction_tax, exchange_fee, government_tax, \
             stamp_duty, total_charges, gross_pnl, net_pnl, setup_type, market_condition, psychology, \
             notes, entry_image, exit_image, opened_at, closed_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, \
             ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26)",
            params![
                trade.id,
                trade.owner_id,
                trade.symbol,
                trade.direction.to_string(),
                trade.quantity,
                trade.entry_price,
                trade.stop_loss,
                trade.target_price,
                trade.exit_price,
                trade.status.to_string(),
                trade.charges.map(|c| c.brokerage),
                trade.charges.map(|c| c.transaction_tax),
                trade.charges.map(|c| c.exchange_fee),
                trade.charges.map(|c| c.government_tax),
                trade.charges.map(|c| c.stamp_duty),
                trade.charges.map(|c| c.total),
                trade.gross_pnl,
                trade.net_pnl,
                trade.setup_type.map(|s| s.to_string()),
                trade.market_condition.map(|m| m.to_string()),
                trade.psychology.map(|p| p.to_string()),
                trade.notes,
                trade.entry_image,
                trade.exit_image,
                trade.opened_at.to_rfc3339(),
                trade.closed_at.map(|dt| dt.to_rfc3339()),
            ],
        )
        .map_err(|e| DomainError::Database(format!("Failed to add trade: {e}")))?;
        Ok(())
    }

    fn get(&self, id: &str, owner_id: &str) -> Result<Option<Trade>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {TRADE_COLUMNS} FROM trades WHERE id = ?1 AND owner_id = ?2"
            ))
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut rows = stmt
            .query_map(params![id, owner_id], Self::row_to_trade)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        rows.next()
            .transpose()
            .map_err(|e| DomainError::Database(e.to_string()))
    }

    fn update(&self, trade: &Trade) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        // id, owner_id, and opened_at never change after creation.
        let rows = conn
            .execute(
                "UPDATE trades SET symbol = ?1, direction = ?2, quantity = ?3, entry_price = ?4, \
                 stop_loss = ?5, target_price = ?6, exit_price = ?7, status = ?8, brokerage = ?9, \
                 transaction_tax = ?10, exchange_fee = ?11, government_tax = ?12, stamp_duty = ?13, \
                 total_charges = ?14, gross_pnl = ?15, net_pnl = ?16, setup_type = ?17, \
                 market_condition = ?18, psychology = ?19, notes = ?20, entry_image = ?21, \
                 exit_image = ?22, closed_at = ?23 WHERE id = ?24 AND owner_id = ?25",
                params![
                    trade.symbol,
                    trade.direction.to_string(),
                    trade.quantity,
                    trade.entry_price,
                    trade.stop_loss,
                    trade.target_price,
                    trade.exit_price,
                    trade.status.to_string(),
                    trade.charges.map(|c| c.brokerage),
                    trade.charges.map(|c| c.transaction_tax),
                    trade.charges.map(|c| c.exchange_fee),
                    trade.charges.map(|c| c.government_tax),
                    trade.charges.map(|c| c.stamp_duty),
                    trade.charges.map(|c| c.total),
                    trade.gross_pnl,
                    trade.net_pnl,
                    trade.setup_type.map(|s| s.to_string()),
                    trade.market_condition.map(|m| m.to_string()),
                    trade.psychology.map(|p| p.to_string()),
                    trade.notes,
                    trade.entry_image,
                    trade.exit_image,
                    trade.closed_at.map(|dt| dt.to_rfc3339()),
                    trade.id,
                    trade.owner_id,
                ],
            )
            .map_err(|e| DomainError::Database(format!("Failed to update trade: {e}")))?;
        if rows == 0 {
            return Err(DomainError::NotFound(format!("Trade not found: {}", trade.id)));
        }
        Ok(())
    }

    fn delete(&self, id: &str, owner_id: &str) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let rows = conn
            .execute(
                "DELETE FROM trades WHERE id = ?1 AND owner_id = ?2",
                params![id, owner_id],
            )
            .map_err(|e| DomainError::Database(format!("Failed to delete trade: {e}")))?;
        if rows == 0 {
            return Err(DomainError::NotFound(format!("Trade not found: {id}")));
        }
        Ok(())
    }

    fn list(&self, filter: &TradeFilter) -> Result<Vec<Trade>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut sql = format!("SELECT {TRADE_COLUMNS} FROM trades WHERE owner_id = ?1");
        let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> =
            vec![Box::new(filter.owner_id.clone())];

        if let Some(from) = &filter.from {
            sql.push_str(&format!(" AND opened_at >= ?{}", param_values.len() + 1));
            param_values.push(Box::new(from.to_rfc3339()));
        }
        if let Some(to) = &filter.to {
            sql.push_str(&format!(" AND opened_at <= ?{}", param_values.len() + 1));
            param_values.push(Box::new(to.to_rfc3339()));
        }
        if let Some(symbol) = &filter.symbol {
            sql.push_str(&format!(
                " AND LOWER(symbol) LIKE ?{}",
                param_values.len() + 1
            ));
            param_values.push(Box::new(format!("%{}%", symbol.to_lowercase())));
        }
        if let Some(status) = filter.status {
            sql.push_str(&format!(" AND status = ?{}", param_values.len() + 1));
            param_values.push(Box::new(status.to_string()));
        }
        // Stable iteration order for reproducible downstream aggregation.
        sql.push_str(" ORDER BY opened_at ASC, id ASC");
        if let Some(limit) = filter.limit {
            sql.push_str(&format!(" LIMIT ?{}", param_values.len() + 1));
            param_values.push(Box::new(limit as i64));
        }

        let params_refs: Vec<&dyn rusqlite::types::ToSql> =
            param_values.iter().map(|p| p.as_ref()).collect();
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let trades = stmt
            .query_map(params_refs.as_slice(), Self::row_to_trade)
            .map_err(|e| DomainError::Database(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        Ok(trades)
    }
}
