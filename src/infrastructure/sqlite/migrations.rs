use crate::domain::error::DomainError;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<(), DomainError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS owners (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS trades (
            id TEXT PRIMARY KEY,
            owner_id TEXT NOT NULL,
            symbol TEXT NOT NULL,
            direction TEXT NOT NULL,
            quantity INTEGER NOT NULL,
            entry_price REAL NOT NULL,
            stop_loss REAL NOT NULL,
            target_price REAL,
            exit_price REAL,
            status TEXT NOT NULL,
            brokerage REAL,
            transaction_tax REAL,
            exchange_fee REAL,
            government_tax REAL,
            stamp_duty REAL,
            total_charges REAL,
            gross_pnl REAL,
            net_pnl REAL,
            setup_type TEXT,
            market_condition TEXT,
            psychology TEXT,
            notes TEXT,
            entry_image BLOB,
            exit_image BLOB,
            opened_at TEXT NOT NULL,
            closed_at TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_trades_owner ON trades(owner_id);
        CREATE INDEX IF NOT EXISTS idx_trades_opened ON trades(owner_id, opened_at);
        CREATE INDEX IF NOT EXISTS idx_trades_symbol ON trades(owner_id, symbol);
        ",
    )
    .map_err(|e| DomainError::Database(format!("Migration failed: {e}")))
}
