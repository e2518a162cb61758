use crate::domain::entities::owner::Owner;
use crate::domain::error::DomainError;
use crate::domain::ports::owner_repository::OwnerRepository;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

pub struct SqliteOwnerRepo {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteOwnerRepo {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn row_to_owner(row: &rusqlite::Row) -> Result<Owner, rusqlite::Error> {
        let created_str: String = row.get(2)?;
        Ok(Owner {
            id: row.get(0)?,
            name: row.get(1)?,
            created_at: DateTime::parse_from_rfc3339(&created_str)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|_| {
                    rusqlite::Error::InvalidParameterName(format!("created_at: {created_str}"))
                })?,
        })
    }

    fn query_one(&self, sql: &str, key: &str) -> Result<Option<Owner>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut rows = stmt
            .query_map(params![key], Self::row_to_owner)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        rows.next()
            .transpose()
            .map_err(|e| DomainError::Database(e.to_string()))
    }
}

impl OwnerRepository for SqliteOwnerRepo {
    fn add(&self, owner: &Owner) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.execute(
            "INSERT INTO owners (id, name, created_at) VALUES (?1, ?2, ?3)",
            params![owner.id, owner.name, owner.created_at.to_rfc3339()],
        )
        .map_err(|e| DomainError::Database(format!("Failed to add owner: {e}")))?;
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<Owner>, DomainError> {
        self.query_one("SELECT id, name, created_at FROM owners WHERE id = ?1", id)
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Owner>, DomainError> {
        self.query_one(
            "SELECT id, name, created_at FROM owners WHERE name = ?1",
            name,
        )
    }
}
