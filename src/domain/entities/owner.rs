use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity record a trade belongs to. Credential handling lives outside
/// the core; the journal only ever sees a resolved owner id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Owner {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Owner {
    pub fn new(name: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            created_at: Utc::now(),
        }
    }
}
