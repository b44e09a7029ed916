use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::common::generate_timestamp;

/// Immutable record of what the user typed. One per submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RawEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub raw_text: String,
    pub created_at: DateTime<Utc>,
}

impl RawEntry {
    pub fn new(user_id: Uuid, raw_text: String) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            user_id,
            raw_text,
            created_at: now,
        }
    }
}
