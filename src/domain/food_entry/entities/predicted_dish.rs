use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::common::generate_timestamp;

/// One dish the extraction oracle identified in a raw entry. Write-once
/// audit trail of what was predicted, under which model and prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PredictedDish {
    pub id: Uuid,
    pub raw_entry_id: Uuid,
    pub fragment_text: String,
    pub name_suggestion: String,
    pub model_version: String,
    pub prompt_version: String,
    pub created_at: DateTime<Utc>,
}

impl PredictedDish {
    pub fn new(
        raw_entry_id: Uuid,
        fragment_text: String,
        name_suggestion: String,
        model_version: String,
        prompt_version: String,
    ) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            raw_entry_id,
            fragment_text,
            name_suggestion,
            model_version,
            prompt_version,
            created_at: now,
        }
    }
}
