use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::common::generate_timestamp;

/// Canonical per-user dish. `(user_id, normalized_dish_name)` is unique;
/// `dish_name` keeps the casing of the first submission until the user
/// renames it during confirmation.
///
/// `embedding_id` is reserved for semantic matching; nothing reads it yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Dish {
    pub id: Uuid,
    pub user_id: Uuid,
    pub dish_name: String,
    pub normalized_dish_name: String,
    pub embedding_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Dish {
    pub fn new(user_id: Uuid, dish_name: String, normalized_dish_name: String) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            user_id,
            dish_name,
            normalized_dish_name,
            embedding_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Renames the dish in place. The rename is global: every past and
    /// future dish event referencing this dish shows the new name.
    pub fn rename(&mut self, dish_name: String, normalized_dish_name: String) {
        let (now, _) = generate_timestamp();

        self.dish_name = dish_name;
        self.normalized_dish_name = normalized_dish_name;
        self.updated_at = now;
    }
}
