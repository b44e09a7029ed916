use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::common::generate_timestamp;

/// One occurrence of eating a dish, from one raw entry.
///
/// `predicted_dish_id` is `None` when the dish was added manually during
/// confirmation rather than extracted. Events are soft-deleted only:
/// `deleted_at` is set, the row never goes away.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DishEvent {
    pub id: Uuid,
    pub user_id: Uuid,
    pub dish_id: Uuid,
    pub predicted_dish_id: Option<Uuid>,
    pub raw_entry_id: Uuid,
    pub confirmed_by_user: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DishEvent {
    pub fn new(
        user_id: Uuid,
        dish_id: Uuid,
        predicted_dish_id: Option<Uuid>,
        raw_entry_id: Uuid,
    ) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            user_id,
            dish_id,
            predicted_dish_id,
            raw_entry_id,
            confirmed_by_user: false,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}
