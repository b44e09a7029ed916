use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::common::generate_timestamp;

/// Fixed catalog row; `trigger_name` is drawn from the closed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Trigger {
    pub id: Uuid,
    pub trigger_name: String,
    pub created_at: DateTime<Utc>,
}

impl Trigger {
    pub fn new(trigger_name: String) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            trigger_name,
            created_at: now,
        }
    }
}

/// The oracle's guess for one dish event. Append-only; never deleted or
/// edited, even after the user confirms different triggers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PredictedDishTrigger {
    pub id: Uuid,
    pub dish_id: Uuid,
    pub dish_event_id: Uuid,
    pub trigger_id: Uuid,
    pub model_version: String,
    pub prompt_version: String,
    pub created_at: DateTime<Utc>,
}

impl PredictedDishTrigger {
    pub fn new(
        dish_id: Uuid,
        dish_event_id: Uuid,
        trigger_id: Uuid,
        model_version: String,
        prompt_version: String,
    ) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            dish_id,
            dish_event_id,
            trigger_id,
            model_version,
            prompt_version,
            created_at: now,
        }
    }
}

/// User-confirmed ground truth for one dish event. The full set for a
/// given event is always replaced wholesale, never partially patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DishTrigger {
    pub id: Uuid,
    pub dish_id: Uuid,
    pub dish_event_id: Uuid,
    pub trigger_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl DishTrigger {
    pub fn new(dish_id: Uuid, dish_event_id: Uuid, trigger_id: Uuid) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            dish_id,
            dish_event_id,
            trigger_id,
            created_at: now,
        }
    }
}
