use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// One candidate dish identified by the extraction oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDish {
    pub fragment_text: String,
    pub name_suggestion: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateFoodEntryInput {
    pub raw_entry_text: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ConfirmFoodEntryInput {
    pub raw_entry_id: Uuid,
    pub dishes: Vec<ConfirmedDishInput>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ConfirmedDishInput {
    pub dish_event_id: Uuid,
    pub dish_id: Uuid,
    pub final_dish_name: String,
    /// An empty list legitimately clears all confirmed triggers for the
    /// event.
    pub trigger_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TriggerRef {
    pub trigger_id: Uuid,
    pub trigger_name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreatedFoodEntry {
    pub entry_id: Uuid,
    pub dishes: Vec<CreatedEntryDish>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreatedEntryDish {
    pub dish_event_id: Uuid,
    pub dish_id: Uuid,
    pub dish_name: String,
    pub predicted_triggers: Vec<TriggerRef>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ConfirmedFoodEntry {
    pub entry_id: Uuid,
    pub dishes: Vec<ConfirmedEntryDish>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ConfirmedEntryDish {
    pub dish_event_id: Uuid,
    pub dish_id: Uuid,
    pub dish_name: String,
    pub triggers: Vec<TriggerRef>,
}
