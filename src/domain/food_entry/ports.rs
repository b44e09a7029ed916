use std::future::Future;

use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    food_entry::{
        entities::{
            Dish, DishEvent, DishTrigger, PredictedDish, PredictedDishTrigger, RawEntry, Trigger,
        },
        value_objects::{
            ConfirmFoodEntryInput, ConfirmedFoodEntry, CreateFoodEntryInput, CreatedFoodEntry,
        },
    },
};

#[cfg_attr(test, mockall::automock)]
pub trait RawEntryRepository: Send + Sync {
    fn create_raw_entry(
        &self,
        raw_entry: RawEntry,
    ) -> impl Future<Output = Result<RawEntry, CoreError>> + Send;

    fn get_by_id(
        &self,
        raw_entry_id: Uuid,
    ) -> impl Future<Output = Result<Option<RawEntry>, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait PredictedDishRepository: Send + Sync {
    fn create_predicted_dish(
        &self,
        predicted_dish: PredictedDish,
    ) -> impl Future<Output = Result<PredictedDish, CoreError>> + Send;

    fn get_by_raw_entry_id(
        &self,
        raw_entry_id: Uuid,
    ) -> impl Future<Output = Result<Vec<PredictedDish>, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait DishRepository: Send + Sync {
    /// Fails with [`CoreError::Conflict`] when `(user_id,
    /// normalized_dish_name)` already exists; callers use that to turn the
    /// find-or-create race into an idempotent retry.
    fn create_dish(&self, dish: Dish) -> impl Future<Output = Result<Dish, CoreError>> + Send;

    fn get_by_id(
        &self,
        dish_id: Uuid,
    ) -> impl Future<Output = Result<Option<Dish>, CoreError>> + Send;

    fn get_by_user_and_normalized_name(
        &self,
        user_id: Uuid,
        normalized_dish_name: String,
    ) -> impl Future<Output = Result<Option<Dish>, CoreError>> + Send;

    fn update_name(&self, dish: Dish) -> impl Future<Output = Result<Dish, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait DishEventRepository: Send + Sync {
    fn create_dish_event(
        &self,
        dish_event: DishEvent,
    ) -> impl Future<Output = Result<DishEvent, CoreError>> + Send;

    fn get_by_id(
        &self,
        dish_event_id: Uuid,
    ) -> impl Future<Output = Result<Option<DishEvent>, CoreError>> + Send;

    /// Every event of the entry, soft-deleted ones included. Confirmation
    /// operates on this set.
    fn get_by_raw_entry_id(
        &self,
        raw_entry_id: Uuid,
    ) -> impl Future<Output = Result<Vec<DishEvent>, CoreError>> + Send;

    /// Events of the entry with `deleted_at IS NULL`.
    fn get_active_by_raw_entry_id(
        &self,
        raw_entry_id: Uuid,
    ) -> impl Future<Output = Result<Vec<DishEvent>, CoreError>> + Send;

    /// Confirmed events of one dish, newest first.
    fn get_confirmed_by_dish_id(
        &self,
        dish_id: Uuid,
    ) -> impl Future<Output = Result<Vec<DishEvent>, CoreError>> + Send;

    /// The user's confirmed, non-deleted events, newest first.
    fn get_confirmed_active_by_user(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Vec<DishEvent>, CoreError>> + Send;

    fn mark_confirmed_by_raw_entry_id(
        &self,
        raw_entry_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn soft_delete(
        &self,
        dish_event_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait TriggerRepository: Send + Sync {
    fn list_triggers(&self) -> impl Future<Output = Result<Vec<Trigger>, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait PredictedDishTriggerRepository: Send + Sync {
    fn create_predicted_triggers(
        &self,
        triggers: Vec<PredictedDishTrigger>,
    ) -> impl Future<Output = Result<Vec<PredictedDishTrigger>, CoreError>> + Send;

    fn get_by_dish_event_id(
        &self,
        dish_event_id: Uuid,
    ) -> impl Future<Output = Result<Vec<PredictedDishTrigger>, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait DishTriggerRepository: Send + Sync {
    /// Replaces the full confirmed set for the event: delete-all then
    /// insert, atomically. Never a partial patch.
    fn replace_for_event(
        &self,
        dish_event_id: Uuid,
        triggers: Vec<DishTrigger>,
    ) -> impl Future<Output = Result<Vec<DishTrigger>, CoreError>> + Send;

    fn get_by_dish_event_id(
        &self,
        dish_event_id: Uuid,
    ) -> impl Future<Output = Result<Vec<DishTrigger>, CoreError>> + Send;
}

/// Transport to the prediction oracles. Both oracle prompts go through the
/// same generate call; the response schema constrains the reply shape.
#[cfg_attr(test, mockall::automock)]
pub trait LlmClient: Send + Sync {
    fn generate(
        &self,
        prompt: String,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;

    /// Recorded on every predicted row for audit.
    fn model_name(&self) -> String;
}

/// The two-phase create/confirm workflow plus the soft-delete and listing
/// operations around it.
#[cfg_attr(test, mockall::automock)]
pub trait FoodEntryService: Send + Sync {
    fn create_food_entry(
        &self,
        input: CreateFoodEntryInput,
    ) -> impl Future<Output = Result<CreatedFoodEntry, CoreError>> + Send;

    fn confirm_food_entry(
        &self,
        input: ConfirmFoodEntryInput,
    ) -> impl Future<Output = Result<ConfirmedFoodEntry, CoreError>> + Send;

    fn delete_dish_event(
        &self,
        dish_event_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn get_entry_dish_events(
        &self,
        raw_entry_id: Uuid,
    ) -> impl Future<Output = Result<Vec<DishEvent>, CoreError>> + Send;

    fn get_food_history(&self) -> impl Future<Output = Result<Vec<DishEvent>, CoreError>> + Send;
}
