use uuid::Uuid;

use crate::domain::{
    authentication::ports::IdentityProvider,
    common::{entities::app_errors::CoreError, services::Service},
    food_entry::{
        entities::{Dish, DishEvent, DishTrigger, PredictedDish, PredictedDishTrigger, RawEntry},
        extraction::{extract_dishes, predict_triggers},
        helpers::normalize_dish_name,
        ports::{
            DishEventRepository, DishRepository, DishTriggerRepository, FoodEntryService,
            LlmClient, PredictedDishRepository, PredictedDishTriggerRepository,
            RawEntryRepository, TriggerRepository,
        },
        resolution::{find_or_create_dish, most_recent_confirmed_triggers},
        schema::{EXTRACTION_PROMPT_VERSION, TRIGGER_PROMPT_VERSION},
        value_objects::{
            ConfirmFoodEntryInput, ConfirmedEntryDish, ConfirmedFoodEntry, CreateFoodEntryInput,
            CreatedEntryDish, CreatedFoodEntry, TriggerRef,
        },
    },
};

/// A dish event produced in the resolution phase, waiting for its trigger
/// phase. `inherited_triggers` is the dish's most recent confirmed set;
/// empty means the dish is new to the user and the oracle runs.
struct PendingEventDish {
    event: DishEvent,
    dish: Dish,
    fragment_text: String,
    inherited_triggers: Vec<TriggerRef>,
}

impl<IP, RE, PD, D, DE, TR, PT, CT, L> FoodEntryService
    for Service<IP, RE, PD, D, DE, TR, PT, CT, L>
where
    IP: IdentityProvider,
    RE: RawEntryRepository,
    PD: PredictedDishRepository,
    D: DishRepository,
    DE: DishEventRepository,
    TR: TriggerRepository,
    PT: PredictedDishTriggerRepository,
    CT: DishTriggerRepository,
    L: LlmClient,
{
    async fn create_food_entry(
        &self,
        input: CreateFoodEntryInput,
    ) -> Result<CreatedFoodEntry, CoreError> {
        let identity = self.identity_provider.authenticated_identity().await?;
        let user_id = identity.user_id();

        let raw_entry = self
            .raw_entry_repository
            .create_raw_entry(RawEntry::new(user_id, input.raw_entry_text.clone()))
            .await?;

        // Extraction never fails; at worst it is the raw text as one dish.
        let extracted = extract_dishes(&self.llm_client, &input.raw_entry_text).await;

        // Phase one, in extraction order: audit row, dish resolution, one
        // unconfirmed event per extracted dish.
        let mut pending = Vec::with_capacity(extracted.len());
        for extracted_dish in extracted {
            let predicted_dish = self
                .predicted_dish_repository
                .create_predicted_dish(PredictedDish::new(
                    raw_entry.id,
                    extracted_dish.fragment_text.clone(),
                    extracted_dish.name_suggestion.clone(),
                    self.llm_client.model_name(),
                    EXTRACTION_PROMPT_VERSION.to_string(),
                ))
                .await?;

            let dish =
                find_or_create_dish(&self.dish_repository, user_id, &extracted_dish.name_suggestion)
                    .await?;

            let inherited_triggers = most_recent_confirmed_triggers(
                &self.dish_event_repository,
                &self.dish_trigger_repository,
                &self.trigger_catalog,
                dish.id,
            )
            .await?
            .into_iter()
            .map(|t| TriggerRef {
                trigger_id: t.id,
                trigger_name: t.trigger_name,
            })
            .collect();

            let event = self
                .dish_event_repository
                .create_dish_event(DishEvent::new(
                    user_id,
                    dish.id,
                    Some(predicted_dish.id),
                    raw_entry.id,
                ))
                .await?;

            pending.push(PendingEventDish {
                event,
                dish,
                fragment_text: extracted_dish.fragment_text,
                inherited_triggers,
            });
        }

        // Phase two, same order: predicted triggers per event. A dish the
        // user already vetted inherits its last confirmed set instead of
        // re-running inference that might disagree with history.
        let mut dishes = Vec::with_capacity(pending.len());
        for item in pending {
            let predicted_triggers = if item.inherited_triggers.is_empty() {
                let names = predict_triggers(
                    &self.llm_client,
                    &self.trigger_catalog,
                    &item.dish.dish_name,
                    &item.fragment_text,
                )
                .await;
                names
                    .iter()
                    .filter_map(|name| self.trigger_catalog.get_by_name(name))
                    .map(|t| TriggerRef {
                        trigger_id: t.id,
                        trigger_name: t.trigger_name.clone(),
                    })
                    .collect()
            } else {
                item.inherited_triggers
            };

            let rows: Vec<PredictedDishTrigger> = predicted_triggers
                .iter()
                .map(|t| {
                    PredictedDishTrigger::new(
                        item.dish.id,
                        item.event.id,
                        t.trigger_id,
                        self.llm_client.model_name(),
                        TRIGGER_PROMPT_VERSION.to_string(),
                    )
                })
                .collect();
            if !rows.is_empty() {
                self.predicted_dish_trigger_repository
                    .create_predicted_triggers(rows)
                    .await?;
            }

            dishes.push(CreatedEntryDish {
                dish_event_id: item.event.id,
                dish_id: item.dish.id,
                dish_name: item.dish.dish_name,
                predicted_triggers,
            });
        }

        Ok(CreatedFoodEntry {
            entry_id: raw_entry.id,
            dishes,
        })
    }

    async fn confirm_food_entry(
        &self,
        input: ConfirmFoodEntryInput,
    ) -> Result<ConfirmedFoodEntry, CoreError> {
        let identity = self.identity_provider.authenticated_identity().await?;
        let user_id = identity.user_id();

        let events = self
            .dish_event_repository
            .get_by_raw_entry_id(input.raw_entry_id)
            .await?;
        if events.is_empty() {
            return Err(CoreError::NotFound(format!(
                "Food entry not found: {}",
                input.raw_entry_id
            )));
        }
        if events.iter().any(|e| e.user_id != user_id) {
            return Err(CoreError::Forbidden(
                "Food entry does not belong to the user".to_string(),
            ));
        }

        for confirmed in &input.dishes {
            let event = events
                .iter()
                .find(|e| e.id == confirmed.dish_event_id)
                .ok_or_else(|| {
                    CoreError::NotFound(format!(
                        "Dish event not found: {}",
                        confirmed.dish_event_id
                    ))
                })?;

            // Fetched by id, never through find-or-create: this path must
            // mutate the existing row.
            let dish = self
                .dish_repository
                .get_by_id(confirmed.dish_id)
                .await?
                .ok_or_else(|| {
                    CoreError::NotFound(format!("Dish not found: {}", confirmed.dish_id))
                })?;

            if dish.user_id != event.user_id {
                return Err(CoreError::Forbidden(
                    "Dish does not belong to the user".to_string(),
                ));
            }

            let normalized = normalize_dish_name(&confirmed.final_dish_name);
            if dish.dish_name != confirmed.final_dish_name
                || dish.normalized_dish_name != normalized
            {
                let colliding = self
                    .dish_repository
                    .get_by_user_and_normalized_name(dish.user_id, normalized.clone())
                    .await?;
                if colliding.is_some_and(|other| other.id != dish.id) {
                    return Err(CoreError::Conflict(format!(
                        "Cannot update dish name: a dish with normalized name \"{normalized}\" already exists"
                    )));
                }

                // Global rename: every past and future event of this dish
                // shows the new name.
                let mut renamed = dish.clone();
                renamed.rename(confirmed.final_dish_name.clone(), normalized);
                self.dish_repository.update_name(renamed).await?;
            }

            let rows = confirmed
                .trigger_ids
                .iter()
                .map(|trigger_id| {
                    self.trigger_catalog
                        .get_by_id(*trigger_id)
                        .map(|t| DishTrigger::new(confirmed.dish_id, confirmed.dish_event_id, t.id))
                        .ok_or_else(|| {
                            CoreError::NotFound(format!("Trigger not found: {trigger_id}"))
                        })
                })
                .collect::<Result<Vec<DishTrigger>, CoreError>>()?;

            // Wholesale replace; an empty list legitimately clears the set.
            self.dish_trigger_repository
                .replace_for_event(confirmed.dish_event_id, rows)
                .await?;
        }

        // Whole-entry commit: confirmation finalizes the entry as a unit,
        // events omitted from the payload included. Their triggers stay
        // untouched; explicit soft delete is the only way to drop a dish
        // from an entry.
        self.dish_event_repository
            .mark_confirmed_by_raw_entry_id(input.raw_entry_id)
            .await?;

        let active_events = self
            .dish_event_repository
            .get_active_by_raw_entry_id(input.raw_entry_id)
            .await?;

        let mut dishes = Vec::with_capacity(active_events.len());
        for event in active_events {
            let rows = self
                .dish_trigger_repository
                .get_by_dish_event_id(event.id)
                .await?;
            let mut triggers = Vec::with_capacity(rows.len());
            for row in rows {
                let trigger = self.trigger_catalog.get_by_id(row.trigger_id).ok_or_else(|| {
                    CoreError::NotFound(format!("Trigger not found: {}", row.trigger_id))
                })?;
                triggers.push(TriggerRef {
                    trigger_id: trigger.id,
                    trigger_name: trigger.trigger_name.clone(),
                });
            }

            let dish_name = input
                .dishes
                .iter()
                .find(|d| d.dish_event_id == event.id)
                .map(|d| d.final_dish_name.clone())
                .unwrap_or_else(|| "Unknown".to_string());

            dishes.push(ConfirmedEntryDish {
                dish_event_id: event.id,
                dish_id: event.dish_id,
                dish_name,
                triggers,
            });
        }

        Ok(ConfirmedFoodEntry {
            entry_id: input.raw_entry_id,
            dishes,
        })
    }

    async fn delete_dish_event(&self, dish_event_id: Uuid) -> Result<(), CoreError> {
        let identity = self.identity_provider.authenticated_identity().await?;

        let event = self
            .dish_event_repository
            .get_by_id(dish_event_id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("Dish event not found: {dish_event_id}")))?;

        if event.user_id != identity.user_id() {
            return Err(CoreError::Forbidden(
                "Dish event does not belong to the user".to_string(),
            ));
        }

        // Soft delete only; dish, trigger and audit rows stay for history.
        self.dish_event_repository.soft_delete(dish_event_id).await
    }

    async fn get_entry_dish_events(&self, raw_entry_id: Uuid) -> Result<Vec<DishEvent>, CoreError> {
        let identity = self.identity_provider.authenticated_identity().await?;

        let events = self
            .dish_event_repository
            .get_active_by_raw_entry_id(raw_entry_id)
            .await?;
        if events.iter().any(|e| e.user_id != identity.user_id()) {
            return Err(CoreError::Forbidden(
                "Food entry does not belong to the user".to_string(),
            ));
        }

        Ok(events)
    }

    async fn get_food_history(&self) -> Result<Vec<DishEvent>, CoreError> {
        let identity = self.identity_provider.authenticated_identity().await?;

        self.dish_event_repository
            .get_confirmed_active_by_user(identity.user_id())
            .await
    }
}
