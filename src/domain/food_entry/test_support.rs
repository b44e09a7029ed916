//! Hand-rolled fakes shared by the domain tests: an in-memory store that
//! implements every repository port, plus scriptable identity and LLM
//! stubs.

use std::collections::VecDeque;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{
    authentication::{ports::IdentityProvider, value_objects::Identity},
    common::entities::app_errors::CoreError,
    food_entry::{
        entities::{
            Dish, DishEvent, DishTrigger, PredictedDish, PredictedDishTrigger, RawEntry, Trigger,
        },
        ports::{
            DishEventRepository, DishRepository, DishTriggerRepository, LlmClient,
            PredictedDishRepository, PredictedDishTriggerRepository, RawEntryRepository,
            TriggerRepository,
        },
    },
};

#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    pub raw_entries: Arc<Mutex<Vec<RawEntry>>>,
    pub predicted_dishes: Arc<Mutex<Vec<PredictedDish>>>,
    pub dishes: Arc<Mutex<Vec<Dish>>>,
    pub dish_events: Arc<Mutex<Vec<DishEvent>>>,
    pub triggers: Arc<Mutex<Vec<Trigger>>>,
    pub predicted_dish_triggers: Arc<Mutex<Vec<PredictedDishTrigger>>>,
    pub dish_triggers: Arc<Mutex<Vec<DishTrigger>>>,
}

impl RawEntryRepository for InMemoryStore {
    async fn create_raw_entry(&self, raw_entry: RawEntry) -> Result<RawEntry, CoreError> {
        self.raw_entries.lock().unwrap().push(raw_entry.clone());
        Ok(raw_entry)
    }

    async fn get_by_id(&self, raw_entry_id: Uuid) -> Result<Option<RawEntry>, CoreError> {
        Ok(self
            .raw_entries
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == raw_entry_id)
            .cloned())
    }
}

impl PredictedDishRepository for InMemoryStore {
    async fn create_predicted_dish(
        &self,
        predicted_dish: PredictedDish,
    ) -> Result<PredictedDish, CoreError> {
        self.predicted_dishes
            .lock()
            .unwrap()
            .push(predicted_dish.clone());
        Ok(predicted_dish)
    }

    async fn get_by_raw_entry_id(
        &self,
        raw_entry_id: Uuid,
    ) -> Result<Vec<PredictedDish>, CoreError> {
        Ok(self
            .predicted_dishes
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.raw_entry_id == raw_entry_id)
            .cloned()
            .collect())
    }
}

impl DishRepository for InMemoryStore {
    async fn create_dish(&self, dish: Dish) -> Result<Dish, CoreError> {
        let mut dishes = self.dishes.lock().unwrap();
        if dishes
            .iter()
            .any(|d| d.user_id == dish.user_id && d.normalized_dish_name == dish.normalized_dish_name)
        {
            return Err(CoreError::Conflict(format!(
                "duplicate normalized dish name: {}",
                dish.normalized_dish_name
            )));
        }
        dishes.push(dish.clone());
        Ok(dish)
    }

    async fn get_by_id(&self, dish_id: Uuid) -> Result<Option<Dish>, CoreError> {
        Ok(self
            .dishes
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id == dish_id)
            .cloned())
    }

    async fn get_by_user_and_normalized_name(
        &self,
        user_id: Uuid,
        normalized_dish_name: String,
    ) -> Result<Option<Dish>, CoreError> {
        Ok(self
            .dishes
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.user_id == user_id && d.normalized_dish_name == normalized_dish_name)
            .cloned())
    }

    async fn update_name(&self, dish: Dish) -> Result<Dish, CoreError> {
        let mut dishes = self.dishes.lock().unwrap();
        let stored = dishes
            .iter_mut()
            .find(|d| d.id == dish.id)
            .ok_or_else(|| CoreError::NotFound(format!("Dish not found: {}", dish.id)))?;
        *stored = dish.clone();
        Ok(dish)
    }
}

impl DishEventRepository for InMemoryStore {
    async fn create_dish_event(&self, dish_event: DishEvent) -> Result<DishEvent, CoreError> {
        self.dish_events.lock().unwrap().push(dish_event.clone());
        Ok(dish_event)
    }

    async fn get_by_id(&self, dish_event_id: Uuid) -> Result<Option<DishEvent>, CoreError> {
        Ok(self
            .dish_events
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == dish_event_id)
            .cloned())
    }

    async fn get_by_raw_entry_id(&self, raw_entry_id: Uuid) -> Result<Vec<DishEvent>, CoreError> {
        Ok(self
            .dish_events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.raw_entry_id == raw_entry_id)
            .cloned()
            .collect())
    }

    async fn get_active_by_raw_entry_id(
        &self,
        raw_entry_id: Uuid,
    ) -> Result<Vec<DishEvent>, CoreError> {
        Ok(self
            .dish_events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.raw_entry_id == raw_entry_id && e.deleted_at.is_none())
            .cloned()
            .collect())
    }

    async fn get_confirmed_by_dish_id(&self, dish_id: Uuid) -> Result<Vec<DishEvent>, CoreError> {
        let mut events: Vec<DishEvent> = self
            .dish_events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.dish_id == dish_id && e.confirmed_by_user)
            .cloned()
            .collect();
        events.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(events)
    }

    async fn get_confirmed_active_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<DishEvent>, CoreError> {
        let mut events: Vec<DishEvent> = self
            .dish_events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.user_id == user_id && e.confirmed_by_user && e.deleted_at.is_none())
            .cloned()
            .collect();
        events.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(events)
    }

    async fn mark_confirmed_by_raw_entry_id(&self, raw_entry_id: Uuid) -> Result<(), CoreError> {
        for event in self
            .dish_events
            .lock()
            .unwrap()
            .iter_mut()
            .filter(|e| e.raw_entry_id == raw_entry_id)
        {
            event.confirmed_by_user = true;
            event.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn soft_delete(&self, dish_event_id: Uuid) -> Result<(), CoreError> {
        let mut events = self.dish_events.lock().unwrap();
        let event = events
            .iter_mut()
            .find(|e| e.id == dish_event_id)
            .ok_or_else(|| CoreError::NotFound(format!("Dish event not found: {dish_event_id}")))?;
        event.deleted_at = Some(Utc::now());
        event.updated_at = Utc::now();
        Ok(())
    }
}

impl TriggerRepository for InMemoryStore {
    async fn list_triggers(&self) -> Result<Vec<Trigger>, CoreError> {
        Ok(self.triggers.lock().unwrap().clone())
    }
}

impl PredictedDishTriggerRepository for InMemoryStore {
    async fn create_predicted_triggers(
        &self,
        triggers: Vec<PredictedDishTrigger>,
    ) -> Result<Vec<PredictedDishTrigger>, CoreError> {
        self.predicted_dish_triggers
            .lock()
            .unwrap()
            .extend(triggers.clone());
        Ok(triggers)
    }

    async fn get_by_dish_event_id(
        &self,
        dish_event_id: Uuid,
    ) -> Result<Vec<PredictedDishTrigger>, CoreError> {
        Ok(self
            .predicted_dish_triggers
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.dish_event_id == dish_event_id)
            .cloned()
            .collect())
    }
}

impl DishTriggerRepository for InMemoryStore {
    async fn replace_for_event(
        &self,
        dish_event_id: Uuid,
        triggers: Vec<DishTrigger>,
    ) -> Result<Vec<DishTrigger>, CoreError> {
        let mut rows = self.dish_triggers.lock().unwrap();
        rows.retain(|t| t.dish_event_id != dish_event_id);
        rows.extend(triggers.clone());
        Ok(triggers)
    }

    async fn get_by_dish_event_id(
        &self,
        dish_event_id: Uuid,
    ) -> Result<Vec<DishTrigger>, CoreError> {
        Ok(self
            .dish_triggers
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.dish_event_id == dish_event_id)
            .cloned()
            .collect())
    }
}

#[derive(Debug, Clone)]
pub struct StubIdentityProvider {
    pub result: Result<Identity, CoreError>,
}

impl StubIdentityProvider {
    pub fn authenticated(user_id: Uuid) -> Self {
        Self {
            result: Ok(Identity::new(user_id)),
        }
    }

    pub fn unauthenticated() -> Self {
        Self {
            result: Err(CoreError::AuthenticationRequired),
        }
    }
}

impl IdentityProvider for StubIdentityProvider {
    async fn authenticated_identity(&self) -> Result<Identity, CoreError> {
        self.result.clone()
    }
}

#[derive(Debug, Default)]
struct StubLlmInner {
    responses: Mutex<VecDeque<Result<String, CoreError>>>,
    calls: AtomicUsize,
}

/// Scriptable LLM: pops one scripted response per `generate` call and
/// counts the calls so tests can assert the oracle was skipped.
#[derive(Debug, Clone, Default)]
pub struct StubLlm {
    inner: Arc<StubLlmInner>,
}

impl StubLlm {
    pub fn with_responses(responses: Vec<Result<String, CoreError>>) -> Self {
        Self {
            inner: Arc::new(StubLlmInner {
                responses: Mutex::new(responses.into()),
                calls: AtomicUsize::new(0),
            }),
        }
    }

    pub fn push_response(&self, response: Result<String, CoreError>) {
        self.inner.responses.lock().unwrap().push_back(response);
    }

    pub fn call_count(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }
}

impl LlmClient for StubLlm {
    async fn generate(
        &self,
        _prompt: String,
        _response_schema: serde_json::Value,
    ) -> Result<String, CoreError> {
        self.inner.calls.fetch_add(1, Ordering::SeqCst);
        self.inner
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CoreError::UpstreamDegraded("no scripted response".to_string())))
    }

    fn model_name(&self) -> String {
        "stub-model".to_string()
    }
}
