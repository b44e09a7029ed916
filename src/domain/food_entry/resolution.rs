use tracing::debug;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    food_entry::{
        catalog::TriggerCatalog,
        entities::{Dish, Trigger},
        helpers::normalize_dish_name,
        ports::{DishEventRepository, DishRepository, DishTriggerRepository},
    },
};

/// Resolves a name suggestion to the user's canonical dish, creating it on
/// first sight. The new dish keeps the suggestion's original casing as its
/// display name; identity is the normalized form.
///
/// There is no atomic insert-if-absent here: the store's unique constraint
/// on `(user_id, normalized_dish_name)` backs the create, and a conflict
/// from a concurrent identical submission is resolved by re-reading.
pub async fn find_or_create_dish<D: DishRepository>(
    dish_repository: &D,
    user_id: Uuid,
    name_suggestion: &str,
) -> Result<Dish, CoreError> {
    let normalized = normalize_dish_name(name_suggestion);

    if let Some(existing) = dish_repository
        .get_by_user_and_normalized_name(user_id, normalized.clone())
        .await?
    {
        return Ok(existing);
    }

    let dish = Dish::new(user_id, name_suggestion.to_string(), normalized.clone());
    match dish_repository.create_dish(dish).await {
        Ok(created) => Ok(created),
        Err(CoreError::Conflict(_)) => {
            debug!(%user_id, %normalized, "lost dish-create race, re-reading");
            dish_repository
                .get_by_user_and_normalized_name(user_id, normalized.clone())
                .await?
                .ok_or_else(|| {
                    CoreError::NotFound(format!(
                        "Dish not found after create conflict: {normalized}"
                    ))
                })
        }
        Err(err) => Err(err),
    }
}

/// The dish's most recent confirmed trigger set.
///
/// Scans the dish's confirmed events newest-first and returns the
/// confirmed triggers of the first event that has any; confirmed events
/// with zero trigger rows are skipped. Empty when no confirmed event has
/// trigger rows, which also serves as the "is this dish new to the user"
/// test. "User confirmed zero triggers" and "no history yet" are
/// indistinguishable here.
pub async fn most_recent_confirmed_triggers<DE, DT>(
    dish_event_repository: &DE,
    dish_trigger_repository: &DT,
    catalog: &TriggerCatalog,
    dish_id: Uuid,
) -> Result<Vec<Trigger>, CoreError>
where
    DE: DishEventRepository,
    DT: DishTriggerRepository,
{
    let events = dish_event_repository
        .get_confirmed_by_dish_id(dish_id)
        .await?;

    for event in events {
        let rows = dish_trigger_repository
            .get_by_dish_event_id(event.id)
            .await?;
        if rows.is_empty() {
            continue;
        }

        let mut triggers = Vec::with_capacity(rows.len());
        for row in rows {
            let trigger = catalog.get_by_id(row.trigger_id).ok_or_else(|| {
                CoreError::NotFound(format!("Trigger not found: {}", row.trigger_id))
            })?;
            triggers.push(trigger.clone());
        }
        return Ok(triggers);
    }

    Ok(Vec::new())
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::domain::food_entry::{
        catalog::seed_vocabulary,
        entities::{DishEvent, DishTrigger},
        test_support::InMemoryStore,
    };

    #[tokio::test]
    async fn creates_a_dish_preserving_original_casing() {
        let store = InMemoryStore::default();
        let user_id = Uuid::new_v4();

        let dish = find_or_create_dish(&store, user_id, "Chocolate Croissant")
            .await
            .unwrap();

        assert_eq!(dish.dish_name, "Chocolate Croissant");
        assert_eq!(dish.normalized_dish_name, "chocolate croissant");
        assert_eq!(dish.embedding_id, None);
        assert_eq!(store.dishes.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn reuses_the_dish_for_equivalent_names() {
        let store = InMemoryStore::default();
        let user_id = Uuid::new_v4();

        let first = find_or_create_dish(&store, user_id, "Chocolate Croissant")
            .await
            .unwrap();
        let second = find_or_create_dish(&store, user_id, "chocolate  croissant")
            .await
            .unwrap();
        let third = find_or_create_dish(&store, user_id, "CHOCOLATE CROISSANT")
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(first.id, third.id);
        // The display name stays as first submitted.
        assert_eq!(third.dish_name, "Chocolate Croissant");
    }

    #[tokio::test]
    async fn distinct_users_get_distinct_dishes() {
        let store = InMemoryStore::default();

        let a = find_or_create_dish(&store, Uuid::new_v4(), "Miso Soup")
            .await
            .unwrap();
        let b = find_or_create_dish(&store, Uuid::new_v4(), "Miso Soup")
            .await
            .unwrap();

        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn create_conflict_retries_the_lookup() {
        struct RacyDishRepository {
            store: InMemoryStore,
            winner: Dish,
        }

        // First lookup misses, the insert conflicts, the retry lookup must
        // return the row the concurrent writer inserted.
        impl DishRepository for RacyDishRepository {
            async fn create_dish(&self, _dish: Dish) -> Result<Dish, CoreError> {
                self.store
                    .dishes
                    .lock()
                    .unwrap()
                    .push(self.winner.clone());
                Err(CoreError::Conflict("duplicate".to_string()))
            }

            async fn get_by_id(&self, dish_id: Uuid) -> Result<Option<Dish>, CoreError> {
                DishRepository::get_by_id(&self.store, dish_id).await
            }

            async fn get_by_user_and_normalized_name(
                &self,
                user_id: Uuid,
                normalized_dish_name: String,
            ) -> Result<Option<Dish>, CoreError> {
                self.store
                    .get_by_user_and_normalized_name(user_id, normalized_dish_name)
                    .await
            }

            async fn update_name(&self, dish: Dish) -> Result<Dish, CoreError> {
                self.store.update_name(dish).await
            }
        }

        let user_id = Uuid::new_v4();
        let winner = Dish::new(user_id, "Ramen".to_string(), "ramen".to_string());
        let repository = RacyDishRepository {
            store: InMemoryStore::default(),
            winner: winner.clone(),
        };

        let resolved = find_or_create_dish(&repository, user_id, "Ramen").await.unwrap();

        assert_eq!(resolved.id, winner.id);
    }

    fn confirmed_event(user_id: Uuid, dish_id: Uuid, age: Duration) -> DishEvent {
        let mut event = DishEvent::new(user_id, dish_id, None, Uuid::new_v4());
        event.confirmed_by_user = true;
        event.created_at -= age;
        event
    }

    #[tokio::test]
    async fn skips_confirmed_events_without_trigger_rows() {
        let store = InMemoryStore::default();
        let catalog = TriggerCatalog::new(seed_vocabulary());
        let user_id = Uuid::new_v4();
        let dish_id = Uuid::new_v4();

        let older = confirmed_event(user_id, dish_id, Duration::hours(2));
        let newer = confirmed_event(user_id, dish_id, Duration::hours(0));
        let gluten = catalog.get_by_name("gluten").unwrap().clone();
        store
            .dish_triggers
            .lock()
            .unwrap()
            .push(DishTrigger::new(dish_id, older.id, gluten.id));
        store.dish_events.lock().unwrap().extend([older, newer]);

        let triggers =
            most_recent_confirmed_triggers(&store, &store, &catalog, dish_id)
                .await
                .unwrap();

        assert_eq!(triggers, vec![gluten]);
    }

    #[tokio::test]
    async fn newest_confirmed_trigger_set_wins() {
        let store = InMemoryStore::default();
        let catalog = TriggerCatalog::new(seed_vocabulary());
        let user_id = Uuid::new_v4();
        let dish_id = Uuid::new_v4();

        let older = confirmed_event(user_id, dish_id, Duration::hours(3));
        let newer = confirmed_event(user_id, dish_id, Duration::hours(1));
        let gluten = catalog.get_by_name("gluten").unwrap().clone();
        let dairy = catalog.get_by_name("dairy").unwrap().clone();
        store.dish_triggers.lock().unwrap().extend([
            DishTrigger::new(dish_id, older.id, gluten.id),
            DishTrigger::new(dish_id, newer.id, dairy.id),
        ]);
        store.dish_events.lock().unwrap().extend([older, newer]);

        let triggers =
            most_recent_confirmed_triggers(&store, &store, &catalog, dish_id)
                .await
                .unwrap();

        assert_eq!(triggers, vec![dairy]);
    }

    #[tokio::test]
    async fn empty_when_no_confirmed_event_has_triggers() {
        let store = InMemoryStore::default();
        let catalog = TriggerCatalog::new(seed_vocabulary());
        let dish_id = Uuid::new_v4();

        store
            .dish_events
            .lock()
            .unwrap()
            .push(confirmed_event(Uuid::new_v4(), dish_id, Duration::zero()));

        let triggers =
            most_recent_confirmed_triggers(&store, &store, &catalog, dish_id)
                .await
                .unwrap();

        assert!(triggers.is_empty());
    }
}
