use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, TransactionTrait,
};
use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        food_entry::{
            entities::{DishTrigger, PredictedDishTrigger},
            ports::{DishTriggerRepository, PredictedDishTriggerRepository},
        },
    },
    entity::{dish_triggers, predicted_dish_triggers},
};

#[derive(Debug, Clone)]
pub struct PostgresPredictedDishTriggerRepository {
    pub db: DatabaseConnection,
}

impl PostgresPredictedDishTriggerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl PredictedDishTriggerRepository for PostgresPredictedDishTriggerRepository {
    async fn create_predicted_triggers(
        &self,
        triggers: Vec<PredictedDishTrigger>,
    ) -> Result<Vec<PredictedDishTrigger>, CoreError> {
        if triggers.is_empty() {
            return Ok(triggers);
        }

        let active_models: Vec<predicted_dish_triggers::ActiveModel> = triggers
            .iter()
            .map(|t| predicted_dish_triggers::ActiveModel {
                id: Set(t.id),
                dish_id: Set(t.dish_id),
                dish_event_id: Set(t.dish_event_id),
                trigger_id: Set(t.trigger_id),
                model_version: Set(t.model_version.clone()),
                prompt_version: Set(t.prompt_version.clone()),
                created_at: Set(t.created_at.fixed_offset()),
            })
            .collect();

        predicted_dish_triggers::Entity::insert_many(active_models)
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to create predicted dish triggers: {}", e);
                CoreError::PersistenceFailure(e.to_string())
            })?;

        Ok(triggers)
    }

    async fn get_by_dish_event_id(
        &self,
        dish_event_id: Uuid,
    ) -> Result<Vec<PredictedDishTrigger>, CoreError> {
        let triggers = predicted_dish_triggers::Entity::find()
            .filter(predicted_dish_triggers::Column::DishEventId.eq(dish_event_id))
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get predicted dish triggers: {}", e);
                CoreError::PersistenceFailure(e.to_string())
            })?
            .iter()
            .map(PredictedDishTrigger::from)
            .collect();

        Ok(triggers)
    }
}

#[derive(Debug, Clone)]
pub struct PostgresDishTriggerRepository {
    pub db: DatabaseConnection,
}

impl PostgresDishTriggerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl DishTriggerRepository for PostgresDishTriggerRepository {
    async fn replace_for_event(
        &self,
        dish_event_id: Uuid,
        triggers: Vec<DishTrigger>,
    ) -> Result<Vec<DishTrigger>, CoreError> {
        // Delete-all then insert in one transaction so a reader never sees
        // a partially replaced set.
        let txn = self.db.begin().await.map_err(|e| {
            error!("Failed to open dish trigger transaction: {}", e);
            CoreError::PersistenceFailure(e.to_string())
        })?;

        dish_triggers::Entity::delete_many()
            .filter(dish_triggers::Column::DishEventId.eq(dish_event_id))
            .exec(&txn)
            .await
            .map_err(|e| {
                error!("Failed to delete dish triggers: {}", e);
                CoreError::PersistenceFailure(e.to_string())
            })?;

        if !triggers.is_empty() {
            let active_models: Vec<dish_triggers::ActiveModel> = triggers
                .iter()
                .map(|t| dish_triggers::ActiveModel {
                    id: Set(t.id),
                    dish_id: Set(t.dish_id),
                    dish_event_id: Set(t.dish_event_id),
                    trigger_id: Set(t.trigger_id),
                    created_at: Set(t.created_at.fixed_offset()),
                })
                .collect();

            dish_triggers::Entity::insert_many(active_models)
                .exec(&txn)
                .await
                .map_err(|e| {
                    error!("Failed to insert dish triggers: {}", e);
                    CoreError::PersistenceFailure(e.to_string())
                })?;
        }

        txn.commit().await.map_err(|e| {
            error!("Failed to commit dish trigger replace: {}", e);
            CoreError::PersistenceFailure(e.to_string())
        })?;

        Ok(triggers)
    }

    async fn get_by_dish_event_id(
        &self,
        dish_event_id: Uuid,
    ) -> Result<Vec<DishTrigger>, CoreError> {
        let triggers = dish_triggers::Entity::find()
            .filter(dish_triggers::Column::DishEventId.eq(dish_event_id))
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get dish triggers: {}", e);
                CoreError::PersistenceFailure(e.to_string())
            })?
            .iter()
            .map(DishTrigger::from)
            .collect();

        Ok(triggers)
    }
}
