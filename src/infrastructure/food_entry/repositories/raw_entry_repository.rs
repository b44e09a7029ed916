use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, Order, QueryFilter, QueryOrder,
};
use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        food_entry::{
            entities::{PredictedDish, RawEntry},
            ports::{PredictedDishRepository, RawEntryRepository},
        },
    },
    entity::{predicted_dishes, raw_entries},
};

#[derive(Debug, Clone)]
pub struct PostgresRawEntryRepository {
    pub db: DatabaseConnection,
}

impl PostgresRawEntryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl RawEntryRepository for PostgresRawEntryRepository {
    async fn create_raw_entry(&self, raw_entry: RawEntry) -> Result<RawEntry, CoreError> {
        let active_model = raw_entries::ActiveModel {
            id: Set(raw_entry.id),
            user_id: Set(raw_entry.user_id),
            raw_text: Set(raw_entry.raw_text.clone()),
            created_at: Set(raw_entry.created_at.fixed_offset()),
        };

        let created = raw_entries::Entity::insert(active_model)
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to create raw entry: {}", e);
                CoreError::PersistenceFailure(e.to_string())
            })?;

        Ok(RawEntry::from(created))
    }

    async fn get_by_id(&self, raw_entry_id: Uuid) -> Result<Option<RawEntry>, CoreError> {
        let raw_entry = raw_entries::Entity::find()
            .filter(raw_entries::Column::Id.eq(raw_entry_id))
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get raw entry: {}", e);
                CoreError::PersistenceFailure(e.to_string())
            })?
            .map(RawEntry::from);

        Ok(raw_entry)
    }
}

#[derive(Debug, Clone)]
pub struct PostgresPredictedDishRepository {
    pub db: DatabaseConnection,
}

impl PostgresPredictedDishRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl PredictedDishRepository for PostgresPredictedDishRepository {
    async fn create_predicted_dish(
        &self,
        predicted_dish: PredictedDish,
    ) -> Result<PredictedDish, CoreError> {
        let active_model = predicted_dishes::ActiveModel {
            id: Set(predicted_dish.id),
            raw_entry_id: Set(predicted_dish.raw_entry_id),
            fragment_text: Set(predicted_dish.fragment_text.clone()),
            name_suggestion: Set(predicted_dish.name_suggestion.clone()),
            model_version: Set(predicted_dish.model_version.clone()),
            prompt_version: Set(predicted_dish.prompt_version.clone()),
            created_at: Set(predicted_dish.created_at.fixed_offset()),
        };

        let created = predicted_dishes::Entity::insert(active_model)
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to create predicted dish: {}", e);
                CoreError::PersistenceFailure(e.to_string())
            })?;

        Ok(PredictedDish::from(created))
    }

    async fn get_by_raw_entry_id(
        &self,
        raw_entry_id: Uuid,
    ) -> Result<Vec<PredictedDish>, CoreError> {
        let predicted = predicted_dishes::Entity::find()
            .filter(predicted_dishes::Column::RawEntryId.eq(raw_entry_id))
            .order_by(predicted_dishes::Column::CreatedAt, Order::Asc)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get predicted dishes by raw entry: {}", e);
                CoreError::PersistenceFailure(e.to_string())
            })?
            .iter()
            .map(PredictedDish::from)
            .collect();

        Ok(predicted)
    }
}
