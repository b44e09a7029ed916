use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    SqlErr,
};
use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        food_entry::{entities::Dish, ports::DishRepository},
    },
    entity::dishes::{ActiveModel, Column, Entity},
};

#[derive(Debug, Clone)]
pub struct PostgresDishRepository {
    pub db: DatabaseConnection,
}

impl PostgresDishRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl DishRepository for PostgresDishRepository {
    async fn create_dish(&self, dish: Dish) -> Result<Dish, CoreError> {
        let active_model = ActiveModel {
            id: Set(dish.id),
            user_id: Set(dish.user_id),
            dish_name: Set(dish.dish_name.clone()),
            normalized_dish_name: Set(dish.normalized_dish_name.clone()),
            embedding_id: Set(dish.embedding_id),
            created_at: Set(dish.created_at.fixed_offset()),
            updated_at: Set(dish.updated_at.fixed_offset()),
        };

        let created = Entity::insert(active_model)
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| match e.sql_err() {
                // The (user_id, normalized_dish_name) unique index turns a
                // concurrent identical submission into a Conflict the
                // resolution layer retries as a read.
                Some(SqlErr::UniqueConstraintViolation(_)) => CoreError::Conflict(format!(
                    "Dish already exists: {}",
                    dish.normalized_dish_name
                )),
                _ => {
                    error!("Failed to create dish: {}", e);
                    CoreError::PersistenceFailure(e.to_string())
                }
            })?;

        Ok(Dish::from(created))
    }

    async fn get_by_id(&self, dish_id: Uuid) -> Result<Option<Dish>, CoreError> {
        let dish = Entity::find()
            .filter(Column::Id.eq(dish_id))
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get dish: {}", e);
                CoreError::PersistenceFailure(e.to_string())
            })?
            .map(Dish::from);

        Ok(dish)
    }

    async fn get_by_user_and_normalized_name(
        &self,
        user_id: Uuid,
        normalized_dish_name: String,
    ) -> Result<Option<Dish>, CoreError> {
        let dish = Entity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::NormalizedDishName.eq(normalized_dish_name))
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get dish by normalized name: {}", e);
                CoreError::PersistenceFailure(e.to_string())
            })?
            .map(Dish::from);

        Ok(dish)
    }

    async fn update_name(&self, dish: Dish) -> Result<Dish, CoreError> {
        let active_model = ActiveModel {
            id: Set(dish.id),
            dish_name: Set(dish.dish_name.clone()),
            normalized_dish_name: Set(dish.normalized_dish_name.clone()),
            updated_at: Set(dish.updated_at.fixed_offset()),
            ..Default::default()
        };

        let updated = active_model.update(&self.db).await.map_err(|e| {
            error!("Failed to update dish name: {}", e);
            CoreError::PersistenceFailure(e.to_string())
        })?;

        Ok(Dish::from(updated))
    }
}
