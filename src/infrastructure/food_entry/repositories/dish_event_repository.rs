use chrono::Utc;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, Order, QueryFilter, QueryOrder,
    prelude::Expr,
};
use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        food_entry::{entities::DishEvent, ports::DishEventRepository},
    },
    entity::dish_events::{ActiveModel, Column, Entity},
};

#[derive(Debug, Clone)]
pub struct PostgresDishEventRepository {
    pub db: DatabaseConnection,
}

impl PostgresDishEventRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn all_to_domain(
        &self,
        query: sea_orm::Select<Entity>,
        context: &str,
    ) -> Result<Vec<DishEvent>, CoreError> {
        let events = query
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get dish events ({}): {}", context, e);
                CoreError::PersistenceFailure(e.to_string())
            })?
            .iter()
            .map(DishEvent::from)
            .collect();

        Ok(events)
    }
}

impl DishEventRepository for PostgresDishEventRepository {
    async fn create_dish_event(&self, dish_event: DishEvent) -> Result<DishEvent, CoreError> {
        let active_model = ActiveModel {
            id: Set(dish_event.id),
            user_id: Set(dish_event.user_id),
            dish_id: Set(dish_event.dish_id),
            predicted_dish_id: Set(dish_event.predicted_dish_id),
            raw_entry_id: Set(dish_event.raw_entry_id),
            confirmed_by_user: Set(dish_event.confirmed_by_user),
            deleted_at: Set(dish_event.deleted_at.map(|t| t.fixed_offset())),
            created_at: Set(dish_event.created_at.fixed_offset()),
            updated_at: Set(dish_event.updated_at.fixed_offset()),
        };

        let created = Entity::insert(active_model)
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to create dish event: {}", e);
                CoreError::PersistenceFailure(e.to_string())
            })?;

        Ok(DishEvent::from(created))
    }

    async fn get_by_id(&self, dish_event_id: Uuid) -> Result<Option<DishEvent>, CoreError> {
        let event = Entity::find()
            .filter(Column::Id.eq(dish_event_id))
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get dish event: {}", e);
                CoreError::PersistenceFailure(e.to_string())
            })?
            .map(DishEvent::from);

        Ok(event)
    }

    async fn get_by_raw_entry_id(&self, raw_entry_id: Uuid) -> Result<Vec<DishEvent>, CoreError> {
        let query = Entity::find()
            .filter(Column::RawEntryId.eq(raw_entry_id))
            .order_by(Column::CreatedAt, Order::Asc);

        self.all_to_domain(query, "by raw entry").await
    }

    async fn get_active_by_raw_entry_id(
        &self,
        raw_entry_id: Uuid,
    ) -> Result<Vec<DishEvent>, CoreError> {
        let query = Entity::find()
            .filter(Column::RawEntryId.eq(raw_entry_id))
            .filter(Column::DeletedAt.is_null())
            .order_by(Column::CreatedAt, Order::Asc);

        self.all_to_domain(query, "active by raw entry").await
    }

    async fn get_confirmed_by_dish_id(&self, dish_id: Uuid) -> Result<Vec<DishEvent>, CoreError> {
        let query = Entity::find()
            .filter(Column::DishId.eq(dish_id))
            .filter(Column::ConfirmedByUser.eq(true))
            .order_by(Column::CreatedAt, Order::Desc);

        self.all_to_domain(query, "confirmed by dish").await
    }

    async fn get_confirmed_active_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<DishEvent>, CoreError> {
        let query = Entity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::ConfirmedByUser.eq(true))
            .filter(Column::DeletedAt.is_null())
            .order_by(Column::CreatedAt, Order::Desc);

        self.all_to_domain(query, "confirmed by user").await
    }

    async fn mark_confirmed_by_raw_entry_id(&self, raw_entry_id: Uuid) -> Result<(), CoreError> {
        Entity::update_many()
            .col_expr(Column::ConfirmedByUser, Expr::value(true))
            .col_expr(Column::UpdatedAt, Expr::value(Utc::now().fixed_offset()))
            .filter(Column::RawEntryId.eq(raw_entry_id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to confirm dish events: {}", e);
                CoreError::PersistenceFailure(e.to_string())
            })?;

        Ok(())
    }

    async fn soft_delete(&self, dish_event_id: Uuid) -> Result<(), CoreError> {
        let now = Utc::now().fixed_offset();
        Entity::update_many()
            .col_expr(Column::DeletedAt, Expr::value(Some(now)))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(dish_event_id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to soft delete dish event: {}", e);
                CoreError::PersistenceFailure(e.to_string())
            })?;

        Ok(())
    }
}
