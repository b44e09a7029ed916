use sea_orm::{DatabaseConnection, EntityTrait, Order, QueryOrder};
use tracing::error;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        food_entry::{entities::Trigger, ports::TriggerRepository},
    },
    entity::triggers::{Column, Entity},
};

/// Read side of the fixed trigger catalog. Rows are provisioned by
/// migration; the core never writes them.
#[derive(Debug, Clone)]
pub struct PostgresTriggerRepository {
    pub db: DatabaseConnection,
}

impl PostgresTriggerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl TriggerRepository for PostgresTriggerRepository {
    async fn list_triggers(&self) -> Result<Vec<Trigger>, CoreError> {
        let triggers = Entity::find()
            .order_by(Column::TriggerName, Order::Asc)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to list triggers: {}", e);
                CoreError::PersistenceFailure(e.to_string())
            })?
            .iter()
            .map(Trigger::from)
            .collect();

        Ok(triggers)
    }
}
