use crate::{
    domain::food_entry::entities::{
        Dish, DishEvent, DishTrigger, PredictedDish, PredictedDishTrigger, RawEntry, Trigger,
    },
    entity::{
        dish_events, dish_triggers, dishes, predicted_dish_triggers, predicted_dishes,
        raw_entries, triggers,
    },
};

impl From<&raw_entries::Model> for RawEntry {
    fn from(model: &raw_entries::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            raw_text: model.raw_text.clone(),
            created_at: model.created_at.to_utc(),
        }
    }
}

impl From<raw_entries::Model> for RawEntry {
    fn from(model: raw_entries::Model) -> Self {
        Self::from(&model)
    }
}

impl From<&predicted_dishes::Model> for PredictedDish {
    fn from(model: &predicted_dishes::Model) -> Self {
        Self {
            id: model.id,
            raw_entry_id: model.raw_entry_id,
            fragment_text: model.fragment_text.clone(),
            name_suggestion: model.name_suggestion.clone(),
            model_version: model.model_version.clone(),
            prompt_version: model.prompt_version.clone(),
            created_at: model.created_at.to_utc(),
        }
    }
}

impl From<predicted_dishes::Model> for PredictedDish {
    fn from(model: predicted_dishes::Model) -> Self {
        Self::from(&model)
    }
}

impl From<&dishes::Model> for Dish {
    fn from(model: &dishes::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            dish_name: model.dish_name.clone(),
            normalized_dish_name: model.normalized_dish_name.clone(),
            embedding_id: model.embedding_id,
            created_at: model.created_at.to_utc(),
            updated_at: model.updated_at.to_utc(),
        }
    }
}

impl From<dishes::Model> for Dish {
    fn from(model: dishes::Model) -> Self {
        Self::from(&model)
    }
}

impl From<&dish_events::Model> for DishEvent {
    fn from(model: &dish_events::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            dish_id: model.dish_id,
            predicted_dish_id: model.predicted_dish_id,
            raw_entry_id: model.raw_entry_id,
            confirmed_by_user: model.confirmed_by_user,
            deleted_at: model.deleted_at.map(|t| t.to_utc()),
            created_at: model.created_at.to_utc(),
            updated_at: model.updated_at.to_utc(),
        }
    }
}

impl From<dish_events::Model> for DishEvent {
    fn from(model: dish_events::Model) -> Self {
        Self::from(&model)
    }
}

impl From<&triggers::Model> for Trigger {
    fn from(model: &triggers::Model) -> Self {
        Self {
            id: model.id,
            trigger_name: model.trigger_name.clone(),
            created_at: model.created_at.to_utc(),
        }
    }
}

impl From<triggers::Model> for Trigger {
    fn from(model: triggers::Model) -> Self {
        Self::from(&model)
    }
}

impl From<&predicted_dish_triggers::Model> for PredictedDishTrigger {
    fn from(model: &predicted_dish_triggers::Model) -> Self {
        Self {
            id: model.id,
            dish_id: model.dish_id,
            dish_event_id: model.dish_event_id,
            trigger_id: model.trigger_id,
            model_version: model.model_version.clone(),
            prompt_version: model.prompt_version.clone(),
            created_at: model.created_at.to_utc(),
        }
    }
}

impl From<predicted_dish_triggers::Model> for PredictedDishTrigger {
    fn from(model: predicted_dish_triggers::Model) -> Self {
        Self::from(&model)
    }
}

impl From<&dish_triggers::Model> for DishTrigger {
    fn from(model: &dish_triggers::Model) -> Self {
        Self {
            id: model.id,
            dish_id: model.dish_id,
            dish_event_id: model.dish_event_id,
            trigger_id: model.trigger_id,
            created_at: model.created_at.to_utc(),
        }
    }
}

impl From<dish_triggers::Model> for DishTrigger {
    fn from(model: dish_triggers::Model) -> Self {
        Self::from(&model)
    }
}
