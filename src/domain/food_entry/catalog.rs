use std::collections::HashMap;

use tracing::warn;
use uuid::Uuid;

use crate::domain::food_entry::entities::Trigger;

/// The closed trigger vocabulary. Oracle output naming anything outside
/// this list is dropped; catalog rows outside it are a provisioning bug.
pub const TRIGGER_VOCABULARY: [&str; 18] = [
    "gluten",
    "dairy",
    "caffeine",
    "nuts",
    "red_meat",
    "processed_meat",
    "soy",
    "fish",
    "shellfish",
    "sesame",
    "alcohol",
    "spicy",
    "fried_food",
    "added_sugar",
    "insoluble_fiber",
    "fructans",
    "legumes_beans",
    "high_fructose_fruits",
];

/// In-memory lookup over the trigger rows, loaded from the store once at
/// startup. Pure lookup, no mutation after construction.
#[derive(Debug, Clone, Default)]
pub struct TriggerCatalog {
    by_name: HashMap<String, Trigger>,
    by_id: HashMap<Uuid, Trigger>,
}

impl TriggerCatalog {
    pub fn new(triggers: Vec<Trigger>) -> Self {
        let mut by_name = HashMap::with_capacity(triggers.len());
        let mut by_id = HashMap::with_capacity(triggers.len());

        for trigger in triggers {
            if !TRIGGER_VOCABULARY.contains(&trigger.trigger_name.as_str()) {
                warn!(
                    trigger_name = %trigger.trigger_name,
                    "trigger row outside the closed vocabulary"
                );
            }
            by_id.insert(trigger.id, trigger.clone());
            by_name.insert(trigger.trigger_name.clone(), trigger);
        }

        Self { by_name, by_id }
    }

    pub fn get_by_name(&self, trigger_name: &str) -> Option<&Trigger> {
        self.by_name.get(trigger_name)
    }

    pub fn get_by_id(&self, trigger_id: Uuid) -> Option<&Trigger> {
        self.by_id.get(&trigger_id)
    }

    pub fn contains(&self, trigger_name: &str) -> bool {
        self.by_name.contains_key(trigger_name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Fresh trigger rows for every vocabulary entry, for seeding a store or a
/// test catalog.
pub fn seed_vocabulary() -> Vec<Trigger> {
    TRIGGER_VOCABULARY
        .iter()
        .map(|name| Trigger::new((*name).to_string()))
        .collect()
}
