use serde_json::json;

use crate::domain::food_entry::catalog::TRIGGER_VOCABULARY;

/// Recorded on `PredictedDish` rows so historical extractions stay
/// attributable after the prompt changes.
pub const EXTRACTION_PROMPT_VERSION: &str = "extraction-v1";

/// Recorded on `PredictedDishTrigger` rows.
pub const TRIGGER_PROMPT_VERSION: &str = "trigger-v1";

const EXTRACTION_PROMPT_TEMPLATE: &str = r#"You split a free-text meal description into individual dishes.

For every dish the text mentions, return:
- dish_fragment_text: the exact substring of the input that describes the dish
- dish_name_suggestion: a short, clean display name for the dish

Both fields must be non-empty. Do not invent dishes the text does not mention.

Meal description:
{meal_text}"#;

const TRIGGER_PROMPT_TEMPLATE: &str = r#"You identify likely food-sensitivity triggers in a dish.

Dish name: {dish_name}
Context from the user's entry: {fragment_text}

Return the trigger names that likely apply to this dish. Only use names
from this list, exactly as written:
{trigger_vocabulary}

Return an empty list if none apply."#;

pub fn build_extraction_prompt(raw_text: &str) -> String {
    EXTRACTION_PROMPT_TEMPLATE.replace("{meal_text}", raw_text)
}

pub fn build_trigger_prompt(dish_name: &str, fragment_text: &str) -> String {
    TRIGGER_PROMPT_TEMPLATE
        .replace("{dish_name}", dish_name)
        .replace("{fragment_text}", fragment_text)
        .replace("{trigger_vocabulary}", &TRIGGER_VOCABULARY.join(", "))
}

/// Response schema for the dish-extraction oracle.
pub fn get_dish_extraction_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "dishes": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "dish_fragment_text": { "type": "string" },
                        "dish_name_suggestion": { "type": "string" }
                    },
                    "required": ["dish_fragment_text", "dish_name_suggestion"]
                }
            }
        },
        "required": ["dishes"]
    })
}

/// Response schema for the trigger-prediction oracle.
pub fn get_trigger_prediction_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "triggers": {
                "type": "array",
                "items": {
                    "type": "string",
                    "enum": TRIGGER_VOCABULARY
                }
            }
        },
        "required": ["triggers"]
    })
}
