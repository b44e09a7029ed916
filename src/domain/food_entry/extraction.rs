use tracing::{debug, warn};

use crate::domain::{
    common::entities::app_errors::CoreError,
    food_entry::{
        catalog::TriggerCatalog,
        ports::LlmClient,
        schema::{
            build_extraction_prompt, build_trigger_prompt, get_dish_extraction_schema,
            get_trigger_prediction_schema,
        },
        value_objects::ExtractedDish,
    },
};

/// Maps raw meal text to candidate dishes via the extraction oracle.
///
/// Never fails: any oracle error or structural violation in the response
/// degrades to a single dish whose fragment and name are the raw text, so
/// the pipeline always has at least one dish to work with.
pub async fn extract_dishes<L: LlmClient>(llm_client: &L, raw_text: &str) -> Vec<ExtractedDish> {
    match try_extract_dishes(llm_client, raw_text).await {
        Ok(dishes) => dishes,
        Err(err) => {
            warn!("dish extraction degraded, falling back to raw text: {err}");
            vec![ExtractedDish {
                fragment_text: raw_text.to_string(),
                name_suggestion: raw_text.to_string(),
            }]
        }
    }
}

async fn try_extract_dishes<L: LlmClient>(
    llm_client: &L,
    raw_text: &str,
) -> Result<Vec<ExtractedDish>, CoreError> {
    let prompt = build_extraction_prompt(raw_text);
    let raw_response = llm_client
        .generate(prompt, get_dish_extraction_schema())
        .await?;

    parse_extraction_response(&raw_response)
}

fn parse_extraction_response(raw_response: &str) -> Result<Vec<ExtractedDish>, CoreError> {
    let parsed: serde_json::Value = serde_json::from_str(raw_response).map_err(|e| {
        CoreError::UpstreamDegraded(format!("unparsable extraction response: {e}"))
    })?;

    let dishes = parsed
        .get("dishes")
        .and_then(|d| d.as_array())
        .ok_or_else(|| {
            CoreError::UpstreamDegraded("extraction response has no dishes array".to_string())
        })?;

    let mut extracted = Vec::with_capacity(dishes.len());
    for dish in dishes {
        extracted.push(ExtractedDish {
            fragment_text: required_string(dish, "dish_fragment_text")?,
            name_suggestion: required_string(dish, "dish_name_suggestion")?,
        });
    }

    Ok(extracted)
}

fn required_string(value: &serde_json::Value, field: &str) -> Result<String, CoreError> {
    match value.get(field).and_then(|v| v.as_str()) {
        Some(s) if !s.is_empty() => Ok(s.to_string()),
        _ => Err(CoreError::UpstreamDegraded(format!(
            "extracted dish is missing {field}"
        ))),
    }
}

/// Maps a dish to candidate trigger names via the prediction oracle.
///
/// Never fails: an empty prediction is always a safe, user-correctable
/// outcome, so oracle errors and malformed responses degrade to an empty
/// list. Names outside the catalog vocabulary are silently dropped.
pub async fn predict_triggers<L: LlmClient>(
    llm_client: &L,
    catalog: &TriggerCatalog,
    dish_name: &str,
    fragment_text: &str,
) -> Vec<String> {
    let names = match try_predict_triggers(llm_client, dish_name, fragment_text).await {
        Ok(names) => names,
        Err(err) => {
            warn!(%dish_name, "trigger prediction degraded to empty: {err}");
            return Vec::new();
        }
    };

    names
        .into_iter()
        .filter(|name| {
            let known = catalog.contains(name);
            if !known {
                debug!(%dish_name, trigger_name = %name, "dropping out-of-vocabulary trigger");
            }
            known
        })
        .collect()
}

async fn try_predict_triggers<L: LlmClient>(
    llm_client: &L,
    dish_name: &str,
    fragment_text: &str,
) -> Result<Vec<String>, CoreError> {
    let prompt = build_trigger_prompt(dish_name, fragment_text);
    let raw_response = llm_client
        .generate(prompt, get_trigger_prediction_schema())
        .await?;

    parse_trigger_response(&raw_response)
}

fn parse_trigger_response(raw_response: &str) -> Result<Vec<String>, CoreError> {
    let parsed: serde_json::Value = serde_json::from_str(raw_response)
        .map_err(|e| CoreError::UpstreamDegraded(format!("unparsable trigger response: {e}")))?;

    let triggers = parsed
        .get("triggers")
        .and_then(|t| t.as_array())
        .ok_or_else(|| {
            CoreError::UpstreamDegraded("trigger response has no triggers array".to_string())
        })?;

    // One non-string element invalidates the whole response.
    triggers
        .iter()
        .map(|t| {
            t.as_str().map(str::to_string).ok_or_else(|| {
                CoreError::UpstreamDegraded("trigger response contains a non-string".to_string())
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::food_entry::{catalog::seed_vocabulary, test_support::StubLlm};

    fn catalog() -> TriggerCatalog {
        TriggerCatalog::new(seed_vocabulary())
    }

    #[tokio::test]
    async fn extracts_every_well_formed_dish() {
        let llm = StubLlm::with_responses(vec![Ok(r#"{"dishes": [
            {"dish_fragment_text": "Chocolate Croissant", "dish_name_suggestion": "Chocolate Croissant"},
            {"dish_fragment_text": "Matcha Latte", "dish_name_suggestion": "Matcha Latte"}
        ]}"#
        .to_string())]);

        let dishes = extract_dishes(&llm, "Chocolate Croissant and Matcha Latte").await;

        assert_eq!(dishes.len(), 2);
        assert_eq!(dishes[0].name_suggestion, "Chocolate Croissant");
        assert_eq!(dishes[1].fragment_text, "Matcha Latte");
    }

    #[tokio::test]
    async fn oracle_error_degrades_to_raw_text() {
        let llm = StubLlm::with_responses(vec![Err(CoreError::UpstreamDegraded(
            "timeout".to_string(),
        ))]);

        let dishes = extract_dishes(&llm, "Grilled Salmon").await;

        assert_eq!(
            dishes,
            vec![ExtractedDish {
                fragment_text: "Grilled Salmon".to_string(),
                name_suggestion: "Grilled Salmon".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn structural_violations_degrade_to_raw_text() {
        let malformed = [
            "not json at all",
            r#"{"meals": []}"#,
            r#"{"dishes": "soup"}"#,
            r#"{"dishes": [{"dish_fragment_text": "soup"}]}"#,
            r#"{"dishes": [{"dish_fragment_text": "", "dish_name_suggestion": "Soup"}]}"#,
        ];

        for response in malformed {
            let llm = StubLlm::with_responses(vec![Ok(response.to_string())]);
            let dishes = extract_dishes(&llm, "soup").await;
            assert_eq!(dishes.len(), 1, "response {response:?}");
            assert_eq!(dishes[0].name_suggestion, "soup");
        }
    }

    #[tokio::test]
    async fn predicts_known_triggers_and_drops_unknown_names() {
        let llm = StubLlm::with_responses(vec![Ok(
            r#"{"triggers": ["gluten", "moonlight", "dairy"]}"#.to_string(),
        )]);

        let names = predict_triggers(&llm, &catalog(), "Croissant", "a croissant").await;

        assert_eq!(names, vec!["gluten".to_string(), "dairy".to_string()]);
    }

    #[tokio::test]
    async fn non_string_element_invalidates_the_whole_prediction() {
        let llm = StubLlm::with_responses(vec![Ok(
            r#"{"triggers": ["gluten", 7, "dairy"]}"#.to_string()
        )]);

        let names = predict_triggers(&llm, &catalog(), "Croissant", "a croissant").await;

        assert!(names.is_empty());
    }

    #[tokio::test]
    async fn prediction_failure_degrades_to_empty() {
        let llm = StubLlm::with_responses(vec![Err(CoreError::UpstreamDegraded(
            "boom".to_string(),
        ))]);

        let names = predict_triggers(&llm, &catalog(), "Salmon", "grilled salmon").await;

        assert!(names.is_empty());
    }
}
