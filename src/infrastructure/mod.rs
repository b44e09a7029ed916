pub mod food_entry;
pub mod llm;
