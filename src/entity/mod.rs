pub mod dish_events;
pub mod dish_triggers;
pub mod dishes;
pub mod predicted_dish_triggers;
pub mod predicted_dishes;
pub mod raw_entries;
pub mod triggers;
