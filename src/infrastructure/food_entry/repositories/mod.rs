pub mod dish_event_repository;
pub mod dish_repository;
pub mod dish_trigger_repository;
pub mod raw_entry_repository;
pub mod trigger_repository;
