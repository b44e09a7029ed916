pub mod authentication;
pub mod common;
pub mod food_entry;
