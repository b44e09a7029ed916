pub mod dish;
pub mod dish_event;
pub mod predicted_dish;
pub mod raw_entry;
pub mod trigger;

pub use dish::*;
pub use dish_event::*;
pub use predicted_dish::*;
pub use raw_entry::*;
pub use trigger::*;
