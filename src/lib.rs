//! Core library for MealTrace: turns free-text meal descriptions into a
//! deduplicated, trigger-annotated dish catalog that the user reviews and
//! confirms.

pub mod domain;
pub mod entity;
pub mod infrastructure;
