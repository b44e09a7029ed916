pub mod catalog;
pub mod entities;
pub mod extraction;
pub mod helpers;
pub mod ports;
pub mod resolution;
pub mod schema;
pub mod services;
pub mod value_objects;

#[cfg(test)]
pub(crate) mod test_support;

pub use entities::*;
pub use ports::*;
pub use value_objects::*;
