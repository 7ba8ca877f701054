//! Street network model

pub mod components;
pub mod map;

pub use components::{Node, Way};
pub use map::StreetMap;
