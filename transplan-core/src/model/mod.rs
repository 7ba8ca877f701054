//! Data model for the street network and the bus overlay

pub mod streets;
pub mod transit;

pub use streets::{Node, StreetMap, Way};
pub use transit::{BusIndexer, BusNetwork, Route, Stop};
