//! Bus network model and its indexer

pub mod data;
pub mod indexer;

pub use data::{BusNetwork, Route, Stop};
pub use indexer::BusIndexer;
