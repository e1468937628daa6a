pub mod config;
pub mod error;
pub mod fetcher;
pub mod indexer;
pub mod msg;
pub mod state;

#[cfg(test)]
mod testing;

pub use crate::error::UnitsError;
