pub mod config;
pub mod error;
pub mod rules;
pub mod tracker;
pub mod types;


pub use crate::error::ProposalsError;
pub use crate::rules::{classify, filter_proposals};
