use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum UnitsError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Indexer query failed: {reason}")]
    IndexerUnavailable { reason: String },

    #[error("Indexer reply is malformed: {reason}")]
    IndexerMalformed { reason: String },

    #[error("Indexer has no entry for DAO {registry}")]
    IndexerMissingDao { registry: String },

    #[error("Guild units ({guild}) exceed total units ({total})")]
    GuildExceedsTotal { total: Uint128, guild: Uint128 },

    #[error("Configuration value {field} cannot be empty.")]
    EmptyConfigValue { field: String },

    #[error("Guild and total accounts must differ.")]
    SameGuildAndTotal {},
}

impl UnitsError {
    /// Indexer failures are recovered by reading the bank extension instead.
    pub fn is_indexer_error(&self) -> bool {
        matches!(
            self,
            UnitsError::IndexerUnavailable { .. }
                | UnitsError::IndexerMalformed { .. }
                | UnitsError::IndexerMissingDao { .. }
        )
    }
}
