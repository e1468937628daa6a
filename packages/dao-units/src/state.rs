use crate::indexer::IndexerHealth;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{StdResult, Storage, Uint128};
use cw_storage_plus::Item;
use dao_view_common::FetchState;

/// Total supply of units and the part of it issued to members.
#[cw_serde]
pub struct UnitTotals {
    pub total_units: Uint128,
    pub total_units_issued: Uint128,
}

/// Where a units reading came from.
#[cw_serde]
#[derive(Copy)]
pub enum UnitsSource {
    Indexer,
    Extension,
}

impl UnitsSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitsSource::Indexer => "indexer",
            UnitsSource::Extension => "extension",
        }
    }
}

/// Handle of a single fetch attempt. Only the newest attempt may write its result.
#[cw_serde]
#[derive(Copy)]
pub struct Attempt {
    pub id: u64,
}

/// The inputs the fetcher reacts to.
#[cw_serde]
pub struct UnitsInputs {
    /// DAO registry address, absent until the registry is known.
    pub registry: Option<String>,
    pub health: IndexerHealth,
}

pub(crate) const UNITS_STATE: Item<FetchState<UnitTotals>> = Item::new("units_state");

/// Id of the most recently started attempt.
pub(crate) const LATEST_ATTEMPT: Item<u64> = Item::new("units_attempt");

/// Inputs seen by the last `observe` call.
pub(crate) const OBSERVED_INPUTS: Item<UnitsInputs> = Item::new("units_observed");

/// Current `{ value, error, status }` of the units fetch. Standby until the first attempt.
pub fn load_state(store: &dyn Storage) -> StdResult<FetchState<UnitTotals>> {
    Ok(UNITS_STATE.may_load(store)?.unwrap_or_default())
}

pub fn latest_attempt(store: &dyn Storage) -> StdResult<Option<Attempt>> {
    Ok(LATEST_ATTEMPT
        .may_load(store)?
        .map(|id| Attempt { id }))
}
