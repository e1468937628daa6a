use crate::error::UnitsError;
use crate::state::UnitTotals;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{from_json, Binary, StdResult, Uint128};
use serde::Deserialize;

/// Health of the indexing service as reported by its status probe.
#[cw_serde]
#[derive(Copy)]
pub enum IndexerHealth {
    Healthy,
    Unhealthy,
}

/// Read access to the indexing service.
///
/// Implementations run the DAO lookup for `registry` (already lower-cased)
/// and hand back the raw JSON body of the reply. Transport and service
/// errors are reported as `Err`.
pub trait UnitsIndexer {
    fn dao_units(&self, registry: &str) -> StdResult<Binary>;
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct IndexedDaosReply {
    daos: Vec<IndexedDao>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct IndexedDao {
    id: String,
    total_units: Uint128,
    total_units_issued: Uint128,
}

/// Reads total and issued units for `registry` from the indexer.
pub fn fetch_from_indexer(
    indexer: &dyn UnitsIndexer,
    registry: &str,
) -> Result<UnitTotals, UnitsError> {
    let registry = registry.to_lowercase();

    let body = indexer
        .dao_units(&registry)
        .map_err(|err| UnitsError::IndexerUnavailable {
            reason: err.to_string(),
        })?;

    let reply: IndexedDaosReply =
        from_json(&body).map_err(|err| UnitsError::IndexerMalformed {
            reason: err.to_string(),
        })?;

    let dao = reply
        .daos
        .into_iter()
        .find(|dao| dao.id.to_lowercase() == registry)
        .ok_or_else(|| UnitsError::IndexerMissingDao {
            registry: registry.clone(),
        })?;

    Ok(UnitTotals {
        total_units: dao.total_units,
        total_units_issued: dao.total_units_issued,
    })
}
