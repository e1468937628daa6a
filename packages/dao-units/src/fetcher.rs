use crate::config::UnitsConfig;
use crate::error::UnitsError;
use crate::indexer::{fetch_from_indexer, IndexerHealth, UnitsIndexer};
use crate::msg::{BankExtensionQueryMsg, RegistryQueryMsg};
use crate::state::{
    load_state, Attempt, UnitTotals, UnitsInputs, UnitsSource, LATEST_ATTEMPT, OBSERVED_INPUTS,
    UNITS_STATE,
};
use cosmwasm_std::{
    attr, Addr, Api, Attribute, Deps, DepsMut, QuerierWrapper, StdResult, Storage, Uint128,
};
use dao_view_common::FetchState;

/// Result of a refresh: the state after the attempt settled and the
/// attributes describing it.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshOutcome {
    pub attempt: Attempt,
    /// false when a newer attempt started before this one settled.
    pub applied: bool,
    pub source: Option<UnitsSource>,
    pub state: FetchState<UnitTotals>,
    pub attributes: Vec<Attribute>,
}

/// Reads the units balances straight from the DAO's bank extension.
pub fn fetch_from_extension(
    querier: &QuerierWrapper,
    config: &UnitsConfig,
    registry: &str,
) -> Result<UnitTotals, UnitsError> {
    let bank: Addr = querier.query_wasm_smart(
        registry,
        &RegistryQueryMsg::ExtensionAddress {
            extension_id: config.bank_extension_id.clone(),
        },
    )?;

    let total_units = query_units_balance(querier, &bank, config, &config.total_account)?;
    let guild_units = query_units_balance(querier, &bank, config, &config.guild_account)?;

    // the guild can never hold more than the whole supply
    let total_units_issued = total_units.checked_sub(guild_units).map_err(|_| {
        UnitsError::GuildExceedsTotal {
            total: total_units,
            guild: guild_units,
        }
    })?;

    Ok(UnitTotals {
        total_units,
        total_units_issued,
    })
}

fn query_units_balance(
    querier: &QuerierWrapper,
    bank: &Addr,
    config: &UnitsConfig,
    account: &str,
) -> StdResult<Uint128> {
    querier.query_wasm_smart(
        bank.as_str(),
        &BankExtensionQueryMsg::BalanceOf {
            account: account.to_string(),
            token_id: config.units_token.clone(),
        },
    )
}

/// Picks the data source for the current indexer health.
///
/// * unhealthy indexer: the bank extension is read and the indexer is never called.
/// * healthy indexer: the indexer is asked first; any indexer error falls back
///   to the bank extension.
pub fn fetch_units(
    deps: Deps,
    indexer: &dyn UnitsIndexer,
    config: &UnitsConfig,
    registry: &str,
    health: IndexerHealth,
) -> Result<(UnitTotals, UnitsSource), UnitsError> {
    if health == IndexerHealth::Healthy {
        match fetch_from_indexer(indexer, registry) {
            Ok(totals) => return Ok((totals, UnitsSource::Indexer)),
            Err(err) => deps.api.debug(&format!(
                "units: indexer lookup for {} failed, reading bank extension: {}",
                registry, err
            )),
        }
    }

    let totals = fetch_from_extension(&deps.querier, config, registry)?;
    Ok((totals, UnitsSource::Extension))
}

/// Starts a new attempt. The status goes to Pending whatever it was before.
pub fn begin_attempt(store: &mut dyn Storage) -> StdResult<Attempt> {
    let id = LATEST_ATTEMPT.may_load(store)?.unwrap_or_default() + 1;
    LATEST_ATTEMPT.save(store, &id)?;

    let state = load_state(store)?.into_pending();
    UNITS_STATE.save(store, &state)?;

    Ok(Attempt { id })
}

/// Settles `attempt` with `result`. Returns false, leaving the state untouched,
/// if a newer attempt has been started since.
pub fn complete_attempt(
    store: &mut dyn Storage,
    api: &dyn Api,
    attempt: Attempt,
    result: &Result<UnitTotals, UnitsError>,
) -> StdResult<bool> {
    let latest = LATEST_ATTEMPT.may_load(store)?.unwrap_or_default();
    if attempt.id != latest {
        api.debug(&format!(
            "units: dropping result of attempt {}, attempt {} is newer",
            attempt.id, latest
        ));
        return Ok(false);
    }

    let state = match result {
        Ok(totals) => FetchState::fulfilled(totals.clone()),
        Err(err) => FetchState::rejected(err),
    };
    UNITS_STATE.save(store, &state)?;

    Ok(true)
}

/// Runs one full attempt: Pending, fetch, then Fulfilled or Rejected.
///
/// Fetch failures end up in the stored state; `Err` is only returned for
/// an invalid config or a storage failure.
pub fn refresh(
    deps: DepsMut,
    indexer: &dyn UnitsIndexer,
    config: &UnitsConfig,
    registry: &str,
    health: IndexerHealth,
) -> Result<RefreshOutcome, UnitsError> {
    config.validate()?;

    let attempt = begin_attempt(deps.storage)?;
    let fetched = fetch_units(deps.as_ref(), indexer, config, registry, health);

    let source = fetched.as_ref().ok().map(|(_, source)| *source);
    let result = fetched.map(|(totals, _)| totals);
    let applied = complete_attempt(deps.storage, deps.api, attempt, &result)?;
    let state = load_state(deps.storage)?;

    let mut attributes = vec![
        attr("action", "refresh_units"),
        attr("registry", registry),
        attr("attempt", attempt.id.to_string()),
        attr("status", state.status.to_string()),
    ];
    if let Some(source) = source {
        attributes.push(attr("source", source.as_str()));
    }
    if let Err(err) = &result {
        attributes.push(attr("error", err.to_string()));
    }

    Ok(RefreshOutcome {
        attempt,
        applied,
        source,
        state,
        attributes,
    })
}

/// Reacts to a change of the registry address or of the indexer health.
///
/// Returns `None` when nothing had to be fetched: either the inputs are the
/// same as on the previous call, or the registry is not known and the fetch
/// is back in Standby. Losing the registry also invalidates any attempt still
/// in flight.
pub fn observe(
    deps: DepsMut,
    indexer: &dyn UnitsIndexer,
    config: &UnitsConfig,
    inputs: UnitsInputs,
) -> Result<Option<RefreshOutcome>, UnitsError> {
    let previous = OBSERVED_INPUTS.may_load(deps.storage)?;
    if previous.as_ref() == Some(&inputs) {
        return Ok(None);
    }
    OBSERVED_INPUTS.save(deps.storage, &inputs)?;

    match inputs.registry.as_deref() {
        Some(registry) => refresh(deps, indexer, config, registry, inputs.health).map(Some),
        None => {
            if let Some(latest) = LATEST_ATTEMPT.may_load(deps.storage)? {
                LATEST_ATTEMPT.save(deps.storage, &(latest + 1))?;
            }
            UNITS_STATE.save(deps.storage, &FetchState::standby())?;
            Ok(None)
        }
    }
}
