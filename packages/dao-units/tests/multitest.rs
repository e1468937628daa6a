use cosmwasm_schema::cw_serde;
use cosmwasm_std::testing::MockApi;
use cosmwasm_std::{
    to_json_binary, Addr, Binary, Deps, DepsMut, Empty, Env, MemoryStorage, MessageInfo,
    Response, StdError, StdResult, Uint128,
};
use cw_multi_test::{App, Contract, ContractWrapper, Executor};
use cw_storage_plus::Map;
use dao_units::config::{UnitsConfig, GUILD, TOTAL};
use dao_units::fetcher::{fetch_from_extension, refresh};
use dao_units::indexer::{IndexerHealth, UnitsIndexer};
use dao_units::msg::{BankExtensionQueryMsg, RegistryQueryMsg};
use dao_units::state::{load_state, UnitsSource};
use dao_view_common::AsyncStatus;

const EXTENSIONS: Map<&str, Addr> = Map::new("extensions");
const BALANCES: Map<&str, Uint128> = Map::new("balances");

#[cw_serde]
struct RegistryInstantiateMsg {
    bank: String,
}

#[cw_serde]
struct BankInstantiateMsg {
    balances: Vec<(String, Uint128)>,
}

#[cw_serde]
struct EmptyMsg {}

fn noop_execute(
    _deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    _msg: EmptyMsg,
) -> StdResult<Response> {
    Ok(Response::new())
}

fn registry_instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: RegistryInstantiateMsg,
) -> StdResult<Response> {
    let bank = deps.api.addr_validate(&msg.bank)?;
    EXTENSIONS.save(deps.storage, "bank", &bank)?;
    Ok(Response::new())
}

fn registry_query(deps: Deps, _env: Env, msg: RegistryQueryMsg) -> StdResult<Binary> {
    match msg {
        RegistryQueryMsg::ExtensionAddress { extension_id } => {
            to_json_binary(&EXTENSIONS.load(deps.storage, &extension_id)?)
        }
    }
}

fn bank_instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: BankInstantiateMsg,
) -> StdResult<Response> {
    for (account, amount) in msg.balances {
        BALANCES.save(deps.storage, &account, &amount)?;
    }
    Ok(Response::new())
}

fn bank_query(deps: Deps, _env: Env, msg: BankExtensionQueryMsg) -> StdResult<Binary> {
    match msg {
        BankExtensionQueryMsg::BalanceOf { account, token_id: _ } => to_json_binary(
            &BALANCES
                .may_load(deps.storage, &account)?
                .unwrap_or_default(),
        ),
    }
}

fn registry_contract() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(noop_execute, registry_instantiate, registry_query);
    Box::new(contract)
}

fn bank_contract() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(noop_execute, bank_instantiate, bank_query);
    Box::new(contract)
}

struct PanickingIndexer;

impl UnitsIndexer for PanickingIndexer {
    fn dao_units(&self, _registry: &str) -> StdResult<Binary> {
        panic!("indexer must not be queried while unhealthy")
    }
}

struct OfflineIndexer;

impl UnitsIndexer for OfflineIndexer {
    fn dao_units(&self, _registry: &str) -> StdResult<Binary> {
        Err(StdError::generic_err("indexer timed out"))
    }
}

/// Deploys a registry pointing at a bank extension holding `total` and `guild` units.
fn setup_dao(app: &mut App, total: u128, guild: u128) -> Addr {
    let owner = app.api().addr_make("owner");

    let bank_id = app.store_code(bank_contract());
    let bank = app
        .instantiate_contract(
            bank_id,
            owner.clone(),
            &BankInstantiateMsg {
                balances: vec![
                    (TOTAL.to_string(), Uint128::new(total)),
                    (GUILD.to_string(), Uint128::new(guild)),
                ],
            },
            &[],
            "bank extension",
            None,
        )
        .unwrap();

    let registry_id = app.store_code(registry_contract());
    app.instantiate_contract(
        registry_id,
        owner,
        &RegistryInstantiateMsg {
            bank: bank.to_string(),
        },
        &[],
        "dao registry",
        None,
    )
    .unwrap()
}

#[test]
fn test_extension_read_through_registry() {
    let mut app = App::default();
    let registry = setup_dao(&mut app, 100, 60);

    let totals =
        fetch_from_extension(&app.wrap(), &UnitsConfig::default(), registry.as_str()).unwrap();
    assert_eq!(totals.total_units, Uint128::new(100));
    assert_eq!(totals.total_units_issued, Uint128::new(40));
}

#[test]
fn test_refresh_from_host_storage() {
    let mut app = App::default();
    let registry = setup_dao(&mut app, 1_000, 250);
    let config = UnitsConfig::default();

    let mut storage = MemoryStorage::new();
    let api = MockApi::default();

    let res = refresh(
        DepsMut {
            storage: &mut storage,
            api: &api,
            querier: app.wrap(),
        },
        &PanickingIndexer,
        &config,
        registry.as_str(),
        IndexerHealth::Unhealthy,
    )
    .unwrap();
    assert_eq!(res.source, Some(UnitsSource::Extension));
    assert_eq!(res.state.status, AsyncStatus::Fulfilled);

    let res = refresh(
        DepsMut {
            storage: &mut storage,
            api: &api,
            querier: app.wrap(),
        },
        &OfflineIndexer,
        &config,
        registry.as_str(),
        IndexerHealth::Healthy,
    )
    .unwrap();
    assert_eq!(res.source, Some(UnitsSource::Extension));
    assert_eq!(res.attempt.id, 2);

    let state = load_state(&storage).unwrap();
    assert_eq!(state.status, AsyncStatus::Fulfilled);
    let totals = state.value.unwrap();
    assert_eq!(totals.total_units, Uint128::new(1_000));
    assert_eq!(totals.total_units_issued, Uint128::new(750));
}

#[test]
fn test_unknown_registry_rejects() {
    let mut app = App::default();
    setup_dao(&mut app, 10, 5);
    let stranger = app.api().addr_make("stranger");

    let mut storage = MemoryStorage::new();
    let api = MockApi::default();
    let res = refresh(
        DepsMut {
            storage: &mut storage,
            api: &api,
            querier: app.wrap(),
        },
        &OfflineIndexer,
        &UnitsConfig::default(),
        stranger.as_str(),
        IndexerHealth::Healthy,
    )
    .unwrap();

    assert_eq!(res.state.status, AsyncStatus::Rejected);
    assert_eq!(res.state.value, None);
    assert!(res.state.error.is_some());
}
