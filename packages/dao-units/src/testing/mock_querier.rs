use crate::indexer::UnitsIndexer;
use crate::msg::{BankExtensionQueryMsg, RegistryQueryMsg};
use cosmwasm_std::testing::{MockApi, MockQuerier, MockStorage};
use cosmwasm_std::{
    from_json, to_json_binary, Addr, Binary, ContractResult, Empty, OwnedDeps, Querier,
    QuerierResult, QueryRequest, StdError, StdResult, SystemError, SystemResult, Uint128,
    WasmQuery,
};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::marker::PhantomData;

pub const REGISTRY_CONTRACT: &str = "0xAbC0000000000000000000000000000000000001";
pub const BANK_EXTENSION: &str = "0xBa0c000000000000000000000000000000000002";

pub fn mock_dependencies() -> OwnedDeps<MockStorage, MockApi, WasmMockQuerier> {
    let custom_querier = WasmMockQuerier::new(MockQuerier::new(&[]));

    OwnedDeps {
        storage: MockStorage::default(),
        api: MockApi::default(),
        querier: custom_querier,
        custom_query_type: PhantomData,
    }
}

pub struct WasmMockQuerier {
    base: MockQuerier,
    balances: HashMap<String, Uint128>,
    bank_offline: bool,
    bank_calls: Cell<u32>,
}

impl Querier for WasmMockQuerier {
    fn raw_query(&self, bin_request: &[u8]) -> QuerierResult {
        let request: QueryRequest<Empty> = match from_json(bin_request) {
            Ok(v) => v,
            Err(e) => {
                return QuerierResult::Err(SystemError::InvalidRequest {
                    error: format!("Parsing query request: {}", e),
                    request: bin_request.into(),
                });
            }
        };
        self.handle_query(&request)
    }
}

impl WasmMockQuerier {
    pub fn handle_query(&self, request: &QueryRequest<Empty>) -> QuerierResult {
        match &request {
            QueryRequest::Wasm(WasmQuery::Smart { contract_addr, msg }) => {
                match contract_addr.as_str() {
                    REGISTRY_CONTRACT => {
                        let q: RegistryQueryMsg = from_json(msg).unwrap();
                        let resp: StdResult<Binary> = match q {
                            RegistryQueryMsg::ExtensionAddress { extension_id } => {
                                if extension_id == "bank" {
                                    to_json_binary(&Addr::unchecked(BANK_EXTENSION))
                                } else {
                                    Err(StdError::not_found(extension_id))
                                }
                            }
                        };
                        SystemResult::Ok(ContractResult::from(resp))
                    }
                    BANK_EXTENSION => {
                        self.bank_calls.set(self.bank_calls.get() + 1);
                        if self.bank_offline {
                            return SystemResult::Err(SystemError::NoSuchContract {
                                addr: contract_addr.to_string(),
                            });
                        }
                        let q: BankExtensionQueryMsg = from_json(msg).unwrap();
                        let resp: StdResult<Binary> = match q {
                            BankExtensionQueryMsg::BalanceOf { account, token_id: _ } => {
                                to_json_binary(
                                    &self.balances.get(&account).copied().unwrap_or_default(),
                                )
                            }
                        };
                        SystemResult::Ok(ContractResult::from(resp))
                    }
                    _ => SystemResult::Err(SystemError::NoSuchContract {
                        addr: contract_addr.to_string(),
                    }),
                }
            }
            _ => self.base.handle_query(request),
        }
    }

    pub fn set_units_balance(&mut self, account: &str, amount: u128) {
        self.balances
            .insert(account.to_string(), Uint128::new(amount));
    }

    pub fn set_bank_offline(&mut self, offline: bool) {
        self.bank_offline = offline;
    }

    pub fn bank_calls(&self) -> u32 {
        self.bank_calls.get()
    }
}

impl WasmMockQuerier {
    fn new(base: MockQuerier) -> WasmMockQuerier {
        WasmMockQuerier {
            base,
            balances: HashMap::new(),
            bank_offline: false,
            bank_calls: Cell::new(0),
        }
    }
}

/// Indexer double answering every lookup with the same body.
pub struct MockIndexer {
    reply: Result<String, String>,
    calls: Cell<u32>,
    last_registry: RefCell<Option<String>>,
}

impl MockIndexer {
    pub fn replying(body: &str) -> Self {
        MockIndexer {
            reply: Ok(body.to_string()),
            calls: Cell::new(0),
            last_registry: RefCell::new(None),
        }
    }

    pub fn with_units(registry: &str, total: &str, issued: &str) -> Self {
        Self::replying(&format!(
            r#"{{"daos":[{{"id":"{}","totalUnits":"{}","totalUnitsIssued":"{}"}}]}}"#,
            registry.to_lowercase(),
            total,
            issued
        ))
    }

    pub fn failing(reason: &str) -> Self {
        MockIndexer {
            reply: Err(reason.to_string()),
            calls: Cell::new(0),
            last_registry: RefCell::new(None),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.get()
    }

    pub fn last_registry(&self) -> Option<String> {
        self.last_registry.borrow().clone()
    }
}

impl UnitsIndexer for MockIndexer {
    fn dao_units(&self, registry: &str) -> StdResult<Binary> {
        self.calls.set(self.calls.get() + 1);
        *self.last_registry.borrow_mut() = Some(registry.to_string());
        match &self.reply {
            Ok(body) => Ok(Binary::from(body.as_bytes())),
            Err(reason) => Err(StdError::generic_err(reason)),
        }
    }
}
