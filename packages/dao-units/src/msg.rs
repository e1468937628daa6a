use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};

/// Queries the units fetcher sends to a DAO registry.
#[cw_serde]
#[derive(QueryResponses)]
pub enum RegistryQueryMsg {
    /// Resolves the address of the extension registered under `extension_id`.
    #[returns(Addr)]
    ExtensionAddress { extension_id: String },
}

/// Queries the units fetcher sends to the bank extension.
#[cw_serde]
#[derive(QueryResponses)]
pub enum BankExtensionQueryMsg {
    /// Balance of `token_id` held by `account`.
    #[returns(Uint128)]
    BalanceOf { account: String, token_id: String },
}
