use crate::error::ProposalsError;
use cosmwasm_schema::cw_serde;

/// Reporter recorded on-chain while nobody has submitted the off-chain result.
pub const BURN_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

#[cw_serde]
pub struct ClassifierConfig {
    /// List proposals that only exist off-chain as non-sponsored.
    pub include_offchain_only: bool,
    pub burn_address: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            include_offchain_only: false,
            burn_address: BURN_ADDRESS.to_string(),
        }
    }
}

impl ClassifierConfig {
    pub fn validate(&self) -> Result<(), ProposalsError> {
        if self.burn_address.trim().is_empty() {
            return Err(ProposalsError::EmptyBurnAddress {});
        }
        Ok(())
    }
}
