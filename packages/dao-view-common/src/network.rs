use crate::error::CommonError;
use cosmwasm_schema::cw_serde;

/// The chain a view is allowed to read from.
#[cw_serde]
pub struct NetworkIdentity {
    pub expected_chain_id: String,
}

impl NetworkIdentity {
    pub fn new(expected_chain_id: impl Into<String>) -> Self {
        NetworkIdentity {
            expected_chain_id: expected_chain_id.into(),
        }
    }

    pub fn validate(&self) -> Result<(), CommonError> {
        if self.expected_chain_id.trim().is_empty() {
            return Err(CommonError::EmptyChainId {});
        }
        Ok(())
    }

    /// Compares the chain the wallet is connected to against the expected one.
    pub fn check(&self, connected_chain_id: &str) -> Result<(), CommonError> {
        if connected_chain_id != self.expected_chain_id {
            return Err(CommonError::WrongChain {
                expected: self.expected_chain_id.clone(),
                actual: connected_chain_id.to_string(),
            });
        }
        Ok(())
    }
}
