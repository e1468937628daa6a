use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CommonError {
    #[error(transparent)]
    Std(#[from] StdError),

    #[error("Expected chain id cannot be empty.")]
    EmptyChainId {},

    #[error("Wrong network: connected to {actual}, expected {expected}.")]
    WrongChain { expected: String, actual: String },
}
