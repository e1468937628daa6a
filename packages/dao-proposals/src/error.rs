use cosmwasm_std::StdError;
use dao_view_common::CommonError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ProposalsError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error(transparent)]
    Common(#[from] CommonError),

    #[error("Unknown voting state code: {code}")]
    UnknownVotingState { code: u8 },

    #[error("Burn address cannot be empty.")]
    EmptyBurnAddress {},
}
