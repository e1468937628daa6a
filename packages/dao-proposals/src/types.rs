use crate::error::ProposalsError;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::Uint128;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const YES: &str = "Yes";
pub const NO: &str = "No";

/// A flag of the on-chain proposal record. Each flag is one bit of the record's flag word.
#[cw_serde]
#[derive(Copy, Eq)]
pub enum ProposalFlag {
    Exists,
    Sponsored,
    Processed,
}

impl ProposalFlag {
    fn bit(&self) -> u64 {
        match self {
            ProposalFlag::Exists => 1 << 0,
            ProposalFlag::Sponsored => 1 << 1,
            ProposalFlag::Processed => 1 << 2,
        }
    }
}

/// The flag word of an on-chain proposal. Flags are only ever added.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, JsonSchema)]
#[serde(transparent)]
pub struct ProposalFlags(pub u64);

impl ProposalFlags {
    pub fn has(&self, flag: ProposalFlag) -> bool {
        self.0 & flag.bit() != 0
    }

    pub fn has_any(&self, flags: &[ProposalFlag]) -> bool {
        flags.iter().any(|flag| self.has(*flag))
    }

    pub fn with(self, flag: ProposalFlag) -> Self {
        ProposalFlags(self.0 | flag.bit())
    }
}

/// Vote phase of a proposal as reported by its voting adapter.
#[cw_serde]
#[derive(Copy, Eq)]
pub enum VotingState {
    NotStarted,
    Tie,
    Pass,
    NotPass,
    InProgress,
    GracePeriod,
}

impl TryFrom<u8> for VotingState {
    type Error = ProposalsError;

    /// Decodes the state code returned by the adapter's `voteResult`.
    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(VotingState::NotStarted),
            1 => Ok(VotingState::Tie),
            2 => Ok(VotingState::Pass),
            3 => Ok(VotingState::NotPass),
            4 => Ok(VotingState::InProgress),
            5 => Ok(VotingState::GracePeriod),
            code => Err(ProposalsError::UnknownVotingState { code }),
        }
    }
}

/// Units behind each choice of an off-chain vote.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, JsonSchema)]
#[serde(transparent)]
pub struct VotingResult(pub BTreeMap<String, Uint128>);

impl VotingResult {
    pub fn from_yes_no(yes: u128, no: u128) -> Self {
        VotingResult(BTreeMap::from([
            (YES.to_string(), Uint128::new(yes)),
            (NO.to_string(), Uint128::new(no)),
        ]))
    }

    pub fn units(&self, choice: &str) -> Uint128 {
        self.0.get(choice).copied().unwrap_or_default()
    }

    pub fn yes(&self) -> Uint128 {
        self.units(YES)
    }

    pub fn no(&self) -> Uint128 {
        self.units(NO)
    }

    /// Simple majority: strictly more Yes units than No units.
    pub fn did_pass(&self) -> bool {
        self.yes() > self.no()
    }
}

#[cw_serde]
pub struct SnapshotVote {
    pub voter: String,
    pub choice: String,
}

/// An off-chain draft or proposal message.
#[cw_serde]
pub struct SnapshotMessage {
    pub id_in_snapshot: String,
    pub title: String,
    pub body: String,
    pub author: String,
    #[serde(default)]
    pub votes: Vec<SnapshotVote>,
}

/// The proposal record kept by the DAO registry.
#[cw_serde]
pub struct OnchainProposal {
    pub flags: ProposalFlags,
}

/// Raw vote tallies kept by the voting adapter.
#[cw_serde]
pub enum ProposalVotes {
    Offchain {
        /// Account that submitted the off-chain result. The burn address until someone does.
        reporter: String,
        nb_yes: Uint128,
        nb_no: Uint128,
    },
    Onchain {
        nb_yes: Uint128,
        nb_no: Uint128,
    },
}

impl ProposalVotes {
    pub fn reporter(&self) -> Option<&str> {
        match self {
            ProposalVotes::Offchain { reporter, .. } => Some(reporter.as_str()),
            ProposalVotes::Onchain { .. } => None,
        }
    }
}

#[cw_serde]
#[derive(Copy, Eq)]
pub enum VotingAdapterKind {
    Offchain,
    Onchain,
}

#[cw_serde]
pub struct VotingAdapter {
    pub kind: VotingAdapterKind,
    pub address: String,
}

/// Everything known about one proposal, off-chain and on-chain.
#[cw_serde]
pub struct ProposalData {
    pub id_in_dao: String,
    pub snapshot_draft: Option<SnapshotMessage>,
    pub snapshot_proposal: Option<SnapshotMessage>,
    pub dao_proposal: Option<OnchainProposal>,
    /// None if the proposal has never been put to a vote.
    pub dao_proposal_vote_result: Option<VotingState>,
    pub dao_proposal_votes: Option<ProposalVotes>,
    pub voting_adapter: Option<VotingAdapter>,
}

impl ProposalData {
    pub fn new(id_in_dao: impl Into<String>) -> Self {
        ProposalData {
            id_in_dao: id_in_dao.into(),
            snapshot_draft: None,
            snapshot_proposal: None,
            dao_proposal: None,
            dao_proposal_vote_result: None,
            dao_proposal_votes: None,
            voting_adapter: None,
        }
    }

    /// Identifier under which the off-chain tally of this proposal is stored.
    pub fn tally_id(&self) -> &str {
        self.snapshot_proposal
            .as_ref()
            .map(|p| p.id_in_snapshot.as_str())
            .unwrap_or(&self.id_in_dao)
    }

    pub fn flags(&self) -> ProposalFlags {
        self.dao_proposal
            .as_ref()
            .map(|p| p.flags)
            .unwrap_or_default()
    }

    pub fn offchain_vote_count(&self) -> usize {
        self.snapshot_proposal
            .as_ref()
            .map(|p| p.votes.len())
            .unwrap_or_default()
    }
}

/// Display bucket of a classified proposal.
#[cw_serde]
#[derive(Copy, Eq)]
pub enum Bucket {
    Failed,
    NonSponsored,
    Passed,
    Voting,
}

/// The four display buckets.
#[cw_serde]
#[derive(Default)]
pub struct FilteredProposals {
    pub failed_proposals: Vec<ProposalData>,
    pub nonsponsored_proposals: Vec<ProposalData>,
    pub passed_proposals: Vec<ProposalData>,
    pub voting_proposals: Vec<ProposalData>,
}

impl FilteredProposals {
    pub fn bucket(&self, bucket: Bucket) -> &[ProposalData] {
        match bucket {
            Bucket::Failed => &self.failed_proposals,
            Bucket::NonSponsored => &self.nonsponsored_proposals,
            Bucket::Passed => &self.passed_proposals,
            Bucket::Voting => &self.voting_proposals,
        }
    }

    pub(crate) fn push(&mut self, bucket: Bucket, proposal: ProposalData) {
        match bucket {
            Bucket::Failed => self.failed_proposals.push(proposal),
            Bucket::NonSponsored => self.nonsponsored_proposals.push(proposal),
            Bucket::Passed => self.passed_proposals.push(proposal),
            Bucket::Voting => self.voting_proposals.push(proposal),
        }
    }

    pub fn len(&self) -> usize {
        self.failed_proposals.len()
            + self.nonsponsored_proposals.len()
            + self.passed_proposals.len()
            + self.voting_proposals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
