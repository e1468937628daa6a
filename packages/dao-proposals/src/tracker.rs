use crate::config::ClassifierConfig;
use crate::error::ProposalsError;
use crate::rules::filter_proposals;
use crate::types::{FilteredProposals, ProposalData, VotingResult};
use cosmwasm_std::{Api, StdResult};
use dao_view_common::{AsyncStatus, FetchState, NetworkIdentity};

/// Off-chain tally results, one entry per proposal id.
pub type OffchainResults = Vec<(String, VotingResult)>;

/// Source of off-chain vote tallies.
pub trait OffchainTallySource {
    /// Returns the tally of every id it knows about. Unknown ids are left out.
    fn voting_results(&self, proposal_ids: &[String]) -> StdResult<OffchainResults>;
}

/// A tally fetch handed out by `begin_tally_fetch`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TallyRequest {
    pub generation: u64,
    pub proposal_ids: Vec<String>,
}

/// What a proposals list consumer renders.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProposalsView {
    pub proposals: FilteredProposals,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Keeps the proposal list, its off-chain tallies and the network check together
/// and derives the display buckets from them.
#[derive(Clone, Debug, Default)]
pub struct ProposalsTracker {
    config: ClassifierConfig,
    proposals: FetchState<Vec<ProposalData>>,
    tallies: FetchState<OffchainResults>,
    tally_ids: Vec<String>,
    tally_generation: u64,
    chain_mismatch: Option<String>,
}

impl ProposalsTracker {
    pub fn new(config: ClassifierConfig) -> Result<Self, ProposalsError> {
        config.validate()?;
        Ok(ProposalsTracker {
            config,
            ..ProposalsTracker::default()
        })
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn proposals(&self) -> &FetchState<Vec<ProposalData>> {
        &self.proposals
    }

    pub fn tallies(&self) -> &FetchState<OffchainResults> {
        &self.tallies
    }

    /// Records the latest state of the primary proposal fetch.
    ///
    /// When a fulfilled list differs from the one held, the tallies go back
    /// to Standby so that they get fetched again, and any tally fetch still
    /// in flight is invalidated.
    pub fn set_proposals(&mut self, proposals: FetchState<Vec<ProposalData>>) {
        if proposals.status == AsyncStatus::Fulfilled {
            let ids: Vec<String> = proposals
                .value
                .iter()
                .flatten()
                .map(|p| p.tally_id().to_string())
                .collect();

            let changed = proposals.value != self.proposals.value;
            if changed || self.tallies.status == AsyncStatus::Standby {
                self.tally_generation += 1;
                self.tallies = if ids.is_empty() {
                    FetchState::fulfilled(vec![])
                } else {
                    FetchState::standby()
                };
                self.tally_ids = ids;
            }
        }
        self.proposals = proposals;
    }

    /// Starts the tally fetch for the current proposals, if one is due.
    pub fn begin_tally_fetch(&mut self) -> Option<TallyRequest> {
        if self.proposals.status != AsyncStatus::Fulfilled
            || self.tallies.status != AsyncStatus::Standby
        {
            return None;
        }

        self.tally_generation += 1;
        self.tallies = std::mem::take(&mut self.tallies).into_pending();

        Some(TallyRequest {
            generation: self.tally_generation,
            proposal_ids: self.tally_ids.clone(),
        })
    }

    /// Settles a tally fetch. Returns false if the proposal set changed since
    /// `request` was handed out; the result is then discarded.
    pub fn complete_tally_fetch(
        &mut self,
        request: &TallyRequest,
        result: StdResult<OffchainResults>,
    ) -> bool {
        if request.generation != self.tally_generation {
            return false;
        }

        self.tallies = match result {
            Ok(results) => FetchState::fulfilled(results),
            Err(err) => FetchState::rejected(err),
        };
        true
    }

    /// Runs a due tally fetch against `source`. Returns whether one ran.
    pub fn refresh_tallies(&mut self, source: &dyn OffchainTallySource, api: &dyn Api) -> bool {
        let request = match self.begin_tally_fetch() {
            Some(request) => request,
            None => return false,
        };

        let result = source.voting_results(&request.proposal_ids);
        match &result {
            Ok(results) => api.debug(&format!(
                "proposals: fetched {} off-chain results for {} proposals",
                results.len(),
                request.proposal_ids.len()
            )),
            Err(err) => api.debug(&format!("proposals: off-chain results failed: {}", err)),
        }

        self.complete_tally_fetch(&request, result)
    }

    pub fn set_chain_mismatch(&mut self, error: Option<String>) {
        self.chain_mismatch = error;
    }

    /// Records a chain mismatch when the wallet is connected to the wrong chain,
    /// and clears it otherwise.
    pub fn check_network(&mut self, identity: &NetworkIdentity, connected_chain_id: &str) {
        self.chain_mismatch = identity
            .check(connected_chain_id)
            .err()
            .map(|err| err.to_string());
    }

    /// A chain mismatch blocks the view, so it is never loading then.
    pub fn is_loading(&self) -> bool {
        if self.chain_mismatch.is_some() {
            return false;
        }

        let tallies_due = self.tallies.status == AsyncStatus::Standby
            && self.proposals.status == AsyncStatus::Fulfilled;

        self.proposals.status.is_settling()
            || self.tallies.status == AsyncStatus::Pending
            || tallies_due
    }

    /// First of the proposal fetch error, the tally fetch error and the chain mismatch.
    pub fn error(&self) -> Option<&str> {
        self.proposals
            .error
            .as_deref()
            .or(self.tallies.error.as_deref())
            .or(self.chain_mismatch.as_deref())
    }

    /// The display buckets, once both fetches have settled.
    ///
    /// A failed tally fetch does not block classification: proposals are then
    /// classified without off-chain results.
    pub fn filtered(&self) -> Option<FilteredProposals> {
        if !self.proposals.is_terminal() || !self.tallies.is_terminal() {
            return None;
        }

        let proposals = self.proposals.value.as_deref().unwrap_or_default();
        let results = self.tallies.value.as_deref().unwrap_or_default();
        Some(filter_proposals(proposals, results, &self.config))
    }

    pub fn view(&self) -> ProposalsView {
        ProposalsView {
            proposals: self.filtered().unwrap_or_default(),
            is_loading: self.is_loading(),
            error: self.error().map(|e| e.to_string()),
        }
    }
}
