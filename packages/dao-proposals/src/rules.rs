//! Ordered classification rules.
//!
//! Rules are evaluated top to bottom and the first rule that applies decides
//! the outcome of a proposal. The last rule always applies.

use crate::config::ClassifierConfig;
use crate::types::{
    Bucket, FilteredProposals, ProposalData, ProposalFlag, ProposalFlags, VotingResult,
    VotingState,
};

/// What happens to a proposal once a rule applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Not listed at all.
    Drop,
    Bucket(Bucket),
    /// In a state no rule covers yet. Not listed.
    Unclassified,
}

/// Inputs the rules look at, derived once per proposal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProposalFacts {
    pub has_record: bool,
    pub flags: ProposalFlags,
    pub voting_state: Option<VotingState>,
    pub include_offchain_only: bool,
    pub offchain_result_available: bool,
    /// Yes units > No units in the off-chain result. False when no result is available.
    pub did_pass: bool,
    /// The vote is over or tied, the proposal is sponsored and nobody reported
    /// the off-chain result on-chain yet.
    pub offchain_result_not_yet_submitted: bool,
    pub offchain_vote_count: usize,
}

impl ProposalFacts {
    pub fn collect(
        proposal: &ProposalData,
        offchain_results: &[(String, VotingResult)],
        config: &ClassifierConfig,
    ) -> Self {
        let flags = proposal.flags();
        let voting_state = proposal.dao_proposal_vote_result;

        let offchain_result = find_result(offchain_results, proposal.tally_id());

        let reporter_is_burn = proposal
            .dao_proposal_votes
            .as_ref()
            .and_then(|votes| votes.reporter())
            .map(|reporter| normalize(reporter) == normalize(&config.burn_address))
            .unwrap_or(false);

        let offchain_result_not_yet_submitted = matches!(
            voting_state,
            Some(VotingState::GracePeriod) | Some(VotingState::Tie)
        ) && flags.has(ProposalFlag::Sponsored)
            && reporter_is_burn;

        ProposalFacts {
            has_record: proposal.dao_proposal.is_some(),
            flags,
            voting_state,
            include_offchain_only: config.include_offchain_only,
            offchain_result_available: offchain_result.is_some(),
            did_pass: offchain_result.map(|r| r.did_pass()).unwrap_or(false),
            offchain_result_not_yet_submitted,
            offchain_vote_count: proposal.offchain_vote_count(),
        }
    }

    fn state_in(&self, states: &[VotingState]) -> bool {
        self.voting_state
            .map(|state| states.contains(&state))
            .unwrap_or(false)
    }

    fn sponsored_or_processed(&self) -> bool {
        self.flags
            .has_any(&[ProposalFlag::Sponsored, ProposalFlag::Processed])
    }
}

pub struct Rule {
    pub name: &'static str,
    pub applies: fn(&ProposalFacts) -> bool,
    pub outcome: Outcome,
}

fn missing_record(f: &ProposalFacts) -> bool {
    !f.has_record
}

fn processed_without_vote(f: &ProposalFacts) -> bool {
    f.voting_state.is_none() && f.flags.has(ProposalFlag::Processed)
}

fn never_sponsored(f: &ProposalFacts) -> bool {
    f.voting_state.is_none()
}

fn listed_unsponsored(f: &ProposalFacts) -> bool {
    never_sponsored(f) && (f.include_offchain_only || f.flags.has(ProposalFlag::Exists))
}

fn unlisted_unsponsored(f: &ProposalFacts) -> bool {
    never_sponsored(f)
}

fn passed(f: &ProposalFacts) -> bool {
    f.state_in(&[VotingState::Pass]) && f.sponsored_or_processed()
}

fn passing_result_awaits_submission(f: &ProposalFacts) -> bool {
    f.offchain_result_not_yet_submitted && f.offchain_vote_count > 0 && f.did_pass
}

fn failed(f: &ProposalFacts) -> bool {
    f.state_in(&[VotingState::NotPass, VotingState::Tie]) && f.sponsored_or_processed()
}

fn unsubmitted_without_votes(f: &ProposalFacts) -> bool {
    f.offchain_result_not_yet_submitted && f.offchain_vote_count == 0
}

fn unsubmitted_not_passed(f: &ProposalFacts) -> bool {
    f.offchain_result_not_yet_submitted && !f.did_pass
}

fn voting(f: &ProposalFacts) -> bool {
    f.state_in(&[VotingState::GracePeriod, VotingState::InProgress])
        && f.flags.has(ProposalFlag::Sponsored)
}

fn always(_: &ProposalFacts) -> bool {
    true
}

pub const RULES: &[Rule] = &[
    Rule {
        name: "missing_record",
        applies: missing_record,
        outcome: Outcome::Drop,
    },
    // processing requires a vote, so this record is inconsistent
    Rule {
        name: "processed_without_vote",
        applies: processed_without_vote,
        outcome: Outcome::Unclassified,
    },
    Rule {
        name: "listed_unsponsored",
        applies: listed_unsponsored,
        outcome: Outcome::Bucket(Bucket::NonSponsored),
    },
    Rule {
        name: "unlisted_unsponsored",
        applies: unlisted_unsponsored,
        outcome: Outcome::Drop,
    },
    Rule {
        name: "passed",
        applies: passed,
        outcome: Outcome::Bucket(Bucket::Passed),
    },
    // a passing off-chain result still has to be submitted on-chain
    Rule {
        name: "passing_result_awaits_submission",
        applies: passing_result_awaits_submission,
        outcome: Outcome::Bucket(Bucket::Voting),
    },
    Rule {
        name: "failed",
        applies: failed,
        outcome: Outcome::Bucket(Bucket::Failed),
    },
    Rule {
        name: "unsubmitted_without_votes",
        applies: unsubmitted_without_votes,
        outcome: Outcome::Bucket(Bucket::Failed),
    },
    Rule {
        name: "unsubmitted_not_passed",
        applies: unsubmitted_not_passed,
        outcome: Outcome::Bucket(Bucket::Failed),
    },
    Rule {
        name: "voting",
        applies: voting,
        outcome: Outcome::Bucket(Bucket::Voting),
    },
    Rule {
        name: "unclassified",
        applies: always,
        outcome: Outcome::Unclassified,
    },
];

/// The rule that decided a proposal and its outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Classification {
    pub rule: &'static str,
    pub outcome: Outcome,
}

impl Classification {
    pub fn bucket(&self) -> Option<Bucket> {
        match self.outcome {
            Outcome::Bucket(bucket) => Some(bucket),
            Outcome::Drop | Outcome::Unclassified => None,
        }
    }
}

pub fn classify(
    proposal: &ProposalData,
    offchain_results: &[(String, VotingResult)],
    config: &ClassifierConfig,
) -> Classification {
    let facts = ProposalFacts::collect(proposal, offchain_results, config);
    classify_facts(&facts)
}

pub fn classify_facts(facts: &ProposalFacts) -> Classification {
    RULES
        .iter()
        .find(|rule| (rule.applies)(facts))
        .map(|rule| Classification {
            rule: rule.name,
            outcome: rule.outcome,
        })
        .unwrap_or(Classification {
            rule: "unclassified",
            outcome: Outcome::Unclassified,
        })
}

/// Splits `proposals` into the four display buckets, keeping their order.
pub fn filter_proposals(
    proposals: &[ProposalData],
    offchain_results: &[(String, VotingResult)],
    config: &ClassifierConfig,
) -> FilteredProposals {
    let mut filtered = FilteredProposals::default();
    for proposal in proposals {
        if let Some(bucket) = classify(proposal, offchain_results, config).bucket() {
            filtered.push(bucket, proposal.clone());
        }
    }
    filtered
}

/// Looks up the off-chain result of `id`, ignoring case and surrounding whitespace.
pub fn find_result<'a>(
    offchain_results: &'a [(String, VotingResult)],
    id: &str,
) -> Option<&'a VotingResult> {
    let id = normalize(id);
    offchain_results
        .iter()
        .find(|(result_id, _)| normalize(result_id) == id)
        .map(|(_, result)| result)
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}
