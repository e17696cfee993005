use std::cmp::Ordering;

use crate::utils::cluster::is_majority;
use crate::utils::cluster::majority_count;
use crate::Error;
use crate::MemberPublication;
use crate::Result;
use crate::NULL_POSITION;
use crate::NULL_VALUE;

/// Sign of the lexicographic log-freshness compare: term first, then
/// position. Equal views compare `Equal` and permit voting.
pub fn compare_log(
    a_term: i64,
    a_position: i64,
    b_term: i64,
    b_position: i64,
) -> Ordering {
    (a_term, a_position).cmp(&(b_term, b_position))
}

/// Per-peer record of the last-known leadership term, log position, ballot
/// progress, and vote within the current election.
#[derive(Debug)]
pub struct ClusterMember {
    id: u32,
    publication: MemberPublication,
    log_endpoint: String,

    leadership_term_id: i64,
    log_position: i64,
    candidate_term_id: i64,
    vote: Option<bool>,
    is_ballot_sent: bool,
}

impl ClusterMember {
    pub fn new(
        id: u32,
        publication: MemberPublication,
        log_endpoint: String,
    ) -> Self {
        Self {
            id,
            publication,
            log_endpoint,
            leadership_term_id: NULL_VALUE,
            log_position: NULL_POSITION,
            candidate_term_id: NULL_VALUE,
            vote: None,
            is_ballot_sent: false,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn publication(&self) -> &MemberPublication {
        &self.publication
    }

    pub fn log_endpoint(&self) -> &str {
        &self.log_endpoint
    }

    pub fn leadership_term_id(&self) -> i64 {
        self.leadership_term_id
    }

    pub fn set_leadership_term_id(
        &mut self,
        leadership_term_id: i64,
    ) {
        self.leadership_term_id = leadership_term_id;
    }

    pub fn log_position(&self) -> i64 {
        self.log_position
    }

    pub fn set_log_position(
        &mut self,
        log_position: i64,
    ) {
        self.log_position = log_position;
    }

    pub fn candidate_term_id(&self) -> i64 {
        self.candidate_term_id
    }

    pub fn set_candidate_term_id(
        &mut self,
        candidate_term_id: i64,
    ) {
        self.candidate_term_id = candidate_term_id;
    }

    pub fn vote(&self) -> Option<bool> {
        self.vote
    }

    pub fn set_vote(
        &mut self,
        vote: Option<bool>,
    ) {
        self.vote = vote;
    }

    pub fn is_ballot_sent(&self) -> bool {
        self.is_ballot_sent
    }

    pub fn set_is_ballot_sent(
        &mut self,
        is_ballot_sent: bool,
    ) {
        self.is_ballot_sent = is_ballot_sent;
    }

    /// Whether the member has shared its log view in this election round.
    fn has_reported(&self) -> bool {
        self.leadership_term_id != NULL_VALUE
    }
}

/// Arena of member records indexed by member id. Membership is
/// cluster-static: ids are dense from zero and never change during an
/// election.
#[derive(Debug)]
pub struct ClusterMembers {
    members: Vec<ClusterMember>,
}

impl ClusterMembers {
    pub fn new(members: Vec<ClusterMember>) -> Result<Self> {
        for (index, member) in members.iter().enumerate() {
            if member.id() != index as u32 {
                return Err(Error::InvalidConfig(format!(
                    "member ids must be dense from 0, found id {} at index {}",
                    member.id(),
                    index
                )));
            }
        }

        if members.is_empty() {
            return Err(Error::InvalidConfig("cluster membership cannot be empty".into()));
        }

        Ok(Self { members })
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(
        &self,
        id: u32,
    ) -> bool {
        (id as usize) < self.members.len()
    }

    pub fn get(
        &self,
        id: u32,
    ) -> &ClusterMember {
        &self.members[id as usize]
    }

    pub fn get_mut(
        &mut self,
        id: u32,
    ) -> &mut ClusterMember {
        &mut self.members[id as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClusterMember> {
        self.members.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ClusterMember> {
        self.members.iter_mut()
    }

    /// Clears all election-scoped fields on every member.
    pub fn reset(&mut self) {
        for member in &mut self.members {
            member.leadership_term_id = NULL_VALUE;
            member.log_position = NULL_POSITION;
            member.candidate_term_id = NULL_VALUE;
            member.vote = None;
            member.is_ballot_sent = false;
        }
    }

    /// Marks the arena for a fresh candidacy: the candidate votes for itself
    /// with its ballot considered sent, peers reset to unknown.
    pub fn become_candidate(
        &mut self,
        candidate_term_id: i64,
        candidate_id: u32,
    ) {
        for member in &mut self.members {
            member.candidate_term_id = candidate_term_id;

            if member.id == candidate_id {
                member.vote = Some(true);
                member.is_ballot_sent = true;
            } else {
                member.vote = None;
                member.is_ballot_sent = false;
            }
        }
    }

    pub fn reset_log_positions(
        &mut self,
        log_position: i64,
    ) {
        for member in &mut self.members {
            member.log_position = log_position;
        }
    }

    /// Fast nomination path: every other member has reported a log view not
    /// strictly fresher than ours.
    pub fn is_unanimous_candidate(
        &self,
        candidate_id: u32,
    ) -> bool {
        let candidate = self.get(candidate_id);

        self.members
            .iter()
            .all(|member| member.has_reported() && !Self::is_fresher(member, candidate))
    }

    /// Slow nomination path: a majority of members (including self) have
    /// reported and none of the reporters is strictly fresher than us.
    pub fn is_quorum_candidate(
        &self,
        candidate_id: u32,
    ) -> bool {
        let candidate = self.get(candidate_id);
        let mut reported = 0;

        for member in &self.members {
            if !member.has_reported() {
                continue;
            }

            if Self::is_fresher(member, candidate) {
                return false;
            }

            reported += 1;
        }

        reported >= majority_count(self.members.len())
    }

    /// Every member has a recorded vote for `candidate_term_id` and all of
    /// them are granted.
    pub fn has_won_vote_on_full_count(
        &self,
        candidate_term_id: i64,
    ) -> bool {
        self.members
            .iter()
            .all(|member| member.candidate_term_id == candidate_term_id && member.vote == Some(true))
    }

    /// Strictly more than half of all members voted granted for
    /// `candidate_term_id`. An unknown vote is not granted.
    pub fn has_majority_vote(
        &self,
        candidate_term_id: i64,
    ) -> bool {
        let granted = self
            .members
            .iter()
            .filter(|member| member.candidate_term_id == candidate_term_id && member.vote == Some(true))
            .count();

        is_majority(granted, self.members.len())
    }

    /// A majority of members report `log_position >= position` at
    /// `leadership_term_id >= leadership_term_id`.
    pub fn have_voters_reached_position(
        &self,
        position: i64,
        leadership_term_id: i64,
    ) -> bool {
        let reached = self
            .members
            .iter()
            .filter(|member| member.leadership_term_id >= leadership_term_id && member.log_position >= position)
            .count();

        reached >= majority_count(self.members.len())
    }

    fn is_fresher(
        member: &ClusterMember,
        candidate: &ClusterMember,
    ) -> bool {
        compare_log(
            member.leadership_term_id,
            member.log_position,
            candidate.leadership_term_id,
            candidate.log_position,
        ) == Ordering::Greater
    }
}
