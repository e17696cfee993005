use std::cmp::Ordering;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use tracing::debug;
use tracing::warn;

use crate::alias::AGOF;
use crate::alias::AROF;
use crate::alias::MFOF;
use crate::alias::RLOF;
use crate::compare_log;
use crate::ClusterMarkFile;
use crate::ConsensusAgent;
use crate::RecordingLog;
use crate::utils::cluster::error;
use crate::AppendedPosition;
use crate::CanvassPosition;
use crate::ChannelUri;
use crate::ClusterMembers;
use crate::CommitPosition;
use crate::ConsensusAdapter;
use crate::ConsensusMessage;
use crate::ElectionConfig;
use crate::ElectionState;
use crate::Error;
use crate::LogCatchup;
use crate::LogSubscription;
use crate::MemberPublication;
use crate::NewLeadershipTerm;
use crate::RecordingLogReply;
use crate::RequestVote;
use crate::Result;
use crate::Role;
use crate::StateCounter;
use crate::TypeConfig;
use crate::Vote;
use crate::CONTROL_MODE_MANUAL;
use crate::CONTROL_MODE_PARAM_NAME;
use crate::CONTROL_PARAM_NAME;
use crate::DISCARDED_VOTES_METRIC;
use crate::ENDPOINT_PARAM_NAME;
use crate::LOG_SUBSCRIPTION_TAGS;
use crate::NULL_POSITION;
use crate::NULL_SESSION_ID;
use crate::NULL_VALUE;
use crate::SESSION_ID_PARAM_NAME;
use crate::TAGS_PARAM_NAME;

/// Upper bound on inbound messages dispatched per adapter poll.
const POLL_LIMIT: usize = 10;

/// External context an election is wired with: timing tunables, the base
/// log channel, and the durable and archive capabilities.
pub struct ElectionContext<T: TypeConfig> {
    pub config: Arc<ElectionConfig>,
    pub log_channel: String,
    pub mark_file: Arc<MFOF<T>>,
    pub recording_log: Arc<RLOF<T>>,
    pub archive: Arc<AROF<T>>,
}

/// Election process to determine a new cluster leader.
///
/// A single-threaded cooperative state machine: the owning agent calls
/// [`tick`](Election::tick) with the current monotonic time and the machine
/// polls the transport, dispatches inbound messages, then runs the action
/// of its current state. Created at cluster start, on detection of a
/// higher-term leader, or when a leader loses quorum; destroyed once
/// `election_complete` is acknowledged from the ready states.
pub struct Election<T: TypeConfig> {
    state: ElectionState,
    is_startup: bool,
    is_closed: bool,

    ctx: ElectionContext<T>,
    agent: Arc<AGOF<T>>,
    adapter: ConsensusAdapter,
    members: ClusterMembers,
    this_member_id: u32,
    rng: StdRng,

    leadership_term_id: i64,
    log_leadership_term_id: i64,
    log_position: i64,
    candidate_term_id: i64,
    leader_member_id: Option<u32>,
    log_session_id: i32,

    state_counter: Option<StateCounter>,
    log_catchup: Option<LogCatchup<T>>,
    log_subscription: Option<LogSubscription>,

    time_of_last_state_change_ms: u64,
    time_of_last_update_ms: u64,
    nomination_deadline_ms: u64,
}

impl<T: TypeConfig> Election<T> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        is_startup: bool,
        leadership_term_id: i64,
        log_position: i64,
        members: ClusterMembers,
        this_member_id: u32,
        adapter: ConsensusAdapter,
        agent: Arc<AGOF<T>>,
        ctx: ElectionContext<T>,
    ) -> Result<Self> {
        if !members.contains(this_member_id) {
            return Err(Error::InvalidConfig(format!(
                "member {} is not part of the cluster membership",
                this_member_id
            )));
        }

        let rng = match ctx.config.nomination_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            state: ElectionState::Init,
            is_startup,
            is_closed: false,
            ctx,
            agent,
            adapter,
            members,
            this_member_id,
            rng,
            leadership_term_id,
            log_leadership_term_id: leadership_term_id,
            log_position,
            candidate_term_id: NULL_VALUE,
            leader_member_id: None,
            log_session_id: NULL_SESSION_ID,
            state_counter: None,
            log_catchup: None,
            log_subscription: None,
            time_of_last_state_change_ms: 0,
            time_of_last_update_ms: 0,
            nomination_deadline_ms: 0,
        })
    }

    /// One cooperative duty cycle. Returns the work done, or the failure
    /// that aborted the election; any error closes the election first.
    pub fn tick(
        &mut self,
        now_ms: u64,
    ) -> Result<usize> {
        if self.is_closed {
            return Ok(0);
        }

        match self.do_tick(now_ms) {
            Ok(work_count) => Ok(work_count),
            Err(e) => {
                error("tick", &e);
                self.close();
                Err(e)
            }
        }
    }

    fn do_tick(
        &mut self,
        now_ms: u64,
    ) -> Result<usize> {
        let mut work_count = if self.state == ElectionState::Init {
            self.init(now_ms)?
        } else {
            0
        };

        work_count += self.poll_adapter(now_ms)?;

        work_count += match self.state {
            ElectionState::Init => 0,
            ElectionState::Canvass => self.canvass(now_ms),
            ElectionState::Nominate => self.nominate(now_ms)?,
            ElectionState::CandidateBallot => self.candidate_ballot(now_ms),
            ElectionState::FollowerBallot => self.follower_ballot(now_ms),
            ElectionState::LeaderTransition => self.leader_transition(now_ms)?,
            ElectionState::LeaderReady => self.leader_ready(now_ms)?,
            ElectionState::FollowerCatchupTransition => self.follower_catchup_transition(now_ms)?,
            ElectionState::FollowerCatchup => self.follower_catchup(now_ms)?,
            ElectionState::FollowerTransition => self.follower_transition(now_ms)?,
            ElectionState::FollowerReady => self.follower_ready(now_ms)?,
        };

        Ok(work_count)
    }

    /// Releases the catch-up and the state counter. Idempotent; callable
    /// from any state.
    pub fn close(&mut self) {
        if self.is_closed {
            return;
        }

        self.is_closed = true;
        self.close_catchup();

        if let Some(counter) = self.state_counter.as_mut() {
            counter.close();
        }
    }

    pub fn is_closed(&self) -> bool {
        self.is_closed
    }

    pub fn state(&self) -> ElectionState {
        self.state
    }

    pub fn leader(&self) -> Option<u32> {
        self.leader_member_id
    }

    pub fn leadership_term_id(&self) -> i64 {
        self.leadership_term_id
    }

    pub fn candidate_term_id(&self) -> i64 {
        self.candidate_term_id
    }

    pub fn log_position(&self) -> i64 {
        self.log_position
    }

    /// Published state code, `Init` before the first tick.
    pub fn state_counter_code(&self) -> i32 {
        self.state_counter.as_ref().map(StateCounter::get).unwrap_or(0)
    }

    /// The agent reports the session id of the log it publishes as leader.
    pub fn set_log_session_id(
        &mut self,
        log_session_id: i32,
    ) {
        self.log_session_id = log_session_id;
    }

    //--- Inbound message handlers ---

    pub fn on_canvass_position(
        &mut self,
        message: CanvassPosition,
        now_ms: u64,
    ) -> Result<()> {
        if message.follower_id == self.this_member_id || !self.members.contains(message.follower_id) {
            return Ok(());
        }

        {
            let member = self.members.get_mut(message.follower_id);
            member.set_leadership_term_id(message.log_leadership_term_id);
            member.set_log_position(message.log_position);
        }

        if self.state == ElectionState::LeaderReady && message.log_leadership_term_id < self.leadership_term_id {
            let publication = self.members.get(message.follower_id).publication().clone();
            self.publish_new_leadership_term(&publication);
        } else if self.state != ElectionState::Canvass && message.log_leadership_term_id > self.leadership_term_id {
            self.transition(ElectionState::Canvass, now_ms);
        }

        Ok(())
    }

    pub fn on_request_vote(
        &mut self,
        message: RequestVote,
        now_ms: u64,
    ) -> Result<()> {
        if !self.members.contains(message.candidate_id) || message.candidate_id == self.this_member_id {
            return Ok(());
        }

        if message.candidate_term_id <= self.leadership_term_id
            || message.candidate_term_id <= self.candidate_term_id
        {
            self.place_vote(message.candidate_term_id, message.candidate_id, false);
        } else if compare_log(
            self.log_leadership_term_id,
            self.log_position,
            message.log_leadership_term_id,
            message.log_position,
        ) == Ordering::Greater
        {
            self.candidate_term_id = message.candidate_term_id;
            self.ctx.mark_file.update_candidate_term_id(message.candidate_term_id)?;
            self.transition(ElectionState::Canvass, now_ms);

            self.place_vote(message.candidate_term_id, message.candidate_id, false);
        } else {
            self.candidate_term_id = message.candidate_term_id;
            self.ctx.mark_file.update_candidate_term_id(message.candidate_term_id)?;
            self.transition(ElectionState::FollowerBallot, now_ms);

            self.place_vote(message.candidate_term_id, message.candidate_id, true);
        }

        Ok(())
    }

    pub fn on_vote(
        &mut self,
        message: Vote,
    ) {
        if self.state == ElectionState::CandidateBallot
            && message.candidate_term_id == self.candidate_term_id
            && message.candidate_id == self.this_member_id
            && self.members.contains(message.follower_id)
        {
            let member = self.members.get_mut(message.follower_id);
            member.set_candidate_term_id(message.candidate_term_id);
            member.set_leadership_term_id(message.log_leadership_term_id);
            member.set_log_position(message.log_position);
            member.set_vote(Some(message.vote_granted));
        } else {
            debug!(
                candidate_term_id = message.candidate_term_id,
                follower_id = message.follower_id,
                "discarding vote outside an active candidacy"
            );
            DISCARDED_VOTES_METRIC
                .with_label_values(&[&self.this_member_id.to_string()])
                .inc();
        }
    }

    pub fn on_new_leadership_term(
        &mut self,
        message: NewLeadershipTerm,
        now_ms: u64,
    ) -> Result<()> {
        if !self.members.contains(message.leader_id) || message.leader_id == self.this_member_id {
            return Ok(());
        }

        let in_ballot = self.state == ElectionState::FollowerBallot || self.state == ElectionState::CandidateBallot;

        if in_ballot && message.leadership_term_id == self.candidate_term_id {
            self.leadership_term_id = message.leadership_term_id;
            self.candidate_term_id = NULL_VALUE;
            self.leader_member_id = Some(message.leader_id);
            self.log_session_id = message.log_session_id;

            if self.log_position < message.log_position && self.log_catchup.is_none() {
                self.create_log_catchup(message.leader_id, message.leadership_term_id, message.log_position);
                self.transition(ElectionState::FollowerCatchupTransition, now_ms);
            } else {
                self.transition(ElectionState::FollowerTransition, now_ms);
            }
        } else if compare_log(
            self.log_leadership_term_id,
            self.log_position,
            message.log_leadership_term_id,
            message.log_position,
        ) != Ordering::Equal
        {
            if self.log_leadership_term_id < message.log_leadership_term_id {
                self.leadership_term_id = self.log_leadership_term_id;
                self.candidate_term_id = NULL_VALUE;
                self.leader_member_id = Some(message.leader_id);
                self.log_session_id = message.log_session_id;

                if self.log_catchup.is_none() {
                    self.create_log_catchup(message.leader_id, message.leadership_term_id, message.log_position);
                    self.transition(ElectionState::FollowerCatchupTransition, now_ms);
                }
            } else if self.log_leadership_term_id > message.log_leadership_term_id {
                // TODO: truncate the local log and recover when it has
                // diverged ahead of the leader's.
                warn!(
                    log_leadership_term_id = self.log_leadership_term_id,
                    leader_log_leadership_term_id = message.log_leadership_term_id,
                    "local log ahead of leader; truncation and recovery required"
                );
            }
        }

        Ok(())
    }

    pub fn on_appended_position(
        &mut self,
        message: AppendedPosition,
    ) {
        if message.follower_id == self.this_member_id || !self.members.contains(message.follower_id) {
            return;
        }

        let member = self.members.get_mut(message.follower_id);
        member.set_log_position(message.log_position);
        member.set_leadership_term_id(message.leadership_term_id);
    }

    pub fn on_commit_position(
        &mut self,
        message: CommitPosition,
    ) {
        if message.leadership_term_id > self.leadership_term_id {
            // TODO: query the leader recording log and catch up.
            warn!(
                leadership_term_id = message.leadership_term_id,
                leader_id = message.leader_id,
                "commit position from a newer term; this member is out of step"
            );
        }
    }

    /// Leader's recording-log view for an in-flight catch-up; dropped when
    /// no catch-up is live.
    pub fn on_recording_log_reply(
        &mut self,
        reply: RecordingLogReply,
    ) {
        if let Some(catchup) = self.log_catchup.as_mut() {
            catchup.on_leader_recording_log(&reply);
        }
    }

    /// Replayed term boundary observed while catching up: advance the
    /// durable log view and ledger.
    pub fn on_replay_new_leadership_term(
        &mut self,
        leadership_term_id: i64,
        log_position: i64,
        now_ms: u64,
    ) -> Result<()> {
        if self.state == ElectionState::FollowerCatchup {
            self.log_leadership_term_id = leadership_term_id;
            self.log_position = log_position;

            self.ctx.recording_log.append_term(
                Some(self.agent.log_recording_id()),
                leadership_term_id,
                log_position,
                now_ms,
            )?;
        }

        Ok(())
    }

    //--- State actions ---

    fn init(
        &mut self,
        now_ms: u64,
    ) -> Result<usize> {
        self.state_counter = Some(StateCounter::new(self.this_member_id));

        if !self.is_startup {
            self.log_position = self.agent.prepare_for_election(self.log_position)?;
        }

        if self.members.len() == 1 {
            self.candidate_term_id = self.leadership_term_id + 1;
            self.leader_member_id = Some(self.this_member_id);
            self.transition(ElectionState::LeaderTransition, now_ms);
        } else if self.ctx.config.appointed_leader_id == Some(self.this_member_id) {
            self.nomination_deadline_ms = now_ms;
            self.transition(ElectionState::Nominate, now_ms);
        } else {
            self.candidate_term_id = self.ctx.mark_file.candidate_term_id();
            self.transition(ElectionState::Canvass, now_ms);
        }

        Ok(1)
    }

    fn canvass(
        &mut self,
        now_ms: u64,
    ) -> usize {
        let mut work_count = 0;

        if now_ms >= self.time_of_last_update_ms + self.ctx.config.status_interval_ms {
            self.time_of_last_update_ms = now_ms;

            let message = ConsensusMessage::CanvassPosition(CanvassPosition {
                log_leadership_term_id: self.leadership_term_id,
                log_position: self.log_position,
                follower_id: self.this_member_id,
            });

            for member in self.members.iter() {
                if member.id() != self.this_member_id {
                    member.publication().try_publish(message.clone());
                }
            }

            work_count += 1;
        }

        // With an appointed leader, canvass only waits for its announcement.
        if self.ctx.config.appointed_leader_id.is_some() {
            return work_count;
        }

        let canvass_deadline_ms = self.time_of_last_state_change_ms
            + if self.is_startup {
                self.ctx.config.startup_canvass_timeout_ms
            } else {
                self.ctx.config.election_timeout_ms
            };

        if self.members.is_unanimous_candidate(self.this_member_id)
            || (self.members.is_quorum_candidate(self.this_member_id) && now_ms >= canvass_deadline_ms)
        {
            self.nomination_deadline_ms = now_ms + self.rng.gen_range(0..self.ctx.config.status_interval_ms);
            self.transition(ElectionState::Nominate, now_ms);
            work_count += 1;
        }

        work_count
    }

    fn nominate(
        &mut self,
        now_ms: u64,
    ) -> Result<usize> {
        if now_ms >= self.nomination_deadline_ms {
            self.candidate_term_id = std::cmp::max(self.candidate_term_id + 1, self.leadership_term_id + 1);
            self.members.become_candidate(self.candidate_term_id, self.this_member_id);
            self.ctx.mark_file.update_candidate_term_id(self.candidate_term_id)?;
            self.agent.role(Role::Candidate);

            self.transition(ElectionState::CandidateBallot, now_ms);
            return Ok(1);
        }

        Ok(0)
    }

    fn candidate_ballot(
        &mut self,
        now_ms: u64,
    ) -> usize {
        let mut work_count = 0;

        if self.members.has_won_vote_on_full_count(self.candidate_term_id) {
            self.leader_member_id = Some(self.this_member_id);
            self.transition(ElectionState::LeaderTransition, now_ms);
            work_count += 1;
        } else if now_ms >= self.time_of_last_state_change_ms + self.ctx.config.election_timeout_ms {
            if self.members.has_majority_vote(self.candidate_term_id) {
                self.leader_member_id = Some(self.this_member_id);
                self.transition(ElectionState::LeaderTransition, now_ms);
            } else {
                self.transition(ElectionState::Canvass, now_ms);
            }

            work_count += 1;
        } else {
            let request = RequestVote {
                log_leadership_term_id: self.log_leadership_term_id,
                log_position: self.log_position,
                candidate_term_id: self.candidate_term_id,
                candidate_id: self.this_member_id,
            };

            for member in self.members.iter_mut() {
                if !member.is_ballot_sent() {
                    work_count += 1;
                    let accepted = member
                        .publication()
                        .try_publish(ConsensusMessage::RequestVote(request.clone()));
                    member.set_is_ballot_sent(accepted);
                }
            }
        }

        work_count
    }

    fn follower_ballot(
        &mut self,
        now_ms: u64,
    ) -> usize {
        let mut work_count = 0;

        if now_ms >= self.time_of_last_state_change_ms + self.ctx.config.election_timeout_ms {
            self.transition(ElectionState::Canvass, now_ms);
            work_count += 1;
        }

        work_count
    }

    fn leader_transition(
        &mut self,
        now_ms: u64,
    ) -> Result<usize> {
        // Skipped intermediate terms get placeholder records ahead of the
        // real term record.
        for term_id in (self.leadership_term_id + 1)..self.candidate_term_id {
            self.ctx
                .recording_log
                .append_term(None, term_id, self.log_position, now_ms)?;
        }

        self.leadership_term_id = self.candidate_term_id;
        self.candidate_term_id = NULL_VALUE;
        self.agent.become_leader()?;

        self.ctx.recording_log.append_term(
            Some(self.agent.log_recording_id()),
            self.leadership_term_id,
            self.log_position,
            now_ms,
        )?;
        self.ctx.mark_file.update_candidate_term_id(NULL_VALUE)?;

        self.members.reset_log_positions(NULL_POSITION);
        {
            let leadership_term_id = self.leadership_term_id;
            let log_position = self.log_position;
            let this_member = self.members.get_mut(self.this_member_id);
            this_member.set_leadership_term_id(leadership_term_id);
            this_member.set_log_position(log_position);
        }

        self.transition(ElectionState::LeaderReady, now_ms);

        Ok(1)
    }

    fn leader_ready(
        &mut self,
        now_ms: u64,
    ) -> Result<usize> {
        let mut work_count = 0;

        if self
            .members
            .have_voters_reached_position(self.log_position, self.leadership_term_id)
        {
            if self.agent.election_complete(now_ms)? {
                self.close();
            }

            work_count += 1;
        } else if now_ms > self.time_of_last_update_ms + self.ctx.config.leader_heartbeat_interval_ms {
            self.time_of_last_update_ms = now_ms;

            for member in self.members.iter() {
                if member.id() != self.this_member_id {
                    self.publish_new_leadership_term(member.publication());
                }
            }

            work_count += 1;
        }

        Ok(work_count)
    }

    fn follower_catchup_transition(
        &mut self,
        now_ms: u64,
    ) -> Result<usize> {
        self.ensure_subscription_created()?;

        if let (Some(catchup), Some(subscription)) = (self.log_catchup.as_mut(), self.log_subscription.as_ref()) {
            catchup.connect(subscription);
        }

        self.transition(ElectionState::FollowerCatchup, now_ms);

        Ok(1)
    }

    fn follower_catchup(
        &mut self,
        now_ms: u64,
    ) -> Result<usize> {
        let mut work_count = 0;
        let is_done = self.log_catchup.as_ref().map(LogCatchup::is_done).unwrap_or(true);

        if !is_done {
            work_count += self.poll_adapter(now_ms)?;

            if let Some(catchup) = self.log_catchup.as_mut() {
                work_count += catchup.do_work()?;
            }

            let target_position = self
                .log_catchup
                .as_ref()
                .map(LogCatchup::target_position)
                .unwrap_or(NULL_POSITION);
            work_count += self.agent.catchup_log_poll(target_position);
        } else {
            if let Some(catchup) = self.log_catchup.as_ref() {
                self.log_position = catchup.target_position();
            }

            self.add_live_log_destination(false)?;
            self.append_term(now_ms)?;

            self.transition(ElectionState::FollowerReady, now_ms);
            work_count += 1;
        }

        Ok(work_count)
    }

    fn follower_transition(
        &mut self,
        now_ms: u64,
    ) -> Result<usize> {
        self.ensure_subscription_created()?;

        self.add_live_log_destination(true)?;
        self.append_term(now_ms)?;

        self.transition(ElectionState::FollowerReady, now_ms);

        Ok(1)
    }

    fn follower_ready(
        &mut self,
        now_ms: u64,
    ) -> Result<usize> {
        let leader_member_id = self
            .leader_member_id
            .ok_or(crate::ElectionError::NoLeaderEstablished(self.leadership_term_id))?;

        let appended = self
            .members
            .get(leader_member_id)
            .publication()
            .try_publish(ConsensusMessage::AppendedPosition(AppendedPosition {
                leadership_term_id: self.leadership_term_id,
                log_position: self.log_position,
                follower_id: self.this_member_id,
            }));

        if appended {
            if self.agent.election_complete(now_ms)? {
                self.close();
            }
        } else if now_ms >= self.time_of_last_state_change_ms + self.ctx.config.election_timeout_ms {
            self.transition(ElectionState::Canvass, now_ms);
        }

        Ok(1)
    }

    //--- Internals ---

    fn poll_adapter(
        &mut self,
        now_ms: u64,
    ) -> Result<usize> {
        let mut work_count = 0;

        while work_count < POLL_LIMIT {
            match self.adapter.poll_next() {
                Some(message) => {
                    self.dispatch(message, now_ms)?;
                    work_count += 1;
                }
                None => break,
            }
        }

        Ok(work_count)
    }

    fn dispatch(
        &mut self,
        message: ConsensusMessage,
        now_ms: u64,
    ) -> Result<()> {
        match message {
            ConsensusMessage::CanvassPosition(m) => self.on_canvass_position(m, now_ms),
            ConsensusMessage::RequestVote(m) => self.on_request_vote(m, now_ms),
            ConsensusMessage::Vote(m) => {
                self.on_vote(m);
                Ok(())
            }
            ConsensusMessage::NewLeadershipTerm(m) => self.on_new_leadership_term(m, now_ms),
            ConsensusMessage::AppendedPosition(m) => {
                self.on_appended_position(m);
                Ok(())
            }
            ConsensusMessage::CommitPosition(m) => {
                self.on_commit_position(m);
                Ok(())
            }
            ConsensusMessage::RecordingLogReply(m) => {
                self.on_recording_log_reply(m);
                Ok(())
            }
            // Served by the leader's agent, not by an election in flight.
            ConsensusMessage::RecordingLogQuery(_) => Ok(()),
        }
    }

    /// Every transition stamps the time, runs the exiting state's exit
    /// action, and publishes the new code. Entering `Canvass` additionally
    /// resets the member table and demotes the role.
    fn transition(
        &mut self,
        next_state: ElectionState,
        now_ms: u64,
    ) {
        debug!(
            member_id = self.this_member_id,
            from = ?self.state,
            to = ?next_state,
            "election state change"
        );

        self.time_of_last_state_change_ms = now_ms;

        match self.state {
            ElectionState::Canvass => self.is_startup = false,
            ElectionState::FollowerCatchup => self.close_catchup(),
            _ => {}
        }

        self.state = next_state;

        if let Some(counter) = self.state_counter.as_ref() {
            counter.set(next_state.code());
        }

        if next_state == ElectionState::Canvass {
            self.members.reset();

            let leadership_term_id = self.leadership_term_id;
            let log_position = self.log_position;
            let this_member = self.members.get_mut(self.this_member_id);
            this_member.set_leadership_term_id(leadership_term_id);
            this_member.set_log_position(log_position);

            self.agent.role(Role::Follower);
        }
    }

    fn place_vote(
        &self,
        candidate_term_id: i64,
        candidate_id: u32,
        vote_granted: bool,
    ) {
        self.members
            .get(candidate_id)
            .publication()
            .try_publish(ConsensusMessage::Vote(Vote {
                candidate_term_id,
                log_leadership_term_id: self.log_leadership_term_id,
                log_position: self.log_position,
                candidate_id,
                follower_id: self.this_member_id,
                vote_granted,
            }));
    }

    fn publish_new_leadership_term(
        &self,
        publication: &MemberPublication,
    ) -> bool {
        publication.try_publish(ConsensusMessage::NewLeadershipTerm(NewLeadershipTerm {
            log_leadership_term_id: self.log_leadership_term_id,
            log_position: self.log_position,
            leadership_term_id: self.leadership_term_id,
            leader_id: self.this_member_id,
            log_session_id: self.log_session_id,
        }))
    }

    fn create_log_catchup(
        &mut self,
        leader_member_id: u32,
        leadership_term_id: i64,
        target_position: i64,
    ) {
        let leader_publication = self.members.get(leader_member_id).publication().clone();

        self.log_catchup = Some(LogCatchup::new(
            self.ctx.archive.clone(),
            leader_publication,
            leader_member_id,
            self.this_member_id,
            self.log_session_id,
            leadership_term_id,
            self.log_position,
            target_position,
        ));
    }

    fn ensure_subscription_created(&mut self) -> Result<()> {
        let channel = follower_log_channel(&self.ctx.log_channel, self.log_session_id)?;

        let subscription = self
            .agent
            .create_and_record_log_subscription_as_follower(&channel, self.log_position)?;
        self.agent.await_services_ready(&channel, self.log_session_id)?;

        self.log_subscription = Some(subscription);

        Ok(())
    }

    fn add_live_log_destination(
        &mut self,
        ensure_image_available: bool,
    ) -> Result<()> {
        self.agent.update_member_details()?;

        let destination = follower_log_destination(
            &self.ctx.log_channel,
            self.members.get(self.this_member_id).log_endpoint(),
        )?;

        let subscription = self
            .log_subscription
            .as_mut()
            .ok_or_else(|| Error::Fatal("log subscription not created".into()))?;
        subscription.add_destination(destination);

        if ensure_image_available {
            self.agent
                .await_image_and_create_follower_log_adapter(subscription, self.log_session_id)?;
        }

        Ok(())
    }

    fn append_term(
        &self,
        now_ms: u64,
    ) -> Result<()> {
        self.ctx.recording_log.append_term(
            Some(self.agent.log_recording_id()),
            self.leadership_term_id,
            self.log_position,
            now_ms,
        )?;
        self.ctx.mark_file.update_candidate_term_id(NULL_VALUE)?;

        Ok(())
    }

    fn close_catchup(&mut self) {
        if let Some(mut catchup) = self.log_catchup.take() {
            catchup.close();
        }
    }
}

impl<T: TypeConfig> std::fmt::Debug for Election<T> {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("Election")
            .field("member_id", &self.this_member_id)
            .field("state", &self.state)
            .field("leadership_term_id", &self.leadership_term_id)
            .field("candidate_term_id", &self.candidate_term_id)
            .field("log_position", &self.log_position)
            .finish()
    }
}

/// The follower subscription form of the base log channel: no control
/// endpoint, manual control mode, pinned session, cluster subscription tags.
pub(crate) fn follower_log_channel(
    log_channel: &str,
    log_session_id: i32,
) -> Result<String> {
    let mut channel_uri = ChannelUri::parse(log_channel)?;
    channel_uri.remove(CONTROL_PARAM_NAME);
    channel_uri.put(CONTROL_MODE_PARAM_NAME, CONTROL_MODE_MANUAL);
    channel_uri.put(SESSION_ID_PARAM_NAME, &log_session_id.to_string());
    channel_uri.put(TAGS_PARAM_NAME, LOG_SUBSCRIPTION_TAGS);

    Ok(channel_uri.to_string())
}

/// The live-log destination form: the base channel aimed at this member's
/// log endpoint.
pub(crate) fn follower_log_destination(
    log_channel: &str,
    log_endpoint: &str,
) -> Result<String> {
    let mut channel_uri = ChannelUri::parse(log_channel)?;
    channel_uri.put(ENDPOINT_PARAM_NAME, log_endpoint);

    Ok(channel_uri.to_string())
}
