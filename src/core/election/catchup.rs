use std::sync::Arc;

use tracing::debug;
use tracing::warn;

use crate::alias::AROF;
use crate::ConsensusMessage;
use crate::ElectionError;
use crate::LogArchive;
use crate::LogSubscription;
use crate::MemberPublication;
use crate::RecordingLogQuery;
use crate::RecordingLogReply;
use crate::Result;
use crate::TypeConfig;
use crate::NULL_VALUE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CatchupState {
    Init,
    AwaitLeaderLog,
    Replay,
    Done,
}

/// Brings the local log replica up to the leader's position before the
/// follower goes live.
///
/// The engine is cooperative: each `do_work` performs one bounded step of
/// the handshake — ask the leader for its recording-log view, start the
/// bounded archive replay, then track the replay until it reaches the
/// target position. Exclusively owned by the election; released on exit
/// from the catch-up state or on close.
pub struct LogCatchup<T: TypeConfig> {
    archive: Arc<AROF<T>>,
    leader_publication: MemberPublication,
    leader_member_id: u32,
    this_member_id: u32,
    log_session_id: i32,
    leadership_term_id: i64,
    from_position: i64,
    target_position: i64,
    leader_recording_id: i64,
    replay_session_id: i64,
    is_query_sent: bool,
    state: CatchupState,
}

impl<T: TypeConfig> LogCatchup<T> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        archive: Arc<AROF<T>>,
        leader_publication: MemberPublication,
        leader_member_id: u32,
        this_member_id: u32,
        log_session_id: i32,
        leadership_term_id: i64,
        from_position: i64,
        target_position: i64,
    ) -> Self {
        Self {
            archive,
            leader_publication,
            leader_member_id,
            this_member_id,
            log_session_id,
            leadership_term_id,
            from_position,
            target_position,
            leader_recording_id: NULL_VALUE,
            replay_session_id: NULL_VALUE,
            is_query_sent: false,
            state: CatchupState::Init,
        }
    }

    /// Arms the engine against the follower's recorded log subscription.
    pub fn connect(
        &mut self,
        subscription: &LogSubscription,
    ) {
        debug!(
            leader_member_id = self.leader_member_id,
            channel = subscription.channel(),
            from_position = self.from_position,
            target_position = self.target_position,
            "connecting log catch-up"
        );

        if self.state == CatchupState::Init {
            if self.from_position >= self.target_position {
                self.state = CatchupState::Done;
            } else {
                self.state = CatchupState::AwaitLeaderLog;
            }
        }
    }

    pub fn is_done(&self) -> bool {
        self.state == CatchupState::Done
    }

    pub fn target_position(&self) -> i64 {
        self.target_position
    }

    /// Records the leader's recording id from its recording-log view. Called
    /// when a `RecordingLogReply` arrives during catch-up.
    pub fn on_leader_recording_log(
        &mut self,
        reply: &RecordingLogReply,
    ) {
        if self.leader_recording_id != NULL_VALUE {
            return;
        }

        // The newest term with a live recording carries the log range to replay.
        for entry in reply.entries.iter().rev() {
            if entry.recording_id != NULL_VALUE {
                self.leader_recording_id = entry.recording_id;
                debug!(
                    leader_recording_id = self.leader_recording_id,
                    leadership_term_id = entry.leadership_term_id,
                    "leader recording resolved"
                );
                return;
            }
        }

        warn!(
            leader_member_id = self.leader_member_id,
            "leader recording log reply carried no live recording"
        );
    }

    pub fn do_work(&mut self) -> Result<usize> {
        let mut work_count = 0;

        match self.state {
            CatchupState::Init | CatchupState::Done => {}
            CatchupState::AwaitLeaderLog => {
                if self.leader_recording_id != NULL_VALUE {
                    let length = self.target_position - self.from_position;
                    self.replay_session_id = self
                        .archive
                        .start_replay(self.leader_recording_id, self.from_position, length, self.log_session_id)
                        .map_err(|e| ElectionError::CatchupFailed(format!("start replay: {:?}", e)))?;

                    self.state = CatchupState::Replay;
                    work_count += 1;
                } else if !self.is_query_sent {
                    self.is_query_sent =
                        self.leader_publication
                            .try_publish(ConsensusMessage::RecordingLogQuery(RecordingLogQuery {
                                leadership_term_id: self.leadership_term_id,
                                from_position: self.from_position,
                                requesting_member_id: self.this_member_id,
                            }));

                    if self.is_query_sent {
                        work_count += 1;
                    }
                }
            }
            CatchupState::Replay => {
                let position = self
                    .archive
                    .replay_position(self.replay_session_id)
                    .map_err(|e| ElectionError::CatchupFailed(format!("replay position: {:?}", e)))?;

                if position >= self.target_position {
                    self.state = CatchupState::Done;
                    work_count += 1;
                }
            }
        }

        Ok(work_count)
    }

    /// Stops any live replay. Idempotent.
    pub fn close(&mut self) {
        if self.replay_session_id != NULL_VALUE {
            if let Err(e) = self.archive.stop_replay(self.replay_session_id) {
                warn!(
                    replay_session_id = self.replay_session_id,
                    "failed to stop replay: {:?}", e
                );
            }

            self.replay_session_id = NULL_VALUE;
        }
    }
}

impl<T: TypeConfig> std::fmt::Debug for LogCatchup<T> {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("LogCatchup")
            .field("state", &self.state)
            .field("leader_member_id", &self.leader_member_id)
            .field("from_position", &self.from_position)
            .field("target_position", &self.target_position)
            .finish()
    }
}
