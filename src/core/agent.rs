#[cfg(test)]
use mockall::automock;

use crate::Result;

/// Role a member advertises to the services layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Follower,
    Candidate,
    Leader,
}

/// Handle to the follower's recorded log subscription.
///
/// Created by the agent when a follower transitions under a new leader; the
/// election then adds the live log destination to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSubscription {
    channel: String,
    registration_id: i64,
    destinations: Vec<String>,
}

impl LogSubscription {
    pub fn new(
        channel: String,
        registration_id: i64,
    ) -> Self {
        Self {
            channel,
            registration_id,
            destinations: Vec::new(),
        }
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn registration_id(&self) -> i64 {
        self.registration_id
    }

    pub fn add_destination(
        &mut self,
        destination: String,
    ) {
        self.destinations.push(destination);
    }

    pub fn destinations(&self) -> &[String] {
        &self.destinations
    }
}

/// The consensus agent that owns the election: long-lived log subscription,
/// service plumbing, and role advertisement. The election drives it through
/// this capability surface and never blocks inside it beyond the bounded
/// awaits of the follower transitions.
#[cfg_attr(test, automock)]
pub trait ConsensusAgent: Send + Sync + 'static {
    /// Rolls the local log back to a safe position and returns it. Called
    /// exactly once, on non-startup election entry.
    fn prepare_for_election(
        &self,
        log_position: i64,
    ) -> Result<i64>;

    fn role(
        &self,
        role: Role,
    );

    /// Promotes this member locally and (re)publishes the log.
    fn become_leader(&self) -> Result<()>;

    /// Archive recording id of the local log.
    fn log_recording_id(&self) -> i64;

    fn create_and_record_log_subscription_as_follower(
        &self,
        channel: &str,
        from_position: i64,
    ) -> Result<LogSubscription>;

    fn await_services_ready(
        &self,
        channel: &str,
        log_session_id: i32,
    ) -> Result<()>;

    fn await_image_and_create_follower_log_adapter(
        &self,
        subscription: &LogSubscription,
        log_session_id: i32,
    ) -> Result<()>;

    /// Drives the local log replica toward `target_position` during
    /// catch-up; returns the work done.
    fn catchup_log_poll(
        &self,
        target_position: i64,
    ) -> usize;

    fn update_member_details(&self) -> Result<()>;

    /// `true` once post-election plumbing is done and the election may
    /// close.
    fn election_complete(
        &self,
        now_ms: u64,
    ) -> Result<bool>;
}
