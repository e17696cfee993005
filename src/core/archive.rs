#[cfg(test)]
use mockall::automock;

use crate::Result;

/// Capability surface of the archive subsystem the catch-up engine needs:
/// stream a bounded range of a recorded log into the local replica.
#[cfg_attr(test, automock)]
pub trait LogArchive: Send + Sync + 'static {
    /// Starts replaying `length` bytes of `recording_id` from `position`
    /// into the log stream identified by `log_session_id`. Returns the
    /// replay session id.
    fn start_replay(
        &self,
        recording_id: i64,
        position: i64,
        length: i64,
        log_session_id: i32,
    ) -> Result<i64>;

    fn stop_replay(
        &self,
        replay_session_id: i64,
    ) -> Result<()>;

    /// Furthest position the replay has delivered locally.
    fn replay_position(
        &self,
        replay_session_id: i64,
    ) -> Result<i64>;
}
