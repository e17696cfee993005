use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Result;

/// Timing and nomination parameters for the election state machine.
///
/// All intervals are in milliseconds of the caller's monotonic clock.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ElectionConfig {
    /// Interval between `CanvassPosition` broadcasts while canvassing.
    #[serde(default = "default_status_interval")]
    pub status_interval_ms: u64,

    /// Interval between `NewLeadershipTerm` re-broadcasts while the leader
    /// waits for followers to confirm.
    #[serde(default = "default_leader_heartbeat_interval")]
    pub leader_heartbeat_interval_ms: u64,

    /// Deadline for each ballot and for the canvass on non-startup elections.
    #[serde(default = "default_election_timeout")]
    pub election_timeout_ms: u64,

    /// Canvass deadline used for the first election after process start.
    #[serde(default = "default_startup_canvass_timeout")]
    pub startup_canvass_timeout_ms: u64,

    /// When set, only this member may nominate itself.
    #[serde(default)]
    pub appointed_leader_id: Option<u32>,

    /// Seed for the nomination jitter, fixed in tests for determinism.
    #[serde(default)]
    pub nomination_seed: Option<u64>,
}

impl Default for ElectionConfig {
    fn default() -> Self {
        Self {
            status_interval_ms: default_status_interval(),
            leader_heartbeat_interval_ms: default_leader_heartbeat_interval(),
            election_timeout_ms: default_election_timeout(),
            startup_canvass_timeout_ms: default_startup_canvass_timeout(),
            appointed_leader_id: None,
            nomination_seed: None,
        }
    }
}

impl ElectionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.status_interval_ms == 0 {
            return Err(Error::InvalidConfig("status_interval_ms cannot be 0".into()));
        }

        if self.leader_heartbeat_interval_ms == 0 {
            return Err(Error::InvalidConfig("leader_heartbeat_interval_ms cannot be 0".into()));
        }

        if self.election_timeout_ms <= self.status_interval_ms {
            return Err(Error::InvalidConfig(format!(
                "election_timeout_ms {}ms must exceed status_interval_ms {}ms",
                self.election_timeout_ms, self.status_interval_ms
            )));
        }

        if self.leader_heartbeat_interval_ms >= self.election_timeout_ms {
            return Err(Error::InvalidConfig(format!(
                "leader_heartbeat_interval_ms {}ms must be less than election_timeout_ms {}ms",
                self.leader_heartbeat_interval_ms, self.election_timeout_ms
            )));
        }

        if self.startup_canvass_timeout_ms < self.election_timeout_ms {
            return Err(Error::InvalidConfig(format!(
                "startup_canvass_timeout_ms {}ms must be at least election_timeout_ms {}ms",
                self.startup_canvass_timeout_ms, self.election_timeout_ms
            )));
        }

        Ok(())
    }
}

fn default_status_interval() -> u64 {
    100
}
fn default_leader_heartbeat_interval() -> u64 {
    500
}
fn default_election_timeout() -> u64 {
    1000
}
fn default_startup_canvass_timeout() -> u64 {
    5000
}
