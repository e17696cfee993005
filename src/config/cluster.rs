use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Result;

/// Static endpoint record for one cluster member.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct MemberMeta {
    pub id: u32,

    /// Endpoint peers use for consensus status messages.
    pub status_endpoint: String,

    /// Endpoint this member receives the live log stream on.
    pub log_endpoint: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ClusterConfig {
    #[serde(default = "default_member_id")]
    pub member_id: u32,

    /// Fixed cluster membership, ids dense from zero.
    #[serde(default)]
    pub members: Vec<MemberMeta>,

    /// Base channel the cluster log is published over.
    #[serde(default = "default_log_channel")]
    pub log_channel: String,

    #[serde(default = "default_db_dir")]
    pub db_root_dir: PathBuf,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            member_id: default_member_id(),
            members: Vec::new(),
            log_channel: default_log_channel(),
            db_root_dir: default_db_dir(),
        }
    }
}

impl ClusterConfig {
    pub fn validate(&self) -> Result<()> {
        for (index, member) in self.members.iter().enumerate() {
            if member.id != index as u32 {
                return Err(Error::InvalidConfig(format!(
                    "cluster.members ids must be dense from 0, found id {} at index {}",
                    member.id, index
                )));
            }
        }

        if !self.members.is_empty() && self.members.iter().all(|m| m.id != self.member_id) {
            return Err(Error::InvalidConfig(format!(
                "cluster.member_id {} is not part of cluster.members",
                self.member_id
            )));
        }

        Ok(())
    }
}

fn default_member_id() -> u32 {
    0
}
fn default_log_channel() -> String {
    "log:udp?endpoint=localhost:9030|control=localhost:9031".to_string()
}
fn default_db_dir() -> PathBuf {
    PathBuf::from("/tmp/quorum-engine/db")
}
