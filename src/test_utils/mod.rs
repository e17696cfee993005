//! Shared helpers for module tests: a mock type config wiring the real
//! sled-backed stores to mocked agent and archive capabilities, plus an
//! election fixture with observable peer inboxes.

use std::sync::Arc;

use tempfile::TempDir;

use crate::consensus_channel;
use crate::ClusterMember;
use crate::ClusterMembers;
use crate::ConsensusAdapter;
use crate::ConsensusMessage;
use crate::Election;
use crate::ElectionConfig;
use crate::ElectionContext;
use crate::MemberPublication;
use crate::MockConsensusAgent;
use crate::MockLogArchive;
use crate::SledMarkFile;
use crate::SledRecordingLog;
use crate::TypeConfig;

pub const TEST_LOG_CHANNEL: &str = "log:udp?endpoint=localhost:9030|control=localhost:9031";

/// Capacity of each member's in-process consensus channel.
pub const TEST_CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct MockTypeConfig;

impl TypeConfig for MockTypeConfig {
    type MF = SledMarkFile;

    type RL = SledRecordingLog;

    type AG = MockConsensusAgent;

    type AR = MockLogArchive;
}

pub fn test_election_config(appointed_leader_id: Option<u32>) -> ElectionConfig {
    ElectionConfig {
        status_interval_ms: 100,
        leader_heartbeat_interval_ms: 500,
        election_timeout_ms: 1000,
        startup_canvass_timeout_ms: 5000,
        appointed_leader_id,
        nomination_seed: Some(7),
    }
}

/// An agent mock that tolerates any number of role advertisements, which
/// every canvass entry performs.
pub fn agent_with_role_tracking() -> MockConsensusAgent {
    let mut agent = MockConsensusAgent::new();
    agent.expect_role().return_const(());
    agent
}

pub struct ElectionFixture {
    pub election: Election<MockTypeConfig>,
    /// Peer inbox receivers indexed by member id; `None` at this member's
    /// slot (the election owns that adapter).
    pub peer_inboxes: Vec<Option<ConsensusAdapter>>,
    /// Send handle into this member's own inbox, for injecting inbound
    /// traffic ahead of a tick.
    pub self_publication: MemberPublication,
    pub mark_file: Arc<SledMarkFile>,
    pub recording_log: Arc<SledRecordingLog>,
    _temp_dir: TempDir,
}

#[allow(clippy::too_many_arguments)]
pub fn setup_election(
    member_count: u32,
    this_member_id: u32,
    is_startup: bool,
    leadership_term_id: i64,
    log_position: i64,
    appointed_leader_id: Option<u32>,
    agent: MockConsensusAgent,
    archive: MockLogArchive,
) -> ElectionFixture {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let db = sled::open(temp_dir.path()).expect("should open sled db");
    let mark_file = Arc::new(SledMarkFile::new(&db).expect("should open mark file"));
    let recording_log = Arc::new(SledRecordingLog::new(&db).expect("should open recording log"));

    let mut publications = Vec::new();
    let mut peer_inboxes = Vec::new();
    for _ in 0..member_count {
        let (publication, adapter) = consensus_channel(TEST_CHANNEL_CAPACITY);
        publications.push(publication);
        peer_inboxes.push(Some(adapter));
    }

    let members = ClusterMembers::new(
        publications
            .iter()
            .enumerate()
            .map(|(id, publication)| {
                ClusterMember::new(id as u32, publication.clone(), format!("node{}:9040", id))
            })
            .collect(),
    )
    .expect("should build member arena");

    let adapter = peer_inboxes[this_member_id as usize]
        .take()
        .expect("adapter for this member");
    let self_publication = publications[this_member_id as usize].clone();

    let ctx = ElectionContext::<MockTypeConfig> {
        config: Arc::new(test_election_config(appointed_leader_id)),
        log_channel: TEST_LOG_CHANNEL.to_string(),
        mark_file: mark_file.clone(),
        recording_log: recording_log.clone(),
        archive: Arc::new(archive),
    };

    let election = Election::new(
        is_startup,
        leadership_term_id,
        log_position,
        members,
        this_member_id,
        adapter,
        Arc::new(agent),
        ctx,
    )
    .expect("should create election");

    ElectionFixture {
        election,
        peer_inboxes,
        self_publication,
        mark_file,
        recording_log,
        _temp_dir: temp_dir,
    }
}

impl ElectionFixture {
    /// Drains the inbox of `member_id` into a vector.
    pub fn drain_inbox(
        &mut self,
        member_id: u32,
    ) -> Vec<ConsensusMessage> {
        let adapter = self.peer_inboxes[member_id as usize]
            .as_mut()
            .expect("inbox for member");

        let mut messages = Vec::new();
        while let Some(message) = adapter.poll_next() {
            messages.push(message);
        }
        messages
    }

    /// Drops the inbox of `member_id`, closing its channel so publishes to
    /// that member report back-pressure failure.
    pub fn close_inbox(
        &mut self,
        member_id: u32,
    ) {
        self.peer_inboxes[member_id as usize] = None;
    }
}
