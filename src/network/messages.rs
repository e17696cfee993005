//! Semantic consensus message types.
//!
//! Only the fields matter to the election; the prost derives supply the wire
//! codec for transports that frame messages as protobuf.

/// Log view a member shares while canvassing for nomination eligibility.
#[derive(Clone, PartialEq, prost::Message)]
pub struct CanvassPosition {
    #[prost(int64, tag = "1")]
    pub log_leadership_term_id: i64,
    #[prost(int64, tag = "2")]
    pub log_position: i64,
    #[prost(uint32, tag = "3")]
    pub follower_id: u32,
}

/// Ballot a candidate sends to solicit a vote for a new term.
#[derive(Clone, PartialEq, prost::Message)]
pub struct RequestVote {
    #[prost(int64, tag = "1")]
    pub log_leadership_term_id: i64,
    #[prost(int64, tag = "2")]
    pub log_position: i64,
    #[prost(int64, tag = "3")]
    pub candidate_term_id: i64,
    #[prost(uint32, tag = "4")]
    pub candidate_id: u32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Vote {
    #[prost(int64, tag = "1")]
    pub candidate_term_id: i64,
    #[prost(int64, tag = "2")]
    pub log_leadership_term_id: i64,
    #[prost(int64, tag = "3")]
    pub log_position: i64,
    #[prost(uint32, tag = "4")]
    pub candidate_id: u32,
    #[prost(uint32, tag = "5")]
    pub follower_id: u32,
    #[prost(bool, tag = "6")]
    pub vote_granted: bool,
}

/// Announcement of an established leader for a leadership term.
#[derive(Clone, PartialEq, prost::Message)]
pub struct NewLeadershipTerm {
    #[prost(int64, tag = "1")]
    pub log_leadership_term_id: i64,
    #[prost(int64, tag = "2")]
    pub log_position: i64,
    #[prost(int64, tag = "3")]
    pub leadership_term_id: i64,
    #[prost(uint32, tag = "4")]
    pub leader_id: u32,
    #[prost(int32, tag = "5")]
    pub log_session_id: i32,
}

/// Follower confirmation of its durable log position for a term.
#[derive(Clone, PartialEq, prost::Message)]
pub struct AppendedPosition {
    #[prost(int64, tag = "1")]
    pub leadership_term_id: i64,
    #[prost(int64, tag = "2")]
    pub log_position: i64,
    #[prost(uint32, tag = "3")]
    pub follower_id: u32,
}

/// Leader broadcast of the cluster commit position.
#[derive(Clone, PartialEq, prost::Message)]
pub struct CommitPosition {
    #[prost(int64, tag = "1")]
    pub leadership_term_id: i64,
    #[prost(int64, tag = "2")]
    pub log_position: i64,
    #[prost(uint32, tag = "3")]
    pub leader_id: u32,
}

/// Catch-up handshake: a follower asks the leader for its recording-log view
/// so the archived range can be replayed.
#[derive(Clone, PartialEq, prost::Message)]
pub struct RecordingLogQuery {
    #[prost(int64, tag = "1")]
    pub leadership_term_id: i64,
    #[prost(int64, tag = "2")]
    pub from_position: i64,
    #[prost(uint32, tag = "3")]
    pub requesting_member_id: u32,
}

/// One recording-log term record as carried on the wire. A `recording_id`
/// of `NULL_VALUE` marks a skipped intermediate term.
#[derive(Clone, PartialEq, prost::Message)]
pub struct RecordingLogTerm {
    #[prost(int64, tag = "1")]
    pub recording_id: i64,
    #[prost(int64, tag = "2")]
    pub leadership_term_id: i64,
    #[prost(int64, tag = "3")]
    pub log_position: i64,
    #[prost(uint64, tag = "4")]
    pub timestamp_ms: u64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct RecordingLogReply {
    #[prost(message, repeated, tag = "1")]
    pub entries: Vec<RecordingLogTerm>,
}

/// The framed form a transport carries between members.
#[derive(Clone, PartialEq, prost::Message)]
pub struct ConsensusEnvelope {
    #[prost(oneof = "ConsensusMessage", tags = "1, 2, 3, 4, 5, 6, 7, 8")]
    pub message: Option<ConsensusMessage>,
}

#[derive(Clone, PartialEq, prost::Oneof)]
pub enum ConsensusMessage {
    #[prost(message, tag = "1")]
    CanvassPosition(CanvassPosition),
    #[prost(message, tag = "2")]
    RequestVote(RequestVote),
    #[prost(message, tag = "3")]
    Vote(Vote),
    #[prost(message, tag = "4")]
    NewLeadershipTerm(NewLeadershipTerm),
    #[prost(message, tag = "5")]
    AppendedPosition(AppendedPosition),
    #[prost(message, tag = "6")]
    CommitPosition(CommitPosition),
    #[prost(message, tag = "7")]
    RecordingLogQuery(RecordingLogQuery),
    #[prost(message, tag = "8")]
    RecordingLogReply(RecordingLogReply),
}
