//! Consensus messaging layer.
//!
//! Peers exchange small framed status messages over per-member channels with
//! try-send semantics: an outbound publish either is accepted by the
//! transport immediately or reports back-pressure, and the election retries
//! on a later tick. Inbound messages are drained cooperatively, a bounded
//! number per poll.
mod adapter;
mod messages;
mod publication;

pub use adapter::*;
pub use messages::*;
pub use publication::*;


use tokio::sync::mpsc;

/// Creates a bounded in-process consensus channel pair for one member.
///
/// The sender side becomes that member's [`MemberPublication`] handed to its
/// peers; the receiver side is the member's own [`ConsensusAdapter`].
pub fn consensus_channel(capacity: usize) -> (MemberPublication, ConsensusAdapter) {
    let (tx, rx) = mpsc::channel(capacity);
    (MemberPublication::new(tx), ConsensusAdapter::new(rx))
}
