use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

use crate::network::ConsensusMessage;

/// Receive side of a member's consensus channel.
///
/// Draining is cooperative: the election polls a bounded number of messages
/// per tick and fans them into its handlers.
#[derive(Debug)]
pub struct ConsensusAdapter {
    rx: mpsc::Receiver<ConsensusMessage>,
}

impl ConsensusAdapter {
    pub fn new(rx: mpsc::Receiver<ConsensusMessage>) -> Self {
        Self { rx }
    }

    /// Next inbound message, `None` when the inbox is currently empty or the
    /// send side is gone.
    pub fn poll_next(&mut self) -> Option<ConsensusMessage> {
        match self.rx.try_recv() {
            Ok(message) => Some(message),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}
