use autometrics::autometrics;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::trace;
use tracing::warn;

use crate::network::ConsensusMessage;
use crate::API_SLO;

/// Send handle to one member's consensus channel.
///
/// `try_publish` never blocks: `false` means the transport did not accept
/// the message (back-pressure or a closed peer) and the caller retries on a
/// later tick.
#[derive(Clone, Debug)]
pub struct MemberPublication {
    tx: mpsc::Sender<ConsensusMessage>,
}

impl MemberPublication {
    pub fn new(tx: mpsc::Sender<ConsensusMessage>) -> Self {
        Self { tx }
    }

    #[autometrics(objective = API_SLO)]
    pub fn try_publish(
        &self,
        message: ConsensusMessage,
    ) -> bool {
        match self.tx.try_send(message) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                trace!("consensus channel back-pressured");
                false
            }
            Err(TrySendError::Closed(_)) => {
                warn!("consensus channel closed");
                false
            }
        }
    }
}
