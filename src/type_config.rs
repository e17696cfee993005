use std::fmt::Debug;

use crate::ClusterMarkFile;
use crate::ConsensusAgent;
use crate::LogArchive;
use crate::RecordingLog;

/// Bundles the capability implementations an election instance is wired
/// with, so that tests can swap in mocks without touching the state machine.
pub trait TypeConfig:
    Sync + Send + Sized + Debug + Clone + Copy + Default + Eq + PartialEq + Ord + PartialOrd + 'static
{
    type MF: ClusterMarkFile;

    type RL: RecordingLog;

    type AG: ConsensusAgent;

    type AR: LogArchive;
}

pub mod alias {
    use super::TypeConfig;

    pub type MFOF<T> = <T as TypeConfig>::MF;

    pub type RLOF<T> = <T as TypeConfig>::RL;

    pub type AGOF<T> = <T as TypeConfig>::AG;

    pub type AROF<T> = <T as TypeConfig>::AR;
}
