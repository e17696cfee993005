use crate::ElectionError;
use crate::Result;

/// The ten election phases plus the one-shot `Init`.
///
/// Codes are the stable observability contract published through the
/// election state counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ElectionState {
    Init = 0,
    Canvass = 1,
    Nominate = 2,
    CandidateBallot = 3,
    FollowerBallot = 4,
    LeaderTransition = 5,
    LeaderReady = 6,
    FollowerCatchupTransition = 7,
    FollowerCatchup = 8,
    FollowerTransition = 9,
    FollowerReady = 10,
}

impl ElectionState {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            0 => Ok(ElectionState::Init),
            1 => Ok(ElectionState::Canvass),
            2 => Ok(ElectionState::Nominate),
            3 => Ok(ElectionState::CandidateBallot),
            4 => Ok(ElectionState::FollowerBallot),
            5 => Ok(ElectionState::LeaderTransition),
            6 => Ok(ElectionState::LeaderReady),
            7 => Ok(ElectionState::FollowerCatchupTransition),
            8 => Ok(ElectionState::FollowerCatchup),
            9 => Ok(ElectionState::FollowerTransition),
            10 => Ok(ElectionState::FollowerReady),
            _ => Err(ElectionError::InvalidStateCode(code).into()),
        }
    }
}
