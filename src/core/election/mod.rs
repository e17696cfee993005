//! The election state machine and its catch-up engine.
mod catchup;
mod state;

#[allow(clippy::module_inception)]
mod election;

pub use catchup::*;
pub use election::*;
pub use state::*;
