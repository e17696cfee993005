//! # quorum-engine
//!
//! A leader-election engine for replicated-log consensus clusters.
//!
//! ## Features
//! - **Safety first**: at most one leader per term, monotonic terms, and
//!   log-freshness-restricted candidacy, with every term durable before it
//!   is acted on
//! - **Liveness by design**: randomized nomination, a unanimous fast path,
//!   a quorum slow path, and bounded retransmission over a back-pressured
//!   transport
//! - **Catch-up before live**: followers replay the leader's archived log
//!   range up to the target position before joining live replication
//! - **Pluggable capabilities**: agent, archive, and durable state behind
//!   traits so hosts and tests wire their own
//! - **Observability**: the election state published as a stable counter,
//!   with prometheus metrics
//!
//! ## Core Concepts
//! The engine is a single-threaded cooperative state machine. The owning
//! consensus agent calls [`Election::tick`] with the current monotonic time;
//! each tick polls the transport, dispatches inbound peer messages, and runs
//! the action of the current state. All safety-critical writes (candidate
//! term, recording-log appends) are durable before any dependent message is
//! sent.

pub mod config;
pub mod storage;

mod constants;
mod core;
mod errors;
mod membership;
mod metrics;
mod network;
mod type_config;

pub use constants::*;
pub use crate::config::*;
#[doc(hidden)]
pub use crate::core::*;
pub use errors::*;
pub use membership::*;
pub use metrics::*;
pub use network::*;
pub use storage::*;
#[doc(hidden)]
pub use type_config::*;
pub mod utils;
pub use utils::*;

//-----------------------------------------------------------
// Test utils
#[cfg(test)]
#[doc(hidden)]
pub mod test_utils;

//-----------------------------------------------------------
// Autometrics
use autometrics::objectives::Objective;
use autometrics::objectives::ObjectiveLatency;
use autometrics::objectives::ObjectivePercentile;

#[doc(hidden)]
const API_SLO: Objective = Objective::new("api")
    .success_rate(ObjectivePercentile::P99_9)
    .latency(ObjectiveLatency::Ms10, ObjectivePercentile::P99);
