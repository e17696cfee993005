//! Fixed cluster membership tracked through an election.
//!
//! The member table is an arena of per-peer records indexed by member id.
//! The election mutates peer records directly on message receipt and
//! evaluates the nomination and vote-count predicates over the arena.
mod cluster_member;

pub use cluster_member::*;
