//! Durable election state.
//!
//! Two small stores back the safety rules of the election: the mark file
//! holds the last candidate term this node has seen, and the recording log
//! is the append-only ledger of leadership terms. Both flush on every write
//! so the persist-before-act ordering holds across crashes.
mod mark_file;
mod recording_log;

pub use mark_file::*;
pub use recording_log::*;

#[cfg(test)]
mod mark_file_test;
