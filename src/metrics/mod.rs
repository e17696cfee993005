
use std::sync::atomic::AtomicI32;
use std::sync::atomic::Ordering;

use lazy_static::lazy_static;
use prometheus::IntCounterVec;
use prometheus::IntGauge;
use prometheus::IntGaugeVec;
use prometheus::Opts;
use prometheus::Registry;

lazy_static! {
    pub static ref ELECTION_STATE_METRIC: IntGaugeVec = IntGaugeVec::new(
        Opts::new("election_state", "Election State"),
        &["member_id"]
    )
    .expect("metric can not be created");
    pub static ref DISCARDED_VOTES_METRIC: IntCounterVec = IntCounterVec::new(
        Opts::new("discarded_votes_total", "Votes received while not the soliciting candidate"),
        &["member_id"]
    )
    .expect("metric can not be created");
    pub static ref CUSTOM_REGISTRY: Registry =
        Registry::new_custom(Some("quorum_engine".to_string()), None).unwrap();
}

pub fn register_custom_metrics(registry: &Registry) {
    registry
        .register(Box::new(ELECTION_STATE_METRIC.clone()))
        .expect("collector can be registered");
    registry
        .register(Box::new(DISCARDED_VOTES_METRIC.clone()))
        .expect("collector can be registered");
}

/// Published 32-bit "Election State" slot for one member.
///
/// The slot is the stable observability contract: it always carries the code
/// of the election's current state. The prometheus gauge mirrors the slot for
/// scraping.
#[derive(Debug)]
pub struct StateCounter {
    slot: AtomicI32,
    gauge: IntGauge,
    is_closed: bool,
}

impl StateCounter {
    pub fn new(member_id: u32) -> Self {
        Self {
            slot: AtomicI32::new(0),
            gauge: ELECTION_STATE_METRIC.with_label_values(&[&member_id.to_string()]),
            is_closed: false,
        }
    }

    pub fn set(
        &self,
        code: i32,
    ) {
        if !self.is_closed {
            self.slot.store(code, Ordering::Release);
            self.gauge.set(code as i64);
        }
    }

    pub fn get(&self) -> i32 {
        self.slot.load(Ordering::Acquire)
    }

    /// Idempotent.
    pub fn close(&mut self) {
        self.is_closed = true;
    }
}
