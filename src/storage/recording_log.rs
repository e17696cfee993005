use std::sync::Arc;

use autometrics::autometrics;
use log::error;
#[cfg(test)]
use mockall::automock;
use serde::Deserialize;
use serde::Serialize;

use crate::constants::RECORDING_LOG_TREE;
use crate::Result;
use crate::StorageError;
use crate::API_SLO;

/// One ledger record: the archive recording that carries a leadership term,
/// the log position the term began at, and when it was appended.
///
/// `recording_id` is `None` for a skipped intermediate term that never had a
/// live log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingLogEntry {
    pub recording_id: Option<i64>,
    pub leadership_term_id: i64,
    pub log_position: i64,
    pub timestamp_ms: u64,
}

/// Append-only ledger of leadership terms, ordered by append.
#[cfg_attr(test, automock)]
pub trait RecordingLog: Send + Sync + 'static {
    /// Durably appends a term record before returning.
    fn append_term(
        &self,
        recording_id: Option<i64>,
        leadership_term_id: i64,
        log_position: i64,
        timestamp_ms: u64,
    ) -> Result<()>;

    /// All records in append order.
    fn entries(&self) -> Result<Vec<RecordingLogEntry>>;

    /// The most recently appended record.
    fn last_term(&self) -> Result<Option<RecordingLogEntry>>;
}

#[derive(Clone)]
pub struct SledRecordingLog {
    tree: Arc<sled::Tree>,
}

impl std::fmt::Debug for SledRecordingLog {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("SledRecordingLog")
            .field("tree_len", &self.tree.len())
            .finish()
    }
}

impl SledRecordingLog {
    pub fn new(db: &sled::Db) -> Result<Self> {
        let tree = db.open_tree(RECORDING_LOG_TREE)?;

        Ok(Self { tree: Arc::new(tree) })
    }

    fn next_index(&self) -> Result<u64> {
        match self.tree.last()? {
            Some((key, _)) => {
                let key: [u8; 8] = key.as_ref().try_into().map_err(|_| StorageError::DataCorruption {
                    location: format!("{} key of width {}", RECORDING_LOG_TREE, key.len()),
                })?;
                Ok(u64::from_be_bytes(key) + 1)
            }
            None => Ok(0),
        }
    }
}

impl RecordingLog for SledRecordingLog {
    #[autometrics(objective = API_SLO)]
    fn append_term(
        &self,
        recording_id: Option<i64>,
        leadership_term_id: i64,
        log_position: i64,
        timestamp_ms: u64,
    ) -> Result<()> {
        let entry = RecordingLogEntry {
            recording_id,
            leadership_term_id,
            log_position,
            timestamp_ms,
        };

        let index = self.next_index()?;
        self.tree.insert(index.to_be_bytes(), bincode::serialize(&entry)?)?;
        self.tree.flush()?;

        Ok(())
    }

    fn entries(&self) -> Result<Vec<RecordingLogEntry>> {
        let mut entries = Vec::with_capacity(self.tree.len());

        for item in self.tree.iter() {
            let (_, value) = item?;
            match bincode::deserialize::<RecordingLogEntry>(&value) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    error!("recording log entry deserialize error. {}", e);
                    return Err(e.into());
                }
            }
        }

        Ok(entries)
    }

    fn last_term(&self) -> Result<Option<RecordingLogEntry>> {
        match self.tree.last()? {
            Some((_, value)) => Ok(Some(bincode::deserialize(&value)?)),
            None => Ok(None),
        }
    }
}
