use std::sync::Arc;

use autometrics::autometrics;
use log::error;
use log::info;
#[cfg(test)]
use mockall::automock;

use crate::constants::MARK_FILE_KEY_CANDIDATE_TERM_ID;
use crate::constants::MARK_FILE_TREE;
use crate::Result;
use crate::API_SLO;
use crate::NULL_VALUE;

/// Durable slot for the last candidate term this node has seen.
///
/// A vote for term `T` may only be sent after `T` is durable here, and the
/// slot is restored on the canvass path of the next election after a
/// restart.
#[cfg_attr(test, automock)]
pub trait ClusterMarkFile: Send + Sync + 'static {
    /// `NULL_VALUE` when no candidacy has been observed.
    fn candidate_term_id(&self) -> i64;

    /// Durably records the candidate term before returning.
    fn update_candidate_term_id(
        &self,
        candidate_term_id: i64,
    ) -> Result<()>;
}

#[derive(Clone)]
pub struct SledMarkFile {
    tree: Arc<sled::Tree>,
}

impl std::fmt::Debug for SledMarkFile {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("SledMarkFile")
            .field("candidate_term_id", &self.candidate_term_id())
            .finish()
    }
}

impl SledMarkFile {
    pub fn new(db: &sled::Db) -> Result<Self> {
        let tree = db.open_tree(MARK_FILE_TREE)?;

        Ok(Self { tree: Arc::new(tree) })
    }
}

impl ClusterMarkFile for SledMarkFile {
    fn candidate_term_id(&self) -> i64 {
        match self.tree.get(MARK_FILE_KEY_CANDIDATE_TERM_ID) {
            Ok(Some(ivec)) => match bincode::deserialize::<i64>(&ivec) {
                Ok(candidate_term_id) => candidate_term_id,
                Err(e) => {
                    error!("mark file candidate_term_id deserialize error. {}", e);
                    NULL_VALUE
                }
            },
            Ok(None) => {
                info!("no candidate term found in mark file with key: {}", MARK_FILE_KEY_CANDIDATE_TERM_ID);
                NULL_VALUE
            }
            Err(e) => {
                error!("mark file read error. {}", e);
                NULL_VALUE
            }
        }
    }

    #[autometrics(objective = API_SLO)]
    fn update_candidate_term_id(
        &self,
        candidate_term_id: i64,
    ) -> Result<()> {
        self.tree
            .insert(MARK_FILE_KEY_CANDIDATE_TERM_ID, bincode::serialize(&candidate_term_id)?)?;
        self.tree.flush()?;

        Ok(())
    }
}
