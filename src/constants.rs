/// Sentinel for an unset term or identifier field.
pub const NULL_VALUE: i64 = -1;

/// Sentinel for an unknown log position.
pub const NULL_POSITION: i64 = -1;

/// Sentinel for an unset log session id.
pub const NULL_SESSION_ID: i32 = -1;

/// Tag pair reserved for the cluster log subscription channel.
pub const LOG_SUBSCRIPTION_TAGS: &str = "1,2";

// -
// Database namespaces

/// Sled database tree namespaces
pub(crate) const MARK_FILE_TREE: &str = "_mark_file_tree";
pub(crate) const RECORDING_LOG_TREE: &str = "_recording_log_tree";

/// Sled entry key namespaces
pub(crate) const MARK_FILE_KEY_CANDIDATE_TERM_ID: &str = "_mark_file_candidate_term_id";
