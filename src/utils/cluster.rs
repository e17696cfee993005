use tracing::error;

pub(crate) fn is_majority(
    num: usize,
    total: usize,
) -> bool {
    num > total / 2
}

pub fn majority_count(total_members: usize) -> usize {
    (total_members / 2) + 1
}

/// Format error logging
pub(crate) fn error(
    func_name: &str,
    e: &dyn std::fmt::Debug,
) {
    error!("{}::{} failed: {:?}", module_path!(), func_name, e);
}
