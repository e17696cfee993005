use tempfile::TempDir;

use crate::ClusterMarkFile;
use crate::SledMarkFile;
use crate::NULL_VALUE;

/// # Case 1: A fresh mark file reports no candidacy
#[test]
fn test_unset_candidate_term() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let db = sled::open(temp_dir.path()).expect("should open db");
    let mark_file = SledMarkFile::new(&db).expect("should open mark file");

    assert_eq!(mark_file.candidate_term_id(), NULL_VALUE);
}

/// # Case 2: The candidate term survives reopening the store
#[test]
fn test_candidate_term_durability() {
    let temp_dir = TempDir::new().expect("should create temp dir");

    {
        let db = sled::open(temp_dir.path()).expect("should open db");
        let mark_file = SledMarkFile::new(&db).expect("should open mark file");
        mark_file.update_candidate_term_id(6).expect("should persist");
        assert_eq!(mark_file.candidate_term_id(), 6);
    }

    let db = sled::open(temp_dir.path()).expect("should reopen db");
    let mark_file = SledMarkFile::new(&db).expect("should reopen mark file");
    assert_eq!(mark_file.candidate_term_id(), 6);

    // Clearing writes the sentinel back.
    mark_file.update_candidate_term_id(NULL_VALUE).expect("should persist");
    assert_eq!(mark_file.candidate_term_id(), NULL_VALUE);
}
