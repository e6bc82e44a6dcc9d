//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Repositories over history tables
//! (runs, signals, snapshots, transition events, conflicts) expose inserts
//! and reads only.

pub mod evaluation_run_repo;
pub mod file_event_repo;
pub mod snapshot_repo;
pub mod status_conflict_repo;
pub mod submission_repo;
pub mod transition_event_repo;
pub mod worksite_repo;

pub use evaluation_run_repo::EvaluationRunRepo;
pub use file_event_repo::FileEventRepo;
pub use snapshot_repo::SnapshotRepo;
pub use status_conflict_repo::StatusConflictRepo;
pub use submission_repo::SubmissionRepo;
pub use transition_event_repo::TransitionEventRepo;
pub use worksite_repo::WorksiteRepo;
