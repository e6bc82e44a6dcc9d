//! Cable lifecycle reconciliation and anomaly-signal engine.
//!
//! Everything in this crate is pure logic with no database or network
//! access: status vocabularies, import-diff classification, cross-source
//! conflict detection, and the submission signal engine.

pub mod conflict;
pub mod error;
pub mod severity;
pub mod snapshot;
pub mod status;
pub mod transition;
pub mod types;
pub mod validation;
