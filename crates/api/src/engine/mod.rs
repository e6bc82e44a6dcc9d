//! Pipelines that combine the pure engines in `cablewatch_core` with
//! persistence.
//!
//! - [`evaluation`]: load a submission, evaluate it, persist the run, mirror
//!   a summary.
//! - [`ingest`]: diff an incoming snapshot against the active one and store
//!   it with its transition events and status conflicts.

pub mod evaluation;
pub mod ingest;
