//! Submission signal engine.
//!
//! Runs a configured rule catalog over one work submission in two phases
//! (collect, then derive from what was collected), aggregates the raw hits
//! per rule code into signals, and derives the gate decision. Pure logic,
//! no database access.

pub mod aggregate;
pub mod checks;
pub mod evaluator;
pub mod parse;
pub mod rules;
pub mod submission;
