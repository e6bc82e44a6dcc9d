//! Row structs and insert DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` struct matching the
//! database row, plus a `Deserialize` create DTO where rows are inserted
//! from outside the crate. History tables have no update DTOs.

pub mod evaluation;
pub mod file_event;
pub mod snapshot;
pub mod submission;
pub mod worksite;
