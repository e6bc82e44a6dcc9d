pub mod evaluation;
pub mod snapshot;
