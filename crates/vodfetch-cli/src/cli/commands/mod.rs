//! CLI command handlers, one file per command.

mod get;
mod run;

pub use get::run_get;
pub use run::run_batch;
