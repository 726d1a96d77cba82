//! CLI command handlers. Each command is in its own file for clarity.

mod execute;
mod manifest;
mod validate;

pub use execute::run_execute;
pub use manifest::run_manifest;
pub use validate::run_validate;
