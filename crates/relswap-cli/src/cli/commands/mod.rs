//! CLI command handlers, one per file.

mod clean;
mod download;
mod install;
mod release;

pub use clean::run_clean;
pub use download::run_download;
pub use install::run_install;
pub use release::run_release;
