pub mod config;
pub mod logging;

pub mod downloader;
pub mod error;
pub mod install;
pub mod progress;
pub mod release;
pub mod response;
pub mod secrets;
pub mod transport;

pub use error::{Error, Result};
