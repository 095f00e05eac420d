//! Logger setup for binaries built on the engine.
//!
//! Libraries only use the `log` facade; the viewer installs `env_logger`
//! once at startup through [`init_logging`].

mod init;

pub use init::{init_logging, LoggingConfig};
