//! Logging setup.
//!
//! Library code only talks to the `log` facade; `init_logging` installs an
//! `env_logger` backend for binaries and tools.

mod init;

pub use init::{init_logging, LoggingConfig};
