//! Logging setup.
//!
//! Libraries in this workspace only talk to the `log` facade; hosts call
//! [`init_logging`] once to install `env_logger` behind it.

mod init;

pub use init::{LoggingConfig, init_logging};
