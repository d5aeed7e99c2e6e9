//! Configuration Module
//!
//! Construction options for the session container, loadable from TOML.

pub mod error;
pub mod options;

pub use error::{ConfigError, ConfigResult};
pub use options::SessionOptions;
