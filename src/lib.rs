//! Session identity container for the browser session-recording tracker.
//!
//! Producers (identity resolution, metadata tagging, session rotation) push
//! partial updates into a [`Session`]; listeners receive each update as a
//! normalized [`UpdateDelta`].

pub mod config;
pub mod session;
pub mod storage;

pub use config::{ConfigError, ConfigResult, SessionOptions};
pub use session::{FieldUpdate, Session, SessionInfo, UpdateCallback, UpdateDelta};
pub use storage::{MemoryStorage, SessionStorage};
