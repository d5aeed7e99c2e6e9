//! Session Module
//!
//! Identity and metadata of the ongoing recording session:
//! - `SessionInfo` record with field-specific merge rules
//! - `UpdateDelta` partial updates with absent / cleared / set id fields
//! - `Session` container that applies deltas and notifies listeners

pub mod events;
pub mod manager;
pub mod state;

pub use events::{FieldUpdate, UpdateCallback, UpdateDelta};
pub use manager::Session;
pub use state::SessionInfo;
