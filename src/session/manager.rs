//! Session Container
//!
//! Holds the identity facts of the ongoing recording session and fans out
//! every accepted update to the attached listeners.

use log::{debug, info};
use std::sync::Arc;

use super::events::{UpdateCallback, UpdateDelta};
use super::state::SessionInfo;
use crate::config::SessionOptions;
use crate::storage::SessionStorage;

/// Single source of truth for the current session's identity and metadata
///
/// All operations run synchronously on the caller's thread. Listeners are
/// called inline, in registration order, after the record has been updated.
/// Mutation needs `&mut self`, so a listener cannot update the container that
/// is notifying it; callers sharing the container behind a `RefCell` or a
/// lock must not call back into it from a listener.
pub struct Session {
    info: SessionInfo,
    /// Attached listeners, append-only
    callbacks: Vec<UpdateCallback>,
    storage: Arc<dyn SessionStorage>,
    options: SessionOptions,
}

impl Session {
    /// Create an empty session container
    pub fn new(storage: Arc<dyn SessionStorage>, options: SessionOptions) -> Self {
        Self {
            info: SessionInfo::default(),
            callbacks: Vec::new(),
            storage,
            options,
        }
    }

    /// Register a listener for future updates.
    ///
    /// Listeners cannot be detached and live as long as the container.
    pub fn attach_update_callback<F>(&mut self, callback: F)
    where
        F: Fn(&UpdateDelta) + Send + Sync + 'static,
    {
        self.callbacks.push(Box::new(callback));
        debug!("Attached session update callback (total: {})", self.callbacks.len());
    }

    fn handle_update(&self, delta: &UpdateDelta) {
        let delta = delta.normalized();
        for callback in &self.callbacks {
            callback(&delta);
        }
    }

    /// Merge a delta into the record and notify every listener
    pub fn update(&mut self, delta: UpdateDelta) {
        debug!(
            "Session update: session_id={} user_id={} metadata={} timestamp={} project_id={} ({} listeners)",
            !delta.session_id.is_unchanged(),
            !delta.user_id.is_unchanged(),
            delta.metadata.as_ref().map_or(0, |m| m.len()),
            delta.timestamp.is_some(),
            delta.project_id.is_some(),
            self.callbacks.len(),
        );

        self.info.apply(&delta);
        self.handle_update(&delta);
    }

    /// Set a single metadata entry
    pub fn set_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.update(UpdateDelta::new().with_metadata(key, value));
    }

    pub fn set_user_id(&mut self, user_id: impl Into<String>) {
        self.update(UpdateDelta::new().with_user_id(user_id));
    }

    /// Snapshot of the full record
    pub fn get_info(&self) -> SessionInfo {
        self.info.clone()
    }

    /// Forget the current session and drop its persisted token.
    ///
    /// The project id is kept and listeners are not notified.
    pub fn reset(&mut self) {
        self.storage.remove_item(&self.options.session_token_key);
        self.info.clear_session();
        info!("Session reset");
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Number of attached listeners
    pub fn listener_count(&self) -> usize {
        self.callbacks.len()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("info", &self.info)
            .field("listeners", &self.callbacks.len())
            .field("options", &self.options)
            .finish()
    }
}
