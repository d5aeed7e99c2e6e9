//! Session Update Events
//!
//! Update deltas and the listener type used for session fan-out.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;

/// Change requested for a single optional field
///
/// Keeps "not supplied" apart from "supplied as null" so that an explicit
/// clear is never confused with an absent field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    /// Field was not supplied; the stored value is left alone
    #[default]
    Unchanged,
    /// Field was supplied as null; the stored value is cleared
    Cleared,
    /// Field was supplied with a new value
    Set(T),
}

impl<T> FieldUpdate<T> {
    /// Check if the field was left out of the delta
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    /// Get the new value, if one was supplied
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Set(value) => Some(value),
            _ => None,
        }
    }

    /// Apply this change to a stored optional value
    pub fn apply_to(&self, target: &mut Option<T>)
    where
        T: Clone,
    {
        match self {
            Self::Unchanged => {}
            Self::Cleared => *target = None,
            Self::Set(value) => *target = Some(value.clone()),
        }
    }

    /// Version of this change that listeners get to see.
    /// Clears are dropped: only newly known values are announced.
    pub fn announced(&self) -> Self
    where
        T: Clone,
    {
        match self {
            Self::Set(value) => Self::Set(value.clone()),
            _ => Self::Unchanged,
        }
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Set(value),
            None => Self::Cleared,
        }
    }
}

// `Unchanged` is expressed by leaving the key out, see the
// `skip_serializing_if` / `default` attributes on `UpdateDelta`.
impl<T: Serialize> Serialize for FieldUpdate<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Set(value) => serializer.serialize_some(value),
            _ => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for FieldUpdate<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<T>::deserialize(deserializer)?.into())
    }
}

/// Partial session record describing what one update call changes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateDelta {
    #[serde(
        rename = "sessionID",
        default,
        skip_serializing_if = "FieldUpdate::is_unchanged"
    )]
    pub session_id: FieldUpdate<String>,
    /// Entries merged key by key into the stored metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
    #[serde(
        rename = "userID",
        default,
        skip_serializing_if = "FieldUpdate::is_unchanged"
    )]
    pub user_id: FieldUpdate<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
    #[serde(rename = "projectID", default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

impl UpdateDelta {
    /// Create an empty delta
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = FieldUpdate::Set(session_id.into());
        self
    }

    pub fn clear_session_id(mut self) -> Self {
        self.session_id = FieldUpdate::Cleared;
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = FieldUpdate::Set(user_id.into());
        self
    }

    pub fn clear_user_id(mut self) -> Self {
        self.user_id = FieldUpdate::Cleared;
        self
    }

    /// Add one metadata entry; repeated keys keep the last value
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Stamp the delta with the current time in epoch milliseconds
    pub fn with_timestamp_now(self) -> Self {
        let now = u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default();
        self.with_timestamp(now)
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Check if the delta supplies no field at all
    pub fn is_empty(&self) -> bool {
        self.session_id.is_unchanged()
            && self.metadata.is_none()
            && self.user_id.is_unchanged()
            && self.timestamp.is_none()
            && self.project_id.is_none()
    }

    /// Delta as broadcast to listeners.
    ///
    /// Session and user id clears are removed, so listeners only ever learn
    /// about ids becoming known. The stored record still records the clear.
    pub fn normalized(&self) -> Self {
        Self {
            session_id: self.session_id.announced(),
            metadata: self.metadata.clone(),
            user_id: self.user_id.announced(),
            timestamp: self.timestamp,
            project_id: self.project_id.clone(),
        }
    }
}

/// Listener invoked with every normalized delta
pub type UpdateCallback = Box<dyn Fn(&UpdateDelta) + Send + Sync>;
