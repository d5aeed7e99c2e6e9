//! Session State
//!
//! The record of identity facts known about the current recording session.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::events::UpdateDelta;

/// Snapshot of everything known about the current session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    /// Identifier of the current recording session
    #[serde(rename = "sessionID", default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Tags attached to the session
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    /// Identifier of the end user, `None` when unknown or cleared
    #[serde(rename = "userID", default)]
    pub user_id: Option<String>,
    /// Session start or reference time, epoch milliseconds
    #[serde(default)]
    pub timestamp: u64,
    /// Identifier of the owning project
    #[serde(rename = "projectID", default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

impl SessionInfo {
    /// Merge a delta into the record.
    ///
    /// Metadata entries are merged key by key; every other supplied field
    /// replaces the stored value. Fields missing from the delta are kept.
    pub fn apply(&mut self, delta: &UpdateDelta) {
        delta.user_id.apply_to(&mut self.user_id);
        if let Some(ref metadata) = delta.metadata {
            self.metadata
                .extend(metadata.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        delta.session_id.apply_to(&mut self.session_id);
        if let Some(timestamp) = delta.timestamp {
            self.timestamp = timestamp;
        }
        if let Some(ref project_id) = delta.project_id {
            self.project_id = Some(project_id.clone());
        }
    }

    /// Drop everything tied to the current session.
    /// The project id outlives the session and is kept.
    pub fn clear_session(&mut self) {
        self.metadata.clear();
        self.user_id = None;
        self.session_id = None;
        self.timestamp = 0;
    }

    /// Check if a session id is known
    pub fn has_session(&self) -> bool {
        self.session_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_session_info_default() {
        let info = SessionInfo::default();
        assert!(info.session_id.is_none());
        assert!(info.user_id.is_none());
        assert!(info.metadata.is_empty());
        assert_eq!(info.timestamp, 0);
        assert!(info.project_id.is_none());
        assert!(!info.has_session());
    }

    #[test]
    fn test_apply_merges_metadata() {
        let mut info = SessionInfo::default();
        info.apply(&UpdateDelta::new().with_metadata("a", "1"));
        info.apply(&UpdateDelta::new().with_metadata("b", "2").with_metadata("a", "3"));

        assert_eq!(info.metadata.len(), 2);
        assert_eq!(info.metadata["a"], "3");
        assert_eq!(info.metadata["b"], "2");
    }

    #[test]
    fn test_apply_keeps_absent_fields() {
        let mut info = SessionInfo::default();
        info.apply(
            &UpdateDelta::new()
                .with_session_id("s1")
                .with_timestamp(5)
                .with_project_id("p1"),
        );
        info.apply(&UpdateDelta::new().with_user_id("u1"));

        assert_eq!(info.session_id.as_deref(), Some("s1"));
        assert_eq!(info.timestamp, 5);
        assert_eq!(info.project_id.as_deref(), Some("p1"));
        assert_eq!(info.user_id.as_deref(), Some("u1"));
    }

    #[test]
    fn test_apply_clears_ids() {
        let mut info = SessionInfo::default();
        info.apply(&UpdateDelta::new().with_user_id("u1").with_session_id("s1"));
        info.apply(&UpdateDelta::new().clear_user_id().clear_session_id());

        assert!(info.user_id.is_none());
        assert!(info.session_id.is_none());
    }

    #[test]
    fn test_clear_session_keeps_project() {
        let mut info = SessionInfo::default();
        info.apply(
            &UpdateDelta::new()
                .with_session_id("s1")
                .with_user_id("u1")
                .with_metadata("k", "v")
                .with_timestamp(99)
                .with_project_id("p1"),
        );
        info.clear_session();

        assert_eq!(
            info,
            SessionInfo {
                project_id: Some("p1".to_string()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_session_info_serialization() {
        let mut info = SessionInfo::default();
        assert_eq!(
            serde_json::to_value(&info).unwrap(),
            json!({ "metadata": {}, "userID": null, "timestamp": 0 })
        );

        info.apply(&UpdateDelta::new().with_session_id("s1").with_project_id("p1"));
        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(value["sessionID"], "s1");
        assert_eq!(value["projectID"], "p1");

        let parsed: SessionInfo = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, info);
    }
}
