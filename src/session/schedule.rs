//! Session list as published in the simulator's session info YAML

use serde::{Deserialize, Serialize};

use crate::{Result, RivalError};

/// Session list and the currently running session number
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct SessionSchedule {
    /// Current session number
    pub current_session_num: i32,
    /// Sessions of the event, indexed by session number
    pub sessions: Vec<Session>,
}

/// Individual session entry
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct Session {
    /// Session number
    pub session_num: i32,
    /// Session type label
    pub session_type: String,
    /// Session name
    pub session_name: Option<String>,
    /// Session laps ("unlimited" or number)
    pub session_laps: Option<String>,
    /// Session time ("unlimited" or time)
    pub session_time: Option<String>,
}

/// Top-level session info document; only the session list is of interest here.
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SessionInfoDocument {
    session_info: SessionSchedule,
}

impl SessionSchedule {
    /// Parse the `SessionInfo` block out of a full session info YAML document.
    pub fn parse(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str::<SessionInfoDocument>(yaml)
            .map(|doc| doc.session_info)
            .map_err(|e| RivalError::parse_error("SessionSchedule deserialization", e))
    }

    /// Session at `session_num`, if the number is in range
    pub fn session(&self, session_num: i32) -> Option<&Session> {
        usize::try_from(session_num).ok().and_then(|idx| self.sessions.get(idx))
    }

    /// Type label of the session at `session_num`
    pub fn session_type(&self, session_num: i32) -> Option<&str> {
        self.session(session_num).map(|s| s.session_type.as_str())
    }

    /// Type label of the current session
    pub fn current_session_type(&self) -> Option<&str> {
        self.session_type(self.current_session_num)
    }
}
