use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One extracted conversational message. Messages keep the order in which
/// they appeared in the log; nothing downstream re-sorts them.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub role: Role,
    pub text: String,
    /// Wall-clock time (HH:MM); absent when the timestamp did not parse.
    pub time: Option<String>,
    /// Raw timestamp string as it appeared in the log.
    pub timestamp: Option<String>,
}

/// A cleaned session, built once per extraction and immutable afterwards.
#[derive(Debug, Default, Serialize)]
pub struct Session {
    pub session_id: String,
    pub project: String,
    /// First non-empty working directory observed in the log.
    pub cwd: Option<String>,
    pub first_ts: Option<String>,
    pub last_ts: Option<String>,
    pub spans_multiple_days: bool,
    pub messages: Vec<Message>,
}
