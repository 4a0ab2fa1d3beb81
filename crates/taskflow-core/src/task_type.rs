//! Task kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a task, which selects the executor that runs it.
///
/// Identifiers outside the fixed set are preserved as `Other` so that
/// callers can register their own executors for them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskType {
    HttpRequest,
    DatabaseQuery,
    FileOperation,
    EmailSend,
    NotifyA,
    NotifyB,
    CustomScript,
    /// Caller-defined kind.
    Other(String),
}

impl TaskType {
    /// The fixed set of kinds accepted at the API boundary.
    pub const KNOWN: [TaskType; 7] = [
        TaskType::HttpRequest,
        TaskType::DatabaseQuery,
        TaskType::FileOperation,
        TaskType::EmailSend,
        TaskType::NotifyA,
        TaskType::NotifyB,
        TaskType::CustomScript,
    ];

    /// String identifier of this kind.
    pub fn as_str(&self) -> &str {
        match self {
            Self::HttpRequest => "http_request",
            Self::DatabaseQuery => "database_query",
            Self::FileOperation => "file_operation",
            Self::EmailSend => "email_send",
            Self::NotifyA => "notify_a",
            Self::NotifyB => "notify_b",
            Self::CustomScript => "custom_script",
            Self::Other(name) => name,
        }
    }

    /// Returns true for members of the fixed enumeration.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for TaskType {
    fn from(s: &str) -> Self {
        match s {
            "http_request" => Self::HttpRequest,
            "database_query" => Self::DatabaseQuery,
            "file_operation" => Self::FileOperation,
            "email_send" => Self::EmailSend,
            "notify_a" => Self::NotifyA,
            "notify_b" => Self::NotifyB,
            "custom_script" => Self::CustomScript,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for TaskType {
    fn from(s: String) -> Self {
        match Self::from(s.as_str()) {
            Self::Other(_) => Self::Other(s),
            known => known,
        }
    }
}

impl From<TaskType> for String {
    fn from(t: TaskType) -> Self {
        match t {
            TaskType::Other(name) => name,
            known => known.as_str().to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_types_parse_back() {
        for t in TaskType::KNOWN {
            assert_eq!(TaskType::from(t.as_str()), t);
            assert!(t.is_known());
        }
    }

    #[test]
    fn test_unknown_type_is_preserved() {
        let t = TaskType::from("noop");
        assert_eq!(t, TaskType::Other("noop".to_string()));
        assert!(!t.is_known());
        assert_eq!(t.to_string(), "noop");
    }

    #[test]
    fn test_serde_uses_identifier() {
        let json = serde_json::to_string(&TaskType::EmailSend).unwrap();
        assert_eq!(json, "\"email_send\"");

        let parsed: TaskType = serde_json::from_str("\"custom_script\"").unwrap();
        assert_eq!(parsed, TaskType::CustomScript);
    }
}
