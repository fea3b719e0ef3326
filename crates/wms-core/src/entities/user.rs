use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The logged-in operator. Persisted by the CLI between invocations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSession {
    pub user_id: i64,
    pub username: String,
    pub full_name: String,
    pub logged_in_at: DateTime<Utc>,
}

/// A picker or checker offered for assignment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Operator {
    pub id: i64,
    pub full_name: String,
}

/// Result of checking a username/password pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Success(UserSession),
    /// No active user with login rights has that username.
    UnknownUser,
    WrongPassword,
}
