use serde::{Deserialize, Serialize};

/// One classified input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    User(UserRecord),
    Session(Session),
}

/// The fields of a `user,...` line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// Kept verbatim; never validated as a number.
    pub age: String,
}

/// A user together with the sessions attached to it in parse order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub age: String,
    sessions: Vec<Session>,
}

impl User {
    /// Create a user with no sessions.
    pub fn new(record: UserRecord) -> Self {
        Self {
            id: record.id,
            first_name: record.first_name,
            last_name: record.last_name,
            age: record.age,
            sessions: Vec::new(),
        }
    }

    /// `"<first_name> <last_name>"`, the key used in the report.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub(crate) fn attach(&mut self, session: Session) {
        self.sessions.push(session);
    }
}

/// A `session,...` line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub session_id: String,
    /// Original case preserved.
    pub browser: String,
    /// Minutes as written in the input; see [`Session::minutes`].
    pub time: String,
    pub date: String,
}

impl Session {
    /// Duration in minutes, using loose integer coercion of `time`.
    pub fn minutes(&self) -> i64 {
        parse_minutes(&self.time)
    }
}

/// Parse the leading integer of `value`, returning 0 when there is none.
///
/// Leading whitespace and a single sign are accepted, as are underscores
/// between digits. Parsing stops at the first other character, so `"12min"`
/// is 12 and `"abc"` is 0. Out-of-range values saturate.
pub fn parse_minutes(value: &str) -> i64 {
    let rest = value.trim_start();
    let (negative, rest) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };

    let mut total: i64 = 0;
    let mut prev_digit = false;
    let mut bytes = rest.bytes().peekable();
    while let Some(b) = bytes.next() {
        match b {
            b'0'..=b'9' => {
                let digit = i64::from(b - b'0');
                total = if negative {
                    total.saturating_mul(10).saturating_sub(digit)
                } else {
                    total.saturating_mul(10).saturating_add(digit)
                };
                prev_digit = true;
            }
            b'_' if prev_digit && matches!(bytes.peek(), Some(b'0'..=b'9')) => {
                prev_digit = false;
            }
            _ => break,
        }
    }
    total
}
