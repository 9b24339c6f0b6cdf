use crate::error::RecordError;
use crate::types::{Record, Session, UserRecord};

pub const USER_TAG: &str = "user";
pub const SESSION_TAG: &str = "session";

const DELIMITER: char = ',';

/// Fixed, ordered field names of one record type.
///
/// Field `i` of the layout is always read from token `i + 1` of the line (token
/// 0 is the tag), so the name to position mapping is fixed at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout<const N: usize> {
    pub tag: &'static str,
    pub fields: [&'static str; N],
}

pub const USER_LAYOUT: FieldLayout<4> = FieldLayout {
    tag: USER_TAG,
    fields: ["id", "first_name", "last_name", "age"],
};

pub const SESSION_LAYOUT: FieldLayout<5> = FieldLayout {
    tag: SESSION_TAG,
    fields: ["user_id", "session_id", "browser", "time", "date"],
};

impl<const N: usize> FieldLayout<N> {
    /// Map the tokens following the tag onto the layout's fields.
    ///
    /// Extra tokens are ignored; missing trailing tokens become `""`.
    pub fn columns<'a>(&self, tokens: &[&'a str]) -> [&'a str; N] {
        std::array::from_fn(|i| tokens.get(i + 1).copied().unwrap_or(""))
    }
}

/// Classify one raw line. `line` is the 1-based line number used in errors.
pub fn read_record(line: usize, raw: &str) -> Result<Record, RecordError> {
    let tokens: Vec<&str> = raw.split(DELIMITER).collect();
    let tag = tokens.first().copied().unwrap_or("");

    match tag {
        USER_TAG => {
            let [id, first_name, last_name, age] = USER_LAYOUT.columns(&tokens);
            Ok(Record::User(UserRecord {
                id: id.to_string(),
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                age: age.to_string(),
            }))
        }
        SESSION_TAG => {
            let [user_id, session_id, browser, time, date] = SESSION_LAYOUT.columns(&tokens);
            Ok(Record::Session(Session {
                user_id: user_id.to_string(),
                session_id: session_id.to_string(),
                browser: browser.to_string(),
                time: time.to_string(),
                date: date.to_string(),
            }))
        }
        other => Err(RecordError::UnrecognizedRecordType {
            line,
            tag: other.to_string(),
        }),
    }
}
