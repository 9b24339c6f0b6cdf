//! # sessreport-records
//!
//! Record classification and the user/session graph for sessreport.
//!
//! ## Key Types
//!
//! - [`Record`] - One classified input line
//! - [`User`] / [`Session`] - The entities built from the record stream
//! - [`UserRegistry`] - Attaches sessions to the most recent user
//! - [`Population`] - The read-only result of a completed registry pass
//!
//! ## Input Format
//!
//! ```text
//! user,<id>,<first_name>,<last_name>,<age>
//! session,<user_id>,<session_id>,<browser>,<time>,<date>
//! ```

mod error;
pub mod reader;
pub mod registry;
pub mod types;

pub use error::RecordError;
pub use reader::{read_record, FieldLayout, SESSION_LAYOUT, SESSION_TAG, USER_LAYOUT, USER_TAG};
pub use registry::{Population, UserRegistry};
pub use types::{parse_minutes, Record, Session, User, UserRecord};
