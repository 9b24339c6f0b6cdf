use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Unrecognized record type {tag:?} on line {line}")]
    UnrecognizedRecordType { line: usize, tag: String },

    #[error("Session record on line {line} has no preceding user record")]
    OrphanSessionRecord { line: usize },
}
