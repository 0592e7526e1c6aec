use thiserror::Error;

/// Construction failures of a [`MaterializedResultSet`](super::MaterializedResultSet).
///
/// Messages never include record values.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultSetError {
    #[error("A record type must be supplied when the record list is empty")]
    MissingRecordType,
    #[error("All records must share the same type")]
    MixedRecordTypes,
}
