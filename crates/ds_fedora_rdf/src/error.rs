use thiserror::Error;

use crate::RecordType;

#[derive(Debug, Error)]
pub enum Error {
    #[error("record is missing required field `{field}`")]
    MalformedRecord { field: &'static str },
    #[error("unsupported record type `{0}`")]
    UnsupportedRecordType(String),
    #[error("{record_type} record has no ancestor reference in `value.{field}`")]
    MissingAncestorReference {
        record_type: RecordType,
        field: &'static str,
    },
    #[error("`{field}` value `{id}` is not a usable container path segment")]
    InvalidPathSegment { field: &'static str, id: String },
    #[error("`{0}` is not a valid IRI")]
    InvalidIri(String),
    #[error("invalid mapping rule `{key}`: {reason}")]
    InvalidRule { key: String, reason: String },
}
