use thiserror::Error;

/// Errors raised while reading or rendering citation records.
#[derive(Error, Debug)]
pub enum Error {
    /// A date field is not a strict `YYYY-MM-DD` string.
    #[error("invalid ISO date {input:?}: {reason}")]
    DateParse { input: String, reason: String },

    /// The `type` discriminant names a citation kind we cannot render.
    #[error("unknown citation type {0:?} (expected \"book\" or \"webpage\")")]
    UnknownType(String),

    #[error("citation record has no \"type\" field")]
    MissingType,

    /// The record's fields do not match the shape its `type` declares.
    #[error("malformed {kind} record: {source}")]
    Record {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
