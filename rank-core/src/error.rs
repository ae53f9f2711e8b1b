use thiserror::Error;

/// Failures surfaced by the page behaviours. None of them are recovered
/// from; callers report them and stop.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankError {
    #[error("no element with id `{0}`")]
    NotFound(String),
    #[error("ranked value `{value}` has {fields} field(s), expected RANK--USERNAME--TEAM")]
    Malformed { value: String, fields: usize },
    #[error("`{0}` contains the field separator `--`")]
    Separator(String),
    #[error("sortable item has no ranked input")]
    MissingInput,
    #[error("sortable container has no id")]
    MissingContainerId,
    #[error("dom error: {0}")]
    Dom(String),
}

pub type Result<T> = std::result::Result<T, RankError>;
