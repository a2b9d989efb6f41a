use thiserror::Error;

/// Errors raised by the rating core.
///
/// Everything outside `rating` works with `anyhow::Result` and wraps these
/// with context where they cross a service boundary.
#[derive(Debug, Error, PartialEq)]
pub enum RatingError {
    #[error("alias table contains a cycle: {}", chain.join(" -> "))]
    AliasCycle { chain: Vec<String> },

    #[error("alias '{name}' is configured more than once")]
    DuplicateAlias { name: String },

    #[error("match in tournament '{tournament}' references unknown participant {participant_id}")]
    UnknownParticipant {
        tournament: String,
        participant_id: i64,
    },

    #[error("no competitor named '{name}'")]
    UnknownCompetitor { name: String },

    #[error("unrecognized score '{score}'")]
    UnrecognizedScore { score: String },
}

pub type RatingResult<T> = Result<T, RatingError>;
