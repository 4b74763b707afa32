use std::path::PathBuf;

use thiserror::Error;

use super::{Gender, QuestionId};

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed content file: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("question pool is empty")]
    EmptyQuestionPool,
    #[error("question id {0} appears more than once")]
    DuplicateQuestionId(QuestionId),
    #[error("question {0} has no options")]
    NoOptions(QuestionId),
    #[error("question {question} shows {label:?} on more than one {gender} option")]
    DuplicateOptionLabel {
        question: QuestionId,
        gender: Gender,
        label: String,
    },
    #[error("{bucket} {field} pool is empty")]
    EmptyTextPool {
        bucket: &'static str,
        field: &'static str,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("choice {choice} is out of range, question has {available} options")]
    InvalidChoice { choice: usize, available: usize },
    #[error("quiz is already finished")]
    Finished,
}
