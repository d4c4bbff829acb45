use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Voter has already cast a vote: {0}")]
    DuplicateSubmitter(String),

    #[error("Invalid submission: missing or empty field `{0}`")]
    InvalidSubmission(String),

    #[error("Unknown candidate: {0}")]
    UnknownChoice(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl LedgerError {
    pub fn duplicate_submitter(submitter_id: &str) -> Self {
        Self::DuplicateSubmitter(submitter_id.to_string())
    }

    pub fn invalid_submission(field: &str) -> Self {
        Self::InvalidSubmission(field.to_string())
    }

    pub fn unknown_choice(choice_id: &str) -> Self {
        Self::UnknownChoice(choice_id.to_string())
    }
}
