use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SharedError {
    #[error("Unknown user role: {0}")]
    UnknownRole(String),

    #[error("Unknown booking status: {0}")]
    UnknownStatus(String),

    #[error("Unknown language: {0}")]
    UnknownLanguage(String),
}
