use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown field name: '{0}'")]
    UnknownField(String),

    #[error("Unknown education level: '{0}'")]
    UnknownEducationLevel(String),
}
