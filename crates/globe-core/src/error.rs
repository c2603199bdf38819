use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GlobeError {
    #[error("no scene element named `{0}`")]
    UnknownElement(String),
    #[error("scene element `{0}` is already registered")]
    DuplicateElement(String),
}

pub type Result<T> = std::result::Result<T, GlobeError>;
