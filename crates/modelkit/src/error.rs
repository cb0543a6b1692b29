use derive_more::Display;
use modelkit_config::ConfigError;
use modelkit_core::error::{ErrorClass, ErrorOrigin as CoreErrorOrigin, ModelError};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }
}

impl From<ModelError> for Error {
    fn from(err: ModelError) -> Self {
        let kind = match err.class {
            ErrorClass::InvalidArgument => ErrorKind::InvalidArgument,
            ErrorClass::NotFound => ErrorKind::NotFound,
            ErrorClass::Conflict => ErrorKind::Conflict,
            ErrorClass::Vetoed => ErrorKind::Vetoed,
            ErrorClass::Fault => ErrorKind::Convention,
        };

        Self::new(kind, err.origin.into(), err.message)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        let kind = match err {
            ConfigError::Io { .. } => ConfigErrorKind::Io,
            ConfigError::Parse(_) => ConfigErrorKind::Parse,
            ConfigError::UnsupportedEvent { .. }
            | ConfigError::DuplicateConvention { .. }
            | ConfigError::InvalidValue { .. } => ConfigErrorKind::Invalid,
        };

        Self::new(ErrorKind::Config(kind), ErrorOrigin::Config, err.to_string())
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    /// Malformed input, or a builder that is no longer part of the model.
    InvalidArgument,
    NotFound,
    Conflict,

    /// A convention refused an operation that cannot report absence.
    Vetoed,

    /// A convention failed in its own logic.
    Convention,

    Config(ConfigErrorKind),
}

///
/// ConfigErrorKind
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ConfigErrorKind {
    Io,
    Parse,

    /// Parsed, but names an impossible convention layout or value.
    Invalid,
}

///
/// ErrorOrigin
/// Public origin taxonomy for callers.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Builder,
    Config,
    Convention,
    Dispatcher,
    Session,
}

impl From<CoreErrorOrigin> for ErrorOrigin {
    fn from(origin: CoreErrorOrigin) -> Self {
        match origin {
            CoreErrorOrigin::Builder => Self::Builder,
            CoreErrorOrigin::Convention => Self::Convention,
            CoreErrorOrigin::Dispatcher => Self::Dispatcher,
            CoreErrorOrigin::Session => Self::Session,
        }
    }
}
