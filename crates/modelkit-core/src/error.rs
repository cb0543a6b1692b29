use std::fmt;
use thiserror::Error as ThisError;

///
/// ModelError
///
/// Structured model-building error with a stable classification.
/// Conventions return it for their own faults; the dispatcher passes those
/// through untouched.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("{message}")]
pub struct ModelError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl ModelError {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
        }
    }

    /// Construct a dispatch-boundary argument error.
    pub(crate) fn dispatch_argument(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::InvalidArgument,
            ErrorOrigin::Dispatcher,
            message.into(),
        )
    }

    /// Construct a builder-origin argument error.
    pub(crate) fn builder_argument(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::InvalidArgument,
            ErrorOrigin::Builder,
            message.into(),
        )
    }

    pub(crate) fn builder_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::NotFound, ErrorOrigin::Builder, message.into())
    }

    pub(crate) fn builder_conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Conflict, ErrorOrigin::Builder, message.into())
    }

    /// Construct the error reported when a convention vetoes an operation
    /// that has no way to surface an absent result.
    pub(crate) fn vetoed(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Vetoed, origin, message.into())
    }

    /// Construct a fault raised by a convention's own logic.
    pub fn convention(name: &str, message: impl Into<String>) -> Self {
        let message = message.into();

        Self::new(
            ErrorClass::Fault,
            ErrorOrigin::Convention,
            format!("convention '{name}' failed: {message}"),
        )
    }

    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self.class, ErrorClass::InvalidArgument)
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

///
/// ErrorClass
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    InvalidArgument,
    NotFound,
    Conflict,
    Vetoed,
    Fault,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InvalidArgument => "invalid_argument",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Vetoed => "vetoed",
            Self::Fault => "fault",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Builder,
    Convention,
    Dispatcher,
    Session,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Builder => "builder",
            Self::Convention => "convention",
            Self::Dispatcher => "dispatcher",
            Self::Session => "session",
        };
        write!(f, "{label}")
    }
}
