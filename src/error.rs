use thiserror::Error;

/// Runtime fault, surfaced as [`crate::types::Completion::Throw`] at the
/// point of use. None of these are retryable; they are programmer errors
/// reported to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Fault {
    #[error("cannot read properties of undefined (reading '{0}')")]
    UndefinedAccess(String),
    #[error("{0} is not a function")]
    NotCallable(String),
    #[error("no super method '{0}' in the ancestor chain")]
    NoSuperMethod(String),
    #[error("a {0} cannot be used as a property key")]
    InvalidKey(&'static str),
}

/// Registration-time error. A definition that fails here is never stored,
/// so an unusable descriptor can never be constructed from.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DefineError {
    #[error("cyclic inheritance: '{0}' would appear in its own ancestor chain")]
    CyclicInheritance(String),
    #[error("class '{0}' is already defined")]
    AlreadyDefined(String),
}
