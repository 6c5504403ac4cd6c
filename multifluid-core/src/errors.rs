use crate::parameter::ParameterError;
use thiserror::Error;

/// Errors raised by mixture models and state construction.
#[derive(Error, Debug)]
pub enum EosError {
    #[error("{0}")]
    Error(String),
    #[error("The mixture model has {0} components but {1} mole fractions were given.")]
    IncompatibleComponents(usize, usize),
    #[error("{0}: invalid {1} ({2}).")]
    InvalidState(String, String, f64),
    #[error("The composition convention '{0}' is not known. ['independent', 'dependent']")]
    InvalidConvention(String),
    #[error(transparent)]
    ParameterError(#[from] ParameterError),
}

/// Convenience type for `Result<T, EosError>`.
pub type EosResult<T> = Result<T, EosError>;
