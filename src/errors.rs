//! Error types with diagnostics using miette
//!
//! The geometry kernel itself is infallible; errors only arise at the
//! controller boundary where embedder-provided values enter.

use miette::Diagnostic;
use thiserror::Error;

use crate::types::NumericError;

/// Errors raised by the ribbon controller
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum RibbonError {
    #[error("ribbon is already attached to a container")]
    #[diagnostic(
        code(ribbontag::controller::already_attached),
        help("call `detach` before wrapping another container")
    )]
    AlreadyAttached,

    #[error("invalid value for `{field}`")]
    #[diagnostic(code(ribbontag::style::invalid_value))]
    InvalidValue {
        field: &'static str,
        #[source]
        source: NumericError,
    },

    #[error("invalid container size {width}x{height}")]
    #[diagnostic(
        code(ribbontag::controller::invalid_container),
        help("container extents must be finite and non-negative")
    )]
    InvalidContainer { width: f64, height: f64 },
}

impl RibbonError {
    pub(crate) fn invalid(field: &'static str) -> impl FnOnce(NumericError) -> RibbonError {
        move |source| RibbonError::InvalidValue { field, source }
    }
}
