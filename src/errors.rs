use miette::Diagnostic;
use thiserror::Error;

use crate::catalog::InputError;
use crate::permissions::IntegrationError;

#[derive(Debug, Error, Diagnostic)]
pub enum BridgeError {
    #[error("I/O error: {0}")]
    #[diagnostic(code(permbridge::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(permbridge::serde))]
    Serde(#[from] serde_json::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Integration(#[from] IntegrationError),
}
