use std::time::Duration;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for theme derivation
#[derive(Error, Diagnostic, Debug)]
pub enum TintError {
    #[error("not an image reference: {reference}")]
    #[diagnostic(
        code(tint::reference),
        help("image references must be wrapped as url(\"...\")")
    )]
    InvalidReference { reference: String },

    #[error("failed to load background image {location}: {message}")]
    #[diagnostic(code(tint::decode))]
    Decode { location: String, message: String },

    #[error("palette extraction failed: {message}")]
    #[diagnostic(code(tint::extract))]
    Extraction {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("image load timed out after {after:?}: {location}")]
    #[diagnostic(code(tint::timeout))]
    Timeout { location: String, after: Duration },
}

pub type Result<T> = std::result::Result<T, TintError>;
