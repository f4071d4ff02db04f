// src/error.rs
use thiserror::Error;

/// Failures that end a widget instance. None of them reach the host page: the
/// lifecycle logs a warning and removes the element instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ZoomError {
    #[error("{0}")]
    ConfigResolution(String),
    #[error("missing <img slot=\"msc-zoom-vision\"> child")]
    SourceMissing,
    #[error("image source failed to load: {0}")]
    SourceLoad(String),
    #[error("unsupported environment: {0}")]
    Unsupported(String),
    #[error("{0}")]
    Dom(String),
}

impl ZoomError {
    /// Whether the instance removes itself from the document on this error.
    pub fn is_instance_fatal(&self) -> bool {
        matches!(
            self,
            ZoomError::ConfigResolution(_) | ZoomError::SourceMissing | ZoomError::SourceLoad(_)
        )
    }
}
