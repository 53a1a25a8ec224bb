//! Error types for the ambient backdrop
//!
//! This module defines the error type used by resource creation, the renderer
//! seam and configuration validation. Host-driven operations on the
//! `Backdrop` never surface these errors: they are logged and contained.

use std::fmt;

/// Result type for backdrop operations
pub type Result<T> = std::result::Result<T, Error>;

/// Backdrop errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Backend-specific error (renderer failure, lost context, etc.)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (unknown or already disposed handle, bad geometry)
    InvalidResource(String),

    /// Initialization failed (renderer, draw surface, scene)
    InitializationFailed(String),

    /// Configuration rejected by validation
    InvalidConfig(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Log an ERROR (with file:line) and build an `Error::BackendError`
///
/// # Example
///
/// ```ignore
/// let err = backdrop_err!("backdrop::Renderer", "render target {} lost", id);
/// ```
#[macro_export]
macro_rules! backdrop_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::log::emit_detailed(
            $crate::log::LogSeverity::Error,
            $source,
            message.clone(),
            file!(),
            line!(),
        );
        $crate::error::Error::BackendError(message)
    }};
}

/// Log an ERROR and return `Err(Error::BackendError)` from the current function
#[macro_export]
macro_rules! backdrop_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::backdrop_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
