//! Error taxonomy
//!
//! Every variant of [`ResponderError`] is terminal for the invocation and maps to
//! exactly one error envelope. [`TransmissionFault`] covers failures while the
//! response itself is being written, where no envelope can be produced anymore.

use hyper::StatusCode;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Which path could not be turned into an absolute form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSubject {
    DocumentRoot,
    Target,
}

impl std::fmt::Display for PathSubject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DocumentRoot => write!(f, "document root"),
            Self::Target => write!(f, "target path"),
        }
    }
}

/// Why a target is reported as absent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundReason {
    Missing,
    Directory,
    Unreadable,
}

/// Request-terminating failures, one per error class
#[derive(Debug, Error)]
pub enum ResponderError {
    #[error("{0} environment variable is not set")]
    MissingVariable(&'static str),

    #[error("failed to resolve {subject}: {source}")]
    PathResolution {
        subject: PathSubject,
        #[source]
        source: io::Error,
    },

    #[error("path escapes document root: {}", .requested.display())]
    PathTraversal { requested: PathBuf },

    #[error("not found ({reason:?}): {}", .path.display())]
    NotFound {
        path: PathBuf,
        reason: NotFoundReason,
        /// Underlying stat/open failure, absent for a directory
        #[source]
        source: Option<io::Error>,
    },
}

impl ResponderError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MissingVariable(_) | Self::PathResolution { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::PathTraversal { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    /// Fixed client-facing message; never carries filesystem detail
    pub fn public_message(&self) -> String {
        match self {
            Self::MissingVariable(name) => format!("{name} environment variable is not set."),
            Self::PathResolution {
                subject: PathSubject::Target,
                ..
            } => "Failed to resolve file path.".to_string(),
            Self::PathResolution {
                subject: PathSubject::DocumentRoot,
                ..
            } => "Failed to resolve web root path.".to_string(),
            Self::PathTraversal { .. } => {
                "Access denied. Path traversal attempt detected.".to_string()
            }
            Self::NotFound {
                reason: NotFoundReason::Unreadable,
                ..
            } => "The requested resource was not found on this server or not readable."
                .to_string(),
            Self::NotFound { .. } => {
                "The requested resource was not found on this server.".to_string()
            }
        }
    }
}

/// Failures while writing the response to the output channel
#[derive(Debug, Error)]
pub enum TransmissionFault {
    /// Header block could not be written
    #[error("failed to write response headers: {0}")]
    Headers(#[source] io::Error),

    /// Copy failed after the header block was committed
    #[error("body transmission failed after headers were sent: {0}")]
    Body(#[source] io::Error),

    #[error("body truncated after headers were sent: {sent} of {expected} bytes")]
    Truncated { expected: u64, sent: u64 },
}

impl TransmissionFault {
    /// Whether the header block had already reached the output channel
    pub const fn headers_committed(&self) -> bool {
        !matches!(self, Self::Headers(_))
    }
}
