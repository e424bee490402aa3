//! Response envelope module
//!
//! Exactly one envelope is produced per invocation: either a file to stream
//! or an error page. Serialization to the CGI wire format lives in
//! [`crate::http::cgi`].

use crate::error::ResponderError;
use crate::handler::static_files::StaticFile;
use hyper::StatusCode;
use std::fs::File;

/// Content-Type of every error page
pub const HTML_CONTENT_TYPE: &str = "text/html; charset=UTF-8";

/// The single response of an invocation
#[derive(Debug)]
pub enum ResponseEnvelope<B = File> {
    Success {
        content_type: &'static str,
        content_length: u64,
        body: B,
    },
    Error(ErrorResponse),
}

/// Status line plus a human-readable message, rendered as a minimal HTML page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub status: StatusCode,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Short status phrase, e.g. `Not Found`
    pub fn reason(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("Unknown")
    }

    /// HTML document embedding code, phrase and message in title and body
    pub fn html_body(&self) -> String {
        let code = self.status.as_u16();
        let reason = self.reason();
        format!(
            "<html>\n\
             <head><title>{code} {reason}</title></head>\n\
             <body>\n\
             <h1>{code} {reason}</h1>\n\
             <p>{}</p>\n\
             </body>\n\
             </html>\n",
            self.message
        )
    }
}

impl<B> ResponseEnvelope<B> {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Success { .. } => StatusCode::OK,
            Self::Error(err) => err.status,
        }
    }
}

/// Build the success envelope for an opened file
pub fn build_file_response(file: StaticFile) -> ResponseEnvelope {
    ResponseEnvelope::Success {
        content_type: file.content_type,
        content_length: file.content_length,
        body: file.file,
    }
}

/// Build the error envelope for a request-terminating failure
pub fn build_error_response<B>(err: &ResponderError) -> ResponseEnvelope<B> {
    ResponseEnvelope::Error(ErrorResponse::new(err.status(), err.public_message()))
}
