//! HTTP protocol layer module
//!
//! Content-type detection, the response envelope, and its CGI serialization.

pub mod cgi;
pub mod mime;
pub mod response;

// Re-export commonly used types
pub use response::{
    build_error_response, build_file_response, ErrorResponse, ResponseEnvelope,
};
