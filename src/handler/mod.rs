//! Request handler module
//!
//! Maps one CGI request onto a file under the document root and turns the
//! outcome into a response envelope.

pub mod pipeline;
pub mod resolver;
pub mod static_files;

// Re-export main entry points
pub use pipeline::{handle_request, serve};
