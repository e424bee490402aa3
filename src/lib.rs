//! Static file responder for CGI invocation
//!
//! One process serves one request: `REQUEST_URI` and `SCRIPT_FILENAME` come in
//! through the environment, the response goes out on stdout.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod request;

pub use crate::config::Settings;
pub use crate::error::{ResponderError, TransmissionFault};
pub use crate::handler::{handle_request, serve};
pub use crate::request::Request;
