//! Request pipeline
//!
//! Entry point for one invocation: interpret, resolve and guard, open, emit.
//! Every stage exits early with a [`ResponderError`]; there is no retry.

use crate::config::Settings;
use crate::error::ResponderError;
use crate::handler::{resolver, static_files};
use crate::http::{self, ResponseEnvelope};
use crate::logger::{self, RequestLogEntry};
use crate::request::{self, Request};
use std::error::Error as _;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

/// Where a request landed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    /// Lexical target, named the way the client asked for it
    pub requested: PathBuf,
    /// Path to open; the canonical form when links are confined
    pub path: PathBuf,
}

/// Run the request through interpretation, resolution and the file checks
///
/// Returns the path that will be opened, without opening it.
pub fn locate(request: &Request, settings: &Settings) -> Result<Located, ResponderError> {
    let uri = if settings.strip_query {
        request::strip_query(&request.request_uri)
    } else {
        request.request_uri.as_str()
    };
    let logical_path = request::interpret(uri, &settings.mount_marker);

    let resolved = resolver::resolve(
        logical_path,
        &request.document_root(),
        &settings.index_file,
    )?;

    let path = if settings.confine_symlinks {
        resolver::confine(&resolved)?
    } else {
        resolved.target.clone()
    };
    Ok(Located {
        requested: resolved.target,
        path,
    })
}

/// Produce the single response envelope for a request
pub fn handle_request(
    request: Result<Request, ResponderError>,
    settings: &Settings,
) -> ResponseEnvelope {
    let result = request
        .and_then(|req| locate(&req, settings))
        .and_then(|located| static_files::open(&located.path, &located.requested));

    match result {
        Ok(file) => http::build_file_response(file),
        Err(err) => {
            log_failure(&err);
            http::build_error_response(&err)
        }
    }
}

/// Handle the request and write the response to `out`
///
/// Returns the status that was sent. Transmission faults are logged here and
/// never turned into a second response.
pub fn serve<W: Write>(
    request: Result<Request, ResponderError>,
    settings: &Settings,
    out: W,
) -> hyper::StatusCode {
    let started = Instant::now();
    let mut entry = log_entry_for(&request);

    let envelope = handle_request(request, settings);
    let status = envelope.status();

    let body_bytes = match http::cgi::write_response(envelope, out) {
        Ok(sent) => sent,
        Err(fault) => {
            logger::log_transmission_fault(&fault);
            0
        }
    };

    if settings.logging.access_log {
        entry.status = status.as_u16();
        entry.body_bytes = body_bytes;
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &settings.logging.format);
    }

    status
}

fn log_entry_for(request: &Result<Request, ResponderError>) -> RequestLogEntry {
    match request {
        Ok(req) => {
            let mut entry = RequestLogEntry::new(req.request_uri.clone());
            entry.method.clone_from(&req.method);
            entry.remote_addr.clone_from(&req.remote_addr);
            entry
        }
        Err(_) => RequestLogEntry::new(String::new()),
    }
}

fn log_failure(err: &ResponderError) {
    match err {
        ResponderError::PathTraversal { .. } => {
            logger::log_warning(&format!("Path traversal attempt blocked: {err}"));
        }
        ResponderError::NotFound { .. } => {
            logger::log_warning(&with_cause(err));
        }
        ResponderError::MissingVariable(_) | ResponderError::PathResolution { .. } => {
            logger::log_error(&with_cause(err));
        }
    }
}

/// Error text followed by its source, when it has one
fn with_cause(err: &ResponderError) -> String {
    match err {
        // Already part of the message
        ResponderError::PathResolution { .. } => err.to_string(),
        _ => match err.source() {
            Some(cause) => format!("{err}: {cause}"),
            None => err.to_string(),
        },
    }
}
