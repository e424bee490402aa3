//! Request model and interpretation
//!
//! The CGI transport hands the request over in environment variables. They are
//! read exactly once, into a [`Request`], which is then passed through the
//! resolution and response stages by value.

use crate::error::ResponderError;
use std::ffi::OsString;
use std::path::PathBuf;

pub const REQUEST_URI: &str = "REQUEST_URI";
pub const SCRIPT_FILENAME: &str = "SCRIPT_FILENAME";
pub const REQUEST_METHOD: &str = "REQUEST_METHOD";
pub const REMOTE_ADDR: &str = "REMOTE_ADDR";

/// A single CGI request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Original request identifier, including mount prefix and query
    pub request_uri: String,
    /// Absolute path of the invoking script
    pub script_filename: PathBuf,
    /// Access-log only
    pub method: Option<String>,
    /// Access-log only
    pub remote_addr: Option<String>,
}

impl Request {
    /// Build the request from the process environment
    pub fn from_env() -> Result<Self, ResponderError> {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// Build the request from an arbitrary variable lookup
    ///
    /// A variable that is set but empty counts as missing. `REQUEST_URI` is
    /// checked before `SCRIPT_FILENAME`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ResponderError>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let request_uri = non_empty(REQUEST_URI)
            .ok_or(ResponderError::MissingVariable(REQUEST_URI))?
            .to_string_lossy()
            .into_owned();
        let script_filename = non_empty(SCRIPT_FILENAME)
            .map(PathBuf::from)
            .ok_or(ResponderError::MissingVariable(SCRIPT_FILENAME))?;

        let text = |key: &str| non_empty(key).map(|v| v.to_string_lossy().into_owned());

        Ok(Self {
            request_uri,
            script_filename,
            method: text(REQUEST_METHOD),
            remote_addr: text(REMOTE_ADDR),
        })
    }

    /// Directory containing the invoking script
    pub fn document_root(&self) -> PathBuf {
        match self.script_filename.parent() {
            Some(parent) if parent.as_os_str().is_empty() => PathBuf::from("."),
            Some(parent) => parent.to_path_buf(),
            // "/" has no parent; it is its own directory
            None => self.script_filename.clone(),
        }
    }
}

/// Extract the logical path from a request identifier
///
/// Everything after the first occurrence of `mount_marker` is the logical path.
/// Without the marker the logical path is `/`. A marker at the very end yields
/// an empty logical path, which resolves like `/`.
pub fn interpret<'a>(request_uri: &'a str, mount_marker: &str) -> &'a str {
    if mount_marker.is_empty() {
        return "/";
    }
    match request_uri.find(mount_marker) {
        Some(idx) => &request_uri[idx + mount_marker.len()..],
        None => "/",
    }
}

/// Drop the `?query` portion of a request identifier
pub fn strip_query(request_uri: &str) -> &str {
    request_uri
        .split_once('?')
        .map_or(request_uri, |(path, _)| path)
}
