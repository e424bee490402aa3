//! MIME type detection module
//!
//! Returns the corresponding Content-Type based on file extension.

use std::path::Path;

/// Fallback for unknown or missing extensions
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Get MIME Content-Type for an already lower-cased extension
///
/// # Examples
/// ```
/// use cgi_static::http::mime::get_content_type;
/// assert_eq!(get_content_type(Some("html")), "text/html; charset=UTF-8");
/// assert_eq!(get_content_type(Some("ico")), "image/x-icon");
/// assert_eq!(get_content_type(None), "application/octet-stream");
/// ```
pub fn get_content_type(extension: Option<&str>) -> &'static str {
    match extension {
        // Text
        Some("html" | "htm") => "text/html; charset=UTF-8",
        Some("css") => "text/css; charset=UTF-8",
        Some("txt") => "text/plain; charset=UTF-8",
        Some("js") => "application/javascript; charset=UTF-8",

        // Images
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("ico") => "image/x-icon",

        // Default
        _ => OCTET_STREAM,
    }
}

/// Content-Type for a file name, matching the extension case-insensitively
pub fn content_type_for(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    get_content_type(extension.as_deref())
}
