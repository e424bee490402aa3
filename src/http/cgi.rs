//! CGI response emitter
//!
//! Serializes a [`ResponseEnvelope`] onto the output channel: header lines,
//! one blank line, then the body. The header block is flushed before the
//! first body byte is written, and once it is out no further status can be
//! signalled; body failures surface as [`TransmissionFault`] for logging only.

use crate::error::TransmissionFault;
use crate::http::response::{ErrorResponse, ResponseEnvelope, HTML_CONTENT_TYPE};
use std::io::{self, BufWriter, Read, Write};

/// Header block of a successful response
fn success_head(content_type: &str, content_length: u64) -> String {
    format!("Content-Type: {content_type}\nContent-Length: {content_length}\n\n")
}

/// Header block of an error response
fn error_head(err: &ErrorResponse) -> String {
    format!(
        "Status: {} {}\nContent-Type: {HTML_CONTENT_TYPE}\n\n",
        err.status.as_u16(),
        err.reason(),
    )
}

/// Write the envelope and return the number of body bytes sent
pub fn write_response<W, B>(envelope: ResponseEnvelope<B>, out: W) -> Result<u64, TransmissionFault>
where
    W: Write,
    B: Read,
{
    let mut out = BufWriter::new(out);
    match envelope {
        ResponseEnvelope::Success {
            content_type,
            content_length,
            body,
        } => {
            out.write_all(success_head(content_type, content_length).as_bytes())
                .and_then(|()| out.flush())
                .map_err(TransmissionFault::Headers)?;

            // Never send more than the declared length
            let sent = io::copy(&mut body.take(content_length), &mut out)
                .and_then(|sent| out.flush().map(|()| sent))
                .map_err(TransmissionFault::Body)?;
            if sent < content_length {
                return Err(TransmissionFault::Truncated {
                    expected: content_length,
                    sent,
                });
            }
            Ok(sent)
        }
        ResponseEnvelope::Error(err) => {
            let body = err.html_body();
            out.write_all(error_head(&err).as_bytes())
                .and_then(|()| out.write_all(body.as_bytes()))
                .and_then(|()| out.flush())
                .map_err(TransmissionFault::Headers)?;
            Ok(body.len() as u64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::StatusCode;

    /// Reader that yields some bytes and then fails
    struct FailingReader {
        remaining: &'static [u8],
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.remaining.is_empty() {
                return Err(io::Error::other("disk went away"));
            }
            let n = buf.len().min(self.remaining.len());
            buf[..n].copy_from_slice(&self.remaining[..n]);
            self.remaining = &self.remaining[n..];
            Ok(n)
        }
    }

    /// Writer that rejects every write
    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_success_framing() {
        let mut out = Vec::new();
        let envelope = ResponseEnvelope::Success {
            content_type: "text/html; charset=UTF-8",
            content_length: 12,
            body: &b"<p>about</p>"[..],
        };
        let sent = write_response(envelope, &mut out).unwrap();
        assert_eq!(sent, 12);
        assert_eq!(
            out,
            b"Content-Type: text/html; charset=UTF-8\nContent-Length: 12\n\n<p>about</p>"
        );
    }

    #[test]
    fn test_binary_body_verbatim() {
        let body: &[u8] = &[0x89, b'P', b'N', b'G', 0x00, 0xff, b'\n', b'\r'];
        let mut out = Vec::new();
        let envelope = ResponseEnvelope::Success {
            content_type: "image/png",
            content_length: body.len() as u64,
            body,
        };
        write_response(envelope, &mut out).unwrap();
        let head = b"Content-Type: image/png\nContent-Length: 8\n\n";
        assert_eq!(&out[..head.len()], head);
        assert_eq!(&out[head.len()..], body);
    }

    #[test]
    fn test_body_capped_at_content_length() {
        let mut out = Vec::new();
        let envelope = ResponseEnvelope::Success {
            content_type: "text/plain; charset=UTF-8",
            content_length: 3,
            body: &b"abcdef"[..],
        };
        assert_eq!(write_response(envelope, &mut out).unwrap(), 3);
        assert!(out.ends_with(b"\n\nabc"));
    }

    #[test]
    fn test_short_body_is_truncation_fault() {
        let mut out = Vec::new();
        let envelope = ResponseEnvelope::Success {
            content_type: "text/plain; charset=UTF-8",
            content_length: 10,
            body: &b"abc"[..],
        };
        let fault = write_response(envelope, &mut out).unwrap_err();
        assert!(matches!(
            fault,
            TransmissionFault::Truncated {
                expected: 10,
                sent: 3
            }
        ));
        // Headers went out once; nothing was appended after the failure
        assert_eq!(out, b"Content-Type: text/plain; charset=UTF-8\nContent-Length: 10\n\nabc");
    }

    #[test]
    fn test_mid_copy_failure_emits_no_second_status() {
        let mut out = Vec::new();
        let envelope = ResponseEnvelope::Success {
            content_type: "text/plain; charset=UTF-8",
            content_length: 100,
            body: FailingReader { remaining: b"partial" },
        };
        let fault = write_response(envelope, &mut out).unwrap_err();
        assert!(matches!(fault, TransmissionFault::Body(_)));
        assert!(fault.headers_committed());

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Content-Type: text/plain; charset=UTF-8\nContent-Length: 100\n\n"));
        assert!(!text.contains("Status:"));
    }

    #[test]
    fn test_error_framing() {
        let mut out = Vec::new();
        let envelope: ResponseEnvelope<&[u8]> = ResponseEnvelope::Error(ErrorResponse::new(
            StatusCode::FORBIDDEN,
            "Access denied. Path traversal attempt detected.",
        ));
        write_response(envelope, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with(
            "Status: 403 Forbidden\nContent-Type: text/html; charset=UTF-8\n\n<html>\n"
        ));
        assert!(text.contains("<title>403 Forbidden</title>"));
        assert!(text.contains("<h1>403 Forbidden</h1>"));
        assert!(text.contains("<p>Access denied. Path traversal attempt detected.</p>"));
    }

    #[test]
    fn test_closed_output_is_header_fault() {
        let envelope = ResponseEnvelope::Success {
            content_type: "text/plain; charset=UTF-8",
            content_length: 2,
            body: &b"ok"[..],
        };
        let fault = write_response(envelope, ClosedPipe).unwrap_err();
        assert!(matches!(fault, TransmissionFault::Headers(_)));
        assert!(!fault.headers_committed());
    }
}
