//! Failure taxonomy for upstream metric fetches and its JSON envelopes.

use serde::Serialize;
use serde_json::ser::Formatter;
use std::io;
use thiserror::Error;

/// Returned when no access token is configured.
pub const MISSING_TOKEN_MESSAGE: &str = "Access token not found in .env file.";

/// Returned by tools that also accept the token as an argument.
pub const MISSING_TOKEN_OR_ARGUMENT_MESSAGE: &str = "Access token not provided. Please provide it as a parameter or set the GITEE_ACCESS_TOKEN environment variable.";

/// Why a fetch produced no upstream body.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No token available; detected before any I/O.
    #[error("{message}")]
    MissingCredential { message: &'static str },

    /// Upstream answered with a non-2xx status.
    #[error("upstream returned HTTP {status}")]
    UpstreamHttp { status: u16, body: String },

    /// The request never completed (DNS, connect, timeout, body read).
    #[error("request failed: {details}")]
    Transport { details: String },
}

#[derive(Serialize)]
struct Envelope<'a> {
    status: u16,
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a str>,
}

impl FetchError {
    pub(crate) fn from_reqwest(err: &reqwest::Error) -> Self {
        Self::Transport {
            details: describe_chain(err),
        }
    }

    /// Status code reported in the envelope.
    pub fn status(&self) -> u16 {
        match self {
            Self::MissingCredential { .. } => 401,
            Self::UpstreamHttp { status, .. } => *status,
            Self::Transport { .. } => 500,
        }
    }

    /// Render the JSON envelope handed back to the tool caller.
    pub fn to_envelope(&self) -> String {
        let envelope = match self {
            Self::MissingCredential { message } => Envelope {
                status: self.status(),
                error: message,
                details: None,
            },
            Self::UpstreamHttp { body, .. } => Envelope {
                status: self.status(),
                error: "HTTP Error",
                details: Some(body),
            },
            Self::Transport { details } => Envelope {
                status: self.status(),
                error: "Request Failed",
                details: Some(details),
            },
        };

        // Only integers and strings: serialization cannot fail.
        let mut serializer = serde_json::Serializer::with_formatter(Vec::new(), EnvelopeFormatter);
        if envelope.serialize(&mut serializer).is_err() {
            return String::new();
        }
        String::from_utf8(serializer.into_inner()).unwrap_or_default()
    }
}

/// `", "` and `": "` separators, non-ASCII escaped as `\uXXXX`.
///
/// Produces the same text as the envelopes the Compass services have always
/// returned, e.g. `{"status": 401, "error": "..."}`.
struct EnvelopeFormatter;

impl Formatter for EnvelopeFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (index, ch) in fragment.char_indices() {
            if ch.is_ascii() {
                continue;
            }
            writer.write_all(&fragment.as_bytes()[start..index])?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = index + ch.len_utf8();
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }
}

/// Flatten an error and all of its sources into one line.
fn describe_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut details = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !details.contains(&cause_text) {
            details.push_str(": ");
            details.push_str(&cause_text);
        }
        source = cause.source();
    }
    details
}
