use std::fmt::Display;

/// The part of the request head being processed when an error was raised
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    RequestLine,
    Headers,
    Stream,
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::RequestLine => "request line",
            Self::Headers => "headers",
            Self::Stream => "stream",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseErrorKind {
    // Request line
    MalformedRequestLine, // token count != 3
    InvalidMethod,
    InvalidTarget,
    UnsupportedVersion,

    // Headers
    MissingColon,
    InvalidHeaderField, // empty, trailing space or non-tchar name

    // Flow / I/O
    StreamReadFailure, // read error, or EOF before the head was complete
    TooLarge,
}

impl Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::MalformedRequestLine => "malformed request line",
            Self::InvalidMethod => "invalid method",
            Self::InvalidTarget => "invalid target",
            Self::UnsupportedVersion => "unsupported version",
            Self::MissingColon => "missing colon",
            Self::InvalidHeaderField => "invalid header field",
            Self::StreamReadFailure => "stream read failure",
            Self::TooLarge => "request head too large",
        })
    }
}

#[derive(Debug, thiserror::Error)]
#[error("http parse error: {kind} while parsing {location}: {message}")]
pub struct HttpParseError {
    pub kind: ParseErrorKind,
    pub location: Location,
    pub message: String,
    #[source]
    source: Option<std::io::Error>,
}

pub type HttpParseResult<T> = Result<T, HttpParseError>;

impl HttpParseError {
    pub fn new(kind: ParseErrorKind, location: Location, message: impl Into<String>) -> Self {
        Self {
            kind,
            location,
            message: message.into(),
            source: None,
        }
    }

    pub(crate) fn request_line(kind: ParseErrorKind, message: impl Into<String>) -> Self {
        Self::new(kind, Location::RequestLine, message)
    }

    pub(crate) fn headers(kind: ParseErrorKind, message: impl Into<String>) -> Self {
        Self::new(kind, Location::Headers, message)
    }

    pub(crate) fn read_failed(err: std::io::Error) -> Self {
        Self {
            kind: ParseErrorKind::StreamReadFailure,
            location: Location::Stream,
            message: err.to_string(),
            source: Some(err),
        }
    }

    pub(crate) fn unexpected_eof(buffered: usize) -> Self {
        Self::new(
            ParseErrorKind::StreamReadFailure,
            Location::Stream,
            format!("stream closed before the request head was complete ({buffered} bytes unparsed)"),
        )
    }

    /// The underlying I/O error, if the stream itself failed
    pub fn io_error(&self) -> Option<&std::io::Error> {
        self.source.as_ref()
    }
}
