mod line;
pub use line::*;

use log::trace;

use crate::http::{header::Headers, method::Method, parser::HttpParseResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Initialized,
    ParsingHeaders,
    Done,
}

/// Outcome of a single [`Request::parse`] step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// No complete line is buffered yet
    NeedMoreData,
    /// This many bytes, always whole lines, were consumed from the front of the buffer
    Consumed(usize),
    /// The request was already complete, nothing was consumed
    Finished,
}

impl Progress {
    /// Bytes consumed by the step, zero unless [`Progress::Consumed`]
    pub fn consumed(&self) -> usize {
        match self {
            Self::Consumed(n) => *n,
            Self::NeedMoreData | Self::Finished => 0,
        }
    }
}

/// An HTTP request head, filled in incrementally by [`Request::parse`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    request_line: Option<RequestLine>,
    headers: Headers,
    state: RequestState,
}

static_assertions::assert_impl_all!(Request: Send, Sync);

impl Default for Request {
    fn default() -> Self {
        Self::new()
    }
}

impl Request {
    pub fn new() -> Self {
        Self {
            request_line: None,
            headers: Headers::new(),
            state: RequestState::Initialized,
        }
    }

    /// Feeds the unconsumed front of the stream to the parser.
    ///
    /// The caller must drop [`Progress::consumed`] bytes from the front of its
    /// buffer before the next call. An error is terminal for this request.
    pub fn parse(&mut self, data: &[u8]) -> HttpParseResult<Progress> {
        match self.state {
            RequestState::Initialized => match RequestLine::parse(data)? {
                Some((line, n)) => {
                    trace!("request line {} {} HTTP/{}", line.method, line.target, line.http_version);
                    self.request_line = Some(line);
                    self.state = RequestState::ParsingHeaders;
                    Ok(Progress::Consumed(n))
                }
                None => Ok(Progress::NeedMoreData),
            },
            RequestState::ParsingHeaders => {
                let (n, done) = self.headers.parse(data)?;
                if done {
                    self.state = RequestState::Done;
                }
                trace!("consumed {} header bytes, state {:?}", n, self.state);
                Ok(match n {
                    0 => Progress::NeedMoreData,
                    n => Progress::Consumed(n),
                })
            }
            RequestState::Done => Ok(Progress::Finished),
        }
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == RequestState::Done
    }

    /// `None` until the request line has been parsed
    pub fn request_line(&self) -> Option<&RequestLine> {
        self.request_line.as_ref()
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn method(&self) -> Option<Method> {
        self.request_line.as_ref().map(|line| line.method)
    }

    pub fn target(&self) -> Option<&str> {
        self.request_line.as_ref().map(|line| line.target.as_str())
    }

    pub fn http_version(&self) -> Option<&str> {
        self.request_line.as_ref().map(|line| line.http_version.as_str())
    }
}
