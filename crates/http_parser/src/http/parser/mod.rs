mod error;
pub use error::*;

use bytes::{Buf, BytesMut};
use log::{debug, trace};
use memchr::memmem;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::http::request::{Progress, Request};

/// Line delimiter for the request line and header fields
pub const CRLF: &[u8] = b"\r\n";

/// Position of the first CRLF in `data`
pub fn find_crlf(data: &[u8]) -> Option<usize> {
    memmem::find(data, CRLF)
}

/// Buffer limits for an [`Assembler`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblerConfig {
    /// Spare capacity reserved before every read
    pub read_chunk: usize,
    /// Unparsed bytes that may be held while waiting for a CRLF, which bounds the
    /// longest accepted line
    pub max_buffered: usize,
}

impl AssemblerConfig {
    pub const DEFAULT_READ_CHUNK: usize = 8192;
    pub const DEFAULT_MAX_BUFFERED: usize = 64 * 1024;
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            read_chunk: Self::DEFAULT_READ_CHUNK,
            max_buffered: Self::DEFAULT_MAX_BUFFERED,
        }
    }
}

/// Reads a request head from a byte stream that may deliver it in any fragmentation.
///
/// Bytes are accumulated in a growable buffer, fed to [`Request::parse`], and
/// dropped from the front as whole lines are consumed.
pub struct Assembler<READER: AsyncRead + Unpin> {
    inner: READER,
    buf: BytesMut,
    config: AssemblerConfig,
}

static_assertions::assert_impl_all!(Assembler<tokio::net::TcpStream>: Send, Sync);

impl<READER> Assembler<READER>
where
    READER: AsyncRead + Unpin,
{
    pub fn new(reader: READER) -> Self {
        Self::with_config(reader, AssemblerConfig::default())
    }

    pub fn with_config(reader: READER, config: AssemblerConfig) -> Self {
        Self {
            inner: reader,
            buf: BytesMut::with_capacity(config.read_chunk),
            config,
        }
    }

    /// Bytes received but not consumed by the parser, i.e. whatever followed the
    /// end of the header section
    pub fn buffered(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_inner(self) -> (READER, BytesMut) {
        (self.inner, self.buf)
    }

    async fn read(&mut self) -> HttpParseResult<usize> {
        if self.buf.len() >= self.config.max_buffered {
            debug!("no CRLF within {} buffered bytes", self.buf.len());
            return Err(HttpParseError::new(
                ParseErrorKind::TooLarge,
                Location::Stream,
                format!("no line ending within {} bytes", self.config.max_buffered),
            ));
        }

        self.buf.reserve(self.config.read_chunk);
        match self.inner.read_buf(&mut self.buf).await {
            Ok(0) => Err(HttpParseError::unexpected_eof(self.buf.len())),
            Ok(n) => {
                trace!("read {} bytes, {} buffered", n, self.buf.len());
                Ok(n)
            }
            Err(err) => {
                debug!("read failed: {}", err);
                Err(HttpParseError::read_failed(err))
            }
        }
    }

    /// Parses one request head.
    ///
    /// Reads only when the buffered bytes cannot advance the parser, so bytes
    /// past the final empty line stay in [`Assembler::buffered`].
    pub async fn read_request(&mut self) -> HttpParseResult<Request> {
        let mut request = Request::new();

        while !request.is_done() {
            match request.parse(&self.buf)? {
                Progress::Consumed(n) => self.buf.advance(n),
                Progress::NeedMoreData => {
                    self.read().await?;
                }
                Progress::Finished => break,
            }
        }

        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        pin::Pin,
        task::{Context, Poll},
    };

    use tokio::io::ReadBuf;

    use super::*;
    use crate::http::request::RequestState;

    struct Broken;

    impl AsyncRead for Broken {
        fn poll_read(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            _buf: &mut ReadBuf<'_>,
        ) -> Poll<std::io::Result<()>> {
            Poll::Ready(Err(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "reset by peer",
            )))
        }
    }

    #[test]
    fn crlf_search() {
        assert_eq!(find_crlf(b"abc\r\ndef\r\n"), Some(3));
        assert_eq!(find_crlf(b"\r\n"), Some(0));
        assert_eq!(find_crlf(b"abc\rdef\n"), None);
        assert_eq!(find_crlf(b""), None);
    }

    #[tokio::test]
    async fn whole_request_from_slice() {
        let data: &[u8] = b"DELETE /items/42 HTTP/1.1\r\nHost: localhost\r\n\r\n";
        let mut assembler = Assembler::new(data);
        let request = assembler.read_request().await.unwrap();

        assert_eq!(request.state(), RequestState::Done);
        assert_eq!(request.target(), Some("/items/42"));
        assert!(assembler.buffered().is_empty());
    }

    #[tokio::test]
    async fn trailing_bytes_stay_buffered() {
        let data: &[u8] = b"POST /submit HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello";
        let mut assembler = Assembler::new(data);
        let request = assembler.read_request().await.unwrap();

        assert_eq!(request.headers().get("content-length"), Some("5"));
        assert_eq!(assembler.buffered(), b"hello");
    }

    #[tokio::test]
    async fn eof_before_end_of_headers() {
        let data: &[u8] = b"GET / HTTP/1.1\r\nHost: localhost\r\n";
        let err = Assembler::new(data).read_request().await.unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::StreamReadFailure);
        assert_eq!(err.location, Location::Stream);
        assert!(err.io_error().is_none());
    }

    #[tokio::test]
    async fn empty_stream() {
        let err = Assembler::new(&b""[..]).read_request().await.unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::StreamReadFailure);
    }

    #[tokio::test]
    async fn read_error_is_surfaced() {
        let err = Assembler::new(Broken).read_request().await.unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::StreamReadFailure);
        assert_eq!(
            err.io_error().map(std::io::Error::kind),
            Some(std::io::ErrorKind::ConnectionReset)
        );
    }

    #[tokio::test]
    async fn line_longer_than_limit() {
        let mut data = b"GET /".to_vec();
        data.extend(std::iter::repeat_n(b'a', 200));
        data.extend_from_slice(b" HTTP/1.1\r\n\r\n");

        let config = AssemblerConfig {
            read_chunk: 16,
            max_buffered: 64,
        };
        let err = Assembler::with_config(&data[..], config)
            .read_request()
            .await
            .unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::TooLarge);
    }

    #[tokio::test]
    async fn limit_applies_per_line() {
        let mut data = b"GET / HTTP/1.1\r\n".to_vec();
        for i in 0..20 {
            data.extend_from_slice(format!("X-Header-{i}: value\r\n").as_bytes());
        }
        data.extend_from_slice(b"\r\n");
        assert!(data.len() > 64);

        let config = AssemblerConfig {
            read_chunk: 16,
            max_buffered: 64,
        };
        let request = Assembler::with_config(&data[..], config)
            .read_request()
            .await
            .unwrap();
        assert_eq!(request.headers().len(), 20);
    }

    #[tokio::test]
    async fn parse_error_aborts() {
        let data: &[u8] = b"GET /\r\nHost: localhost\r\n\r\n";
        let err = Assembler::new(data).read_request().await.unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MalformedRequestLine);
        assert_eq!(err.location, Location::RequestLine);
    }
}
