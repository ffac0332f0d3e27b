//! An incremental HTTP/1.1 request head parser.
//!
//! A [`Request`] consumes whole CRLF terminated lines from the front of a buffer,
//! first the request line and then header fields up to the empty line. The
//! [`Assembler`] owns that buffer, fills it from any [`AsyncRead`] and compacts it
//! as lines are consumed, so the stream may be split at arbitrary points.
//!
//! ```
//! # tokio_test_block(async {
//! use carbon_http_parser::request_from_reader;
//!
//! let raw: &[u8] = b"GET /path HTTP/1.1\r\nHost: localhost\r\n\r\n";
//! let request = request_from_reader(raw).await.unwrap();
//! assert_eq!(request.target(), Some("/path"));
//! assert_eq!(request.headers().get("Host"), Some("localhost"));
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

pub mod http;
pub mod sync;

use tokio::io::AsyncRead;

pub use http::{
    header::Headers,
    method::Method,
    parser::{Assembler, AssemblerConfig, HttpParseError, HttpParseResult, Location, ParseErrorKind},
    request::{Progress, Request, RequestLine, RequestState},
};

/// Reads a single request head from `reader` with the default [`AssemblerConfig`].
///
/// Anything the peer sent after the header section is discarded; use an
/// [`Assembler`] directly to keep it.
pub async fn request_from_reader<R>(reader: R) -> HttpParseResult<Request>
where
    R: AsyncRead + Unpin,
{
    Assembler::new(reader).read_request().await
}
