use log::debug;
use smallvec::SmallVec;

use crate::http::{
    method::Method,
    parser::{CRLF, HttpParseError, HttpParseResult, ParseErrorKind, find_crlf},
    validate::{is_valid_http_version, is_valid_target},
};

/// The first line of a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: Method,
    pub target: String,
    /// Version number without the `HTTP/` prefix, e.g. `1.1`
    pub http_version: String,
}

impl RequestLine {
    /// Parses the request line at the start of `data`.
    ///
    /// Returns `Ok(None)` while no CRLF has arrived yet. On success the second
    /// element is the number of bytes consumed, CRLF included.
    ///
    /// SPEC: RFC 9112 3 Request Line
    /// ABNF: request-line = method SP request-target SP HTTP-version
    pub fn parse(data: &[u8]) -> HttpParseResult<Option<(Self, usize)>> {
        let Some(end) = find_crlf(data) else {
            return Ok(None);
        };
        let line = &data[..end];

        let tokens: SmallVec<[&[u8]; 3]> = line.split(|b| *b == b' ').collect();
        let &[method, target, version] = &tokens[..] else {
            debug!("request line has {} tokens", tokens.len());
            return Err(HttpParseError::request_line(
                ParseErrorKind::MalformedRequestLine,
                format!(
                    "expected 3 tokens, found {} in {:?}",
                    tokens.len(),
                    String::from_utf8_lossy(line)
                ),
            ));
        };

        let method = Method::try_from(method).map_err(|_| {
            HttpParseError::request_line(ParseErrorKind::InvalidMethod, lossy(method))
        })?;

        if !is_valid_target(target) {
            return Err(HttpParseError::request_line(
                ParseErrorKind::InvalidTarget,
                lossy(target),
            ));
        }

        if !is_valid_http_version(version) {
            return Err(HttpParseError::request_line(
                ParseErrorKind::UnsupportedVersion,
                lossy(version),
            ));
        }
        let http_version = version.strip_prefix(b"HTTP/").unwrap_or(version);

        // Target and version were checked to be ASCII above
        Ok(Some((
            Self {
                method,
                target: String::from_utf8_lossy(target).into_owned(),
                http_version: String::from_utf8_lossy(http_version).into_owned(),
            },
            end + CRLF.len(),
        )))
    }
}

fn lossy(token: &[u8]) -> String {
    format!("{:?}", String::from_utf8_lossy(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(data: &[u8]) -> (RequestLine, usize) {
        RequestLine::parse(data)
            .expect("should parse")
            .expect("should be complete")
    }

    fn parse_err(data: &[u8]) -> ParseErrorKind {
        RequestLine::parse(data).expect_err("should fail").kind
    }

    #[test]
    fn good_get() {
        let (line, n) = parse_ok(b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n");
        assert_eq!(line.method, Method::GET);
        assert_eq!(line.target, "/");
        assert_eq!(line.http_version, "1.1");
        assert_eq!(n, 16);
    }

    #[test]
    fn every_method_and_a_long_path() {
        for method in Method::ALL {
            let raw = format!("{method} /coffee/v2.0/beans_~list-1 HTTP/1.1\r\n");
            let (line, n) = parse_ok(raw.as_bytes());
            assert_eq!(line.method, method);
            assert_eq!(line.target, "/coffee/v2.0/beans_~list-1");
            assert_eq!(line.http_version, "1.1");
            assert_eq!(n, raw.len());
        }
    }

    #[test]
    fn waits_for_crlf() {
        assert_eq!(RequestLine::parse(b"").unwrap(), None);
        assert_eq!(RequestLine::parse(b"GET / HTTP/1.1").unwrap(), None);
        assert_eq!(RequestLine::parse(b"GET / HTTP/1.1\r").unwrap(), None);
        assert_eq!(RequestLine::parse(b"GET / HTTP/1.1\n").unwrap(), None);
    }

    #[test]
    fn wrong_token_count() {
        assert_eq!(parse_err(b"GET /\r\n"), ParseErrorKind::MalformedRequestLine);
        assert_eq!(parse_err(b"\r\n"), ParseErrorKind::MalformedRequestLine);
        assert_eq!(
            parse_err(b"/coffee HTTP/1.1\r\nHost: localhost\r\n\r\n"),
            ParseErrorKind::MalformedRequestLine
        );
        assert_eq!(
            parse_err(b"GET / HTTP/1.1 extra\r\n"),
            ParseErrorKind::MalformedRequestLine
        );
        assert_eq!(
            parse_err(b"GET  / HTTP/1.1\r\n"),
            ParseErrorKind::MalformedRequestLine
        );
    }

    #[test]
    fn bad_method() {
        assert_eq!(parse_err(b"get / HTTP/1.1\r\n"), ParseErrorKind::InvalidMethod);
        assert_eq!(parse_err(b"HEAD / HTTP/1.1\r\n"), ParseErrorKind::InvalidMethod);
    }

    #[test]
    fn bad_target() {
        assert_eq!(parse_err(b"GET coffee HTTP/1.1\r\n"), ParseErrorKind::InvalidTarget);
        assert_eq!(parse_err(b"GET /a?b=1 HTTP/1.1\r\n"), ParseErrorKind::InvalidTarget);
        assert_eq!(parse_err(b"GET * HTTP/1.1\r\n"), ParseErrorKind::InvalidTarget);
    }

    #[test]
    fn bad_version() {
        assert_eq!(
            parse_err(b"GET / HTTP/1.0\r\n"),
            ParseErrorKind::UnsupportedVersion
        );
        assert_eq!(parse_err(b"GET / HTTP/2\r\n"), ParseErrorKind::UnsupportedVersion);
    }

    #[test]
    fn method_is_checked_before_target_and_version() {
        assert_eq!(parse_err(b"FETCH nope HTTP/9\r\n"), ParseErrorKind::InvalidMethod);
        assert_eq!(parse_err(b"GET nope HTTP/9\r\n"), ParseErrorKind::InvalidTarget);
    }
}
