//! Syntax predicates shared by the request line and header parsers.
//!
//! Every check here is a pure function over bytes or characters. Callers map a
//! `false` result to the matching [`ParseErrorKind`](crate::http::parser::ParseErrorKind).

use crate::http::method::Method;

/// The only protocol version this parser accepts
pub const SUPPORTED_VERSION: &[u8] = b"HTTP/1.1";

/// SPEC: RFC 9110 - 5.6.2. Tokens
/// ABNF: tchar = "!" / "#" / "$" / "%" / "&" / "'" / "*" / "+" / "-" / "." /
///               "^" / "_" / "`" / "|" / "~" / DIGIT / ALPHA
pub fn is_tchar(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            b'!' | b'#'
                | b'$'
                | b'%'
                | b'&'
                | b'\''
                | b'*'
                | b'+'
                | b'-'
                | b'.'
                | b'^'
                | b'_'
                | b'`'
                | b'|'
                | b'~'
        )
}

/// Checks a header field name after its leading whitespace was stripped.
///
/// Trailing whitespace is not stripped by the header parser, so `"Foo "` (from
/// the line `Foo : bar`) must be rejected here.
pub fn is_valid_field_name(name: &str) -> bool {
    !name.is_empty() && !name.ends_with(' ') && name.bytes().all(is_tchar)
}

/// Method tokens are case sensitive, `get` is not `GET`
pub fn is_valid_method(token: &[u8]) -> bool {
    Method::try_from(token).is_ok()
}

fn is_target_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'/' | b'-' | b'_' | b'.' | b'~')
}

/// Accepts an absolute path made of unreserved characters only, e.g. `/coffee/v2.0`.
/// Query strings, percent-encoding and the other request-target forms are rejected.
pub fn is_valid_target(token: &[u8]) -> bool {
    match token.split_first() {
        Some((b'/', rest)) => rest.iter().copied().all(is_target_char),
        _ => false,
    }
}

pub fn is_valid_http_version(token: &[u8]) -> bool {
    token == SUPPORTED_VERSION
}
