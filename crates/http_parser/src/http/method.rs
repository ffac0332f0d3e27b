use std::fmt::{self, Debug, Display};

/// An HTTP Method accepted by the request line parser
/// SPEC: Defined in RFC9112 3.1
/// ABNF: method = token
///
/// Only a closed subset of the RFC 9110 methods is recognized; any other token
/// (including a differently cased one) is rejected while parsing.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    GET,
    POST,
    PUT,
    PATCH,
    DELETE,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownMethod;

impl Method {
    pub const ALL: [Method; 5] = [
        Self::GET,
        Self::POST,
        Self::PUT,
        Self::PATCH,
        Self::DELETE,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GET => "GET",
            Self::POST => "POST",
            Self::PUT => "PUT",
            Self::PATCH => "PATCH",
            Self::DELETE => "DELETE",
        }
    }
}

impl TryFrom<&[u8]> for Method {
    type Error = UnknownMethod;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Ok(match value {
            b"GET" => Self::GET,
            b"POST" => Self::POST,
            b"PUT" => Self::PUT,
            b"PATCH" => Self::PATCH,
            b"DELETE" => Self::DELETE,
            _ => return Err(UnknownMethod),
        })
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

impl PartialEq<&str> for Method {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_matches_display() {
        for method in Method::ALL {
            assert_eq!(Method::try_from(method.as_str().as_bytes()), Ok(method));
            assert_eq!(method.to_string(), method.as_str());
        }
    }

    #[test]
    fn rejects_unknown_and_miscased() {
        assert_eq!(Method::try_from(&b"HEAD"[..]), Err(UnknownMethod));
        assert_eq!(Method::try_from(&b"post"[..]), Err(UnknownMethod));
        assert_eq!(Method::try_from(&b""[..]), Err(UnknownMethod));
    }
}
