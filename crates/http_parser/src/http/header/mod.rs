mod map;
pub use map::*;

use log::{debug, trace};

use crate::http::{
    parser::{CRLF, HttpParseError, HttpParseResult, ParseErrorKind, find_crlf},
    validate::is_valid_field_name,
};

impl Headers {
    /// Parses a single field line, with the CRLF already removed, into the map
    /// SPEC: RFC 9112 5 Field Syntax
    /// ABNF: field-line = field-name ":" OWS field-value OWS
    pub fn parse_field_line(&mut self, line: &str) -> HttpParseResult<()> {
        let Some((name, value)) = line.split_once(':') else {
            debug!("header line without ':' {:?}", line);
            return Err(HttpParseError::headers(
                ParseErrorKind::MissingColon,
                format!("{line:?}"),
            ));
        };

        // Whitespace between the name and the colon is kept so that it fails validation
        let name = name.trim_start_matches(' ');
        let value = value.trim();

        if !is_valid_field_name(name) {
            debug!("invalid header field name {:?}", name);
            return Err(HttpParseError::headers(
                ParseErrorKind::InvalidHeaderField,
                format!("{name:?}"),
            ));
        }

        self.set(name, value);
        Ok(())
    }

    /// Parses as many complete field lines as `data` holds.
    ///
    /// Returns the number of bytes consumed and whether the empty line ending the
    /// header section was reached. Bytes after an incomplete trailing line are left
    /// for the next call. On error nothing should be considered consumed.
    pub fn parse(&mut self, mut data: &[u8]) -> HttpParseResult<(usize, bool)> {
        let mut consumed = 0;

        while let Some(idx) = find_crlf(data) {
            if idx == 0 {
                consumed += CRLF.len();
                trace!("end of headers, {} fields", self.len());
                return Ok((consumed, true));
            }

            let line = String::from_utf8_lossy(&data[..idx]);
            self.parse_field_line(&line)?;

            consumed += idx + CRLF.len();
            data = &data[idx + CRLF.len()..];
        }

        Ok((consumed, false))
    }
}
