//! Line-per-record text codec.
//!
//! Records are comma-delimited, one per line. Fields are trimmed on decode and never
//! escaped on encode, so text fields must not contain `,`.

use core::str::FromStr;

use thiserror::Error;

use autoshop_core::DomainError;

mod ledger;
mod product;
mod user;

pub use ledger::{LedgerEntry, LedgerItem};

pub(crate) const DELIMITER: char = ',';

/// A value with a one-line text form.
pub trait Record: Sized {
    /// Header line written once at the top of a file, if the format has one.
    const HEADER: Option<&'static str> = None;

    fn encode(&self) -> String;

    fn decode(line: &str) -> Result<Self, ParseError>;
}

/// Why a single line could not be decoded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected at least {expected} fields, found {found}")]
    TooFewFields { expected: usize, found: usize },

    #[error("unknown record type '{0}'")]
    UnknownType(String),

    #[error("invalid {field}: '{value}'")]
    InvalidField { field: &'static str, value: String },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// A [`ParseError`] tagged with its 1-based line number.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("line {line}: {source}")]
pub struct LineError {
    pub line: usize,
    #[source]
    pub source: ParseError,
}

/// Decode every non-blank line of `text`, skipping the record type's header.
pub fn decode_lines<R: Record>(text: &str) -> impl Iterator<Item = Result<R, LineError>> + '_ {
    text.lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && Some(*line) != R::HEADER)
        .map(|(line, text)| R::decode(text).map_err(|source| LineError { line, source }))
}

/// Split a line into trimmed fields, requiring at least `min` of them.
pub(crate) fn split_fields(line: &str, min: usize) -> Result<Vec<&str>, ParseError> {
    let fields: Vec<&str> = line.split(DELIMITER).map(str::trim).collect();
    require_fields(&fields, min)?;
    Ok(fields)
}

pub(crate) fn require_fields(fields: &[&str], min: usize) -> Result<(), ParseError> {
    if fields.len() < min {
        return Err(ParseError::TooFewFields {
            expected: min,
            found: fields.len(),
        });
    }
    Ok(())
}

pub(crate) fn parse_field<T: FromStr>(field: &'static str, value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidField {
        field,
        value: value.to_string(),
    })
}

pub(crate) fn parse_bool(field: &'static str, value: &str) -> Result<bool, ParseError> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ParseError::InvalidField {
            field,
            value: value.to_string(),
        })
    }
}

pub(crate) fn encode_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Pair(String, u32);

    impl Record for Pair {
        const HEADER: Option<&'static str> = Some("Name,Count");

        fn encode(&self) -> String {
            format!("{},{}", self.0, self.1)
        }

        fn decode(line: &str) -> Result<Self, ParseError> {
            let fields = split_fields(line, 2)?;
            Ok(Pair(fields[0].to_string(), parse_field("count", fields[1])?))
        }
    }

    #[test]
    fn decode_lines_skips_header_and_blank_lines() {
        let text = "Name,Count\n\n a , 1 \nb,2\n";
        let decoded: Vec<_> = decode_lines::<Pair>(text).collect();
        assert_eq!(
            decoded,
            vec![Ok(Pair("a".into(), 1)), Ok(Pair("b".into(), 2))]
        );
    }

    #[test]
    fn decode_lines_reports_one_based_line_numbers() {
        let text = "a,1\nb\nc,x\n";
        let errors: Vec<LineError> = decode_lines::<Pair>(text).filter_map(Result::err).collect();

        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].line, 2);
        assert_eq!(
            errors[0].source,
            ParseError::TooFewFields {
                expected: 2,
                found: 1
            }
        );
        assert_eq!(errors[1].line, 3);
        assert_eq!(errors[1].to_string(), "line 3: invalid count: 'x'");
    }

    #[test]
    fn booleans_decode_case_insensitively() {
        assert_eq!(parse_bool("flag", "TRUE"), Ok(true));
        assert_eq!(parse_bool("flag", "false"), Ok(false));
        assert!(parse_bool("flag", "yes").is_err());
        assert_eq!(encode_bool(true), "True");
        assert_eq!(encode_bool(false), "False");
    }
}
