//! Recipient/message grammar for notification commands.
//!
//! The text following a command prefix has the shape
//!
//! ```text
//! +<recipient>
//! +<recipient>+<message>
//! ++<message>
//! ```
//!
//! Either segment may be wrapped in a matching pair of `"` or `'`, which is
//! stripped. Everything after the second `+` belongs to the message, so the
//! message itself may contain further `+` characters.

use core::fmt;
use heapless::Vec;

/// Separator in front of each field.
pub const FIELD_DELIMITER: u8 = b'+';

/// Longest raw recipient segment (quotes included).
pub const RECIPIENT_MAX_LEN: usize = 31;

/// Longest raw message segment (quotes included).
pub const MESSAGE_MAX_LEN: usize = 63;

/// Unescaped recipient.
pub type Recipient = Vec<u8, RECIPIENT_MAX_LEN>;

/// Unescaped message.
pub type Message = Vec<u8, MESSAGE_MAX_LEN>;

/// Fields extracted from one command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFields {
    pub recipient: Option<Recipient>,
    pub message: Option<Message>,
}

/// Grammar violation in a command remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyntaxError {
    /// Remainder does not start with `+`.
    MissingDelimiter,
    /// A lone `+` with nothing after it.
    EmptyRecipient,
    /// `++` with nothing after it.
    EmptyFields,
    /// Second `+` with nothing after it.
    EmptyMessage,
    /// Recipient segment longer than [`RECIPIENT_MAX_LEN`].
    RecipientTooLong,
    /// Message segment longer than [`MESSAGE_MAX_LEN`].
    MessageTooLong,
    /// Segment opens with a quote it never closes.
    MismatchedQuote { quote: u8 },
}

impl SyntaxError {
    /// Numeric checkpoint printed on the console, one per grammar rule.
    #[must_use]
    pub const fn checkpoint(self) -> u8 {
        match self {
            Self::MissingDelimiter => 1,
            Self::EmptyRecipient => 2,
            Self::EmptyFields => 3,
            Self::EmptyMessage => 4,
            Self::RecipientTooLong => 5,
            Self::MessageTooLong => 6,
            Self::MismatchedQuote { quote: b'"' } => 8,
            Self::MismatchedQuote { .. } => 9,
        }
    }

    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::MissingDelimiter => "expected '+' after command",
            Self::EmptyRecipient => "nothing after '+'",
            Self::EmptyFields => "nothing after '++'",
            Self::EmptyMessage => "empty message",
            Self::RecipientTooLong => "recipient length is too big",
            Self::MessageTooLong => "message length is too big",
            Self::MismatchedQuote { .. } => "mismatched quote",
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.checkpoint(), self.message())
    }
}

/// Split a command remainder into recipient and message.
///
/// Raw segment lengths are checked before quotes are stripped, and a field
/// that is empty after unescaping (`""`) is reported as absent. Any error
/// fails the whole parse.
pub fn parse_fields(remainder: &[u8]) -> Result<ParsedFields, SyntaxError> {
    let rest = match remainder.split_first() {
        Some((&FIELD_DELIMITER, rest)) => rest,
        _ => return Err(SyntaxError::MissingDelimiter),
    };
    if rest.is_empty() {
        return Err(SyntaxError::EmptyRecipient);
    }
    if rest == [FIELD_DELIMITER] {
        return Err(SyntaxError::EmptyFields);
    }

    let Some(split) = rest.iter().position(|&b| b == FIELD_DELIMITER) else {
        // Recipient only
        if rest.len() > RECIPIENT_MAX_LEN {
            return Err(SyntaxError::RecipientTooLong);
        }
        return Ok(ParsedFields {
            recipient: unescape(rest, SyntaxError::RecipientTooLong)?,
            message: None,
        });
    };

    let recipient = &rest[..split];
    let message = &rest[split + 1..];
    if message.is_empty() {
        return Err(SyntaxError::EmptyMessage);
    }
    if recipient.len() > RECIPIENT_MAX_LEN {
        return Err(SyntaxError::RecipientTooLong);
    }
    if message.len() > MESSAGE_MAX_LEN {
        return Err(SyntaxError::MessageTooLong);
    }

    let recipient = if recipient.is_empty() {
        None
    } else {
        unescape(recipient, SyntaxError::RecipientTooLong)?
    };
    Ok(ParsedFields {
        recipient,
        message: unescape(message, SyntaxError::MessageTooLong)?,
    })
}

/// Strip one level of matching `"` or `'` quoting.
fn unescape<const N: usize>(
    segment: &[u8],
    too_long: SyntaxError,
) -> Result<Option<Vec<u8, N>>, SyntaxError> {
    let body = match segment.first() {
        Some(&(quote @ (b'"' | b'\''))) => {
            if segment.len() < 2 || segment.last() != Some(&quote) {
                return Err(SyntaxError::MismatchedQuote { quote });
            }
            &segment[1..segment.len() - 1]
        }
        _ => segment,
    };

    if body.is_empty() {
        return Ok(None);
    }
    Vec::from_slice(body).map(Some).map_err(|_| too_long)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::vec;

    fn field(fields: &Option<impl core::ops::Deref<Target = [u8]>>) -> Option<&[u8]> {
        fields.as_deref()
    }

    #[test]
    fn test_recipient_only() {
        let parsed = parse_fields(b"+bob").unwrap();
        assert_eq!(field(&parsed.recipient), Some(&b"bob"[..]));
        assert_eq!(field(&parsed.message), None);
    }

    #[test]
    fn test_recipient_and_message() {
        let parsed = parse_fields(b"+bob+hello").unwrap();
        assert_eq!(field(&parsed.recipient), Some(&b"bob"[..]));
        assert_eq!(field(&parsed.message), Some(&b"hello"[..]));
    }

    #[test]
    fn test_message_only() {
        let parsed = parse_fields(b"++hello").unwrap();
        assert_eq!(field(&parsed.recipient), None);
        assert_eq!(field(&parsed.message), Some(&b"hello"[..]));
    }

    #[test]
    fn test_message_keeps_extra_delimiters() {
        let parsed = parse_fields(b"+bob+1+1=2").unwrap();
        assert_eq!(field(&parsed.message), Some(&b"1+1=2"[..]));

        let parsed = parse_fields(b"+++").unwrap();
        assert_eq!(field(&parsed.recipient), None);
        assert_eq!(field(&parsed.message), Some(&b"+"[..]));
    }

    #[test]
    fn test_double_quoted_recipient() {
        let parsed = parse_fields(b"+\"a b\"+hello").unwrap();
        assert_eq!(field(&parsed.recipient), Some(&b"a b"[..]));
        assert_eq!(field(&parsed.message), Some(&b"hello"[..]));
    }

    #[test]
    fn test_single_quoted_message() {
        let parsed = parse_fields(b"+bob+'see you soon'").unwrap();
        assert_eq!(field(&parsed.message), Some(&b"see you soon"[..]));
    }

    #[test]
    fn test_empty_quotes_mean_absent() {
        let parsed = parse_fields(b"+\"\"+hi").unwrap();
        assert_eq!(field(&parsed.recipient), None);
        assert_eq!(field(&parsed.message), Some(&b"hi"[..]));
    }

    #[test]
    fn test_degenerate_delimiters_rejected() {
        assert_eq!(parse_fields(b"+"), Err(SyntaxError::EmptyRecipient));
        assert_eq!(parse_fields(b"++"), Err(SyntaxError::EmptyFields));
        assert_eq!(parse_fields(b"+bob+"), Err(SyntaxError::EmptyMessage));
        assert_eq!(parse_fields(b""), Err(SyntaxError::MissingDelimiter));
        assert_eq!(parse_fields(b"bob"), Err(SyntaxError::MissingDelimiter));
    }

    #[test]
    fn test_mismatched_quotes_rejected() {
        assert_eq!(
            parse_fields(b"+\"unterminated+x"),
            Err(SyntaxError::MismatchedQuote { quote: b'"' })
        );
        assert_eq!(
            parse_fields(b"+bob+'oops"),
            Err(SyntaxError::MismatchedQuote { quote: b'\'' })
        );
        assert_eq!(
            parse_fields(b"+\"a'"),
            Err(SyntaxError::MismatchedQuote { quote: b'"' })
        );
        // A lone quote cannot close itself
        assert_eq!(
            parse_fields(b"+\""),
            Err(SyntaxError::MismatchedQuote { quote: b'"' })
        );
    }

    #[test]
    fn test_field_length_limits() {
        let recipient = vec![b'r'; RECIPIENT_MAX_LEN];
        let mut line = vec![b'+'];
        line.extend_from_slice(&recipient);
        let parsed = parse_fields(&line).unwrap();
        assert_eq!(field(&parsed.recipient), Some(&recipient[..]));

        line.push(b'r');
        assert_eq!(parse_fields(&line), Err(SyntaxError::RecipientTooLong));

        let mut line = vec![b'+', b'+'];
        line.extend_from_slice(&[b'm'; MESSAGE_MAX_LEN + 1]);
        assert_eq!(parse_fields(&line), Err(SyntaxError::MessageTooLong));
    }

    #[test]
    fn test_length_checked_before_quotes() {
        // An over-long recipient fails even when the message is badly quoted
        let mut line = vec![b'+'];
        line.extend_from_slice(&[b'r'; RECIPIENT_MAX_LEN + 1]);
        line.extend_from_slice(b"+\"x");
        assert_eq!(parse_fields(&line), Err(SyntaxError::RecipientTooLong));
    }

    #[test]
    fn test_checkpoints() {
        assert_eq!(SyntaxError::MissingDelimiter.checkpoint(), 1);
        assert_eq!(SyntaxError::EmptyRecipient.checkpoint(), 2);
        assert_eq!(SyntaxError::EmptyFields.checkpoint(), 3);
        assert_eq!(SyntaxError::EmptyMessage.checkpoint(), 4);
        assert_eq!(SyntaxError::MismatchedQuote { quote: b'"' }.checkpoint(), 8);
        assert_eq!(SyntaxError::MismatchedQuote { quote: b'\'' }.checkpoint(), 9);
    }
}
