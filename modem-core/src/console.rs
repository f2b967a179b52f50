//! Console text written back to the UART.
//!
//! All lines end in `\r\n` for serial terminals.

use core::fmt::{self, Write};

use at_proto::{SyntaxError, COMMANDS};

/// Prefix of every grammar error report.
pub const WRONG_SYNTAX: &str = "ERROR: wrong syntax";

/// Write the command table, one `prefix<TAB>help` line per entry.
pub fn write_help_listing<W: Write + ?Sized>(out: &mut W) -> fmt::Result {
    out.write_str("\r\nUART Commands:\r\n")?;
    for entry in COMMANDS {
        write!(out, "{}\t{}\r\n", entry.prefix, entry.help)?;
    }
    out.write_str("\r\n")
}

/// Report a rejected command line, with the grammar checkpoint if known.
pub fn write_syntax_error<W: Write + ?Sized>(
    out: &mut W,
    error: Option<SyntaxError>,
) -> fmt::Result {
    match error {
        Some(error) => write!(out, "{WRONG_SYNTAX} {}\r\n", error.checkpoint()),
        None => write!(out, "{WRONG_SYNTAX}\r\n"),
    }
}

/// Report a discarded over-long line.
pub fn write_overflow_notice<W: Write + ?Sized>(out: &mut W, capacity: usize) -> fmt::Result {
    write!(out, "\r\nCommand should be less than {capacity} bytes\r\n")
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::string::String;

    #[test]
    fn test_help_lists_every_command() {
        let mut out = String::new();
        write_help_listing(&mut out).unwrap();

        assert!(out.starts_with("\r\nUART Commands:\r\n"));
        assert!(out.ends_with("\r\n\r\n"));
        for entry in COMMANDS {
            let row = std::format!("{}\t{}\r\n", entry.prefix, entry.help);
            assert!(out.contains(&row), "missing {}", entry.prefix);
        }
    }

    #[test]
    fn test_syntax_error_report() {
        let mut out = String::new();
        write_syntax_error(&mut out, Some(SyntaxError::MismatchedQuote { quote: b'\'' })).unwrap();
        write_syntax_error(&mut out, None).unwrap();
        assert_eq!(out, "ERROR: wrong syntax 9\r\nERROR: wrong syntax\r\n");
    }

    #[test]
    fn test_overflow_notice() {
        let mut out = String::new();
        write_overflow_notice(&mut out, 64).unwrap();
        assert_eq!(out, "\r\nCommand should be less than 64 bytes\r\n");
    }
}
