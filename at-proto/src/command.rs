//! The AT command table.
//!
//! Lookup walks [`COMMANDS`] in order and picks the first entry whose prefix
//! starts the line, so a prefix must come before any shorter prefix of it
//! (`AT+M` before `AT`).

/// Command kinds understood by the modem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    Mobile,
    Email,
    Notification,
    Modem,
    Storage,
    Default,
    Continue,
    Echo,
    Help,
    Info,
    More,
    Pause,
    Reset,
    Update,
    Status,
}

impl Command {
    /// Publish category, for commands that trigger a notification.
    #[must_use]
    pub const fn category(self) -> Option<&'static str> {
        match self {
            Self::Mobile => Some("mobile"),
            Self::Email => Some("email"),
            Self::Notification => Some("notification"),
            Self::Modem => Some("modem"),
            Self::Storage => Some("storage"),
            Self::Default => Some("default"),
            _ => None,
        }
    }

    /// Whether text after the prefix is parsed as `+recipient+message`.
    #[must_use]
    pub const fn takes_fields(self) -> bool {
        matches!(
            self,
            Self::Mobile | Self::Email | Self::Notification | Self::Modem | Self::Storage
        )
    }
}

/// One row of the command table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandEntry {
    pub prefix: &'static str,
    pub command: Command,
    pub help: &'static str,
}

impl CommandEntry {
    const fn new(prefix: &'static str, command: Command, help: &'static str) -> Self {
        Self {
            prefix,
            command,
            help,
        }
    }

    /// Whether `line` starts with this entry's prefix.
    #[inline]
    #[must_use]
    pub fn matches(&self, line: &[u8]) -> bool {
        line.starts_with(self.prefix.as_bytes())
    }

    /// Text following the prefix. Empty if `line` does not match.
    #[inline]
    #[must_use]
    pub fn remainder<'a>(&self, line: &'a [u8]) -> &'a [u8] {
        line.get(self.prefix.len()..).unwrap_or_default()
    }
}

/// All commands, in match order.
pub static COMMANDS: &[CommandEntry] = &[
    CommandEntry::new("AT+M", Command::Mobile, "Mobile notification [+recipient][+message]"),
    CommandEntry::new("AT+E", Command::Email, "Email notification [+recipient][+message]"),
    CommandEntry::new("AT+N", Command::Notification, "Device notification [+recipient][+message]"),
    CommandEntry::new("AT+O", Command::Modem, "Modem notification [+recipient][+message]"),
    CommandEntry::new("AT+S", Command::Storage, "Storage notification [+recipient][+message]"),
    CommandEntry::new("AT+D", Command::Default, "Default notification"),
    CommandEntry::new("ATC", Command::Continue, "Continue"),
    CommandEntry::new("ATE", Command::Echo, "Echo"),
    CommandEntry::new("ATH", Command::Help, "Help"),
    CommandEntry::new("ATI", Command::Info, "Information (version, device id, configuration)"),
    CommandEntry::new("ATM", Command::More, "More"),
    CommandEntry::new("ATP", Command::Pause, "Pause"),
    CommandEntry::new("ATR", Command::Reset, "Reset"),
    CommandEntry::new("ATU", Command::Update, "Update"),
    CommandEntry::new("AT", Command::Status, "Status (OK if all is good)"),
];

/// Find the first entry matching `line`, with its table index.
#[must_use]
pub fn lookup(line: &[u8]) -> Option<(usize, &'static CommandEntry)> {
    COMMANDS.iter().enumerate().find(|(_, entry)| entry.matches(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_entry_is_shadowed() {
        for (i, earlier) in COMMANDS.iter().enumerate() {
            for later in &COMMANDS[i + 1..] {
                assert!(
                    !later.prefix.starts_with(earlier.prefix),
                    "{} is unreachable behind {}",
                    later.prefix,
                    earlier.prefix
                );
            }
        }
    }

    #[test]
    fn test_lookup_first_prefix_wins() {
        let (index, entry) = lookup(b"AT+M+bob+hi").unwrap();
        assert_eq!(index, 0);
        assert_eq!(entry.command, Command::Mobile);

        let (_, entry) = lookup(b"ATH").unwrap();
        assert_eq!(entry.command, Command::Help);

        // Anything else starting with AT falls through to status
        let (index, entry) = lookup(b"ATZ").unwrap();
        assert_eq!(index, COMMANDS.len() - 1);
        assert_eq!(entry.command, Command::Status);
    }

    #[test]
    fn test_lookup_no_match() {
        assert!(lookup(b"").is_none());
        assert!(lookup(b"A").is_none());
        assert!(lookup(b"at+m").is_none());
    }

    #[test]
    fn test_remainder() {
        let (_, entry) = lookup(b"AT+E+alice").unwrap();
        assert_eq!(entry.remainder(b"AT+E+alice"), b"+alice");
        assert_eq!(entry.remainder(b"AT+E"), b"");
    }

    #[test]
    fn test_categories() {
        assert_eq!(Command::Notification.category(), Some("notification"));
        assert_eq!(Command::Default.category(), Some("default"));
        assert_eq!(Command::Help.category(), None);
        assert!(Command::Storage.takes_fields());
        assert!(!Command::Default.takes_fields());
    }
}
