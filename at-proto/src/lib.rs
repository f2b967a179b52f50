//! AT command wire layer for the IoT modem UART console.
//!
//! This crate holds everything about the console protocol that does not
//! depend on a particular chip or runtime:
//!
//! - [`line`]: byte-at-a-time line assembly ([`LineAssembler`])
//! - [`command`]: the ordered command table ([`COMMANDS`], [`lookup`])
//! - [`fields`]: the `+recipient+message` grammar ([`parse_fields`])
//! - [`envelope`]: topic and payload formatting ([`PublishEnvelope`])
//!
//! # Example
//!
//! ```
//! use at_proto::{lookup, parse_fields, LineAssembler, LineEvent, PublishEnvelope};
//!
//! let mut line = LineAssembler::<64>::new();
//! let mut event = LineEvent::Continue;
//! for &b in b"AT+M+bob+hello\r" {
//!     event = line.push(b);
//! }
//! assert_eq!(event, LineEvent::Complete);
//!
//! let (_, entry) = lookup(line.line()).unwrap();
//! let fields = parse_fields(entry.remainder(line.line())).unwrap();
//! let category = entry.command.category().unwrap();
//! let envelope = PublishEnvelope::new("server/", "dev1", category, &fields).unwrap();
//!
//! assert_eq!(envelope.topic.as_str(), "server/dev1/trigger_notification/uart/mobile");
//! assert_eq!(envelope.payload_str(), Some(r#"{"recipient":"bob","message":"hello"}"#));
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod command;
pub mod envelope;
pub mod fields;
pub mod line;

pub use command::{lookup, Command, CommandEntry, COMMANDS};
pub use envelope::{
    format_payload, format_topic, EnvelopeError, Payload, PublishEnvelope, Topic,
    DEFAULT_TOPIC_PREFIX, PAYLOAD_CAPACITY, PUBLISH_QOS, TOPIC_CAPACITY, TRIGGER_SEGMENT,
};
pub use fields::{
    parse_fields, Message, ParsedFields, Recipient, SyntaxError, FIELD_DELIMITER,
    MESSAGE_MAX_LEN, RECIPIENT_MAX_LEN,
};
pub use line::{LineAssembler, LineEvent, BACKSPACE, CARRIAGE_RETURN, LINE_CAPACITY};
