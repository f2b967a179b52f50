//! Topic and payload formatting for outgoing notifications.
//!
//! # Topic
//!
//! ```text
//! <prefix><device-id>/trigger_notification/uart/<category>
//! ```
//!
//! # Payload
//!
//! One of four JSON-shaped objects, depending on which fields are present:
//!
//! ```text
//! {"recipient":"R","message":"M"}
//! {"recipient":"R"}
//! {"message":"M"}
//! {}
//! ```
//!
//! Field bytes are copied as-is. Embedded `"` or `\` characters are *not*
//! escaped, so a value containing them yields a payload that is not valid
//! JSON. Receivers on the broker side depend on this exact format.

use core::fmt::Write;
use heapless::{String, Vec};

use crate::fields::ParsedFields;

/// Maximum topic length in bytes.
pub const TOPIC_CAPACITY: usize = 128;

/// Maximum payload length in bytes.
pub const PAYLOAD_CAPACITY: usize = 160;

/// Default topic prefix for device replies.
pub const DEFAULT_TOPIC_PREFIX: &str = "server/";

/// Fixed segment between the device id and the category.
pub const TRIGGER_SEGMENT: &str = "/trigger_notification/uart/";

/// Delivery level requested from the transport (at least once).
pub const PUBLISH_QOS: u8 = 1;

pub type Topic = String<TOPIC_CAPACITY>;
pub type Payload = Vec<u8, PAYLOAD_CAPACITY>;

/// Error building a [`PublishEnvelope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EnvelopeError {
    /// Topic does not fit in [`TOPIC_CAPACITY`].
    TopicTooLong,
    /// Payload does not fit in [`PAYLOAD_CAPACITY`].
    PayloadTooLong,
}

impl core::fmt::Display for EnvelopeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::TopicTooLong => f.write_str("topic too long"),
            Self::PayloadTooLong => f.write_str("payload too long"),
        }
    }
}

/// Topic/payload pair handed to the messaging transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishEnvelope {
    pub topic: Topic,
    pub payload: Payload,
    pub qos: u8,
}

impl PublishEnvelope {
    /// Build the envelope for a notification `category`.
    pub fn new(
        prefix: &str,
        device_id: &str,
        category: &str,
        fields: &ParsedFields,
    ) -> Result<Self, EnvelopeError> {
        Ok(Self {
            topic: format_topic(prefix, device_id, category)?,
            payload: format_payload(fields.recipient.as_deref(), fields.message.as_deref())?,
            qos: PUBLISH_QOS,
        })
    }

    /// Payload as text, if it is valid UTF-8.
    #[must_use]
    pub fn payload_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.payload).ok()
    }
}

/// Build `<prefix><device-id>/trigger_notification/uart/<category>`.
pub fn format_topic(prefix: &str, device_id: &str, category: &str) -> Result<Topic, EnvelopeError> {
    let mut topic = Topic::new();
    write!(topic, "{prefix}{device_id}{TRIGGER_SEGMENT}{category}")
        .map_err(|_| EnvelopeError::TopicTooLong)?;
    Ok(topic)
}

/// Build the JSON-shaped payload. Empty fields count as absent.
pub fn format_payload(
    recipient: Option<&[u8]>,
    message: Option<&[u8]>,
) -> Result<Payload, EnvelopeError> {
    let recipient = recipient.filter(|r| !r.is_empty());
    let message = message.filter(|m| !m.is_empty());

    let mut buf = PayloadBuf::new();
    buf.write(b"{")?;
    if let Some(recipient) = recipient {
        buf.write_field(b"recipient", recipient)?;
    }
    if let Some(message) = message {
        if recipient.is_some() {
            buf.write(b",")?;
        }
        buf.write_field(b"message", message)?;
    }
    buf.write(b"}")?;
    Ok(buf.into_inner())
}

/// Bounded payload writer.
struct PayloadBuf {
    buf: Payload,
}

impl PayloadBuf {
    #[inline]
    fn new() -> Self {
        Self { buf: Payload::new() }
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) -> Result<(), EnvelopeError> {
        self.buf
            .extend_from_slice(bytes)
            .map_err(|_| EnvelopeError::PayloadTooLong)
    }

    /// Write `"key":"value"` without escaping.
    fn write_field(&mut self, key: &[u8], value: &[u8]) -> Result<(), EnvelopeError> {
        self.write(b"\"")?;
        self.write(key)?;
        self.write(b"\":\"")?;
        self.write(value)?;
        self.write(b"\"")
    }

    #[inline]
    fn into_inner(self) -> Payload {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::fields::{parse_fields, MESSAGE_MAX_LEN, RECIPIENT_MAX_LEN};

    fn payload(recipient: Option<&[u8]>, message: Option<&[u8]>) -> std::string::String {
        let payload = format_payload(recipient, message).unwrap();
        std::string::String::from_utf8(payload.to_vec()).unwrap()
    }

    #[test]
    fn test_payload_shapes() {
        assert_eq!(
            payload(Some(b"bob"), Some(b"hello")),
            r#"{"recipient":"bob","message":"hello"}"#
        );
        assert_eq!(payload(None, None), "{}");
        assert_eq!(payload(Some(b"bob"), None), r#"{"recipient":"bob"}"#);
        assert_eq!(payload(None, Some(b"hello")), r#"{"message":"hello"}"#);
    }

    #[test]
    fn test_empty_fields_are_absent() {
        assert_eq!(payload(Some(b""), Some(b"")), "{}");
        assert_eq!(payload(Some(b""), Some(b"hi")), r#"{"message":"hi"}"#);
    }

    #[test]
    fn test_payload_is_not_escaped() {
        assert_eq!(
            payload(None, Some(br#"say "hi""#)),
            r#"{"message":"say "hi""}"#
        );
    }

    #[test]
    fn test_largest_fields_fit() {
        let recipient = [b'r'; RECIPIENT_MAX_LEN];
        let message = [b'm'; MESSAGE_MAX_LEN];
        assert!(format_payload(Some(&recipient), Some(&message)).is_ok());
    }

    #[test]
    fn test_topic_format() {
        let topic = format_topic(DEFAULT_TOPIC_PREFIX, "ft900device1", "mobile").unwrap();
        assert_eq!(
            topic.as_str(),
            "server/ft900device1/trigger_notification/uart/mobile"
        );
    }

    #[test]
    fn test_topic_too_long() {
        let device_id = "d".repeat(TOPIC_CAPACITY);
        assert_eq!(
            format_topic(DEFAULT_TOPIC_PREFIX, &device_id, "email"),
            Err(EnvelopeError::TopicTooLong)
        );
    }

    #[test]
    fn test_envelope_from_fields() {
        let fields = parse_fields(b"+\"a b\"+hello").unwrap();
        let envelope = PublishEnvelope::new("server/", "dev", "email", &fields).unwrap();
        assert_eq!(envelope.topic.as_str(), "server/dev/trigger_notification/uart/email");
        assert_eq!(
            envelope.payload_str(),
            Some(r#"{"recipient":"a b","message":"hello"}"#)
        );
        assert_eq!(envelope.qos, PUBLISH_QOS);
    }
}
