//! Messaging transport and device identity traits.

use core::future::Future;

use at_proto::PublishEnvelope;

/// Error type for publish operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PublishError {
    /// Transport I/O error.
    Io,
    /// No connection to the broker.
    NotConnected,
    /// Broker or transport refused the message.
    Rejected,
}

impl core::fmt::Display for PublishError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Io => f.write_str("I/O error"),
            Self::NotConnected => f.write_str("not connected"),
            Self::Rejected => f.write_str("rejected"),
        }
    }
}

/// Async trait for the messaging transport.
///
/// The interpreter hands over one envelope per notification and does not
/// retry: delivery guarantees are the transport's business.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait Publisher {
    /// Publish `envelope.payload` on `envelope.topic` with `envelope.qos`.
    fn publish(&mut self, envelope: &PublishEnvelope)
        -> impl Future<Output = Result<(), PublishError>>;
}

/// Source of the device identifier embedded in publish topics.
pub trait DeviceId {
    fn device_id(&self) -> &str;
}

impl DeviceId for &str {
    fn device_id(&self) -> &str {
        self
    }
}

impl<const N: usize> DeviceId for heapless::String<N> {
    fn device_id(&self) -> &str {
        self.as_str()
    }
}
