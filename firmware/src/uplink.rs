//! Publisher that forwards notifications to the network co-processor.
//!
//! Each envelope goes out as one line on UART1:
//!
//! ```text
//! PUB <qos> <topic> <payload>\r\n
//! ```
//!
//! # Pins
//!
//! - GPIO 8: TX
//! - GPIO 9: RX (unused)
//! - GPIO 10: CTS (optional, with `uart-flow-control` feature)
//! - GPIO 11: RTS (optional, with `uart-flow-control` feature)

use embassy_rp::uart::{Async, UartTx};
use modem_core::{PublishEnvelope, PublishError, Publisher};

use crate::uart::uart_error_to_publish_error;

/// Uplink to the co-processor that owns the broker connection.
pub struct UplinkPublisher<'d> {
    tx: UartTx<'d, Async>,
    published: u32,
}

impl<'d> UplinkPublisher<'d> {
    /// Create a new publisher from the uplink UART transmitter.
    #[must_use]
    pub fn new(tx: UartTx<'d, Async>) -> Self {
        Self { tx, published: 0 }
    }

    /// Number of envelopes written so far.
    #[inline]
    #[must_use]
    pub fn published(&self) -> u32 {
        self.published
    }

    async fn write(&mut self, bytes: &[u8]) -> Result<(), PublishError> {
        self.tx.write(bytes).await.map_err(uart_error_to_publish_error)
    }
}

impl<'d> Publisher for UplinkPublisher<'d> {
    async fn publish(&mut self, envelope: &PublishEnvelope) -> Result<(), PublishError> {
        let qos = [b'0' + envelope.qos];

        self.write(b"PUB ").await?;
        self.write(&qos).await?;
        self.write(b" ").await?;
        self.write(envelope.topic.as_bytes()).await?;
        self.write(b" ").await?;
        self.write(&envelope.payload).await?;
        self.write(b"\r\n").await?;

        self.published = self.published.wrapping_add(1);
        Ok(())
    }
}
