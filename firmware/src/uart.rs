//! Mapping from console UART properties to the RP2040 driver.

use embassy_rp::uart::{self, Config};
use modem_core::{DataBits, Parity, PublishError, StopBits, UartProperties};

/// Build a driver config for `props`.
///
/// Returns `None` if the baud-rate index is outside the baud table.
#[must_use]
pub fn uart_config(props: &UartProperties) -> Option<Config> {
    let mut config = Config::default();
    config.baudrate = props.baudrate()?;
    config.data_bits = match props.data_bits {
        DataBits::Seven => uart::DataBits::DataBits7,
        DataBits::Eight => uart::DataBits::DataBits8,
    };
    config.parity = match props.parity {
        Parity::None => uart::Parity::ParityNone,
        Parity::Odd => uart::Parity::ParityOdd,
        Parity::Even => uart::Parity::ParityEven,
    };
    config.stop_bits = match props.stop_bits {
        StopBits::One => uart::StopBits::STOP1,
        StopBits::Two => uart::StopBits::STOP2,
    };
    Some(config)
}

/// Convert UART errors to [`PublishError`].
///
/// This is a helper function instead of a `From` impl to avoid orphan rule issues
/// (both `uart::Error` and `PublishError` are defined in external crates).
#[inline]
pub(crate) fn uart_error_to_publish_error(_e: uart::Error) -> PublishError {
    PublishError::Io
}
