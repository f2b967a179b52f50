//! Console UART: byte reception, local echo and the TX pipe.
//!
//! Reception runs on the interrupt-priority executor and only touches the
//! shared [`LineBuffer`]. Everything printed on the console, from either
//! priority level, goes through a [`ConsolePipe`] drained by the TX task.
//!
//! # Pins
//!
//! Uses UART0:
//! - GPIO 0: TX
//! - GPIO 1: RX

use core::fmt;

use defmt::{debug, info, warn};
use embassy_rp::uart::{Async, Config, UartRx, UartTx};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::pipe::Pipe;
use modem_core::console::write_overflow_notice;
use modem_core::{LineBuffer, LineEvent, UartProperties, LINE_CAPACITY};
use portable_atomic::{AtomicBool, Ordering};

use crate::uart::uart_config;

/// Size of the console TX pipe in bytes.
pub const CONSOLE_TX_CAPACITY: usize = 512;

pub type ConsolePipe = Pipe<CriticalSectionRawMutex, CONSOLE_TX_CAPACITY>;

/// Line buffer shared between the receive task and the command task.
pub type ConsoleLineBuffer = LineBuffer<CriticalSectionRawMutex>;

/// Whether console reception is enabled.
static CONSOLE_ENABLED: AtomicBool = AtomicBool::new(false);

/// Enable or disable console reception.
///
/// Disabling drops any partial or pending line. Enabling re-arms the line
/// buffer so the next byte starts a fresh command, and returns the driver
/// config for `props`. Returns `None` when disabling or when `props` has no
/// valid baud rate, in which case reception stays off.
pub fn enable_uart(
    props: &UartProperties,
    enable: bool,
    buffer: &ConsoleLineBuffer,
) -> Option<Config> {
    CONSOLE_ENABLED.store(false, Ordering::Release);
    buffer.release();
    if !enable {
        info!("console disabled");
        return None;
    }

    let Some(config) = uart_config(props) else {
        warn!("invalid baud rate index {}", props.baudrate_index);
        return None;
    };
    CONSOLE_ENABLED.store(true, Ordering::Release);
    info!("console enabled at {}", config.baudrate);
    Some(config)
}

#[inline]
pub fn is_uart_enabled() -> bool {
    CONSOLE_ENABLED.load(Ordering::Acquire)
}

/// Non-blocking [`fmt::Write`] into the console pipe.
///
/// Output that does not fit is dropped, so writing never stalls either
/// priority level.
#[derive(Clone, Copy)]
pub struct ConsoleWriter {
    pipe: &'static ConsolePipe,
}

impl ConsoleWriter {
    #[must_use]
    pub const fn new(pipe: &'static ConsolePipe) -> Self {
        Self { pipe }
    }

    /// Queue raw bytes, dropping whatever does not fit.
    pub fn write_bytes(&mut self, mut bytes: &[u8]) {
        while !bytes.is_empty() {
            match self.pipe.try_write(bytes) {
                Ok(n) => bytes = &bytes[n..],
                Err(_) => {
                    warn!("console TX full, dropped {} bytes", bytes.len());
                    return;
                }
            }
        }
    }
}

impl fmt::Write for ConsoleWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_bytes(s.as_bytes());
        Ok(())
    }
}

/// Receive side of the console.
pub struct ConsoleReceiver {
    rx: UartRx<'static, Async>,
    buffer: &'static ConsoleLineBuffer,
    echo: ConsoleWriter,
}

impl ConsoleReceiver {
    #[must_use]
    pub fn new(
        rx: UartRx<'static, Async>,
        buffer: &'static ConsoleLineBuffer,
        echo: ConsoleWriter,
    ) -> Self {
        Self { rx, buffer, echo }
    }

    /// Receive bytes forever, feeding each one into the line buffer.
    pub async fn run(&mut self) -> ! {
        let mut byte = [0u8; 1];
        loop {
            if let Err(e) = self.rx.read(&mut byte).await {
                debug!("console RX error: {:?}", e);
                continue;
            }
            self.on_byte(byte[0]);
        }
    }

    fn on_byte(&mut self, byte: u8) {
        if !is_uart_enabled() {
            return;
        }

        match self.buffer.feed(byte) {
            // Busy with the previous line
            None => {}
            Some(LineEvent::Continue) => self.echo.write_bytes(&[byte]),
            Some(LineEvent::Complete) => self.echo.write_bytes(b"\r\n"),
            Some(LineEvent::Overflow) => {
                warn!("command line overflow");
                let _ = write_overflow_notice(&mut self.echo, LINE_CAPACITY);
            }
        }
    }
}

/// Drain the console pipe into the UART transmitter.
pub async fn drain_console(pipe: &'static ConsolePipe, tx: &mut UartTx<'static, Async>) -> ! {
    let mut chunk = [0u8; 64];
    loop {
        let n = pipe.read(&mut chunk).await;
        if let Err(e) = tx.write(&chunk[..n]).await {
            warn!("console TX error: {:?}", e);
        }
    }
}
