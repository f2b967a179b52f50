//! UART AT command console for an RP2040 IoT modem.
//!
//! # Overview
//!
//! The firmware runs on a Raspberry Pi Pico (RP2040) and:
//! 1. Receives AT command lines on the console UART (115200 baud, 8N1)
//! 2. Dispatches them through the [`modem_core`] interpreter
//! 3. Forwards notifications to the network co-processor on a second UART
//!
//! # Hardware Configuration
//!
//! | Function | GPIO | Description |
//! |----------|------|-------------|
//! | UART0 TX | 0    | Console transmit (echo, help, diagnostics) |
//! | UART0 RX | 1    | Console receive (AT commands) |
//! | UART1 TX | 8    | Uplink to the network co-processor |
//! | UART1 RX | 9    | Uplink receive |
//!
//! # Architecture
//!
//! - **Console RX task** (interrupt executor, `SWI_IRQ_1`): feeds bytes into
//!   the shared [`ConsoleLineBuffer`] and echoes them
//! - **Command task** (thread mode): waits for a completed line and runs
//!   [`Interpreter::process_pending_command`](modem_core::Interpreter::process_pending_command)
//! - **Console TX task**: drains the [`ConsolePipe`] into UART0
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)
//! - **`uart-flow-control`**: Enable hardware flow control on the uplink (CTS/RTS on GPIO 10/11)

#![no_std]

pub use modem_core::{
    Command, DeviceId, Interpreter, LineBuffer, LineEvent, ModemConfig, PublishEnvelope,
    PublishError, Publisher, UartProperties,
};

pub mod console;
pub mod device_id;
pub mod uart;
pub mod uplink;

pub use console::{
    drain_console, enable_uart, is_uart_enabled, ConsoleLineBuffer, ConsolePipe, ConsoleReceiver,
    ConsoleWriter,
};
pub use device_id::{read_device_id, DeviceIdString};
pub use uart::uart_config;
pub use uplink::UplinkPublisher;
