//! Platform-agnostic AT command interpreter for the IoT modem console.
//!
//! This crate sits between a UART driver and a messaging transport. It
//! contains no chip-specific code and works in `no_std` environments.
//!
//! # Architecture
//!
//! ```text
//!  UART RX interrupt            command task
//!  ─────────────────            ────────────
//!  LineBuffer::feed ──signal──► LineBuffer::wait
//!                               Interpreter::process_pending_command
//!                                 ├─ lookup (command table)
//!                                 ├─ parse_fields
//!                                 └─ Publisher::publish
//!                               LineBuffer::release
//! ```
//!
//! - [`handoff`]: the shared [`LineBuffer`] and its one-line-in-flight rule
//! - [`interpreter`]: dispatch and handlers ([`Interpreter`])
//! - [`publish`]: [`Publisher`] and [`DeviceId`] traits for the platform
//! - [`console`]: help listing and diagnostics text
//! - [`config`]: [`ModemConfig`] and [`UartProperties`]
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Log through defmt (for embedded targets)
//! - **`log`**: Log through the `log` facade

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

// Declared first so the logging macros are in scope below
mod fmt;

pub mod config;
pub mod console;
pub mod handoff;
pub mod interpreter;
pub mod publish;

pub use at_proto::{
    lookup, parse_fields, Command, CommandEntry, EnvelopeError, LineEvent, ParsedFields,
    PublishEnvelope, SyntaxError, COMMANDS, LINE_CAPACITY,
};
pub use config::{DataBits, ModemConfig, Parity, StopBits, UartProperties, BAUD_RATES};
pub use handoff::{Line, LineBuffer};
pub use interpreter::Interpreter;
pub use publish::{DeviceId, PublishError, Publisher};
