//! Command dispatch and handlers.

use core::fmt::Write;

use at_proto::{
    lookup, parse_fields, Command, CommandEntry, ParsedFields, PublishEnvelope, TRIGGER_SEGMENT,
};
use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::config::{ModemConfig, FIRMWARE_VERSION};
use crate::console::{write_help_listing, write_syntax_error};
use crate::handoff::LineBuffer;
use crate::publish::{DeviceId, Publisher};

/// AT command interpreter.
///
/// Runs in the command task: takes completed lines from a [`LineBuffer`],
/// dispatches them through the command table and publishes notifications.
/// Diagnostics and listings go to `console`.
pub struct Interpreter<P, D, C> {
    publisher: P,
    device: D,
    console: C,
    config: ModemConfig,
}

impl<P: Publisher, D: DeviceId, C: Write> Interpreter<P, D, C> {
    pub fn new(publisher: P, device: D, console: C, config: ModemConfig) -> Self {
        Self {
            publisher,
            device,
            console,
            config,
        }
    }

    /// Run forever: wait for each completed line and process it.
    pub async fn run<M: RawMutex, const N: usize>(&mut self, buffer: &LineBuffer<M, N>) -> ! {
        loop {
            buffer.wait().await;
            let _ = self.process_pending_command(buffer).await;
        }
    }

    /// Dispatch the pending line, then clear the buffer and re-arm input.
    ///
    /// Does nothing and returns `None` if no line is pending. Otherwise
    /// returns the command that handled the line, if any matched.
    pub async fn process_pending_command<M: RawMutex, const N: usize>(
        &mut self,
        buffer: &LineBuffer<M, N>,
    ) -> Option<Command> {
        let line = buffer.pending_line()?;
        debug!("command: {} [{}]", as_text(&line), line.len());

        let handled = self.dispatch(&line).await;
        buffer.release();
        handled
    }

    /// Run the first command whose prefix starts `line`.
    pub async fn dispatch(&mut self, line: &[u8]) -> Option<Command> {
        let Some((index, entry)) = lookup(line) else {
            debug!("no command matches {}", as_text(line));
            return None;
        };
        self.handle(index, entry, line).await;
        Some(entry.command)
    }

    /// Write the command table to the console.
    pub fn print_help_listing(&mut self) {
        let _ = write_help_listing(&mut self.console);
    }

    async fn handle(&mut self, index: usize, entry: &CommandEntry, line: &[u8]) {
        let remainder = entry.remainder(line);

        match entry.command {
            Command::Help => self.print_help_listing(),
            Command::Info => self.print_info(),
            Command::Status => {
                let _ = self.console.write_str("OK\r\n");
            }
            command => match command.category() {
                Some(category) if command.takes_fields() => self.notify(category, remainder).await,
                Some(category) => self.notify_bare(category, remainder).await,
                None => {
                    let _ = write!(self.console, "{index}\r\n");
                }
            },
        }
    }

    /// Notification with optional `+recipient+message` fields.
    async fn notify(&mut self, category: &str, remainder: &[u8]) {
        if remainder.is_empty() {
            self.publish(category, &ParsedFields::default()).await;
            return;
        }

        match parse_fields(remainder) {
            Ok(fields) => self.publish(category, &fields).await,
            Err(e) => {
                warn!("wrong syntax: {}", e);
                let _ = write_syntax_error(&mut self.console, Some(e));
            }
        }
    }

    /// Notification that accepts no arguments.
    async fn notify_bare(&mut self, category: &str, remainder: &[u8]) {
        if remainder.is_empty() {
            self.publish(category, &ParsedFields::default()).await;
        } else {
            warn!("{} takes no arguments", category);
            let _ = write_syntax_error(&mut self.console, None);
        }
    }

    async fn publish(&mut self, category: &str, fields: &ParsedFields) {
        let envelope = match PublishEnvelope::new(
            self.config.topic_prefix,
            self.device.device_id(),
            category,
            fields,
        ) {
            Ok(envelope) => envelope,
            Err(e) => {
                error!("cannot build {} notification: {}", category, e);
                return;
            }
        };

        debug!(
            "PUB {} {}",
            envelope.topic.as_str(),
            envelope.payload_str().unwrap_or("<binary>")
        );
        if let Err(e) = self.publisher.publish(&envelope).await {
            warn!("publish to {} failed: {}", envelope.topic.as_str(), e);
        }
    }

    fn print_info(&mut self) {
        let device_id = self.device.device_id();
        let _ = write!(
            self.console,
            "version: {FIRMWARE_VERSION}\r\ndevice: {device_id}\r\ntopic: {}{device_id}{TRIGGER_SEGMENT}\r\nuart: {}\r\n",
            self.config.topic_prefix,
            self.config.uart,
        );
    }

    /// Get a reference to the publisher.
    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Get a mutable reference to the publisher.
    pub fn publisher_mut(&mut self) -> &mut P {
        &mut self.publisher
    }

    /// Get a reference to the console writer.
    pub fn console(&self) -> &C {
        &self.console
    }

    /// Get a mutable reference to the console writer.
    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    /// Decompose the interpreter into publisher, device id and console.
    pub fn into_parts(self) -> (P, D, C) {
        (self.publisher, self.device, self.console)
    }
}

/// Best-effort text view of a console line for logging.
#[inline]
fn as_text(bytes: &[u8]) -> &str {
    core::str::from_utf8(bytes).unwrap_or("<binary>")
}
