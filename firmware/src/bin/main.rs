#![no_std]
#![no_main]

use defmt::{info, warn};
use defmt_rtt as _;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::bind_interrupts;
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::peripherals::{UART0, UART1};
use embassy_rp::uart::{Async, Uart, UartTx};
use iot_modem::{
    drain_console, enable_uart, read_device_id, uart_config, ConsoleLineBuffer, ConsolePipe,
    ConsoleReceiver, ConsoleWriter, DeviceIdString, Interpreter, ModemConfig, UplinkPublisher,
};
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    UART0_IRQ => embassy_rp::uart::InterruptHandler<UART0>;
    UART1_IRQ => embassy_rp::uart::InterruptHandler<UART1>;
});

type ModemInterpreter = Interpreter<UplinkPublisher<'static>, DeviceIdString, ConsoleWriter>;

/// Completed-line handoff from the receive interrupt to the command task.
static LINE_BUFFER: ConsoleLineBuffer = ConsoleLineBuffer::new();

/// Console output shared by both priority levels.
static CONSOLE_TX: StaticCell<ConsolePipe> = StaticCell::new();

/// Runs console reception above thread mode.
static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_HIGH.on_interrupt()
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("IoT modem console starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());
    let config = ModemConfig::default();

    let device_id = read_device_id(p.FLASH).unwrap_or_else(|| {
        warn!("flash unique id unavailable");
        DeviceIdString::try_from("unknown").unwrap_or_default()
    });
    info!("device id: {}", device_id.as_str());

    // --- Console UART ---
    let console_config = enable_uart(&config.uart, true, &LINE_BUFFER).unwrap_or_default();
    let console = Uart::new(
        p.UART0,
        p.PIN_0, // TX
        p.PIN_1, // RX
        Irqs,
        p.DMA_CH2,
        p.DMA_CH3,
        console_config,
    );
    let (console_tx, console_rx) = console.split();

    // --- Uplink UART ---
    let uplink_config = uart_config(&config.uart).unwrap_or_default();
    #[cfg(not(feature = "uart-flow-control"))]
    let uplink = Uart::new(
        p.UART1,
        p.PIN_8, // TX
        p.PIN_9, // RX
        Irqs,
        p.DMA_CH0,
        p.DMA_CH1,
        uplink_config,
    );
    #[cfg(feature = "uart-flow-control")]
    let uplink = Uart::new_with_rtscts(
        p.UART1,
        p.PIN_8,  // TX
        p.PIN_9,  // RX
        p.PIN_11, // RTS
        p.PIN_10, // CTS
        Irqs,
        p.DMA_CH0,
        p.DMA_CH1,
        uplink_config,
    );
    let (uplink_tx, _uplink_rx) = uplink.split();

    let pipe: &'static ConsolePipe = CONSOLE_TX.init(ConsolePipe::new());
    let writer = ConsoleWriter::new(pipe);

    let interpreter = Interpreter::new(UplinkPublisher::new(uplink_tx), device_id, writer, config);
    let receiver = ConsoleReceiver::new(console_rx, &LINE_BUFFER, writer);

    // Console reception preempts command processing
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let high_spawner = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);

    // Spawn tasks (unwrap the SpawnToken, then spawn)
    spawner.spawn(console_tx_task(pipe, console_tx).unwrap());
    spawner.spawn(command_task(interpreter).unwrap());
    high_spawner.spawn(console_rx_task(receiver).unwrap());

    info!("IoT modem console initialized, waiting for commands...");
}

/// Console RX task - feeds received bytes into the line buffer.
#[embassy_executor::task]
async fn console_rx_task(mut receiver: ConsoleReceiver) {
    receiver.run().await
}

/// Console TX task - drains queued console output into UART0.
#[embassy_executor::task]
async fn console_tx_task(pipe: &'static ConsolePipe, mut tx: UartTx<'static, Async>) {
    drain_console(pipe, &mut tx).await
}

/// Command task - processes one completed line at a time.
#[embassy_executor::task]
async fn command_task(mut interpreter: ModemInterpreter) {
    interpreter.print_help_listing();
    interpreter.run(&LINE_BUFFER).await
}
