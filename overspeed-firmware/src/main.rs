//! Overspeed - GPS Speed Alarm Firmware
//!
//! Main firmware binary for RP2040-based boards. Reads speed from an NMEA
//! GPS receiver, shows it on a UART display terminal with an encoder, and
//! sounds a buzzer while the speed is above the limit set on the terminal.
//!
//! Pin assignment:
//! - UART0 (GP0 TX, GP1 RX): display terminal, 115200 baud
//! - UART1 (GP4 TX, GP5 RX): GPS receiver, baud from overspeed.toml
//! - GP14 (PWM slice 7 A): piezo buzzer

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::{UART0, UART1};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use overspeed_core::config::OverspeedConfig;

use crate::audio::PwmTone;
use crate::config::load_config;

/// Embedded configuration (compiled into firmware)
/// Edit overspeed.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../overspeed.toml");

/// Display link baud rate
const DISPLAY_BAUD: u32 = 115_200;

mod audio;
mod channels;
mod config;
mod display;
mod location;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    UART1_IRQ => BufferedInterruptHandler<UART1>;
});

// Static cells for UART buffers (must live forever)
static DISPLAY_TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static DISPLAY_RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static GPS_TX_BUF: StaticCell<[u8; 16]> = StaticCell::new();
static GPS_RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

static CONFIG: StaticCell<OverspeedConfig> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Overspeed firmware starting...");

    let p = embassy_rp::init(Default::default());
    let config: &'static OverspeedConfig = CONFIG.init(load_config(EMBEDDED_CONFIG));

    // Display terminal on UART0
    let mut display_uart_config = UartConfig::default();
    display_uart_config.baudrate = DISPLAY_BAUD;
    let display_uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, display_uart_config)
        .into_buffered(
            Irqs,
            DISPLAY_TX_BUF.init([0u8; 256]),
            DISPLAY_RX_BUF.init([0u8; 64]),
        );
    let (display_tx, display_rx) = display_uart.split();

    // GPS receiver on UART1
    let mut gps_uart_config = UartConfig::default();
    gps_uart_config.baudrate = config.gps.baud;
    let gps_uart = Uart::new_blocking(p.UART1, p.PIN_4, p.PIN_5, gps_uart_config).into_buffered(
        Irqs,
        GPS_TX_BUF.init([0u8; 16]),
        GPS_RX_BUF.init([0u8; 256]),
    );
    let (_gps_tx, gps_rx) = gps_uart.split();

    // Buzzer, silent until the first tone
    let buzzer = PwmTone::new(Pwm::new_output_a(
        p.PWM_SLICE7,
        p.PIN_14,
        PwmConfig::default(),
    ));

    info!("Peripherals initialized");

    spawner.spawn(tasks::tick_task()).unwrap();
    spawner.spawn(tasks::display_rx_task(display_rx)).unwrap();
    spawner.spawn(tasks::display_tx_task(display_tx)).unwrap();
    spawner.spawn(tasks::gps_rx_task(gps_rx)).unwrap();
    spawner.spawn(tasks::buzzer_task(buzzer)).unwrap();
    spawner.spawn(tasks::controller_task(config)).unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
