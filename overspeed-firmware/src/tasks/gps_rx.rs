//! GPS UART receive task
//!
//! Reads NMEA sentences from the receiver and queues RMC fixes for the
//! location provider while it has the receiver enabled.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;
use portable_atomic::Ordering;

use overspeed_core::location::Fix;
use overspeed_drivers::gps::{NmeaError, NmeaReader};

use crate::channels::{FIX_CHANNEL, FIX_READY, GPS_ENABLED};
use crate::tasks::tick::now_ms;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// GPS RX task - parses the NMEA stream
#[embassy_executor::task]
pub async fn gps_rx_task(mut rx: BufferedUartRx) {
    info!("GPS RX task started");

    let mut reader = NmeaReader::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                for &byte in &buf[..n] {
                    match reader.feed(byte) {
                        Ok(Some(rmc)) => {
                            if !GPS_ENABLED.load(Ordering::Relaxed) {
                                continue;
                            }
                            match rmc.to_fix(now_ms()) {
                                Some(fix) => queue_fix(fix),
                                None => trace!("RMC without position"),
                            }
                        }
                        Ok(None) => {}
                        // Line noise before the first `$` is normal at power-up
                        Err(NmeaError::Garbled) => trace!("NMEA: garbled byte"),
                        Err(e) => warn!("NMEA error: {:?}", e),
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!("GPS UART read error: {:?}", e);
            }
        }
    }
}

/// Queue a fix, dropping the oldest when the controller falls behind
fn queue_fix(fix: Fix) {
    if let Err(embassy_sync::channel::TrySendError::Full(fix)) = FIX_CHANNEL.try_send(fix) {
        let _ = FIX_CHANNEL.try_receive();
        let _ = FIX_CHANNEL.try_send(fix);
        debug!("Fix queue full, dropped oldest");
    }
    FIX_READY.signal(());
}
