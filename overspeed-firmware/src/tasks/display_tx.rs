//! Display UART transmit task
//!
//! Sends screen updates and heartbeat responses to the display terminal.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use overspeed_display::{encode_screen, pong_frame, Screen};
use overspeed_protocol::{ControllerMessage, Frame, MAX_FRAME_SIZE};

use crate::channels::{HEARTBEAT_RECEIVED, SCREEN_UPDATE};

/// Display TX task - sends frames to the terminal
#[embassy_executor::task]
pub async fn display_tx_task(mut tx: BufferedUartTx) {
    info!("Display TX task started");

    // Start the terminal from a blank panel
    if let Ok(frame) = ControllerMessage::Reset.to_frame() {
        send_frame(&mut tx, &frame).await;
    }

    loop {
        match select(HEARTBEAT_RECEIVED.wait(), SCREEN_UPDATE.wait()).await {
            Either::First(()) => {
                if let Ok(frame) = pong_frame() {
                    if send_frame(&mut tx, &frame).await {
                        trace!("PONG sent");
                    }
                }
            }
            Either::Second(screen) => send_screen(&mut tx, &screen).await,
        }
    }
}

/// Send a whole screen, stopping at the first write error
async fn send_screen(tx: &mut BufferedUartTx, screen: &Screen) {
    for frame in encode_screen(screen) {
        if !send_frame(tx, &frame).await {
            return;
        }
    }
    trace!("Screen update sent");
}

async fn send_frame(tx: &mut BufferedUartTx, frame: &Frame) -> bool {
    let mut buf = [0u8; MAX_FRAME_SIZE];
    let Ok(len) = frame.encode(&mut buf) else {
        return false;
    };

    match tx.write_all(&buf[..len]).await {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to send frame: {:?}", e);
            false
        }
    }
}
