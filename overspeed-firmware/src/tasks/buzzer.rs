//! Buzzer task
//!
//! Plays the alert clip on request. A request while the clip is sounding
//! restarts it.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::Timer;

use overspeed_drivers::audio::{ClipPlayer, ALERT_CLIP};

use crate::audio::PwmTone;
use crate::channels::ALERT_SIGNAL;
use crate::tasks::tick::now_ms;

/// Buzzer task - steps the clip player
#[embassy_executor::task]
pub async fn buzzer_task(mut output: PwmTone) {
    info!("Buzzer task started");

    let mut player = ClipPlayer::new(ALERT_CLIP);

    loop {
        let Some(remaining) = player.remaining_in_step(now_ms()) else {
            ALERT_SIGNAL.wait().await;
            debug!("Alert clip started");
            player.start(now_ms(), &mut output);
            continue;
        };

        match select(ALERT_SIGNAL.wait(), Timer::after_millis(remaining as u64)).await {
            Either::First(()) => {
                debug!("Alert clip restarted");
                player.start(now_ms(), &mut output);
            }
            Either::Second(()) => {
                if !player.update(now_ms(), &mut output) {
                    trace!("Alert clip finished");
                }
            }
        }
    }
}
