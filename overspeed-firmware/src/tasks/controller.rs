//! Controller task
//!
//! Owns the speed screen session and feeds it input events, fix
//! notifications and ticks. The session is unmounted when the display
//! terminal stops answering and mounted afresh when it comes back.

use defmt::*;
use embassy_futures::select::{select3, Either3};
use portable_atomic::Ordering;

use overspeed_core::config::OverspeedConfig;
use overspeed_core::session::Session;
use overspeed_core::state::State;

use crate::audio::BuzzerAlerter;
use crate::channels::{FIX_READY, INPUT_CHANNEL, LAST_PING_MS};
use crate::display::LinkView;
use crate::location::GpsLocation;
use crate::tasks::tick::{now_ms, TICK_SIGNAL};

/// Display link is considered lost after this long without a PING
const LINK_TIMEOUT_MS: u32 = 3000;

type SpeedSession = Session<GpsLocation, BuzzerAlerter, LinkView>;

/// Main controller task
#[embassy_executor::task]
pub async fn controller_task(config: &'static OverspeedConfig) {
    info!("Controller task started");

    let mut session = mount_session(config, true);
    let mut last_state = session.state();
    let mut link_up = true;

    loop {
        match select3(INPUT_CHANNEL.receive(), FIX_READY.wait(), TICK_SIGNAL.wait()).await {
            Either3::First(event) => {
                debug!("Input: {:?}", event);
                session.handle_input(event, now_ms());
            }
            Either3::Second(()) => {
                session.poll(now_ms());
            }
            Either3::Third(now) => {
                match (link_up, link_alive(now)) {
                    (true, false) => {
                        warn!("Display link lost, unmounting");
                        session.unmount();
                        link_up = false;
                    }
                    (false, true) => {
                        info!("Display link restored, mounting");
                        session = mount_session(config, false);
                        link_up = true;
                    }
                    _ => {}
                }
                session.poll(now);
            }
        }

        let state = session.state();
        if state != last_state {
            info!("State: {:?} -> {:?}", last_state, state);
            if state.is_terminal() {
                warn!("Location activity stopped");
            }
            last_state = state;
        }
    }
}

fn mount_session(config: &'static OverspeedConfig, boot: bool) -> SpeedSession {
    let mut view = LinkView::new();
    if boot {
        view.boot(config.display.title.as_str());
    }

    let mut session = Session::new(
        GpsLocation::new(config.location.consent),
        BuzzerAlerter,
        view,
        config,
    );
    session.mount(now_ms());
    if session.state() == State::RequestingPermission {
        info!("Waiting for location permission");
    }
    session
}

/// True until a terminal that has pinged at least once goes quiet
fn link_alive(now: u32) -> bool {
    match LAST_PING_MS.load(Ordering::Relaxed) {
        0 => true,
        last => now.wrapping_sub(last.wrapping_sub(1)) < LINK_TIMEOUT_MS,
    }
}
