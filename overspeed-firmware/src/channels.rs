//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use portable_atomic::{AtomicBool, AtomicU32};

use overspeed_core::location::Fix;
use overspeed_display::Screen;
use overspeed_protocol::InputEvent;

/// Channel capacity for input events from display
const INPUT_CHANNEL_SIZE: usize = 8;

/// Channel capacity for GPS fixes
///
/// The session only uses the newest fix, so a short queue is enough.
const FIX_CHANNEL_SIZE: usize = 4;

/// Input events from the display terminal (encoder rotation, button presses)
pub static INPUT_CHANNEL: Channel<CriticalSectionRawMutex, InputEvent, INPUT_CHANNEL_SIZE> =
    Channel::new();

/// Parsed fixes from the GPS receiver
pub static FIX_CHANNEL: Channel<CriticalSectionRawMutex, Fix, FIX_CHANNEL_SIZE> = Channel::new();

/// Signal that at least one fix was queued
pub static FIX_READY: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Fixes are forwarded only while the location adapter has the receiver on
pub static GPS_ENABLED: AtomicBool = AtomicBool::new(false);

/// Request to play the alert clip
pub static ALERT_SIGNAL: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Latest screen content to stream to the display
pub static SCREEN_UPDATE: Signal<CriticalSectionRawMutex, Screen> = Signal::new();

/// Signal that a heartbeat (PING) was received from display
pub static HEARTBEAT_RECEIVED: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Time of the last PING plus one (ms), 0 before the first
pub static LAST_PING_MS: AtomicU32 = AtomicU32::new(0);
