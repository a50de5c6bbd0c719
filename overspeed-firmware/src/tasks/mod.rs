//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod buzzer;
pub mod controller;
pub mod display_rx;
pub mod display_tx;
pub mod gps_rx;
pub mod tick;

pub use buzzer::buzzer_task;
pub use controller::controller_task;
pub use display_rx::display_rx_task;
pub use display_tx::display_tx_task;
pub use gps_rx::gps_rx_task;
pub use tick::tick_task;
