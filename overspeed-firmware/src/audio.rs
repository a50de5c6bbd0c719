//! Buzzer alerter and PWM tone output

use defmt::*;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use fixed::types::U12F4;

use overspeed_core::traits::AudioAlerter;
use overspeed_drivers::audio::ToneOutput;

use crate::channels::ALERT_SIGNAL;

/// PWM clock divider for audible frequencies
const PWM_DIVIDER: u8 = 16;

/// Alerter that hands the clip to the buzzer task
pub struct BuzzerAlerter;

impl AudioAlerter for BuzzerAlerter {
    fn play_alert(&mut self) {
        trace!("Alert requested");
        ALERT_SIGNAL.signal(());
    }
}

/// Square wave on a PWM channel A pin at 50% duty
pub struct PwmTone {
    pwm: Pwm<'static>,
    config: PwmConfig,
}

impl PwmTone {
    pub fn new(mut pwm: Pwm<'static>) -> Self {
        let mut config = PwmConfig::default();
        config.divider = U12F4::from_num(PWM_DIVIDER);
        config.compare_a = 0;
        pwm.set_config(&config);
        Self { pwm, config }
    }
}

impl ToneOutput for PwmTone {
    fn tone(&mut self, freq_hz: u16) {
        let counter_hz = embassy_rp::clocks::clk_sys_freq() / PWM_DIVIDER as u32;
        let top = (counter_hz / freq_hz.max(1) as u32)
            .saturating_sub(1)
            .min(u16::MAX as u32) as u16;

        self.config.top = top;
        self.config.compare_a = top / 2;
        self.pwm.set_config(&self.config);
    }

    fn silence(&mut self) {
        self.config.compare_a = 0;
        self.pwm.set_config(&self.config);
    }
}
