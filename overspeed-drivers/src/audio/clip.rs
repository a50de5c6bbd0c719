//! Alert clip playback on a piezo buzzer
//!
//! The alert sound is a short fixed sequence of tones. The player is
//! stepped from a timer loop:
//!
//! ```ignore
//! let mut player = ClipPlayer::new(ALERT_CLIP);
//! player.start(now_ms, &mut buzzer);
//!
//! // Periodically:
//! if !player.update(now_ms, &mut buzzer) {
//!     // clip finished, buzzer silent
//! }
//! ```
//!
//! Starting while a clip is playing restarts it from the first tone.

/// One step of a clip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tone {
    /// Frequency in Hz, 0 for a rest
    pub freq_hz: u16,
    /// Step length in ms
    pub duration_ms: u16,
}

impl Tone {
    pub const fn new(freq_hz: u16, duration_ms: u16) -> Self {
        Self {
            freq_hz,
            duration_ms,
        }
    }

    pub const fn rest(duration_ms: u16) -> Self {
        Self::new(0, duration_ms)
    }
}

/// The bundled alert: three short high beeps then a longer low one
pub const ALERT_CLIP: &[Tone] = &[
    Tone::new(2700, 120),
    Tone::rest(60),
    Tone::new(2700, 120),
    Tone::rest(60),
    Tone::new(2700, 120),
    Tone::rest(60),
    Tone::new(1800, 300),
];

/// Square-wave output driving the buzzer
pub trait ToneOutput {
    /// Start a tone at `freq_hz`
    fn tone(&mut self, freq_hz: u16);

    /// Stop any tone
    fn silence(&mut self);
}

/// Steps through a clip
#[derive(Debug, Clone)]
pub struct ClipPlayer {
    clip: &'static [Tone],
    /// Current step, `None` when idle
    step: Option<usize>,
    /// When the current step started (ms)
    step_started_ms: u32,
    /// Number of times playback was (re)started
    starts: u32,
}

impl ClipPlayer {
    /// Create an idle player for `clip`
    pub const fn new(clip: &'static [Tone]) -> Self {
        Self {
            clip,
            step: None,
            step_started_ms: 0,
            starts: 0,
        }
    }

    /// True while a clip is sounding
    pub fn is_playing(&self) -> bool {
        self.step.is_some()
    }

    /// Number of starts since creation, restarts included
    pub fn starts(&self) -> u32 {
        self.starts
    }

    /// Start the clip from the beginning
    pub fn start(&mut self, now_ms: u32, output: &mut impl ToneOutput) {
        self.starts = self.starts.wrapping_add(1);
        if self.clip.is_empty() {
            self.stop(output);
            return;
        }
        self.enter(0, now_ms, output);
    }

    /// Stop playback and silence the output
    pub fn stop(&mut self, output: &mut impl ToneOutput) {
        self.step = None;
        output.silence();
    }

    /// Advance playback to `now_ms`
    ///
    /// Returns true while the clip is still playing.
    pub fn update(&mut self, now_ms: u32, output: &mut impl ToneOutput) -> bool {
        let Some(mut index) = self.step else {
            return false;
        };

        // Catch up on every step that has elapsed since the last update
        loop {
            let duration = self.clip[index].duration_ms as u32;
            if now_ms.wrapping_sub(self.step_started_ms) < duration {
                return true;
            }

            let next_start = self.step_started_ms.wrapping_add(duration);
            index += 1;
            if index >= self.clip.len() {
                self.stop(output);
                return false;
            }
            self.enter(index, next_start, output);
        }
    }

    /// Time until the current step ends, for the caller's timer
    pub fn remaining_in_step(&self, now_ms: u32) -> Option<u32> {
        let index = self.step?;
        let duration = self.clip[index].duration_ms as u32;
        Some(duration.saturating_sub(now_ms.wrapping_sub(self.step_started_ms)))
    }

    fn enter(&mut self, index: usize, started_ms: u32, output: &mut impl ToneOutput) {
        self.step = Some(index);
        self.step_started_ms = started_ms;
        match self.clip[index].freq_hz {
            0 => output.silence(),
            freq => output.tone(freq),
        }
    }
}
