//! User-entered speed threshold
//!
//! The threshold lives as raw text, exactly as typed. Resolution into a
//! number happens on every evaluation so an empty or half-typed field never
//! needs special handling by the editor.

use core::fmt::Write;

use heapless::String;

use crate::config::InvalidThresholdPolicy;

/// Maximum number of characters in the threshold field
pub const MAX_THRESHOLD_LEN: usize = 6;

/// The threshold field is full
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ThresholdFull;

/// Effective threshold after resolving the raw text
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Threshold {
    /// Field was empty, the configured default applies (km/h)
    Default(f32),
    /// Field parsed as a number (km/h), used as-is
    Value(f32),
    /// Field holds text that is not a number
    Invalid,
}

impl Threshold {
    /// Limit in km/h, or `None` when the text did not parse
    pub fn limit_kmh(&self) -> Option<f32> {
        match self {
            Threshold::Default(v) | Threshold::Value(v) => Some(*v),
            Threshold::Invalid => None,
        }
    }

    /// Strict greater-than comparison against the limit
    ///
    /// An invalid threshold behaves like a NaN comparison: never exceeded.
    pub fn is_exceeded_by(&self, kmh: f32) -> bool {
        match self.limit_kmh() {
            Some(limit) => kmh > limit,
            None => false,
        }
    }
}

/// Raw threshold text as entered by the user (km/h)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ThresholdInput {
    text: String<MAX_THRESHOLD_LEN>,
}

impl ThresholdInput {
    /// Empty field
    pub const fn new() -> Self {
        Self {
            text: String::new(),
        }
    }

    /// Field pre-filled with the default value, e.g. `50.0` → "50"
    pub fn with_default(default_kmh: f32) -> Self {
        let mut input = Self::new();
        if write!(input.text, "{}", default_kmh).is_err() {
            // Default too long to show; an empty field resolves to it anyway
            input.text.clear();
        }
        input
    }

    /// Field holding arbitrary text
    pub fn from_text(text: &str) -> Result<Self, ThresholdFull> {
        let mut input = Self::new();
        input.set(text)?;
        Ok(input)
    }

    /// Current raw text
    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    /// True when the field holds no characters
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// True when no more characters fit
    pub fn is_full(&self) -> bool {
        self.text.len() >= MAX_THRESHOLD_LEN
    }

    /// Replace the whole text
    pub fn set(&mut self, text: &str) -> Result<(), ThresholdFull> {
        if text.len() > MAX_THRESHOLD_LEN {
            return Err(ThresholdFull);
        }
        self.text.clear();
        self.text.push_str(text).map_err(|_| ThresholdFull)
    }

    /// Append one character
    pub fn push(&mut self, c: char) -> Result<(), ThresholdFull> {
        self.text.push(c).map_err(|_| ThresholdFull)
    }

    /// Remove the last character, returning it
    pub fn pop(&mut self) -> Option<char> {
        self.text.pop()
    }

    /// Remove all characters
    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Resolve the text into the effective threshold
    ///
    /// - empty → `Default(default_kmh)`
    /// - whitespace only → `Value(0.0)`
    /// - numeric, surrounding whitespace ignored → `Value(n)` with no
    ///   range checks
    /// - anything else → `Invalid`, or `Default` under
    ///   [`InvalidThresholdPolicy::UseDefault`]
    pub fn resolve(&self, default_kmh: f32, policy: InvalidThresholdPolicy) -> Threshold {
        if self.text.is_empty() {
            return Threshold::Default(default_kmh);
        }

        let text = self.text.trim();
        if text.is_empty() {
            return Threshold::Value(0.0);
        }

        match text.parse::<f32>() {
            Ok(value) => Threshold::Value(value),
            Err(_) => match policy {
                InvalidThresholdPolicy::SuppressAlert => Threshold::Invalid,
                InvalidThresholdPolicy::UseDefault => Threshold::Default(default_kmh),
            },
        }
    }
}
