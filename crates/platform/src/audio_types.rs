//! Audio domain newtypes for compile-time safety.
//!
//! These zero-cost abstractions prevent common errors:
//! - `Volume`: clamps 0–127, the AVRCP absolute-volume range, so the sink's
//!   software attenuation can never be handed an out-of-range gain.

// ── Error type ───────────────────────────────────────────────────────────────

/// Error returned when a value is out of the valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutOfRangeError {
    /// The value that was out of range.
    pub value: u32,
    /// The inclusive minimum allowed value.
    pub min: u32,
    /// The inclusive maximum allowed value.
    pub max: u32,
}

impl core::fmt::Display for OutOfRangeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "value {} outside of {}..={}",
            self.value, self.min, self.max
        )
    }
}

// ── Volume ───────────────────────────────────────────────────────────────────

/// Playback volume on the AVRCP absolute-volume scale, clamped to 0–127.
///
/// `0` is silence, [`Volume::MAX`] (127) is unity gain. Construct with
/// [`Volume::new`] (clamping) or [`Volume::try_new`] (fallible, strict).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct Volume(u8);

impl Volume {
    /// Unity gain; the sink skips scaling entirely at this level.
    pub const MAX: Self = Self(127);

    /// Silence.
    pub const MUTE: Self = Self(0);

    /// Create a `Volume`, clamping values above 127 to 127.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        if value > Self::MAX.0 {
            Self::MAX
        } else {
            Self(value)
        }
    }

    /// Create a `Volume`, returning an error if `value > 127`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `value > 127`.
    pub fn try_new(value: u8) -> Result<Self, OutOfRangeError> {
        if value > Self::MAX.0 {
            Err(OutOfRangeError {
                value: u32::from(value),
                min: 0,
                max: u32::from(Self::MAX.0),
            })
        } else {
            Ok(Self(value))
        }
    }

    /// Return the inner volume value (0–127).
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// `true` at unity gain.
    #[must_use]
    pub const fn is_max(self) -> bool {
        self.0 == Self::MAX.0
    }

    /// Raise by `step`, saturating at [`Volume::MAX`].
    #[must_use]
    pub const fn step_up(self, step: u8) -> Self {
        Self::new(self.0.saturating_add(step))
    }

    /// Lower by `step`, saturating at [`Volume::MUTE`].
    #[must_use]
    pub const fn step_down(self, step: u8) -> Self {
        Self(self.0.saturating_sub(step))
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_VOLUME)
    }
}

impl From<Volume> for u8 {
    fn from(v: Volume) -> Self {
        v.0
    }
}
