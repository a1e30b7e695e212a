//! Sound tables and the named-sound mapping.

use super::bank::{ALERT, BEEPS};

/// Immutable 8-bit sample table with its playback interval.
///
/// The sample count is the slice length, so a table cannot claim more
/// samples than it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundTable {
    interval_us: u32,
    samples: &'static [u8],
}

impl SoundTable {
    /// Create a table. Panics (at compile time for statics) if
    /// `interval_us` is zero.
    pub const fn new(interval_us: u32, samples: &'static [u8]) -> Self {
        assert!(interval_us > 0, "sound table interval must be non-zero");
        Self {
            interval_us,
            samples,
        }
    }

    /// Target spacing between sample writes in microseconds.
    #[inline]
    pub const fn interval_us(&self) -> u32 {
        self.interval_us
    }

    #[inline]
    pub const fn samples(&self) -> &'static [u8] {
        self.samples
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Effective sample rate in Hz.
    #[inline]
    pub const fn sample_rate_hz(&self) -> u32 {
        1_000_000 / self.interval_us
    }

    /// Nominal streaming time (samples × interval), guard delays excluded.
    #[inline]
    pub const fn duration_us(&self) -> u64 {
        self.samples.len() as u64 * self.interval_us as u64
    }
}

/// Built-in sound effects.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    /// Three short confirmation beeps
    Beeps = 0,
    /// Two-tone warble for warnings
    Alert = 1,
}

/// Table for each [`Sound`], indexed by discriminant.
static SOUND_BANK: [SoundTable; 2] = [BEEPS, ALERT];

impl Sound {
    /// All built-in sounds in bank order.
    pub const ALL: [Sound; 2] = [Sound::Beeps, Sound::Alert];

    /// Table backing this sound.
    #[inline]
    pub fn table(self) -> &'static SoundTable {
        &SOUND_BANK[self as usize]
    }

    /// Lower-case name.
    pub fn name(self) -> &'static str {
        match self {
            Sound::Beeps => "beeps",
            Sound::Alert => "alert",
        }
    }

    /// Look up a sound by name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.name().eq_ignore_ascii_case(name))
    }
}
