//! Error types for sound playback.
//!
//! Copy enums with short codes, same shape as the console errors: cheap to
//! return from the playback path and to format into a log entry.

/// Hardware capability failure reported by a [`SpeakerHal`](crate::hal::SpeakerHal).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalError {
    /// Line identifier not usable on this platform.
    InvalidLine(i32),
    /// Digital configure/write failed (raw platform error code).
    Gpio(i32),
    /// Analog write failed (raw platform error code).
    Analog(i32),
}

impl HalError {
    /// Raw platform error code carried by this error.
    pub fn raw(&self) -> i32 {
        match *self {
            Self::InvalidLine(code) | Self::Gpio(code) | Self::Analog(code) => code,
        }
    }
}

impl core::fmt::Display for HalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidLine(line) => write!(f, "invalid line {}", line),
            Self::Gpio(code) => write!(f, "gpio error {}", code),
            Self::Analog(code) => write!(f, "analog error {}", code),
        }
    }
}

/// Playback error with code and message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SfxError {
    /// E01: Inter-sample interval of zero
    ZeroInterval,
    /// E02: Requested sample count exceeds the table length
    TableTooShort { count: usize, len: usize },
    /// E03: Hardware line could not be configured or written
    Hardware(HalError),
}

impl SfxError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ZeroInterval => "E01",
            Self::TableTooShort { .. } => "E02",
            Self::Hardware(_) => "E03",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::ZeroInterval => "interval must be non-zero",
            Self::TableTooShort { .. } => "sample count exceeds table",
            Self::Hardware(_) => "hardware error",
        }
    }
}

impl From<HalError> for SfxError {
    fn from(e: HalError) -> Self {
        SfxError::Hardware(e)
    }
}

impl core::fmt::Display for SfxError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::TableTooShort { count, len } => {
                write!(
                    f,
                    "{}: {} ({} > {})",
                    self.code(),
                    self.message(),
                    count,
                    len
                )
            }
            Self::Hardware(e) => write!(f, "{}: {} ({})", self.code(), self.message(), e),
            _ => write!(f, "{}: {}", self.code(), self.message()),
        }
    }
}
