//! Simulated speaker hardware.
//!
//! Virtual microsecond clock plus a fixed-capacity recorder of every line
//! operation. Delays advance the clock instantly, so a 100 ms sound runs in
//! microseconds of host time. No allocation: usable from `no_std` firmware
//! builds as a dry-run backend.

use core::cell::Cell;

use super::{Level, LineId, SpeakerHal};
use crate::error::HalError;

/// Default recorder capacity (events).
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Number of distinct lines whose digital level is tracked.
const TRACKED_LINES: usize = 4;

/// Kind of recorded hardware operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalEventKind {
    Configure(LineId),
    Digital(LineId, Level),
    Analog(LineId, u16),
    Delay(u32),
}

/// A recorded operation and the clock value when it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalEvent {
    pub at_us: u32,
    pub kind: HalEventKind,
}

impl HalEvent {
    const EMPTY: Self = Self {
        at_us: 0,
        kind: HalEventKind::Delay(0),
    };
}

/// Simulated HAL with event recording.
///
/// Events beyond `N` are not stored but counted in [`SimHal::dropped`].
/// Line levels are tracked independently of the recorder, so
/// [`SimHal::level`] stays correct after the recorder fills up.
pub struct SimHal<const N: usize = DEFAULT_EVENT_CAPACITY> {
    clock_us: Cell<u32>,
    /// Time consumed by each configure/write (simulates slow I/O).
    write_cost_us: u32,
    /// Time consumed by each clock read (simulates per-sample processing).
    read_cost_us: u32,
    events: [HalEvent; N],
    len: usize,
    dropped: u32,
    levels: [Option<(LineId, Level)>; TRACKED_LINES],
    faulty_line: Option<(LineId, HalError)>,
    /// Analog writes allowed before every further analog write fails.
    analog_budget: Option<u32>,
}

impl<const N: usize> SimHal<N> {
    /// Create a simulator with the clock at zero.
    pub const fn new() -> Self {
        Self::starting_at(0)
    }

    /// Create a simulator with the clock at `clock_us`.
    pub const fn starting_at(clock_us: u32) -> Self {
        Self {
            clock_us: Cell::new(clock_us),
            write_cost_us: 0,
            read_cost_us: 0,
            events: [HalEvent::EMPTY; N],
            len: 0,
            dropped: 0,
            levels: [None; TRACKED_LINES],
            faulty_line: None,
            analog_budget: None,
        }
    }

    /// Charge `us` of clock time for every configure/write.
    pub fn with_write_cost(mut self, us: u32) -> Self {
        self.write_cost_us = us;
        self
    }

    /// Advance the clock by `us` after every `now_us` read.
    pub fn with_read_cost(mut self, us: u32) -> Self {
        self.read_cost_us = us;
        self
    }

    /// Make every operation on `line` fail with `error`.
    pub fn fail_line(mut self, line: LineId, error: HalError) -> Self {
        self.faulty_line = Some((line, error));
        self
    }

    /// Let `writes` analog writes succeed, then fail the rest.
    pub fn fail_analog_after(mut self, writes: u32) -> Self {
        self.analog_budget = Some(writes);
        self
    }

    /// Current simulated time (does not charge a read).
    #[inline]
    pub fn clock_us(&self) -> u32 {
        self.clock_us.get()
    }

    /// Recorded events, oldest first.
    #[inline]
    pub fn events(&self) -> &[HalEvent] {
        &self.events[..self.len]
    }

    /// Events that did not fit in the recorder.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Recorded analog writes as `(at_us, value)`.
    pub fn analog_writes(&self) -> impl Iterator<Item = (u32, u16)> + '_ {
        self.events().iter().filter_map(|e| match e.kind {
            HalEventKind::Analog(_, value) => Some((e.at_us, value)),
            _ => None,
        })
    }

    /// Recorded digital writes as `(at_us, line, level)`.
    pub fn digital_writes(&self) -> impl Iterator<Item = (u32, LineId, Level)> + '_ {
        self.events().iter().filter_map(|e| match e.kind {
            HalEventKind::Digital(line, level) => Some((e.at_us, line, level)),
            _ => None,
        })
    }

    /// Recorded delays in microseconds.
    pub fn delays(&self) -> impl Iterator<Item = u32> + '_ {
        self.events().iter().filter_map(|e| match e.kind {
            HalEventKind::Delay(us) => Some(us),
            _ => None,
        })
    }

    /// Last digital level driven on `line`, if any.
    pub fn level(&self, line: LineId) -> Option<Level> {
        self.levels
            .iter()
            .flatten()
            .find(|(l, _)| *l == line)
            .map(|(_, level)| *level)
    }

    fn record(&mut self, kind: HalEventKind) {
        if self.len < N {
            self.events[self.len] = HalEvent {
                at_us: self.clock_us.get(),
                kind,
            };
            self.len += 1;
        } else {
            self.dropped = self.dropped.saturating_add(1);
        }
    }

    fn check_line(&self, line: LineId) -> Result<(), HalError> {
        match self.faulty_line {
            Some((faulty, error)) if faulty == line => Err(error),
            _ => Ok(()),
        }
    }

    fn track_level(&mut self, line: LineId, level: Level) {
        let slot = self
            .levels
            .iter()
            .position(|s| matches!(s, Some((l, _)) if *l == line))
            .or_else(|| self.levels.iter().position(Option::is_none));

        // Untracked once all slots hold other lines; events still record it.
        if let Some(i) = slot {
            self.levels[i] = Some((line, level));
        }
    }

    #[inline]
    fn advance(&self, us: u32) {
        self.clock_us.set(self.clock_us.get().wrapping_add(us));
    }

    #[inline]
    fn charge_write(&mut self) {
        self.advance(self.write_cost_us);
    }
}

impl<const N: usize> Default for SimHal<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> SpeakerHal for SimHal<N> {
    fn configure_output(&mut self, line: LineId) -> Result<(), HalError> {
        self.check_line(line)?;
        self.record(HalEventKind::Configure(line));
        self.charge_write();
        Ok(())
    }

    fn write_digital(&mut self, line: LineId, level: Level) -> Result<(), HalError> {
        self.check_line(line)?;
        self.record(HalEventKind::Digital(line, level));
        self.track_level(line, level);
        self.charge_write();
        Ok(())
    }

    fn write_analog(&mut self, line: LineId, value: u16) -> Result<(), HalError> {
        self.check_line(line)?;
        if let Some(budget) = self.analog_budget.as_mut() {
            if *budget == 0 {
                return Err(HalError::Analog(-1));
            }
            *budget -= 1;
        }
        self.record(HalEventKind::Analog(line, value));
        self.charge_write();
        Ok(())
    }

    #[inline]
    fn now_us(&self) -> u32 {
        let now = self.clock_us.get();
        self.advance(self.read_cost_us);
        now
    }

    fn delay_us(&mut self, us: u32) {
        self.record(HalEventKind::Delay(us));
        self.advance(us);
    }
}
