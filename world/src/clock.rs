//! Day/night cycle bookkeeping.

use nightfall_core::ClockSnapshot;

/// Outcome of a single scheduler tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Transition {
    /// The half-cycle continues.
    None,
    /// Day turned into night. Carries the wave that was current at dusk.
    Dusk { wave: u32 },
    /// Night turned into day.
    Dawn,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct DayNightClock {
    wave: u32,
    is_day: bool,
    cycle_time: u32,
    cycle_duration: u32,
}

impl DayNightClock {
    pub(crate) fn new(cycle_duration: u32) -> Self {
        Self {
            wave: 1,
            is_day: true,
            cycle_time: 0,
            cycle_duration: cycle_duration.max(1),
        }
    }

    pub(crate) fn wave(&self) -> u32 {
        self.wave
    }

    pub(crate) fn advance(&mut self) -> Transition {
        self.cycle_time += 1;
        if self.cycle_time < self.cycle_duration {
            return Transition::None;
        }

        self.cycle_time = 0;
        self.is_day = !self.is_day;
        if self.is_day {
            return Transition::Dawn;
        }

        let dusk_wave = self.wave;
        self.wave = self.wave.saturating_add(1);
        Transition::Dusk { wave: dusk_wave }
    }

    pub(crate) fn snapshot(&self) -> ClockSnapshot {
        ClockSnapshot {
            wave: self.wave,
            is_day: self.is_day,
            cycle_time: self.cycle_time,
            cycle_duration: self.cycle_duration,
        }
    }
}
