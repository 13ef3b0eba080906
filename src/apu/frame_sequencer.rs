//! Frame sequencer: divides the Sound Engine clock into quarter-frame and half-frame events.
//!
//! Counted in Sound Engine cycles (one per processor step).
//!
//! | mode   | 7457 | 14913 | 22371 | 29829 | 37281 |
//! |--------|------|-------|-------|-------|-------|
//! | 4-step | Q    | Q+H   | Q     | Q+H   |       |
//! | 5-step | Q    | Q+H   | Q     | -     | Q+H   |
//!
//! The counter restarts after the last step of the active mode.

use log::debug;

/// Quarter/half-frame clocks produced by one sequencer step.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameEvents {
    pub quarter: bool,
    pub half: bool,
}

impl FrameEvents {
    const NONE: Self = Self { quarter: false, half: false };
    const QUARTER: Self = Self { quarter: true, half: false };
    const BOTH: Self = Self { quarter: true, half: true };
}

#[derive(Clone, Debug, Default)]
pub struct FrameSequencer {
    five_step: bool,
    irq_inhibit: bool,
    counter: u32,
    quarter_ticks: u64,
    half_ticks: u64,
}

impl FrameSequencer {
    /// $4017: mode (bit 7) and IRQ inhibit (bit 6). Restarts the count; 5-step mode clocks
    /// both units immediately, which is returned to the caller.
    pub fn write_control(&mut self, value: u8) -> FrameEvents {
        self.five_step = value & 0x80 != 0;
        self.irq_inhibit = value & 0x40 != 0;
        self.counter = 0;
        debug!(
            "frame sequencer: {}-step mode, irq inhibit {}",
            if self.five_step { 5 } else { 4 },
            self.irq_inhibit
        );
        if self.five_step { self.record(FrameEvents::BOTH) } else { FrameEvents::NONE }
    }

    pub fn tick(&mut self) -> FrameEvents {
        self.counter += 1;
        let events = match (self.counter, self.five_step) {
            (7457, _) | (22371, _) => FrameEvents::QUARTER,
            (14913, _) => FrameEvents::BOTH,
            (29829, false) => {
                self.counter = 0;
                FrameEvents::BOTH
            }
            (37281, true) => {
                self.counter = 0;
                FrameEvents::BOTH
            }
            _ => FrameEvents::NONE,
        };
        self.record(events)
    }

    fn record(&mut self, events: FrameEvents) -> FrameEvents {
        self.quarter_ticks += u64::from(events.quarter);
        self.half_ticks += u64::from(events.half);
        events
    }

    pub fn five_step(&self) -> bool {
        self.five_step
    }

    pub fn irq_inhibit(&self) -> bool {
        self.irq_inhibit
    }

    /// Quarter-frame events since power-on.
    pub fn quarter_ticks(&self) -> u64 {
        self.quarter_ticks
    }

    /// Half-frame events since power-on.
    pub fn half_ticks(&self) -> u64 {
        self.half_ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_step_event_positions() {
        let mut f = FrameSequencer::default();
        let mut events = Vec::new();
        for cycle in 1..=29829u32 {
            let e = f.tick();
            if e != FrameEvents::NONE {
                events.push((cycle, e.quarter, e.half));
            }
        }
        assert_eq!(
            events,
            vec![
                (7457, true, false),
                (14913, true, true),
                (22371, true, false),
                (29829, true, true),
            ]
        );
        assert_eq!((f.quarter_ticks(), f.half_ticks()), (4, 2));
    }

    #[test]
    fn four_step_sequence_repeats() {
        let mut f = FrameSequencer::default();
        for _ in 0..29829 * 2 {
            f.tick();
        }
        assert_eq!((f.quarter_ticks(), f.half_ticks()), (8, 4));
    }

    #[test]
    fn five_step_clocks_immediately_and_skips_fourth_step() {
        let mut f = FrameSequencer::default();
        let now = f.write_control(0x80);
        assert_eq!(now, FrameEvents::BOTH);
        for _ in 0..29829 {
            f.tick();
        }
        assert_eq!((f.quarter_ticks(), f.half_ticks()), (4, 2), "29829 is silent in 5-step mode");
        for _ in 29829..37281 {
            f.tick();
        }
        assert_eq!((f.quarter_ticks(), f.half_ticks()), (5, 3));
    }

    #[test]
    fn four_step_write_has_no_immediate_clock() {
        let mut f = FrameSequencer::default();
        assert_eq!(f.write_control(0x40), FrameEvents::NONE);
        assert!(f.irq_inhibit());
        assert!(!f.five_step());
    }
}
