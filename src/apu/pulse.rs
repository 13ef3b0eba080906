//! Pulse (square) channel: duty sequencer, envelope, sweep unit and length counter.
//!
//! Registers per channel: control ($4000/$4004), sweep ($4001/$4005), timer low ($4002/$4006)
//! and timer high + length ($4003/$4007). The timer runs on every second Sound Engine cycle.

use super::envelope::Envelope;
use super::length_counter::LengthCounter;

/// Duty waveforms, read MSB first: 12.5%, 25%, 50%, 25% inverted.
pub const DUTY_TABLE: [u8; 4] = [0b0100_0000, 0b0110_0000, 0b0111_1000, 0b1001_1111];

/// Which pulse unit a channel is; they differ only in sweep negation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PulseUnit {
    /// Pulse 1 negates with ones' complement (one extra subtracted).
    One,
    /// Pulse 2 negates with two's complement.
    Two,
}

#[derive(Clone, Debug, Default)]
struct Sweep {
    enabled: bool,
    period: u8,
    negate: bool,
    shift: u8,
    divider: u8,
    reload: bool,
    target: u16,
    mute: bool,
}

#[derive(Clone, Debug)]
pub struct Pulse {
    unit: PulseUnit,
    enabled: bool,
    duty_mode: u8,
    duty_step: u8,
    timer: u16,
    period: u16,
    length: LengthCounter,
    envelope: Envelope,
    sweep: Sweep,
}

impl Pulse {
    pub fn new(unit: PulseUnit) -> Self {
        let mut pulse = Self {
            unit,
            enabled: false,
            duty_mode: 0,
            duty_step: 0,
            timer: 0,
            period: 0,
            length: LengthCounter::default(),
            envelope: Envelope::default(),
            sweep: Sweep::default(),
        };
        pulse.update_sweep_target();
        pulse
    }

    /// $4000/$4004: duty (bits 6..7), length halt / envelope loop (bit 5), constant volume, volume.
    pub fn write_control(&mut self, value: u8) {
        self.duty_mode = (value & 0xC0) >> 6;
        self.length.set_halt(value & 0x20 != 0);
        self.envelope.write_control(value);
    }

    /// $4001/$4005: enable, divider period, negate, shift. Always schedules a divider reload.
    pub fn write_sweep(&mut self, value: u8) {
        self.sweep.enabled = value & 0x80 != 0;
        self.sweep.period = (value & 0x70) >> 4;
        self.sweep.negate = value & 0x08 != 0;
        self.sweep.shift = value & 0x07;
        self.sweep.reload = true;
        self.update_sweep_target();
    }

    pub fn write_timer_low(&mut self, value: u8) {
        self.period = (self.period & 0x0700) | value as u16;
        self.update_sweep_target();
    }

    /// $4003/$4007: timer high bits, length load (when enabled), envelope and duty restart.
    pub fn write_timer_high(&mut self, value: u8) {
        self.period = (self.period & 0x00FF) | (((value & 0x07) as u16) << 8);
        if self.enabled {
            self.length.load(value >> 3);
        }
        self.envelope.restart();
        self.duty_step = 0;
        self.update_sweep_target();
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.length.clear();
        }
    }

    pub fn clock_timer(&mut self) {
        if self.timer > 0 {
            self.timer -= 1;
        } else {
            self.timer = self.period;
            self.duty_step = (self.duty_step + 1) & 0x07;
        }
    }

    pub fn clock_quarter(&mut self) {
        self.envelope.clock();
    }

    pub fn clock_half(&mut self) {
        self.length.clock();
        self.clock_sweep();
    }

    fn clock_sweep(&mut self) {
        let s = &self.sweep;
        if s.divider == 0 && s.enabled && !s.mute && s.shift != 0 {
            self.period = self.sweep.target;
            self.update_sweep_target();
        }
        if self.sweep.divider == 0 || self.sweep.reload {
            self.sweep.divider = self.sweep.period;
            self.sweep.reload = false;
        } else {
            self.sweep.divider -= 1;
        }
    }

    /// Recompute the sweep target and the mute condition from the current period.
    fn update_sweep_target(&mut self) {
        let change = self.period >> self.sweep.shift;
        self.sweep.target = if self.sweep.negate {
            let extra = u16::from(self.unit == PulseUnit::One);
            self.period.saturating_sub(change).saturating_sub(extra)
        } else {
            self.period + change
        };
        self.sweep.mute = self.sweep.target > 0x07FF || self.period < 8;
    }

    pub fn output(&self) -> u8 {
        if !self.enabled || self.period < 8 || self.sweep.mute || !self.length.is_active() {
            return 0;
        }
        let high = (DUTY_TABLE[self.duty_mode as usize] >> (7 - self.duty_step)) & 1;
        if high == 0 { 0 } else { self.envelope.output() }
    }

    pub fn length_active(&self) -> bool {
        self.length.is_active()
    }

    pub fn length_value(&self) -> u8 {
        self.length.value()
    }

    pub fn period(&self) -> u16 {
        self.period
    }

    pub fn sweep_target(&self) -> u16 {
        self.sweep.target
    }

    pub fn sweep_muted(&self) -> bool {
        self.sweep.mute
    }

    pub fn duty_step(&self) -> u8 {
        self.duty_step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pulse_with_period(unit: PulseUnit, period: u16) -> Pulse {
        let mut p = Pulse::new(unit);
        p.set_enabled(true);
        p.write_timer_low((period & 0xFF) as u8);
        p.write_timer_high(((period >> 8) as u8 & 0x07) | 0x08);
        p
    }

    #[test]
    fn sweep_mute_grid() {
        // (period, sweep register, expected mute)
        let cases = [
            (0x0007, 0x00, true),
            (0x0008, 0x00, false),
            (0x0400, 0x00, true), // shift 0 doubles the period: 0x800 overflows
            (0x0400, 0x01, false),
            (0x0600, 0x01, true),
            (0x0600, 0x09, false), // negated target never overflows
            (0x07FF, 0x07, true),
        ];
        for (period, sweep, mute) in cases {
            let mut p = pulse_with_period(PulseUnit::Two, period);
            p.write_sweep(sweep);
            assert_eq!(p.sweep_muted(), mute, "period {period:#05x} sweep {sweep:#04x}");
        }
    }

    #[test]
    fn ones_complement_negation_on_pulse_one_only() {
        let mut one = pulse_with_period(PulseUnit::One, 0x100);
        let mut two = pulse_with_period(PulseUnit::Two, 0x100);
        one.write_sweep(0x89);
        two.write_sweep(0x89);
        assert_eq!(one.sweep_target(), 0x100 - 0x80 - 1);
        assert_eq!(two.sweep_target(), 0x100 - 0x80);
    }

    #[test]
    fn sweep_commits_on_divider_zero() {
        let mut p = pulse_with_period(PulseUnit::Two, 0x100);
        p.write_sweep(0x81); // enabled, divider period 0, shift 1
        p.clock_half();
        assert_eq!(p.period(), 0x180);
        assert_eq!(p.sweep_target(), 0x240, "target follows the new period");
    }

    #[test]
    fn sweep_with_zero_shift_never_commits() {
        let mut p = pulse_with_period(PulseUnit::Two, 0x100);
        p.write_sweep(0x80);
        for _ in 0..4 {
            p.clock_half();
        }
        assert_eq!(p.period(), 0x100);
    }

    #[test]
    fn timer_advances_duty_step_on_reload() {
        let mut p = pulse_with_period(PulseUnit::One, 8);
        assert_eq!(p.duty_step(), 0);
        p.clock_timer(); // timer 0 -> reload to 8, step 1
        assert_eq!(p.duty_step(), 1);
        for _ in 0..8 {
            p.clock_timer();
        }
        assert_eq!(p.duty_step(), 1);
        p.clock_timer();
        assert_eq!(p.duty_step(), 2);
    }

    #[test]
    fn output_follows_duty_and_constant_volume() {
        let mut p = pulse_with_period(PulseUnit::One, 8);
        p.write_control(0x10 | 0x0C); // duty 0, constant volume 12
        // Duty 0 is high only at step 1.
        assert_eq!(p.output(), 0);
        p.clock_timer();
        assert_eq!(p.output(), 12);
        p.set_enabled(false);
        assert_eq!(p.output(), 0);
        assert_eq!(p.length_value(), 0, "disabling clears the length counter");
    }

    #[test]
    fn length_loads_only_while_enabled() {
        let mut p = Pulse::new(PulseUnit::One);
        p.write_timer_high(0x08);
        assert!(!p.length_active());
        p.set_enabled(true);
        p.write_timer_high(0x08);
        assert_eq!(p.length_value(), 254);
    }
}
