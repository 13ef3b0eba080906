//! Noise channel: 15-bit linear feedback shift register with envelope and length counter.

use super::envelope::Envelope;
use super::length_counter::LengthCounter;

/// Timer periods (NTSC) selected by the low nibble of $400E.
pub const NOISE_PERIOD_TABLE: [u16; 16] = [
    4, 8, 16, 32, 64, 96, 128, 160, 202, 254, 380, 508, 762, 1016, 2034, 4068,
];

#[derive(Clone, Debug)]
pub struct Noise {
    enabled: bool,
    short_mode: bool,
    shift: u16,
    timer: u16,
    period: u16,
    length: LengthCounter,
    envelope: Envelope,
}

impl Default for Noise {
    fn default() -> Self {
        Self {
            enabled: false,
            short_mode: false,
            shift: 1,
            timer: 0,
            period: NOISE_PERIOD_TABLE[0],
            length: LengthCounter::default(),
            envelope: Envelope::default(),
        }
    }
}

impl Noise {
    /// $400C: length halt / envelope loop, constant volume, volume.
    pub fn write_control(&mut self, value: u8) {
        self.length.set_halt(value & 0x20 != 0);
        self.envelope.write_control(value);
    }

    /// $400E: mode (bit 7) and period index (bits 0..3).
    pub fn write_period(&mut self, value: u8) {
        self.short_mode = value & 0x80 != 0;
        self.period = NOISE_PERIOD_TABLE[(value & 0x0F) as usize];
    }

    /// $400F: length load (when enabled) and envelope restart.
    pub fn write_length(&mut self, value: u8) {
        if self.enabled {
            self.length.load(value >> 3);
        }
        self.envelope.restart();
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
            self.step_shift_register();
        }
    }

    /// Shift right once, feeding bit 0 XOR bit 1 (bit 6 in short mode) into bit 14.
    fn step_shift_register(&mut self) {
        let tap = if self.short_mode { 6 } else { 1 };
        let feedback = (self.shift & 1) ^ ((self.shift >> tap) & 1);
        self.shift = (self.shift >> 1) | (feedback << 14);
    }

    pub fn clock_quarter(&mut self) {
        self.envelope.clock();
    }

    pub fn clock_half(&mut self) {
        self.length.clock();
    }

    pub fn output(&self) -> u8 {
        if !self.enabled || !self.length.is_active() || self.shift & 1 != 0 {
            return 0;
        }
        self.envelope.output()
    }

    pub fn length_active(&self) -> bool {
        self.length.is_active()
    }

    pub fn shift_register(&self) -> u16 {
        self.shift
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feedback_bits(short: bool) -> Vec<u16> {
        let mut n = Noise::default();
        n.write_period(if short { 0x80 } else { 0x00 });
        (0..15)
            .map(|_| {
                n.step_shift_register();
                n.shift_register() >> 14
            })
            .collect()
    }

    #[test]
    fn long_mode_feedback_sequence() {
        assert_eq!(feedback_bits(false), vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn short_mode_feedback_sequence() {
        assert_eq!(feedback_bits(true), vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn period_index_uses_table() {
        let mut n = Noise::default();
        n.write_period(0x0F);
        n.clock_timer();
        let before = n.shift_register();
        for _ in 0..4068 {
            n.clock_timer();
        }
        assert_eq!(n.shift_register(), before);
        n.clock_timer();
        assert_ne!(n.shift_register(), before);
    }

    #[test]
    fn output_gated_by_bit_zero_and_length() {
        let mut n = Noise::default();
        n.set_enabled(true);
        n.write_control(0x1A);
        n.write_length(0x08);
        assert_eq!(n.output(), 0, "seed has bit 0 set");
        n.step_shift_register();
        assert_eq!(n.output(), 10);
        n.set_enabled(false);
        assert_eq!(n.output(), 0);
        assert!(!n.length_active());
    }
}
