//! Triangle channel: 32-step folded ramp gated by a linear counter and a length counter.
//!
//! The timer runs on every Sound Engine cycle (twice the pulse rate).

use super::length_counter::LengthCounter;

#[derive(Clone, Debug, Default)]
pub struct Triangle {
    enabled: bool,
    control: bool,
    linear_reload_value: u8,
    linear_counter: u8,
    linear_reload: bool,
    timer: u16,
    period: u16,
    step: u8,
    length: LengthCounter,
}

impl Triangle {
    /// $4008: control / length halt (bit 7) and linear counter reload value (bits 0..6).
    pub fn write_linear(&mut self, value: u8) {
        self.control = value & 0x80 != 0;
        self.length.set_halt(self.control);
        self.linear_reload_value = value & 0x7F;
    }

    pub fn write_timer_low(&mut self, value: u8) {
        self.period = (self.period & 0x0700) | value as u16;
    }

    /// $400B: timer high bits, length load (when enabled), linear reload request.
    pub fn write_timer_high(&mut self, value: u8) {
        self.period = (self.period & 0x00FF) | (((value & 0x07) as u16) << 8);
        if self.enabled {
            self.length.load(value >> 3);
        }
        self.linear_reload = true;
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
            return;
        }
        self.timer = self.period;
        if self.linear_counter > 0 && self.length.is_active() {
            self.step = (self.step + 1) & 0x1F;
        }
    }

    pub fn clock_quarter(&mut self) {
        if self.linear_reload {
            self.linear_counter = self.linear_reload_value;
        } else if self.linear_counter > 0 {
            self.linear_counter -= 1;
        }
        if !self.control {
            self.linear_reload = false;
        }
    }

    pub fn clock_half(&mut self) {
        self.length.clock();
    }

    /// Steps 0..15 rise 0..15, steps 16..31 mirror back down. Ultrasonic periods (<= 2) are silenced.
    pub fn output(&self) -> u8 {
        if !self.enabled || self.linear_counter == 0 || !self.length.is_active() || self.period <= 2 {
            return 0;
        }
        if self.step > 15 { 31 - self.step } else { self.step }
    }

    pub fn length_active(&self) -> bool {
        self.length.is_active()
    }

    pub fn linear_counter(&self) -> u8 {
        self.linear_counter
    }

    pub fn step(&self) -> u8 {
        self.step
    }
}
