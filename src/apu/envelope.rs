//! Volume envelope shared by the pulse and noise channels.
//!
//! Clocked on quarter-frame ticks. Output is the decay level (15 down to 0) or the constant
//! volume from the channel control register.

#[derive(Clone, Debug, Default)]
pub struct Envelope {
    start: bool,
    constant: bool,
    looping: bool,
    volume: u8,
    divider: u8,
    decay: u8,
}

impl Envelope {
    /// Control bits from $4000/$4004/$400C: loop (bit 5), constant (bit 4), volume (bits 0..3).
    pub fn write_control(&mut self, value: u8) {
        self.looping = value & 0x20 != 0;
        self.constant = value & 0x10 != 0;
        self.volume = value & 0x0F;
    }

    /// Request a restart on the next quarter-frame tick.
    pub fn restart(&mut self) {
        self.start = true;
    }

    pub fn clock(&mut self) {
        if self.start {
            self.start = false;
            self.decay = 15;
            self.divider = self.volume;
            return;
        }
        if self.divider > 0 {
            self.divider -= 1;
            return;
        }
        self.divider = self.volume;
        if self.decay > 0 {
            self.decay -= 1;
        } else if self.looping {
            self.decay = 15;
        }
    }

    pub fn output(&self) -> u8 {
        if self.constant { self.volume } else { self.decay }
    }

    pub fn decay(&self) -> u8 {
        self.decay
    }
}
