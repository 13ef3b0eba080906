//! Length counter: silences a channel after a programmed duration.

/// Durations indexed by the top five bits of a timer-high/length write.
pub const LENGTH_TABLE: [u8; 32] = [
    10, 254, 20, 2, 40, 4, 80, 6, 160, 8, 60, 10, 14, 12, 26, 14, 12, 16, 24, 18, 48, 20, 96, 22,
    192, 24, 72, 26, 16, 28, 32, 30,
];

#[derive(Clone, Debug, Default)]
pub struct LengthCounter {
    counter: u8,
    halt: bool,
}

impl LengthCounter {
    /// Load from the duration table; `index` is masked to 5 bits.
    pub fn load(&mut self, index: u8) {
        self.counter = LENGTH_TABLE[(index & 0x1F) as usize];
    }

    /// Half-frame tick.
    pub fn clock(&mut self) {
        if !self.halt && self.counter > 0 {
            self.counter -= 1;
        }
    }

    pub fn clear(&mut self) {
        self.counter = 0;
    }

    pub fn set_halt(&mut self, halt: bool) {
        self.halt = halt;
    }

    pub fn value(&self) -> u8 {
        self.counter
    }

    pub fn is_active(&self) -> bool {
        self.counter > 0
    }
}
