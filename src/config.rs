//! Console configuration.

/// NTSC Picture Engine clock (dots per second).
pub const PPU_CLOCK_HZ: f64 = 5_369_318.0;

pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Audio output rate in Hz. 0 disables sample generation.
    pub sample_rate: u32,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self { sample_rate: DEFAULT_SAMPLE_RATE }
    }
}

impl ConsoleConfig {
    pub fn with_sample_rate(sample_rate: u32) -> Self {
        Self { sample_rate }
    }

    /// Picture Engine dots between two audio samples.
    pub fn units_per_sample(&self) -> f64 {
        if self.sample_rate == 0 {
            f64::INFINITY
        } else {
            PPU_CLOCK_HZ / self.sample_rate as f64
        }
    }
}
