/*!
Sound Engine (APU): two pulse channels, triangle, noise, frame sequencer and the non-linear mixer.

Scope:
- Register writes to $4000..$4013, $4015 and $4017. $4014 (OAM DMA) and $4016 (controller
  strobe) belong to the Dispatcher and never reach this type.
- $4015 read: bits 0..3 report whether each channel's length counter is nonzero.
- `tick()` is one Sound Engine cycle (one processor step, every third picture dot):
    1. frame sequencer step, with quarter-frame (envelopes, triangle linear counter) and
       half-frame (length counters, sweep units) clocks fanned out to the channels;
    2. pulse and noise timers on even cycles;
    3. triangle timer on every cycle.
- `output_sample()` mixes the instantaneous channel levels.

Not modelled:
- DMC channel ($4010..$4013 writes are accepted and ignored; it contributes 0 to the mix).
- Frame and DMC interrupts. The $4017 IRQ inhibit bit is stored and readable only.
*/

pub mod envelope;
pub mod frame_sequencer;
pub mod length_counter;
pub mod mixer;
pub mod noise;
pub mod pulse;
pub mod triangle;

use log::trace;

pub use frame_sequencer::{FrameEvents, FrameSequencer};
pub use noise::Noise;
pub use pulse::{Pulse, PulseUnit};
pub use triangle::Triangle;

#[derive(Clone, Debug)]
pub struct Apu {
    pulse1: Pulse,
    pulse2: Pulse,
    triangle: Triangle,
    noise: Noise,
    sequencer: FrameSequencer,
    cycle: u64,
}

impl Default for Apu {
    fn default() -> Self {
        Self::new()
    }
}

impl Apu {
    pub fn new() -> Self {
        Self {
            pulse1: Pulse::new(PulseUnit::One),
            pulse2: Pulse::new(PulseUnit::Two),
            triangle: Triangle::default(),
            noise: Noise::default(),
            sequencer: FrameSequencer::default(),
            cycle: 0,
        }
    }

    /// Power-on state: all channels disabled and silent, noise register seeded with 1.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn write_reg(&mut self, addr: u16, value: u8) {
        match addr {
            0x4000 => self.pulse1.write_control(value),
            0x4001 => self.pulse1.write_sweep(value),
            0x4002 => self.pulse1.write_timer_low(value),
            0x4003 => self.pulse1.write_timer_high(value),
            0x4004 => self.pulse2.write_control(value),
            0x4005 => self.pulse2.write_sweep(value),
            0x4006 => self.pulse2.write_timer_low(value),
            0x4007 => self.pulse2.write_timer_high(value),
            0x4008 => self.triangle.write_linear(value),
            0x400A => self.triangle.write_timer_low(value),
            0x400B => self.triangle.write_timer_high(value),
            0x400C => self.noise.write_control(value),
            0x400E => self.noise.write_period(value),
            0x400F => self.noise.write_length(value),
            0x4015 => {
                self.pulse1.set_enabled(value & 0x01 != 0);
                self.pulse2.set_enabled(value & 0x02 != 0);
                self.triangle.set_enabled(value & 0x04 != 0);
                self.noise.set_enabled(value & 0x08 != 0);
            }
            0x4017 => {
                let events = self.sequencer.write_control(value);
                self.apply_frame_events(events);
            }
            _ => trace!("APU write to unmodelled register {addr:#06X} = {value:#04X}"),
        }
    }

    /// Only $4015 is readable; every other address reads as 0.
    pub fn read_reg(&self, addr: u16) -> u8 {
        if addr == 0x4015 {
            self.read_status()
        } else {
            trace!("APU read from write-only register {addr:#06X}");
            0
        }
    }

    pub fn read_status(&self) -> u8 {
        u8::from(self.pulse1.length_active())
            | u8::from(self.pulse2.length_active()) << 1
            | u8::from(self.triangle.length_active()) << 2
            | u8::from(self.noise.length_active()) << 3
    }

    pub fn tick(&mut self) {
        let events = self.sequencer.tick();
        self.apply_frame_events(events);

        if self.cycle % 2 == 0 {
            self.pulse1.clock_timer();
            self.pulse2.clock_timer();
            self.noise.clock_timer();
        }
        self.triangle.clock_timer();
        self.cycle += 1;
    }

    fn apply_frame_events(&mut self, events: FrameEvents) {
        if events.quarter {
            self.pulse1.clock_quarter();
            self.pulse2.clock_quarter();
            self.triangle.clock_quarter();
            self.noise.clock_quarter();
        }
        if events.half {
            self.pulse1.clock_half();
            self.pulse2.clock_half();
            self.triangle.clock_half();
            self.noise.clock_half();
        }
    }

    /// Mixed level in [0, 1).
    pub fn output_sample(&self) -> f32 {
        mixer::mix(
            self.pulse1.output(),
            self.pulse2.output(),
            self.triangle.output(),
            self.noise.output(),
            0,
        )
    }

    pub fn pulse1(&self) -> &Pulse {
        &self.pulse1
    }

    pub fn pulse2(&self) -> &Pulse {
        &self.pulse2
    }

    pub fn triangle(&self) -> &Triangle {
        &self.triangle
    }

    pub fn noise(&self) -> &Noise {
        &self.noise
    }

    pub fn sequencer(&self) -> &FrameSequencer {
        &self.sequencer
    }

    pub fn frame_irq_inhibit(&self) -> bool {
        self.sequencer.irq_inhibit()
    }

    pub fn cycle(&self) -> u64 {
        self.cycle
    }
}
