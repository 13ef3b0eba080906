#![doc = r#"
Console: the lock-step clock tying the processor, the Picture Engine and the Sound Engine
together.

One `clock()` call is one timing unit (one picture dot):
1. the Picture Engine advances one dot;
2. every third unit (starting with the first) the processor advances one cycle and the Sound
   Engine one cycle. While an OAM DMA stall is outstanding the processor cycle is skipped;
3. a pending Picture Engine interrupt request is forwarded to `Processor::nmi`;
   a DMA started from `nmi` or `reset` stalls the very next processor slot;
4. an audio sample is taken whenever the configured sample period has elapsed.

Register reads and writes issued by the processor therefore always land between engine
steps, never during one.
"#]

use log::debug;

use crate::bus::Bus;
use crate::cartridge::Cartridge;
use crate::config::ConsoleConfig;
use crate::processor::Processor;

pub struct Console<P: Processor> {
    bus: Bus,
    cpu: P,
    config: ConsoleConfig,
    system_clock: u64,
    dma_stall: u32,
    sample_timer: f64,
    samples: Vec<f32>,
}

impl<P: Processor> Console<P> {
    pub fn new(cpu: P, config: ConsoleConfig) -> Self {
        Self::with_bus(Bus::new(), cpu, config)
    }

    pub fn with_bus(bus: Bus, cpu: P, config: ConsoleConfig) -> Self {
        Self {
            bus,
            cpu,
            config,
            system_clock: 0,
            dma_stall: 0,
            sample_timer: 0.0,
            samples: Vec::new(),
        }
    }

    pub fn insert_cartridge(&mut self, cartridge: Cartridge) {
        self.bus.attach_cartridge(cartridge);
    }

    /// Reset every device, then run the processor's reset sequence.
    pub fn reset(&mut self) {
        debug!("console reset");
        self.bus.reset();
        self.cpu.reset(&mut self.bus);
        self.system_clock = 0;
        self.dma_stall = self.bus.take_dma_stall();
        self.sample_timer = 0.0;
        self.samples.clear();
    }

    pub fn clock(&mut self) {
        self.bus.tick_ppu();

        if self.system_clock % 3 == 0 {
            if self.dma_stall > 0 {
                self.dma_stall -= 1;
            } else {
                self.cpu.clock(&mut self.bus);
                self.dma_stall += self.bus.take_dma_stall();
            }
            self.bus.tick_apu();
        }

        if self.bus.ppu.take_nmi_request() {
            self.cpu.nmi(&mut self.bus);
            self.dma_stall += self.bus.take_dma_stall();
        }

        self.sample_timer += 1.0;
        let period = self.config.units_per_sample();
        if self.sample_timer >= period {
            self.sample_timer -= period;
            self.samples.push(self.bus.apu.output_sample());
        }

        self.system_clock += 1;
    }

    /// Clock until the Picture Engine finishes a frame. Returns the units spent.
    pub fn run_frame(&mut self) -> u64 {
        let start = self.system_clock;
        loop {
            self.clock();
            if self.bus.ppu.take_frame_complete() {
                return self.system_clock - start;
            }
        }
    }

    /// Hand buffered audio samples to the host.
    pub fn drain_samples(&mut self) -> Vec<f32> {
        std::mem::take(&mut self.samples)
    }

    pub fn framebuffer(&self) -> &[u32] {
        self.bus.ppu.framebuffer()
    }

    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }

    pub fn cpu(&self) -> &P {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut P {
        &mut self.cpu
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn system_clock(&self) -> u64 {
        self.system_clock
    }
}
