#![doc = r#"
famicore: cycle-stepped NES picture (PPU) and sound (APU) engines.

Modules:
- ppu: Picture Engine; dot-by-dot background/sprite pipeline, registers, NMI latch
- ppu_bus: trait through which the Picture Engine borrows pattern memory and mirroring
- apu: Sound Engine; pulse, triangle and noise channels, frame sequencer, mixer
- bus: Dispatcher; system address decode, RAM, OAM DMA, controller ports
- cartridge: iNES v1 loader; constructs a Mapper
- mapper: Mapper trait and NROM (mapper 0)
- controller: standard controller shift register
- processor: trait implemented by the external instruction processor
- console: lock-step clock (1 processor / sound cycle per 3 picture dots) and audio pacing
- config: console configuration
- screenshot: PNG export (feature `screenshot`)

In tests, shared iNES builders are available under `crate::test_utils`.
"#]

pub mod apu;
pub mod bus;
pub mod cartridge;
pub mod config;
pub mod console;
pub mod controller;
pub mod mapper;
pub mod ppu;
pub mod ppu_bus;
pub mod processor;
#[cfg(feature = "screenshot")]
pub mod screenshot;

pub use apu::Apu;
pub use bus::Bus;
pub use cartridge::{Cartridge, Mirroring};
pub use config::ConsoleConfig;
pub use console::Console;
pub use controller::{Button, Controller};
pub use ppu::Ppu;
pub use processor::{IdleProcessor, Processor};

#[cfg(test)]
pub mod test_utils;
