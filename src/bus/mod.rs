#![doc = r#"
Dispatcher: the system address decoder between the external processor and the devices.

Address map
- $0000-$1FFF: 2 KiB system RAM, mirrored every 2 KiB
- $2000-$3FFF: Picture Engine registers, mirrored every 8 bytes
- $4000-$4013, $4015: Sound Engine registers
- $4014: OAM DMA (write)
- $4016: controller strobe (write) / controller 1 serial read
- $4017: frame sequencer control (write) / controller 2 serial read
- $4018-$5FFF: unmapped (reads 0, writes ignored)
- $6000-$FFFF: Storage Device (PRG RAM, PRG ROM)

Modules
- ram: mirrored system RAM.
- ppu_registers / apu_registers / controller_registers: register-window handlers, each
  answering only for the addresses it owns.
- dma: OAM DMA copy and stall accounting.
- interfaces: borrowed views handed to devices (`CartridgeView` for the Picture Engine).

Timing
- `tick_ppu` advances the Picture Engine one dot; `tick_apu` advances the Sound Engine one
  cycle and counts processor cycles (used for DMA stall parity). The lock-step ratio between
  them is owned by `Console`.
"#]

pub mod apu_registers;
pub mod controller_registers;
pub mod dma;
pub mod interfaces;
pub mod ppu_registers;
pub mod ram;


use log::trace;

use crate::apu::Apu;
use crate::cartridge::Cartridge;
use crate::controller::Controller;
use crate::ppu::Ppu;

pub use apu_registers::ApuRegisters;
pub use controller_registers::ControllerRegisters;
pub use dma::{CpuMemory, CpuMemoryView, OamWriter};
pub use interfaces::CartridgeView;
pub use ppu_registers::PpuRegisters;
pub use ram::Ram;

pub struct Bus {
    ram: Ram,
    pub ppu: Ppu,
    pub apu: Apu,
    pub controllers: [Controller; 2],
    cartridge: Option<Cartridge>,
    cpu_cycle: u64,
    dma_stall: u32,
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus {
    pub fn new() -> Self {
        Self {
            ram: Ram::new(),
            ppu: Ppu::new(),
            apu: Apu::new(),
            controllers: [Controller::new(), Controller::new()],
            cartridge: None,
            cpu_cycle: 0,
            dma_stall: 0,
        }
    }

    pub fn with_cartridge(cartridge: Cartridge) -> Self {
        let mut bus = Self::new();
        bus.attach_cartridge(cartridge);
        bus
    }

    pub fn attach_cartridge(&mut self, cartridge: Cartridge) {
        self.cartridge = Some(cartridge);
    }

    pub fn detach_cartridge(&mut self) -> Option<Cartridge> {
        self.cartridge.take()
    }

    pub fn cartridge(&self) -> Option<&Cartridge> {
        self.cartridge.as_ref()
    }

    pub fn cartridge_mut(&mut self) -> Option<&mut Cartridge> {
        self.cartridge.as_mut()
    }

    pub fn ram(&self) -> &Ram {
        &self.ram
    }

    /// Power-on state for every device; the cartridge stays attached (its PRG RAM is cleared).
    pub fn reset(&mut self) {
        self.ram.reset();
        self.ppu.reset();
        self.apu.reset();
        for c in &mut self.controllers {
            c.reset();
        }
        if let Some(cart) = self.cartridge.as_mut() {
            cart.reset();
        }
        self.cpu_cycle = 0;
        self.dma_stall = 0;
    }

    pub fn read(&mut self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.ram.read(addr),
            0x2000..=0x3FFF => PpuRegisters::read(self, addr),
            0x4000..=0x4017 => ApuRegisters::read(self, addr)
                .or_else(|| ControllerRegisters::read(self, addr))
                .unwrap_or_else(|| {
                    trace!("read from write-only register {addr:#06X}");
                    0
                }),
            0x4018..=0x5FFF => {
                trace!("read from unmapped address {addr:#06X}");
                0
            }
            0x6000..=0xFFFF => self.cartridge.as_ref().map_or(0, |c| c.cpu_read(addr)),
        }
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram.write(addr, value),
            0x2000..=0x3FFF => PpuRegisters::write(self, addr, value),
            0x4014 => self.run_oam_dma(value),
            0x4000..=0x4017 => {
                if !ApuRegisters::write(self, addr, value)
                    && !ControllerRegisters::write(self, addr, value)
                {
                    trace!("write to unhandled register {addr:#06X} = {value:#04X}");
                }
            }
            0x4018..=0x5FFF => trace!("write to unmapped address {addr:#06X} = {value:#04X}"),
            0x6000..=0xFFFF => {
                if let Some(cart) = self.cartridge.as_mut() {
                    cart.cpu_write(addr, value);
                }
            }
        }
    }

    /// Little-endian word at `addr`, e.g. an interrupt vector.
    pub fn read_word(&mut self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// One Picture Engine dot.
    pub fn tick_ppu(&mut self) {
        let (ppu, view) = self.ppu_parts();
        ppu.tick(&view);
    }

    /// One Sound Engine cycle; also counts one processor cycle.
    pub fn tick_apu(&mut self) {
        self.apu.tick();
        self.cpu_cycle = self.cpu_cycle.wrapping_add(1);
    }

    pub fn cpu_cycle(&self) -> u64 {
        self.cpu_cycle
    }

    /// Processor cycles owed to OAM DMA since the last call.
    pub fn take_dma_stall(&mut self) -> u32 {
        std::mem::take(&mut self.dma_stall)
    }

    /// Disjoint borrows of the Picture Engine and its view onto the cartridge.
    pub(crate) fn ppu_parts(&mut self) -> (&mut Ppu, CartridgeView<'_>) {
        (&mut self.ppu, CartridgeView::new(self.cartridge.as_mut()))
    }

    fn run_oam_dma(&mut self, page: u8) {
        let mut source = CpuMemoryView::from_parts(&self.ram, self.cartridge.as_ref());
        dma::oam_dma(page, &mut source, &mut self.ppu);
        self.dma_stall += dma::stall_cycles(self.cpu_cycle);
    }
}
