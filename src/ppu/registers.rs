#![doc = r#"
PPU registers module

Purpose
- Processor-visible register semantics for the 8-byte window $2000..$2007.

Notes
- Addresses are mirrored onto the window with `addr & 7`; callers may pass any $2000..$3FFF address.
- PPUSTATUS read returns the three flag bits over the low five bits of the PPUDATA read buffer,
  clears VBlank and resets the shared write toggle.
- PPUDATA read is delayed by one access below $3F00 (buffer returned, then refilled); palette
  reads return the fresh byte. Either way `v` advances by 1 or 32 per PPUCTRL bit 2.
- PPUSCROLL/PPUADDR share one write toggle and only ever touch `t` (and `fine_x`), except for the
  second PPUADDR write, which copies `t` into `v`.
- Write-only registers read back as 0.
"#]

use log::trace;

use super::{Control, Mask, Ppu, VramAddress};
use crate::ppu_bus::PpuBus;

impl Ppu {
    pub(in crate::ppu) fn read_reg_inner<B: PpuBus + ?Sized>(&mut self, addr: u16, bus: &B) -> u8 {
        match addr & 0x0007 {
            2 => {
                let value = (self.status.bits() & 0xE0) | (self.data_buffer & 0x1F);
                self.status.set_vblank(false);
                self.write_toggle = false;
                value
            }
            4 => self.oam[self.oam_addr as usize],
            7 => {
                let a = self.v.raw() & 0x3FFF;
                let fetched = self.mem_read(a, bus);
                let value = if a >= 0x3F00 { fetched } else { self.data_buffer };
                self.data_buffer = fetched;
                self.advance_data_address();
                value
            }
            reg => {
                trace!("read from write-only PPU register {reg}");
                0
            }
        }
    }

    pub(in crate::ppu) fn write_reg_inner<B: PpuBus + ?Sized>(
        &mut self,
        addr: u16,
        value: u8,
        bus: &mut B,
    ) {
        match addr & 0x0007 {
            0 => {
                self.ctrl = Control::from_bits(value);
                self.t = self
                    .t
                    .with_nametable_x(self.ctrl.nametable_x())
                    .with_nametable_y(self.ctrl.nametable_y());
            }
            1 => self.mask = Mask::from_bits(value),
            2 => trace!("write to read-only PPUSTATUS ignored"),
            3 => self.oam_addr = value,
            4 => self.write_oam_data_inner(value),
            5 => {
                if !self.write_toggle {
                    self.fine_x = value & 0x07;
                    self.t = self.t.with_coarse_x(value >> 3);
                } else {
                    self.t = self.t.with_fine_y(value & 0x07).with_coarse_y(value >> 3);
                }
                self.write_toggle = !self.write_toggle;
            }
            6 => {
                if !self.write_toggle {
                    let raw = (self.t.raw() & 0x00FF) | (((value & 0x3F) as u16) << 8);
                    self.t = VramAddress::new(raw);
                } else {
                    self.t = VramAddress::new((self.t.raw() & 0xFF00) | value as u16);
                    self.v = self.t;
                }
                self.write_toggle = !self.write_toggle;
            }
            _ => {
                self.mem_write(self.v.raw() & 0x3FFF, value, bus);
                self.advance_data_address();
            }
        }
    }

    #[inline]
    fn advance_data_address(&mut self) {
        let step = self.ctrl.increment_step();
        self.v = VramAddress::new(self.v.raw().wrapping_add(step));
    }
}
