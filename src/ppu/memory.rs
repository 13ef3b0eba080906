#![doc = r#"
PPU memory submodule

Responsibilities
- Address decode for the picture-engine address space ($0000-$3FFF):
  * $0000-$1FFF pattern tables: forwarded to the cartridge through `PpuBus`
  * $2000-$3EFF nametables: folded onto the 2 KiB internal RAM using the board's mirroring
  * $3F00-$3FFF palette RAM: 32 bytes mirrored, with $3F10/$14/$18/$1C aliasing $3F00/$04/$08/$0C
- OAMDATA entry point and the OAM DMA bulk copy.

Integration
- `registers.rs` uses `mem_read`/`mem_write` for PPUDATA.
- `fetch.rs`, `oam_eval.rs` and `renderer.rs` use `mem_read` for every rendering fetch.
"#]

use super::Ppu;
use crate::cartridge::Mirroring;
use crate::ppu_bus::PpuBus;

/// Physical index into the 2 KiB nametable RAM for `addr` in $2000..$3EFF.
pub(in crate::ppu) fn nametable_index(addr: u16, mirroring: Mirroring) -> usize {
    let a = (addr & 0x0FFF) as usize;
    let table = a / 0x400;
    let offset = a & 0x3FF;
    let physical = match mirroring {
        Mirroring::Horizontal => table >> 1,
        Mirroring::Vertical | Mirroring::FourScreen => table & 1,
    };
    physical * 0x400 + offset
}

/// Index into the 32-byte palette RAM for `addr` in $3F00..$3FFF.
pub(in crate::ppu) fn palette_index(addr: u16) -> usize {
    let mut idx = (addr & 0x1F) as usize;
    if idx >= 16 && (idx & 0x03) == 0 {
        idx -= 16;
    }
    idx
}

impl Ppu {
    pub(in crate::ppu) fn mem_read<B: PpuBus + ?Sized>(&self, addr: u16, bus: &B) -> u8 {
        let a = addr & 0x3FFF;
        match a {
            0x0000..=0x1FFF => bus.ppu_read(a),
            0x2000..=0x3EFF => self.name_table[nametable_index(a, bus.mirroring())],
            _ => self.palette[palette_index(a)],
        }
    }

    pub(in crate::ppu) fn mem_write<B: PpuBus + ?Sized>(
        &mut self,
        addr: u16,
        value: u8,
        bus: &mut B,
    ) {
        let a = addr & 0x3FFF;
        match a {
            0x0000..=0x1FFF => bus.ppu_write(a, value),
            0x2000..=0x3EFF => {
                let idx = nametable_index(a, bus.mirroring());
                self.name_table[idx] = value;
            }
            _ => self.palette[palette_index(a)] = value,
        }
    }

    /// System colour for a palette-RAM address, masked to the 6-bit colour range.
    #[inline]
    pub(in crate::ppu) fn palette_color(&self, addr: u16) -> u32 {
        let entry = self.palette[palette_index(addr)] & 0x3F;
        super::SYSTEM_PALETTE[entry as usize]
    }

    pub(in crate::ppu) fn write_oam_data_inner(&mut self, value: u8) {
        self.oam[self.oam_addr as usize] = value;
        self.oam_addr = self.oam_addr.wrapping_add(1);
    }

    /// Copies 256 bytes through the OAMDATA entry point, starting at the current
    /// OAMADDR and wrapping. Missing bytes are treated as 0.
    pub(in crate::ppu) fn oam_dma_copy_inner(&mut self, data: &[u8]) {
        for i in 0..256 {
            self.write_oam_data_inner(data.get(i).copied().unwrap_or(0));
        }
    }
}
