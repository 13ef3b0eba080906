/*!
ppu_bus: Trait abstraction decoupling the picture engine from whoever owns the
pattern-table memory.

The picture engine owns its nametable RAM, palette RAM and OAM. The only memory it
does not own is the pattern space ($0000-$1FFF), which lives on the cartridge, and the
nametable mirroring layout, which the cartridge selects. Both are reached through this
trait, borrowed for the duration of one call. The engine never stores the handle.

Address Space Expectations:
- 0x0000-0x1FFF : Pattern tables (CHR ROM/RAM via mapper)
- `mirroring()` : Layout used by the engine to fold $2000-$2FFF onto its 2 KiB
*/

use crate::cartridge::{Cartridge, Mirroring};

/// Minimal interface the picture engine depends on for memory it does not own.
pub trait PpuBus {
    /// Read a byte from the pattern-table space. `addr` is in 0x0000..=0x1FFF.
    fn ppu_read(&self, addr: u16) -> u8;

    /// Write a byte into the pattern-table space. Boards with CHR ROM ignore it.
    fn ppu_write(&mut self, addr: u16, value: u8);

    /// Nametable layout currently selected by the board.
    fn mirroring(&self) -> Mirroring;
}

impl PpuBus for Cartridge {
    #[inline]
    fn ppu_read(&self, addr: u16) -> u8 {
        self.chr_read(addr)
    }

    #[inline]
    fn ppu_write(&mut self, addr: u16, value: u8) {
        self.chr_write(addr, value);
    }

    #[inline]
    fn mirroring(&self) -> Mirroring {
        Cartridge::mirroring(self)
    }
}
