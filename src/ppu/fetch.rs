#![doc = r#"
PPU background fetch

Responsibilities
- `BackgroundShifters`: two 16-bit pattern and two 16-bit attribute shift registers. The high
  byte holds the tile under the beam, the low byte the prefetched next tile.
- `TileLatch`: the tile id, attribute bits and two pattern bytes gathered during one 8-dot
  fetch group, waiting to be loaded into the shifters.
- The 8-dot fetch cycle run by `renderer.rs` on dots 2..257 and 321..338.
- Pure scroll helpers over `VramAddress`: coarse-X increment, Y increment, X/Y transfer.

Notes
- The fetch group step is `(dot - 1) % 8`: 0 load shifters + fetch tile id, 2 attribute,
  4 pattern low, 6 pattern high, 7 coarse-X increment.
- Coarse Y wraps at 29 with a nametable flip; an out-of-range 31 wraps to 0 without flipping.
"#]

use super::{Ppu, VramAddress};
use crate::ppu_bus::PpuBus;

#[derive(Copy, Clone, Debug, Default)]
pub(in crate::ppu) struct TileLatch {
    pub id: u8,
    pub attribute: u8,
    pub lsb: u8,
    pub msb: u8,
}

#[derive(Copy, Clone, Debug, Default)]
pub(in crate::ppu) struct BackgroundShifters {
    pattern_lo: u16,
    pattern_hi: u16,
    attrib_lo: u16,
    attrib_hi: u16,
}

impl BackgroundShifters {
    /// Move the latched tile into the low byte of every shifter.
    pub fn load(&mut self, tile: &TileLatch) {
        self.pattern_lo = (self.pattern_lo & 0xFF00) | tile.lsb as u16;
        self.pattern_hi = (self.pattern_hi & 0xFF00) | tile.msb as u16;
        self.attrib_lo = (self.attrib_lo & 0xFF00) | if tile.attribute & 0x01 != 0 { 0xFF } else { 0 };
        self.attrib_hi = (self.attrib_hi & 0xFF00) | if tile.attribute & 0x02 != 0 { 0xFF } else { 0 };
    }

    pub fn shift(&mut self) {
        self.pattern_lo <<= 1;
        self.pattern_hi <<= 1;
        self.attrib_lo <<= 1;
        self.attrib_hi <<= 1;
    }

    /// (colour index 0..3, palette 0..3) at bit `15 - fine_x`.
    pub fn pixel(&self, fine_x: u8) -> (u8, u8) {
        let mux = 0x8000u16 >> (fine_x & 0x07);
        let bit = |reg: u16| u8::from(reg & mux != 0);
        let pixel = (bit(self.pattern_hi) << 1) | bit(self.pattern_lo);
        let palette = (bit(self.attrib_hi) << 1) | bit(self.attrib_lo);
        (pixel, palette)
    }
}

/// Advance to the next tile column, wrapping into the horizontally adjacent nametable.
pub(in crate::ppu) fn increment_scroll_x(v: VramAddress) -> VramAddress {
    if v.coarse_x() == 31 {
        v.with_coarse_x(0).with_nametable_x(v.nametable_x() ^ 1)
    } else {
        v.with_coarse_x(v.coarse_x() + 1)
    }
}

/// Advance one pixel row: fine Y first, spilling into coarse Y.
pub(in crate::ppu) fn increment_scroll_y(v: VramAddress) -> VramAddress {
    if v.fine_y() < 7 {
        return v.with_fine_y(v.fine_y() + 1);
    }
    let v = v.with_fine_y(0);
    match v.coarse_y() {
        29 => v.with_coarse_y(0).with_nametable_y(v.nametable_y() ^ 1),
        31 => v.with_coarse_y(0),
        y => v.with_coarse_y(y + 1),
    }
}

/// Copy coarse X and the horizontal nametable bit from `t`.
pub(in crate::ppu) fn transfer_x(v: VramAddress, t: VramAddress) -> VramAddress {
    v.with_coarse_x(t.coarse_x()).with_nametable_x(t.nametable_x())
}

/// Copy fine Y, coarse Y and the vertical nametable bit from `t`.
pub(in crate::ppu) fn transfer_y(v: VramAddress, t: VramAddress) -> VramAddress {
    v.with_fine_y(t.fine_y())
        .with_coarse_y(t.coarse_y())
        .with_nametable_y(t.nametable_y())
}

impl Ppu {
    /// One step of the 8-dot background fetch group for the current dot.
    pub(in crate::ppu) fn background_fetch_step<B: PpuBus + ?Sized>(&mut self, bus: &B) {
        match (self.dot - 1) % 8 {
            0 => {
                self.bg.load(&self.next_tile);
                self.next_tile.id = self.mem_read(self.v.tile_address(), bus);
            }
            2 => {
                let mut attribute = self.mem_read(self.v.attribute_address(), bus);
                if self.v.coarse_y() & 0x02 != 0 {
                    attribute >>= 4;
                }
                if self.v.coarse_x() & 0x02 != 0 {
                    attribute >>= 2;
                }
                self.next_tile.attribute = attribute & 0x03;
            }
            4 => self.next_tile.lsb = self.mem_read(self.pattern_row_address(), bus),
            6 => self.next_tile.msb = self.mem_read(self.pattern_row_address() + 8, bus),
            7 => self.v = increment_scroll_x(self.v),
            _ => {}
        }
    }

    /// Throwaway nametable fetch at dots 338 and 340.
    pub(in crate::ppu) fn dummy_tile_fetch<B: PpuBus + ?Sized>(&mut self, bus: &B) {
        self.next_tile.id = self.mem_read(self.v.tile_address(), bus);
    }

    /// Background (colour, palette) for the current dot after left-column clipping.
    pub(in crate::ppu) fn background_pixel(&self, x: usize) -> (u8, u8) {
        if !self.mask.render_background() || (x < 8 && !self.mask.background_left()) {
            return (0, 0);
        }
        self.bg.pixel(self.fine_x)
    }

    #[inline]
    fn pattern_row_address(&self) -> u16 {
        self.ctrl.background_table() + ((self.next_tile.id as u16) << 4) + self.v.fine_y() as u16
    }
}
