#![doc = r#"
PPU sprite pixels

Responsibilities
- `SpriteEntry`: one slot of the per-scanline working set (OAM bytes plus the pattern row
  already fetched for the line being drawn).
- Pattern row addressing for 8x8 and 8x16 sprites, with vertical flip.
- Per-dot sprite pixel lookup: first opaque sprite in working-set order wins.

OAM attribute byte
- bits 0..1 palette (sprite palettes are 4..7)
- bit 5 priority (0 = in front of background)
- bit 6 horizontal flip, bit 7 vertical flip
"#]

use super::Ppu;

/// A sprite selected for the current scanline.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SpriteEntry {
    pub y: u8,
    pub tile: u8,
    pub attribute: u8,
    pub x: u8,
    /// Pattern bitplanes for this line, horizontal flip already applied.
    pub pattern_lo: u8,
    pub pattern_hi: u8,
    /// Index 0..63 in primary OAM.
    pub oam_index: u8,
}

impl SpriteEntry {
    pub const fn palette(&self) -> u8 {
        (self.attribute & 0x03) + 4
    }
    pub const fn in_front(&self) -> bool {
        (self.attribute & 0x20) == 0
    }
    pub const fn flip_horizontal(&self) -> bool {
        (self.attribute & 0x40) != 0
    }
    pub const fn flip_vertical(&self) -> bool {
        (self.attribute & 0x80) != 0
    }

    /// Colour index 0..3 at `x`, or 0 when `x` is outside this sprite.
    pub fn pixel_at(&self, x: usize) -> u8 {
        let left = self.x as usize;
        if x < left || x >= left + 8 {
            return 0;
        }
        let shift = 7 - (x - left);
        let lo = (self.pattern_lo >> shift) & 1;
        let hi = (self.pattern_hi >> shift) & 1;
        (hi << 1) | lo
    }
}

/// Winning sprite pixel for one dot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(in crate::ppu) struct SpritePixel {
    pub pixel: u8,
    pub palette: u8,
    pub in_front: bool,
    pub sprite_zero: bool,
}

/// Address of the low bitplane for `row` (0-based from the top, before flipping) of a sprite.
pub(in crate::ppu) fn sprite_row_address(tile: u8, row: u8, height: u8, table_8x8: u16, vflip: bool) -> u16 {
    let row = if vflip { height - 1 - row } else { row };
    if height == 16 {
        let table = if tile & 0x01 != 0 { 0x1000 } else { 0x0000 };
        let top = (tile & 0xFE) as u16;
        let (tile_index, fine) = if row < 8 { (top, row) } else { (top + 1, row - 8) };
        table + (tile_index << 4) + fine as u16
    } else {
        table_8x8 + ((tile as u16) << 4) + row as u16
    }
}

impl Ppu {
    /// First opaque sprite covering column `x`, after left-column clipping.
    pub(in crate::ppu) fn sprite_pixel(&self, x: usize) -> Option<SpritePixel> {
        if !self.mask.render_sprites() || (x < 8 && !self.mask.sprites_left()) {
            return None;
        }
        self.sprites[..self.sprite_count].iter().find_map(|s| {
            let pixel = s.pixel_at(x);
            (pixel != 0).then(|| SpritePixel {
                pixel,
                palette: s.palette(),
                in_front: s.in_front(),
                sprite_zero: s.oam_index == 0,
            })
        })
    }
}
