#![doc = r#"
PPU OAM evaluation

Responsibilities
- Rebuild the sprite working set at dot 257 of each visible scanline, for the line that follows.
- Scan primary OAM top to bottom; a sprite is in range when `0 <= scanline - y < height`
  (OAM Y is one less than the first line the sprite appears on).
- Keep the first 8 matches. A 9th match sets the sprite-overflow flag.
- Fetch both pattern bitplanes for each kept sprite while selecting it, with vertical flip
  resolved through the row address and horizontal flip applied by reversing the bytes.

Notes
- Overflow follows the plain "ninth in-range sprite" rule; the hardware's diagonal OAM scan
  after the eighth match is not modelled.
- With rendering disabled the working set is emptied and no evaluation happens.
"#]

use super::Ppu;
use super::sprite::{SpriteEntry, sprite_row_address};
use crate::ppu_bus::PpuBus;

/// Working-set capacity.
pub const MAX_SPRITES_PER_LINE: usize = 8;

impl Ppu {
    pub(in crate::ppu) fn evaluate_sprites<B: PpuBus + ?Sized>(&mut self, bus: &B) {
        self.clear_sprite_working_set();
        if !self.mask.rendering_enabled() {
            return;
        }

        let height = self.ctrl.sprite_height();
        let table = self.ctrl.sprite_table();
        let line = self.scanline;
        let mut matches = 0usize;

        for index in 0..64usize {
            let y = self.oam[index * 4];
            let diff = line - y as i16;
            if diff < 0 || diff >= height as i16 {
                continue;
            }
            matches += 1;
            if matches > MAX_SPRITES_PER_LINE {
                self.status.set_sprite_overflow(true);
                break;
            }

            let tile = self.oam[index * 4 + 1];
            let attribute = self.oam[index * 4 + 2];
            let x = self.oam[index * 4 + 3];
            let vflip = attribute & 0x80 != 0;
            let addr = sprite_row_address(tile, diff as u8, height, table, vflip);
            let mut pattern_lo = self.mem_read(addr, bus);
            let mut pattern_hi = self.mem_read(addr + 8, bus);
            if attribute & 0x40 != 0 {
                pattern_lo = pattern_lo.reverse_bits();
                pattern_hi = pattern_hi.reverse_bits();
            }

            self.sprites[self.sprite_count] = SpriteEntry {
                y,
                tile,
                attribute,
                x,
                pattern_lo,
                pattern_hi,
                oam_index: index as u8,
            };
            self.sprite_count += 1;
        }
    }

    pub(in crate::ppu) fn clear_sprite_working_set(&mut self) {
        self.sprites = [SpriteEntry {
            y: 0xFF,
            tile: 0xFF,
            attribute: 0xFF,
            x: 0xFF,
            ..Default::default()
        }; MAX_SPRITES_PER_LINE];
        self.sprite_count = 0;
    }
}
