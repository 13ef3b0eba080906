#![doc = r#"
PPU renderer module

Responsibilities
- `Ppu::tick`: advance one dot and do that dot's work.
- Per-dot composition of the background and sprite layers into the framebuffer.

Timing (per frame: scanlines -1..=260, dots 0..=340, no odd-frame skip)
- `tick` first moves to the next (scanline, dot), then processes that position, so after a call
  `scanline()`/`dot()` name the dot that was just produced.
- (-1, 1): clear VBlank, sprite-zero hit, overflow; empty the sprite working set.
- (-1, 280..=304): vertical transfer `t` -> `v` while rendering.
- Lines -1..=239, dots 2..=257 and 321..=338: background fetch group. Shifters advance on those dots
  except 338, which would push the first prefetched tile one pixel past its column.
- Dot 256: Y increment. Dot 257: shifter reload, horizontal transfer, and on visible lines the
  sprite evaluation for the next line. Dots 338 and 340: throwaway tile-id fetch.
- Lines 0..=239, dots 1..=256: one pixel at `scanline * 256 + dot - 1`.
- (241, 1): set VBlank and raise the NMI request if PPUCTRL bit 7 is set.
- Wrapping from line 260 back to -1 marks the frame complete.
"#]

use super::fetch::{increment_scroll_y, transfer_x, transfer_y};
use super::{DOTS_PER_SCANLINE, NES_WIDTH, Ppu};
use crate::ppu_bus::PpuBus;

const LAST_SCANLINE: i16 = 260;
const VBLANK_SCANLINE: i16 = 241;

impl Ppu {
    /// Advance one dot.
    pub fn tick<B: PpuBus + ?Sized>(&mut self, bus: &B) {
        self.advance_position();

        if (-1..240).contains(&self.scanline) {
            self.render_line_step(bus);
        }
        if (0..240).contains(&self.scanline) && (1..=256).contains(&self.dot) {
            self.emit_pixel();
        }
        if self.scanline == VBLANK_SCANLINE && self.dot == 1 {
            self.status.set_vblank(true);
            if self.ctrl.nmi_enabled() {
                self.nmi_latch = true;
            }
        }
    }

    fn advance_position(&mut self) {
        self.dot += 1;
        if self.dot < DOTS_PER_SCANLINE {
            return;
        }
        self.dot = 0;
        self.scanline += 1;
        if self.scanline > LAST_SCANLINE {
            self.scanline = -1;
            self.frame_complete = true;
            self.frame_count += 1;
        }
    }

    /// Fetch/scroll/evaluation work for the pre-render and visible lines.
    fn render_line_step<B: PpuBus + ?Sized>(&mut self, bus: &B) {
        let dot = self.dot;
        let rendering = self.mask.rendering_enabled();

        if self.scanline == -1 && dot == 1 {
            self.status.set_vblank(false);
            self.status.set_sprite_zero_hit(false);
            self.status.set_sprite_overflow(false);
            self.clear_sprite_working_set();
        }

        if (2..=257).contains(&dot) || (321..=338).contains(&dot) {
            // Dot 338 is inside the fetch range but does not shift; shifting there draws every
            // tile one pixel right of its column.
            if self.mask.render_background() && dot != 338 {
                self.bg.shift();
            }
            if rendering {
                self.background_fetch_step(bus);
            }
        }

        if rendering {
            match dot {
                256 => self.v = increment_scroll_y(self.v),
                257 => {
                    self.bg.load(&self.next_tile);
                    self.v = transfer_x(self.v, self.t);
                }
                280..=304 if self.scanline == -1 => self.v = transfer_y(self.v, self.t),
                _ => {}
            }
        }

        if dot == 338 || dot == 340 {
            self.dummy_tile_fetch(bus);
        }

        if dot == 257 && self.scanline >= 0 {
            self.evaluate_sprites(bus);
        }
    }

    /// Composite one pixel at (scanline, dot - 1).
    fn emit_pixel(&mut self) {
        let x = (self.dot - 1) as usize;
        let (bg_pixel, bg_palette) = self.background_pixel(x);
        let sprite = self.sprite_pixel(x);

        let (pixel, palette) = match sprite {
            None => (bg_pixel, bg_palette),
            Some(s) if bg_pixel == 0 => (s.pixel, s.palette),
            Some(s) => {
                if s.sprite_zero && self.sprite_zero_hit_allowed(x) {
                    self.status.set_sprite_zero_hit(true);
                }
                if s.in_front {
                    (s.pixel, s.palette)
                } else {
                    (bg_pixel, bg_palette)
                }
            }
        };

        let addr = if pixel == 0 {
            0x3F00
        } else {
            0x3F00 + ((palette as u16) << 2) + pixel as u16
        };
        let color = self.palette_color(addr);
        self.framebuffer[self.scanline as usize * NES_WIDTH + x] = color;
    }

    /// Both layers are already known opaque at `x`.
    fn sprite_zero_hit_allowed(&self, x: usize) -> bool {
        let mask = self.mask;
        if !(mask.render_background() && mask.render_sprites()) || x == 255 {
            return false;
        }
        x >= 8 || (mask.background_left() && mask.sprites_left())
    }
}
