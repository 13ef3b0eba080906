/*!
Picture processing unit: a dot-stepped state machine producing one pixel per cycle.

Provides:
- Processor-visible register interface ($2000..$2007) with the loopy `v`/`t`/fine-x/toggle model
- Internal nametable RAM (2 KiB), palette RAM (32 bytes) and OAM (256 bytes)
- Background pipeline: 8-dot tile fetch cycle feeding 16-bit pattern/attribute shifters
- Per-scanline sprite evaluation (8 sprites max, overflow on the 9th match)
- Pixel compositor with priority, left-column clipping and sprite-zero hit
- VBlank flag and NMI request latch once per frame

STRUCTURE:
- `Ppu` holds all state; child modules implement inherent methods on it.
- `flags.rs` — packed register newtypes (PPUCTRL, PPUMASK, PPUSTATUS, VRAM address)
- `registers.rs` — register read/write semantics
- `memory.rs` — nametable/palette address decode, OAM and DMA entry points
- `fetch.rs` — background shifters, fetch cycle and pure scroll helpers
- `oam_eval.rs` — sprite working-set rebuild at dot 257
- `sprite.rs` — sprite row decode and per-dot sprite pixel lookup
- `renderer.rs` — `tick`, pixel composition, frame timing

Pattern-table memory and the nametable mirroring layout belong to the cartridge and are
borrowed per call through `PpuBus`; the engine never keeps a reference to them.
*/

use crate::ppu_bus::PpuBus;

pub mod flags;
pub(crate) mod fetch;
pub(crate) mod memory;
pub(crate) mod oam_eval;
pub(crate) mod registers;
pub(crate) mod renderer;
pub(crate) mod sprite;

pub use flags::{Control, Mask, Status, VramAddress};
pub use sprite::SpriteEntry;

use fetch::{BackgroundShifters, TileLatch};

/// Screen width in pixels.
pub const NES_WIDTH: usize = 256;
/// Screen height in pixels.
pub const NES_HEIGHT: usize = 240;
/// Dots per scanline.
pub const DOTS_PER_SCANLINE: u16 = 341;
/// Scanlines per frame, pre-render line included.
pub const SCANLINES_PER_FRAME: u16 = 262;
/// Picture-engine cycles in one frame.
pub const DOTS_PER_FRAME: u32 = DOTS_PER_SCANLINE as u32 * SCANLINES_PER_FRAME as u32;

/// System palette: 6-bit colour index to 0xAARRGGBB.
pub const SYSTEM_PALETTE: [u32; 64] = [
    0xFF7C7C7C, 0xFF0000FC, 0xFF0000BC, 0xFF4428BC, 0xFF940084, 0xFFA80020, 0xFFA81000, 0xFF881400,
    0xFF503000, 0xFF007800, 0xFF006800, 0xFF005800, 0xFF004058, 0xFF000000, 0xFF000000, 0xFF000000,
    0xFFBCBCBC, 0xFF0078F8, 0xFF0058F8, 0xFF6844FC, 0xFFD800CC, 0xFFE40058, 0xFFF83800, 0xFFE45C10,
    0xFFAC7C00, 0xFF00B800, 0xFF00A800, 0xFF00A844, 0xFF008888, 0xFF000000, 0xFF000000, 0xFF000000,
    0xFFF8F8F8, 0xFF3CBCFC, 0xFF6888FC, 0xFF9878F8, 0xFFF878F8, 0xFFF85898, 0xFFF87858, 0xFFFCA044,
    0xFFF8B800, 0xFFB8F818, 0xFF58D854, 0xFF58F898, 0xFF00E8D8, 0xFF787878, 0xFF000000, 0xFF000000,
    0xFFFCFCFC, 0xFFA4E4FC, 0xFFB8B8F8, 0xFFD8B8F8, 0xFFF8B8F8, 0xFFF8A4C0, 0xFFF0D0B0, 0xFFFCE0A8,
    0xFFF8D878, 0xFFD8F878, 0xFFB8F8B8, 0xFFB8F8D8, 0xFF00FCFC, 0xFFF8D8F8, 0xFF000000, 0xFF000000,
];

pub struct Ppu {
    // Processor-visible registers
    ctrl: Control,
    mask: Mask,
    status: Status,
    oam_addr: u8,

    // Loopy scroll state
    v: VramAddress,
    t: VramAddress,
    fine_x: u8,
    write_toggle: bool,
    data_buffer: u8,

    // Owned memories
    name_table: [u8; 0x0800],
    palette: [u8; 32],
    oam: [u8; 256],

    // Background pipeline
    bg: BackgroundShifters,
    next_tile: TileLatch,

    // Sprite working set for the line being drawn
    sprites: [SpriteEntry; 8],
    sprite_count: usize,

    // Timing
    scanline: i16,
    dot: u16,
    frame_count: u64,
    frame_complete: bool,
    nmi_latch: bool,

    // Output: 0xAARRGGBB per pixel
    framebuffer: Vec<u32>,
}

impl Default for Ppu {
    fn default() -> Self {
        Self::new()
    }
}

impl Ppu {
    pub fn new() -> Self {
        Self {
            ctrl: Control::default(),
            mask: Mask::default(),
            status: Status::default(),
            oam_addr: 0,
            v: VramAddress::default(),
            t: VramAddress::default(),
            fine_x: 0,
            write_toggle: false,
            data_buffer: 0,
            name_table: [0; 0x0800],
            palette: [0; 32],
            oam: [0; 256],
            bg: BackgroundShifters::default(),
            next_tile: TileLatch::default(),
            sprites: [SpriteEntry::default(); 8],
            sprite_count: 0,
            scanline: -1,
            dot: 0,
            frame_count: 0,
            frame_complete: false,
            nmi_latch: false,
            framebuffer: vec![0; NES_WIDTH * NES_HEIGHT],
        }
    }

    /// Return every field to its power-on value.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Read-only framebuffer (row-major, 256x240, 0xAARRGGBB).
    pub fn framebuffer(&self) -> &[u32] {
        &self.framebuffer
    }

    /// Processor-visible register read; `addr` is mirrored onto $2000..$2007.
    pub fn read_reg<B: PpuBus + ?Sized>(&mut self, addr: u16, bus: &B) -> u8 {
        self.read_reg_inner(addr, bus)
    }

    /// Processor-visible register write; `addr` is mirrored onto $2000..$2007.
    pub fn write_reg<B: PpuBus + ?Sized>(&mut self, addr: u16, value: u8, bus: &mut B) {
        self.write_reg_inner(addr, value, bus);
    }

    /// OAMDATA write entry point: store at the cursor and advance it.
    pub fn write_oam_data(&mut self, value: u8) {
        self.write_oam_data_inner(value);
    }

    /// OAM DMA copy (256 bytes) through the OAMDATA entry point.
    pub fn oam_dma_copy(&mut self, data: &[u8]) {
        self.oam_dma_copy_inner(data);
    }

    // Flag setters, for tests that need a status state without running to it
    #[cfg(test)]
    pub(crate) fn set_vblank(&mut self, on: bool) {
        self.status.set_vblank(on);
    }
    #[cfg(test)]
    pub(crate) fn set_sprite_overflow(&mut self, on: bool) {
        self.status.set_sprite_overflow(on);
    }

    // Flag queries
    pub fn vblank(&self) -> bool {
        self.status.vblank()
    }
    pub fn sprite_zero_hit(&self) -> bool {
        self.status.sprite_zero_hit()
    }
    pub fn sprite_overflow(&self) -> bool {
        self.status.sprite_overflow()
    }
    pub fn nmi_enabled(&self) -> bool {
        self.ctrl.nmi_enabled()
    }
    pub fn control(&self) -> Control {
        self.ctrl
    }
    pub fn mask(&self) -> Mask {
        self.mask
    }

    // Memory convenience (no register side effects)
    pub fn peek_vram<B: PpuBus + ?Sized>(&self, addr: u16, bus: &B) -> u8 {
        self.mem_read(addr, bus)
    }
    pub fn poke_vram<B: PpuBus + ?Sized>(&mut self, addr: u16, value: u8, bus: &mut B) {
        self.mem_write(addr, value, bus);
    }
    pub fn peek_oam(&self, idx: usize) -> u8 {
        self.oam[idx & 0xFF]
    }
    pub fn poke_oam(&mut self, idx: usize, value: u8) {
        self.oam[idx & 0xFF] = value;
    }
    pub fn oam_addr(&self) -> u8 {
        self.oam_addr
    }

    // Frame completion & NMI latch
    pub fn frame_complete(&self) -> bool {
        self.frame_complete
    }
    pub fn take_frame_complete(&mut self) -> bool {
        let was = self.frame_complete;
        self.frame_complete = false;
        was
    }
    pub fn take_nmi_request(&mut self) -> bool {
        let was = self.nmi_latch;
        self.nmi_latch = false;
        was
    }

    // Timing and scroll inspection
    pub fn scanline(&self) -> i16 {
        self.scanline
    }
    pub fn dot(&self) -> u16 {
        self.dot
    }
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
    pub fn vram_addr(&self) -> VramAddress {
        self.v
    }
    pub fn temp_addr(&self) -> VramAddress {
        self.t
    }
    pub fn fine_x(&self) -> u8 {
        self.fine_x
    }
    pub fn write_toggle(&self) -> bool {
        self.write_toggle
    }

    /// Sprites selected for the scanline currently being drawn.
    pub fn active_sprites(&self) -> &[SpriteEntry] {
        &self.sprites[..self.sprite_count]
    }
}
