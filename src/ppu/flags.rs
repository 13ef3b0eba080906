#![doc = r#"
PPU packed registers

Purpose
- Plain-integer newtypes for the bit-packed hardware registers: PPUCTRL, PPUMASK,
  PPUSTATUS and the 15-bit scroll/VRAM address shared by `v` and `t`.
- Every field is an explicit shift-and-mask accessor, so the in-memory bit layout is
  exactly the hardware layout and raw values can move in and out unchanged.

VRAM address layout (15 bits)
```text
yyy NN YYYYY XXXXX
||| || ||||| +++++-- coarse X (0..31)
||| || +++++-------- coarse Y (0..31)
||| |+-------------- nametable X
||| +--------------- nametable Y
+++----------------- fine Y (0..7)
```
"#]

/// PPUCTRL ($2000).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Control(u8);

impl Control {
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }
    pub const fn bits(self) -> u8 {
        self.0
    }
    pub const fn nametable_x(self) -> u8 {
        self.0 & 0x01
    }
    pub const fn nametable_y(self) -> u8 {
        (self.0 >> 1) & 0x01
    }
    /// VRAM address step after each $2007 access.
    pub const fn increment_step(self) -> u16 {
        if (self.0 & 0x04) != 0 { 32 } else { 1 }
    }
    /// Sprite pattern table base for 8x8 sprites.
    pub const fn sprite_table(self) -> u16 {
        if (self.0 & 0x08) != 0 { 0x1000 } else { 0x0000 }
    }
    pub const fn background_table(self) -> u16 {
        if (self.0 & 0x10) != 0 { 0x1000 } else { 0x0000 }
    }
    pub const fn sprite_height(self) -> u8 {
        if (self.0 & 0x20) != 0 { 16 } else { 8 }
    }
    pub const fn nmi_enabled(self) -> bool {
        (self.0 & 0x80) != 0
    }
}

/// PPUMASK ($2001).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Mask(u8);

impl Mask {
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }
    pub const fn bits(self) -> u8 {
        self.0
    }
    pub const fn grayscale(self) -> bool {
        (self.0 & 0x01) != 0
    }
    /// Background visible in the leftmost 8 pixels.
    pub const fn background_left(self) -> bool {
        (self.0 & 0x02) != 0
    }
    /// Sprites visible in the leftmost 8 pixels.
    pub const fn sprites_left(self) -> bool {
        (self.0 & 0x04) != 0
    }
    pub const fn render_background(self) -> bool {
        (self.0 & 0x08) != 0
    }
    pub const fn render_sprites(self) -> bool {
        (self.0 & 0x10) != 0
    }
    /// Colour emphasis bits (red, green, blue) in bits 0..2 of the result.
    pub const fn emphasis(self) -> u8 {
        self.0 >> 5
    }
    pub const fn rendering_enabled(self) -> bool {
        (self.0 & 0x18) != 0
    }
}

/// PPUSTATUS ($2002). Only bits 5..7 are meaningful.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Status(u8);

impl Status {
    const OVERFLOW: u8 = 0x20;
    const SPRITE_ZERO: u8 = 0x40;
    const VBLANK: u8 = 0x80;

    pub const fn bits(self) -> u8 {
        self.0
    }
    pub const fn vblank(self) -> bool {
        (self.0 & Self::VBLANK) != 0
    }
    pub const fn sprite_zero_hit(self) -> bool {
        (self.0 & Self::SPRITE_ZERO) != 0
    }
    pub const fn sprite_overflow(self) -> bool {
        (self.0 & Self::OVERFLOW) != 0
    }
    pub fn set_vblank(&mut self, on: bool) {
        self.set(Self::VBLANK, on);
    }
    pub fn set_sprite_zero_hit(&mut self, on: bool) {
        self.set(Self::SPRITE_ZERO, on);
    }
    pub fn set_sprite_overflow(&mut self, on: bool) {
        self.set(Self::OVERFLOW, on);
    }

    #[inline]
    fn set(&mut self, mask: u8, on: bool) {
        if on {
            self.0 |= mask;
        } else {
            self.0 &= !mask;
        }
    }
}

/// Scroll/VRAM address register (`v` and `t`).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct VramAddress(u16);

impl VramAddress {
    pub const fn new(raw: u16) -> Self {
        Self(raw & 0x7FFF)
    }
    pub const fn raw(self) -> u16 {
        self.0
    }

    pub const fn coarse_x(self) -> u8 {
        (self.0 & 0x001F) as u8
    }
    pub const fn coarse_y(self) -> u8 {
        ((self.0 >> 5) & 0x001F) as u8
    }
    pub const fn nametable_x(self) -> u8 {
        ((self.0 >> 10) & 0x0001) as u8
    }
    pub const fn nametable_y(self) -> u8 {
        ((self.0 >> 11) & 0x0001) as u8
    }
    pub const fn fine_y(self) -> u8 {
        ((self.0 >> 12) & 0x0007) as u8
    }

    pub const fn with_coarse_x(self, value: u8) -> Self {
        Self((self.0 & !0x001F) | (value as u16 & 0x1F))
    }
    pub const fn with_coarse_y(self, value: u8) -> Self {
        Self((self.0 & !0x03E0) | ((value as u16 & 0x1F) << 5))
    }
    pub const fn with_nametable_x(self, value: u8) -> Self {
        Self((self.0 & !0x0400) | ((value as u16 & 0x01) << 10))
    }
    pub const fn with_nametable_y(self, value: u8) -> Self {
        Self((self.0 & !0x0800) | ((value as u16 & 0x01) << 11))
    }
    pub const fn with_fine_y(self, value: u8) -> Self {
        Self((self.0 & !0x7000) | ((value as u16 & 0x07) << 12))
    }

    /// Nametable byte address for the tile under this position.
    pub const fn tile_address(self) -> u16 {
        0x2000 | (self.0 & 0x0FFF)
    }

    /// Attribute byte address for the 4x4-tile block under this position.
    pub const fn attribute_address(self) -> u16 {
        0x23C0
            | ((self.nametable_y() as u16) << 11)
            | ((self.nametable_x() as u16) << 10)
            | (((self.coarse_y() >> 2) as u16) << 3)
            | ((self.coarse_x() >> 2) as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vram_address_fields_round_trip_into_raw_layout() {
        let v = VramAddress::default()
            .with_coarse_x(0x1F)
            .with_coarse_y(0x1D)
            .with_nametable_x(1)
            .with_nametable_y(1)
            .with_fine_y(5);
        assert_eq!(v.raw(), 0b101_11_11101_11111);
        assert_eq!(v.coarse_x(), 31);
        assert_eq!(v.coarse_y(), 29);
        assert_eq!(v.fine_y(), 5);
        assert_eq!(VramAddress::new(0xFFFF).raw(), 0x7FFF, "address is 15 bits wide");
    }

    #[test]
    fn attribute_address_selects_block() {
        let v = VramAddress::default()
            .with_coarse_x(6)
            .with_coarse_y(9)
            .with_nametable_x(1);
        assert_eq!(v.attribute_address(), 0x27C0 | (2 << 3) | 1);
        assert_eq!(v.tile_address(), 0x2400 + 9 * 32 + 6);
    }

    #[test]
    fn control_and_mask_accessors() {
        let c = Control::from_bits(0b1011_1111);
        assert_eq!(c.nametable_x(), 1);
        assert_eq!(c.nametable_y(), 1);
        assert_eq!(c.increment_step(), 32);
        assert_eq!(c.sprite_table(), 0x1000);
        assert_eq!(c.background_table(), 0x1000);
        assert_eq!(c.sprite_height(), 16);
        assert!(c.nmi_enabled());

        let m = Mask::from_bits(0b1110_1010);
        assert!(m.background_left());
        assert!(!m.sprites_left());
        assert!(m.render_background());
        assert!(!m.render_sprites());
        assert!(m.rendering_enabled());
        assert_eq!(m.emphasis(), 0b111);
    }

    #[test]
    fn status_flag_setters() {
        let mut s = Status::default();
        s.set_vblank(true);
        s.set_sprite_overflow(true);
        assert_eq!(s.bits(), 0xA0);
        s.set_vblank(false);
        assert!(!s.vblank());
        assert!(s.sprite_overflow());
        assert!(!s.sprite_zero_hit());
    }
}
