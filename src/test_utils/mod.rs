//! Shared test utilities: minimal iNES (v1) images and an in-memory pattern-table bus.
//!
//! Notes on iNES header fields used here:
//! - bytes[0..4] = b"NES\x1A"
//! - byte 4 = PRG ROM size in 16 KiB units
//! - byte 5 = CHR ROM size in 8 KiB units (0 => loader allocates 8 KiB CHR RAM)
//! - byte 6 = Flags 6 (mirroring, battery, trainer, mapper low nibble)
//! - byte 7 = Flags 7 (NES 2.0 indicator, mapper high nibble)
//! - byte 8 = PRG RAM size in 8 KiB units (0 => 8 KiB by convention)

#![allow(dead_code)]

use crate::cartridge::Mirroring;
use crate::ppu_bus::PpuBus;

/// Build a minimal iNES (v1) image. PRG is filled with 0xAA, CHR ROM with 0xCC.
pub fn build_ines(
    prg_16k: usize,
    chr_8k: usize,
    flags6: u8,
    flags7: u8,
    prg_ram_8k: u8,
    trainer: Option<&[u8; 512]>,
) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(
        16 + trainer.map(|_| 512).unwrap_or(0) + prg_16k * 16 * 1024 + chr_8k * 8 * 1024,
    );

    bytes.extend_from_slice(b"NES\x1A");
    bytes.push(prg_16k as u8);
    bytes.push(chr_8k as u8);
    bytes.push(flags6);
    bytes.push(flags7);
    bytes.push(prg_ram_8k);
    bytes.extend_from_slice(&[0u8; 7]);

    if let Some(t) = trainer {
        bytes.extend_from_slice(t);
    }
    bytes.extend(std::iter::repeat_n(0xAA, prg_16k * 16 * 1024));
    bytes.extend(std::iter::repeat_n(0xCC, chr_8k * 8 * 1024));
    bytes
}

/// In-memory pattern table with a fixed mirroring mode.
pub struct MockPpuBus {
    pattern: Vec<u8>,
    mirroring: Mirroring,
}

impl MockPpuBus {
    pub fn new(mirroring: Mirroring) -> Self {
        Self {
            pattern: vec![0; 0x2000],
            mirroring,
        }
    }

    /// Store one 8x8 tile: `lsb`/`msb` are the two bitplanes, row 0 first.
    pub fn set_tile(&mut self, table: u16, tile: u8, lsb: [u8; 8], msb: [u8; 8]) {
        let base = (table << 12) as usize + (tile as usize) * 16;
        self.pattern[base..base + 8].copy_from_slice(&lsb);
        self.pattern[base + 8..base + 16].copy_from_slice(&msb);
    }
}

impl PpuBus for MockPpuBus {
    fn ppu_read(&self, addr: u16) -> u8 {
        self.pattern[(addr as usize) & 0x1FFF]
    }

    fn ppu_write(&mut self, addr: u16, value: u8) {
        self.pattern[(addr as usize) & 0x1FFF] = value;
    }

    fn mirroring(&self) -> Mirroring {
        self.mirroring
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_basic_ines() {
        let rom = build_ines(2, 1, 0x01, 0x00, 1, None);
        assert_eq!(&rom[0..4], b"NES\x1A");
        assert_eq!(rom[4], 2);
        assert_eq!(rom[5], 1);
        assert_eq!(rom[6], 0x01);
        assert_eq!(rom.len(), 16 + 2 * 16 * 1024 + 8 * 1024);
    }

    #[test]
    fn mock_tile_layout() {
        let mut bus = MockPpuBus::new(Mirroring::Vertical);
        bus.set_tile(1, 2, [0xFF; 8], [0x0F; 8]);
        assert_eq!(bus.ppu_read(0x1020), 0xFF);
        assert_eq!(bus.ppu_read(0x1028), 0x0F);
    }
}
