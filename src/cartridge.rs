/*!
Cartridge with iNES (v1) loader and Mapper integration (NROM/mapper 0).

Features:
- Parse iNES (v1) header from bytes or file path
- Extract PRG ROM, CHR (ROM, or 8 KiB CHR RAM when the CHR bank count is 0), and PRG RAM size
- Determine nametable mirroring, battery-backed RAM, mapper ID
- Construct the `Nrom` board and delegate processor/picture-engine mapping through it

Notes:
- iNES 2.0 is detected and rejected with an error.
- Any mapper id other than 0 is rejected; only the baseline board is carried.
- PRG RAM: header byte 8 of 0 allocates 8 KiB by convention.
*/

use std::fs;
use std::path::Path;

use log::info;

use crate::mapper::{Mapper, Nrom};

const HEADER_LEN: usize = 16;
const TRAINER_LEN: usize = 512;
const PRG_BANK: usize = 16 * 1024;
const CHR_BANK: usize = 8 * 1024;
const PRG_RAM_BANK: usize = 8 * 1024;

/// Nametable layout selected by the board.
///
/// Four-screen boards carry their own extra VRAM; the baseline picture engine only owns 2 KiB,
/// so four-screen resolves like vertical mirroring.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
    FourScreen,
}

pub struct Cartridge {
    mapper: Box<dyn Mapper>,

    mapper_id: u8,
    mirroring: Mirroring,
    battery: bool,
    has_trainer: bool,

    prg_rom_len: usize,
    chr_len: usize,
    prg_ram_len: usize,
    chr_is_ram: bool,
}

impl std::fmt::Debug for Cartridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cartridge")
            .field("mapper_id", &self.mapper_id)
            .field("mirroring", &self.mirroring)
            .field("battery", &self.battery)
            .field("has_trainer", &self.has_trainer)
            .field("prg_rom_len", &self.prg_rom_len)
            .field("chr_len", &self.chr_len)
            .field("prg_ram_len", &self.prg_ram_len)
            .field("chr_is_ram", &self.chr_is_ram)
            .finish()
    }
}

impl Cartridge {
    /// Load a cartridge from raw iNES bytes.
    pub fn from_ines_bytes(data: &[u8]) -> Result<Self, String> {
        if data.len() < HEADER_LEN {
            return Err("Data too small for iNES header".into());
        }
        if &data[0..4] != b"NES\x1A" {
            return Err("Invalid iNES header magic (expected NES<1A>)".into());
        }

        let prg_banks = data[4] as usize;
        let chr_banks = data[5] as usize;
        let flags6 = data[6];
        let flags7 = data[7];
        let prg_ram_units = data[8] as usize;

        if (flags7 & 0x0C) == 0x08 {
            return Err("NES 2.0 format is not supported".into());
        }

        let mapper_id = (flags7 & 0xF0) | (flags6 >> 4);
        if mapper_id != 0 {
            return Err(format!("Unsupported mapper id: {mapper_id}"));
        }

        let mirroring = if (flags6 & 0b0000_1000) != 0 {
            Mirroring::FourScreen
        } else if (flags6 & 0b0000_0001) != 0 {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };
        let battery = (flags6 & 0b0000_0010) != 0;
        let has_trainer = (flags6 & 0b0000_0100) != 0;

        let mut offset = HEADER_LEN;
        if has_trainer {
            if data.len() < offset + TRAINER_LEN {
                return Err("Data too small for iNES trainer".into());
            }
            offset += TRAINER_LEN;
        }

        let prg_rom_len = prg_banks * PRG_BANK;
        if prg_rom_len == 0 {
            return Err("Image declares no PRG ROM".into());
        }
        if data.len() < offset + prg_rom_len {
            return Err("Data too small for PRG ROM".into());
        }
        let prg_rom = data[offset..offset + prg_rom_len].to_vec();
        offset += prg_rom_len;

        let chr_is_ram = chr_banks == 0;
        let chr = if chr_is_ram {
            vec![0; CHR_BANK]
        } else {
            let chr_len = chr_banks * CHR_BANK;
            if data.len() < offset + chr_len {
                return Err("Data too small for CHR ROM".into());
            }
            data[offset..offset + chr_len].to_vec()
        };
        let chr_len = chr.len();

        let prg_ram_len = prg_ram_units.max(1) * PRG_RAM_BANK;

        info!(
            "cartridge loaded: mapper {mapper_id}, {prg_banks} x 16KiB PRG, {} CHR, mirroring {mirroring:?}",
            if chr_is_ram {
                "8KiB RAM".to_string()
            } else {
                format!("{chr_banks} x 8KiB ROM")
            }
        );

        Ok(Self {
            mapper: Box::new(Nrom::new(prg_rom, chr, chr_is_ram, prg_ram_len)),
            mapper_id,
            mirroring,
            battery,
            has_trainer,
            prg_rom_len,
            chr_len,
            prg_ram_len,
            chr_is_ram,
        })
    }

    /// Load a cartridge from an iNES file (.nes).
    pub fn from_ines_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let bytes = fs::read(path).map_err(|e| format!("Failed to read iNES file: {e}"))?;
        Self::from_ines_bytes(&bytes)
    }

    /// Processor read in cartridge space ($6000..=$FFFF).
    pub fn cpu_read(&self, addr: u16) -> u8 {
        self.mapper.cpu_read(addr)
    }

    /// Processor write in cartridge space ($6000..=$FFFF).
    pub fn cpu_write(&mut self, addr: u16, value: u8) {
        self.mapper.cpu_write(addr, value);
    }

    /// Pattern-table read ($0000..=$1FFF).
    pub fn chr_read(&self, addr: u16) -> u8 {
        self.mapper.ppu_read(addr)
    }

    /// Pattern-table write ($0000..=$1FFF); only lands on CHR RAM.
    pub fn chr_write(&mut self, addr: u16, value: u8) {
        self.mapper.ppu_write(addr, value);
    }

    pub fn reset(&mut self) {
        self.mapper.reset();
    }

    pub fn mapper_id(&self) -> u8 {
        self.mapper_id
    }

    pub fn mirroring(&self) -> Mirroring {
        self.mirroring
    }

    pub fn battery_backed(&self) -> bool {
        self.battery
    }

    pub fn has_trainer(&self) -> bool {
        self.has_trainer
    }

    pub fn prg_rom_len(&self) -> usize {
        self.prg_rom_len
    }

    pub fn chr_len(&self) -> usize {
        self.chr_len
    }

    pub fn chr_is_ram(&self) -> bool {
        self.chr_is_ram
    }

    pub fn prg_ram_len(&self) -> usize {
        self.prg_ram_len
    }
}
