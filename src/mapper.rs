/*!
Mapper subsystem: trait definition and the NROM (mapper 0) board.

Purpose:
- Decouple processor/picture-engine address translation from the `Cartridge` metadata.
- Provide the interface the Bus calls for transactions in cartridge space.

Integration:
- `Cartridge` parses iNES and instantiates `Nrom` with PRG/CHR data.
- Bus forwards processor $6000..=$FFFF to `cpu_*`.
- The picture engine reaches `ppu_*` for $0000..=$1FFF through the `PpuBus` view of the cartridge.
*/

/// Common interface a cartridge board implements.
///
/// All read/write methods take full addresses (unmasked); implementations decide the mapping.
pub trait Mapper {
    /// Mapper numeric identifier (0 for NROM).
    fn mapper_id(&self) -> u8;

    /// Processor-visible read at $6000..=$FFFF.
    fn cpu_read(&self, addr: u16) -> u8;

    /// Processor-visible write at $6000..=$FFFF.
    fn cpu_write(&mut self, addr: u16, value: u8);

    /// Picture-engine read at $0000..=$1FFF (pattern tables).
    fn ppu_read(&self, addr: u16) -> u8;

    /// Picture-engine write at $0000..=$1FFF. Ignored unless the board carries CHR RAM.
    fn ppu_write(&mut self, addr: u16, value: u8);

    /// Power-on state for board registers.
    fn reset(&mut self) {}
}

/// NROM (mapper 0).
///
/// - PRG ROM: 16 KiB (NROM-128) mirrored, or 32 KiB (NROM-256) direct, at $8000..=$FFFF.
/// - PRG RAM: 8 KiB at $6000..=$7FFF, wrapping when smaller.
/// - CHR: 8 KiB ROM, or RAM when the image carries no CHR banks.
#[derive(Clone, Debug)]
pub struct Nrom {
    prg_rom: Vec<u8>,
    prg_ram: Vec<u8>,
    chr: Vec<u8>,
    chr_is_ram: bool,
}

impl Nrom {
    pub fn new(prg_rom: Vec<u8>, chr: Vec<u8>, chr_is_ram: bool, prg_ram_size: usize) -> Self {
        Self {
            prg_rom,
            prg_ram: vec![0; prg_ram_size],
            chr,
            chr_is_ram,
        }
    }

    #[inline]
    fn prg_rom_read(&self, addr: u16) -> u8 {
        if self.prg_rom.is_empty() {
            return 0xFF;
        }
        let rel = addr.wrapping_sub(0x8000) as usize;
        let len = self.prg_rom.len();
        if len.is_power_of_two() {
            self.prg_rom[rel & (len - 1)]
        } else {
            self.prg_rom[rel % len]
        }
    }

    #[inline]
    fn prg_ram_index(&self, addr: u16) -> Option<usize> {
        if self.prg_ram.is_empty() {
            return None;
        }
        let rel = (addr as usize).saturating_sub(0x6000);
        Some(rel % self.prg_ram.len())
    }
}

impl Mapper for Nrom {
    fn mapper_id(&self) -> u8 {
        0
    }

    fn cpu_read(&self, addr: u16) -> u8 {
        match addr {
            0x6000..=0x7FFF => self
                .prg_ram_index(addr)
                .map(|i| self.prg_ram[i])
                .unwrap_or(0),
            0x8000..=0xFFFF => self.prg_rom_read(addr),
            _ => 0,
        }
    }

    fn cpu_write(&mut self, addr: u16, value: u8) {
        // PRG ROM writes have no effect on NROM.
        if !(0x6000..=0x7FFF).contains(&addr) {
            return;
        }
        if let Some(i) = self.prg_ram_index(addr) {
            self.prg_ram[i] = value;
        }
    }

    fn ppu_read(&self, addr: u16) -> u8 {
        if self.chr.is_empty() {
            return 0;
        }
        self.chr[(addr as usize) & 0x1FFF]
    }

    fn ppu_write(&mut self, addr: u16, value: u8) {
        if !self.chr_is_ram || self.chr.is_empty() {
            return;
        }
        let idx = (addr as usize) & 0x1FFF;
        self.chr[idx] = value;
    }

    fn reset(&mut self) {
        self.prg_ram.fill(0);
    }
}
