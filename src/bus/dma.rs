/*!
OAM DMA ($4014).

A write of page `$XX` copies `$XX00..=$XXFF` into sprite memory through the Picture Engine's
OAMDATA entry point, so the copy starts at the current OAMADDR and wraps. The copy happens at
once; the processor owes 513 cycles (514 when started on an odd cycle), which the Dispatcher
accumulates for the processor to collect with `Bus::take_dma_stall`.

Source reads go through `CpuMemoryView`: system RAM and the cartridge are read normally,
register windows read as 0 so a DMA from I/O space has no side effects.
*/

use log::debug;

use crate::bus::ram::Ram;
use crate::cartridge::Cartridge;
use crate::ppu::Ppu;

/// Source side of a DMA transfer.
pub trait CpuMemory {
    fn cpu_read(&mut self, addr: u16) -> u8;
}

/// Sink side of a DMA transfer; equivalent to a $2004 write.
pub trait OamWriter {
    fn write_oam_data(&mut self, value: u8);
}

impl OamWriter for Ppu {
    #[inline]
    fn write_oam_data(&mut self, value: u8) {
        Ppu::write_oam_data(self, value);
    }
}

/// Side-effect-free view of the processor address space used as a DMA source.
pub struct CpuMemoryView<'a> {
    ram: &'a Ram,
    cartridge: Option<&'a Cartridge>,
}

impl<'a> CpuMemoryView<'a> {
    #[inline]
    pub fn from_parts(ram: &'a Ram, cartridge: Option<&'a Cartridge>) -> Self {
        Self { ram, cartridge }
    }
}

impl CpuMemory for CpuMemoryView<'_> {
    fn cpu_read(&mut self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.ram.read(addr),
            0x2000..=0x5FFF => 0,
            0x6000..=0xFFFF => self.cartridge.map_or(0, |c| c.cpu_read(addr)),
        }
    }
}

/// Copy one 256-byte page into OAM.
pub fn oam_dma<M: CpuMemory, O: OamWriter>(page: u8, mem: &mut M, oam: &mut O) {
    debug!("OAM DMA from page {page:#04X}");
    let base = (page as u16) << 8;
    for offset in 0..=0xFFu16 {
        let value = mem.cpu_read(base | offset);
        oam.write_oam_data(value);
    }
}

/// Processor stall for a DMA started on `cpu_cycle`: one alignment cycle on even cycles,
/// two on odd ones, plus 256 read/write pairs.
pub fn stall_cycles(cpu_cycle: u64) -> u32 {
    513 + (cpu_cycle & 1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PatternMem;

    impl CpuMemory for PatternMem {
        fn cpu_read(&mut self, addr: u16) -> u8 {
            (addr & 0xFF) as u8 ^ (addr >> 8) as u8
        }
    }

    struct SinkOam {
        writes: Vec<u8>,
    }

    impl OamWriter for SinkOam {
        fn write_oam_data(&mut self, value: u8) {
            self.writes.push(value);
        }
    }

    #[test]
    fn copies_whole_page_in_order() {
        let mut oam = SinkOam { writes: Vec::new() };
        oam_dma(0x03, &mut PatternMem, &mut oam);
        assert_eq!(oam.writes.len(), 256);
        for (i, &b) in oam.writes.iter().enumerate() {
            assert_eq!(b, i as u8 ^ 0x03);
        }
    }

    #[test]
    fn stall_depends_on_parity() {
        assert_eq!(stall_cycles(0), 513);
        assert_eq!(stall_cycles(7), 514);
    }

    #[test]
    fn view_reads_ram_and_hides_io() {
        let mut ram = Ram::new();
        ram.write(0x0801, 0xAB);
        let mut view = CpuMemoryView::from_parts(&ram, None);
        assert_eq!(view.cpu_read(0x0001), 0xAB);
        assert_eq!(view.cpu_read(0x2002), 0);
        assert_eq!(view.cpu_read(0x8000), 0, "no cartridge");
    }

    #[test]
    fn ppu_writes_wrap_from_oam_cursor() {
        let mut ppu = Ppu::new();
        let mut ram = Ram::new();
        for i in 0..256u16 {
            ram.write(0x0200 + i, i as u8);
        }
        OamWriter::write_oam_data(&mut ppu, 0x77); // cursor now 1
        let mut view = CpuMemoryView::from_parts(&ram, None);
        oam_dma(0x02, &mut view, &mut ppu);
        assert_eq!(ppu.peek_oam(1), 0x00);
        assert_eq!(ppu.peek_oam(0), 0xFF);
        assert_eq!(ppu.oam_addr(), 1);
    }
}
