#![doc = r#"
Picture Engine register window ($2000-$3FFF).

Every address is folded onto the eight registers at $2000-$2007 and handed to `Ppu`
together with a `CartridgeView`, so PPUDATA accesses below $2000 reach pattern memory.
"#]

use crate::bus::Bus;

pub struct PpuRegisters;

impl PpuRegisters {
    pub fn read(bus: &mut Bus, addr: u16) -> u8 {
        let (ppu, view) = bus.ppu_parts();
        ppu.read_reg(mirror_ppu_reg(addr), &view)
    }

    pub fn write(bus: &mut Bus, addr: u16, value: u8) {
        let (ppu, mut view) = bus.ppu_parts();
        ppu.write_reg(mirror_ppu_reg(addr), value, &mut view);
    }
}

#[inline]
pub fn mirror_ppu_reg(addr: u16) -> u16 {
    0x2000 | (addr & 0x0007)
}

#[cfg(test)]
mod tests {
    use super::mirror_ppu_reg;

    #[test]
    fn folds_onto_eight_registers() {
        assert_eq!(mirror_ppu_reg(0x2008), 0x2000);
        assert_eq!(mirror_ppu_reg(0x3456), 0x2006);
        assert_eq!(mirror_ppu_reg(0x3FFF), 0x2007);
    }
}
