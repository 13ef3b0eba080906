/*!
Sound Engine register window.

- $4000-$4013: channel registers (write-only; reads return 0)
- $4015: channel enables (write) / length-counter status (read)
- $4017: frame sequencer control (write only; the read side belongs to controller 2)

$4014 (OAM DMA) and $4016 (controller strobe) are not answered here.
*/

use crate::bus::Bus;

pub struct ApuRegisters;

impl ApuRegisters {
    /// `None` when the address is not a Sound Engine read.
    #[inline]
    pub fn read(bus: &mut Bus, addr: u16) -> Option<u8> {
        match addr {
            0x4000..=0x4013 | 0x4015 => Some(bus.apu.read_reg(addr)),
            _ => None,
        }
    }

    /// `false` when the address is not a Sound Engine write.
    #[inline]
    pub fn write(bus: &mut Bus, addr: u16, value: u8) -> bool {
        match addr {
            0x4000..=0x4013 | 0x4015 | 0x4017 => {
                bus.apu.write_reg(addr, value);
                true
            }
            _ => false,
        }
    }
}
