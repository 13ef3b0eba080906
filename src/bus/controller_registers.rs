/*!
Controller register window.

- $4016 write: strobe, applied to both controllers
- $4016 read: controller 1 serial bit
- $4017 read: controller 2 serial bit ($4017 writes go to the frame sequencer)
*/

use crate::bus::Bus;

pub struct ControllerRegisters;

impl ControllerRegisters {
    #[inline]
    pub fn read(bus: &mut Bus, addr: u16) -> Option<u8> {
        match addr {
            0x4016 => Some(bus.controllers[0].read()),
            0x4017 => Some(bus.controllers[1].read()),
            _ => None,
        }
    }

    #[inline]
    pub fn write(bus: &mut Bus, addr: u16, value: u8) -> bool {
        if addr != 0x4016 {
            return false;
        }
        for c in &mut bus.controllers {
            c.write_strobe(value);
        }
        true
    }
}
