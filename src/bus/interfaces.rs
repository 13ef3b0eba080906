/*!
Borrowed views handed to devices so they never need the whole `Bus`.

`CartridgeView` is the Picture Engine's window onto pattern memory and the nametable
mirroring mode. It borrows only the cartridge slot, letting the Dispatcher hold `&mut Ppu`
at the same time (see `Bus::ppu_parts`). With no cartridge inserted pattern reads return 0,
writes are dropped and mirroring reports horizontal.
*/

use crate::cartridge::{Cartridge, Mirroring};
use crate::ppu_bus::PpuBus;

pub struct CartridgeView<'a> {
    cartridge: Option<&'a mut Cartridge>,
}

impl<'a> CartridgeView<'a> {
    #[inline]
    pub fn new(cartridge: Option<&'a mut Cartridge>) -> Self {
        Self { cartridge }
    }
}

impl PpuBus for CartridgeView<'_> {
    #[inline]
    fn ppu_read(&self, addr: u16) -> u8 {
        self.cartridge.as_deref().map_or(0, |c| c.chr_read(addr))
    }

    #[inline]
    fn ppu_write(&mut self, addr: u16, value: u8) {
        if let Some(c) = self.cartridge.as_deref_mut() {
            c.chr_write(addr, value);
        }
    }

    #[inline]
    fn mirroring(&self) -> Mirroring {
        self.cartridge
            .as_deref()
            .map_or(Mirroring::Horizontal, |c| c.mirroring())
    }
}
