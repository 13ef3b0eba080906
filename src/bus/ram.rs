/*!
System RAM: 2 KiB, visible at $0000-$1FFF with the physical array repeated every 2 KiB.
*/

pub const RAM_SIZE: usize = 0x0800;

#[derive(Clone)]
pub struct Ram {
    data: [u8; RAM_SIZE],
}

impl Default for Ram {
    fn default() -> Self {
        Self::new()
    }
}

impl Ram {
    pub fn new() -> Self {
        Self { data: [0; RAM_SIZE] }
    }

    pub fn reset(&mut self) {
        self.data.fill(0);
    }

    #[inline]
    pub fn read(&self, addr: u16) -> u8 {
        self.data[Self::mirror_index(addr)]
    }

    #[inline]
    pub fn write(&mut self, addr: u16, value: u8) {
        self.data[Self::mirror_index(addr)] = value;
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn mirror_index(addr: u16) -> usize {
        addr as usize & (RAM_SIZE - 1)
    }
}
