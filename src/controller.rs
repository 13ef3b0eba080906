/*!
Standard controller: an 8-bit parallel-in, serial-out shift register behind $4016/$4017.

Behavior:
- Button bits, in the order they are shifted out: A, B, Select, Start, Up, Down, Left, Right
  (bit 0 through bit 7).
- Bit 0 of a $4016 write drives the strobe line. While strobe is high the register keeps
  reloading from the live button state, so every read reports A.
- With strobe low, each read returns the next bit of the snapshot taken when strobe was last
  high. Once all eight bits are out, reads return 1.
*/

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Button {
    A,
    B,
    Select,
    Start,
    Up,
    Down,
    Left,
    Right,
}

impl Button {
    pub const ALL: [Button; 8] = [
        Button::A,
        Button::B,
        Button::Select,
        Button::Start,
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
    ];

    #[inline]
    pub const fn mask(self) -> u8 {
        1 << self as u8
    }
}

#[derive(Clone, Debug, Default)]
pub struct Controller {
    buttons: u8,
    shift: u8,
    strobe: bool,
    bits_read: u8,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_button(&mut self, button: Button, pressed: bool) {
        if pressed {
            self.buttons |= button.mask();
        } else {
            self.buttons &= !button.mask();
        }
    }

    pub fn press(&mut self, button: Button) {
        self.set_button(button, true);
    }

    pub fn release(&mut self, button: Button) {
        self.set_button(button, false);
    }

    /// Replace the whole live state; bit layout follows [`Button::mask`].
    pub fn set_state_mask(&mut self, mask: u8) {
        self.buttons = mask;
    }

    pub fn write_strobe(&mut self, value: u8) {
        self.strobe = value & 1 != 0;
        if self.strobe {
            self.reload();
        }
    }

    /// One serial read; only bit 0 carries data.
    pub fn read(&mut self) -> u8 {
        if self.strobe {
            self.reload();
            return self.shift & 1;
        }
        if self.bits_read >= 8 {
            return 1;
        }
        let bit = self.shift & 1;
        self.shift >>= 1;
        self.bits_read += 1;
        bit
    }

    #[inline]
    fn reload(&mut self) {
        self.shift = self.buttons;
        self.bits_read = 0;
    }

    pub fn strobe(&self) -> bool {
        self.strobe
    }

    pub fn state_mask(&self) -> u8 {
        self.buttons
    }

    /// Serial reads taken since the last reload (saturates at 8).
    pub fn bits_read(&self) -> u8 {
        self.bits_read
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
