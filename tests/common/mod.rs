#![allow(dead_code)]

use famicore::{Bus, Cartridge, Console, ConsoleConfig, Processor};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// NROM-128 image with CHR RAM, `program` at $8000 and every vector pointing there.
pub fn nrom_with_program(program: &[u8], flags6: u8) -> Vec<u8> {
    let mut rom = Vec::new();
    rom.extend_from_slice(b"NES\x1A");
    rom.extend_from_slice(&[1, 0, flags6, 0, 1]);
    rom.extend_from_slice(&[0u8; 7]);
    let mut prg = vec![0xEAu8; 16 * 1024];
    prg[..program.len()].copy_from_slice(program);
    for slot in [0x3FFA, 0x3FFC, 0x3FFE] {
        prg[slot] = 0x00;
        prg[slot + 1] = 0x80;
    }
    rom.extend_from_slice(&prg);
    rom
}

/// Just enough of a 6502 to drive register writes from a test program:
/// LDA #imm, LDA abs, STA abs, LDX #imm, LDY #imm, DEX, DEY, BNE, JMP abs and NOP, with their
/// cycle counts. Any other opcode halts the processor.
#[derive(Debug, Default)]
pub struct ScriptedCpu {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub zero: bool,
    pub pc: u16,
    pub halted: bool,
    pub cycles: u64,
    pub nmi_count: u64,
    wait: u8,
}

impl ScriptedCpu {
    fn fetch(&mut self, bus: &mut Bus) -> u8 {
        let v = bus.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        v
    }

    fn fetch_word(&mut self, bus: &mut Bus) -> u16 {
        let lo = self.fetch(bus) as u16;
        let hi = self.fetch(bus) as u16;
        (hi << 8) | lo
    }

    fn execute(&mut self, bus: &mut Bus) -> u8 {
        match self.fetch(bus) {
            0xA9 => {
                self.a = self.fetch(bus);
                self.zero = self.a == 0;
                2
            }
            0xAD => {
                let addr = self.fetch_word(bus);
                self.a = bus.read(addr);
                self.zero = self.a == 0;
                4
            }
            0xA2 => {
                self.x = self.fetch(bus);
                self.zero = self.x == 0;
                2
            }
            0xA0 => {
                self.y = self.fetch(bus);
                self.zero = self.y == 0;
                2
            }
            0xCA => {
                self.x = self.x.wrapping_sub(1);
                self.zero = self.x == 0;
                2
            }
            0x88 => {
                self.y = self.y.wrapping_sub(1);
                self.zero = self.y == 0;
                2
            }
            0xD0 => {
                let offset = self.fetch(bus) as i8;
                if self.zero {
                    2
                } else {
                    self.pc = self.pc.wrapping_add_signed(offset as i16);
                    3
                }
            }
            0x8D => {
                let addr = self.fetch_word(bus);
                bus.write(addr, self.a);
                4
            }
            0x4C => {
                self.pc = self.fetch_word(bus);
                3
            }
            0xEA => 2,
            _ => {
                self.halted = true;
                1
            }
        }
    }
}

impl Processor for ScriptedCpu {
    fn reset(&mut self, bus: &mut Bus) {
        *self = Self::default();
        self.pc = bus.read_word(0xFFFC);
    }

    fn clock(&mut self, bus: &mut Bus) {
        self.cycles += 1;
        if self.halted {
            return;
        }
        if self.wait == 0 {
            self.wait = self.execute(bus);
        }
        self.wait -= 1;
    }

    fn nmi(&mut self, _bus: &mut Bus) {
        self.nmi_count += 1;
    }
}

/// Assembles a program for `ScriptedCpu`, based at $8000.
#[derive(Debug, Default)]
pub struct Program {
    bytes: Vec<u8>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    /// Address of the next emitted instruction.
    pub fn here(&self) -> u16 {
        0x8000 + self.bytes.len() as u16
    }

    pub fn lda(mut self, value: u8) -> Self {
        self.bytes.extend([0xA9, value]);
        self
    }

    pub fn lda_abs(mut self, addr: u16) -> Self {
        self.bytes.extend([0xAD, addr as u8, (addr >> 8) as u8]);
        self
    }

    pub fn sta(mut self, addr: u16) -> Self {
        self.bytes.extend([0x8D, addr as u8, (addr >> 8) as u8]);
        self
    }

    pub fn ldx(mut self, value: u8) -> Self {
        self.bytes.extend([0xA2, value]);
        self
    }

    pub fn ldy(mut self, value: u8) -> Self {
        self.bytes.extend([0xA0, value]);
        self
    }

    pub fn dex(mut self) -> Self {
        self.bytes.push(0xCA);
        self
    }

    pub fn dey(mut self) -> Self {
        self.bytes.push(0x88);
        self
    }

    /// Branch back to `target` while the last counter is non-zero.
    pub fn bne(mut self, target: u16) -> Self {
        let next = self.here().wrapping_add(2);
        let offset = target.wrapping_sub(next) as i16;
        self.bytes.extend([0xD0, offset as i8 as u8]);
        self
    }

    pub fn jmp(mut self, addr: u16) -> Self {
        self.bytes.extend([0x4C, addr as u8, (addr >> 8) as u8]);
        self
    }

    /// Point PPUADDR at `addr`, resetting the write toggle first.
    pub fn ppu_addr(self, addr: u16) -> Self {
        self.lda_abs(0x2002)
            .lda((addr >> 8) as u8)
            .sta(0x2006)
            .lda(addr as u8)
            .sta(0x2006)
    }

    /// Store `value` to PPUDATA `count` times (1..=256, 0 meaning 256).
    pub fn fill_ppu_data(self, value: u8, count: u8) -> Self {
        let p = self.lda(value).ldx(count);
        let top = p.here();
        p.sta(0x2007).dex().bne(top)
    }

    /// Spin on the current address.
    pub fn halt_loop(self) -> Self {
        let here = self.here();
        self.jmp(here)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

pub fn scripted_console(program: &[u8], flags6: u8) -> Console<ScriptedCpu> {
    init_logging();
    let cart = Cartridge::from_ines_bytes(&nrom_with_program(program, flags6)).expect("valid image");
    let mut console = Console::new(ScriptedCpu::default(), ConsoleConfig::default());
    console.insert_cartridge(cart);
    console.reset();
    console
}

pub fn set_ppu_addr(bus: &mut Bus, addr: u16) {
    let _ = bus.read(0x2002);
    bus.write(0x2006, (addr >> 8) as u8);
    bus.write(0x2006, (addr & 0xFF) as u8);
}
