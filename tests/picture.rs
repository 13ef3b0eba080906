mod common;

use common::{Program, scripted_console, set_ppu_addr};
use famicore::ppu::{DOTS_PER_FRAME, NES_WIDTH, SYSTEM_PALETTE};
use famicore::{Console, ConsoleConfig, IdleProcessor};

/// Rendering off; tile 1 solid colour 1 and tile 2 solid colour 3 into CHR RAM; nametable 0
/// alternating tiles 1 and 2 with palette 0 everywhere; background palette 0F/16/27/30; scroll
/// at the origin; then background on with the left column shown.
fn checkerboard_program() -> Program {
    let p = Program::new()
        .lda(0x00)
        .sta(0x2001)
        .ppu_addr(0x0010)
        .fill_ppu_data(0xFF, 8)
        .fill_ppu_data(0x00, 8)
        .fill_ppu_data(0xFF, 16)
        .ppu_addr(0x2000)
        .ldy(2);
    let outer = p.here();
    let p = p.ldx(240);
    let inner = p.here();
    let p = p
        .lda(1)
        .sta(0x2007)
        .lda(2)
        .sta(0x2007)
        .dex()
        .bne(inner)
        .dey()
        .bne(outer)
        .ppu_addr(0x23C0)
        .fill_ppu_data(0x00, 64)
        .ppu_addr(0x3F00);
    let p = [0x0F, 0x16, 0x27, 0x30]
        .into_iter()
        .fold(p, |p, colour| p.lda(colour).sta(0x2007));
    p.lda(0x00)
        .sta(0x2000)
        .sta(0x2005)
        .sta(0x2005)
        .lda(0x0A)
        .sta(0x2001)
        .halt_loop()
}

#[test]
fn program_drawn_checkerboard_matches_first_scanline() {
    let program = checkerboard_program();
    let mut console = scripted_console(program.bytes(), 0x01);

    for _ in 0..3 {
        console.run_frame();
    }
    assert!(!console.cpu().halted, "program only uses supported opcodes");

    let expected: [u32; NES_WIDTH] = std::array::from_fn(|x| {
        if (x / 8) % 2 == 0 {
            SYSTEM_PALETTE[0x16]
        } else {
            SYSTEM_PALETTE[0x30]
        }
    });
    let fb = console.framebuffer();
    assert_eq!(fb[..NES_WIDTH], expected[..], "scanline 0");
    let last_row = 239 * NES_WIDTH;
    assert_eq!(fb[last_row..last_row + NES_WIDTH], expected[..], "scanline 239");
}

#[test]
fn rendering_disabled_shows_backdrop() {
    let mut console = Console::new(IdleProcessor::new(), ConsoleConfig::default());
    {
        let bus = console.bus_mut();
        set_ppu_addr(bus, 0x3F00);
        bus.write(0x2007, 0x21);
    }
    console.run_frame();
    assert!(console.framebuffer().iter().all(|&p| p == SYSTEM_PALETTE[0x21]));
}

#[test]
fn nmi_edges_are_one_frame_apart() {
    let mut console = Console::new(IdleProcessor::new(), ConsoleConfig::default());
    console.bus_mut().write(0x2000, 0x80);

    let mut edges = Vec::new();
    let mut seen = 0;
    while edges.len() < 4 {
        console.clock();
        if console.cpu().nmi_count() != seen {
            seen = console.cpu().nmi_count();
            edges.push(console.system_clock());
        }
    }
    for pair in edges.windows(2) {
        assert_eq!(pair[1] - pair[0], DOTS_PER_FRAME as u64);
    }
}

#[test]
fn status_read_in_vblank_clears_flag() {
    let mut console = Console::new(IdleProcessor::new(), ConsoleConfig::default());
    while !(console.bus().ppu.scanline() == 241 && console.bus().ppu.dot() == 1) {
        console.clock();
    }
    let bus = console.bus_mut();
    assert_ne!(bus.read(0x2002) & 0x80, 0);
    assert_eq!(bus.read(0x2002) & 0x80, 0);
}

#[test]
fn nmi_enabled_late_in_vblank_is_not_raised_until_next_frame() {
    let mut console = Console::new(IdleProcessor::new(), ConsoleConfig::default());
    while console.bus().ppu.scanline() != 245 {
        console.clock();
    }
    console.bus_mut().write(0x2000, 0x80);
    while console.bus().ppu.scanline() != 260 {
        console.clock();
    }
    console.run_frame(); // finishes at the wrap to the pre-render line
    assert_eq!(console.cpu().nmi_count(), 0);
    console.run_frame();
    assert_eq!(console.cpu().nmi_count(), 1);
}
