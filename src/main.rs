use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::info;

use famicore::{Cartridge, Console, ConsoleConfig, IdleProcessor};

/// Run the picture and sound engines for a number of frames.
#[derive(Parser, Debug)]
#[command(name = "famicore")]
#[command(about = "Cycle-stepped NES picture and sound engines", long_about = None)]
struct Args {
    /// Path to an iNES (mapper 0) ROM. A built-in test pattern is used when omitted.
    #[arg(short, long)]
    rom: Option<PathBuf>,

    /// Frames to run.
    #[arg(short, long, default_value_t = 1)]
    frames: u32,

    /// Audio sample rate in Hz.
    #[arg(long, default_value_t = famicore::config::DEFAULT_SAMPLE_RATE)]
    sample_rate: u32,

    /// Write the last frame to this PNG file.
    #[cfg(feature = "screenshot")]
    #[arg(long)]
    screenshot: Option<PathBuf>,
}

/// NROM-128 image with CHR RAM and a NOP sled; `paint_demo` uploads the graphics.
fn demo_ines() -> Vec<u8> {
    let mut rom = Vec::with_capacity(16 + 16 * 1024);
    rom.extend_from_slice(b"NES\x1A");
    rom.extend_from_slice(&[1, 0, 0x01, 0, 1]);
    rom.extend_from_slice(&[0u8; 7]);
    let mut prg = vec![0xEAu8; 16 * 1024];
    for slot in [0x3FFA, 0x3FFC, 0x3FFE] {
        prg[slot] = 0x00;
        prg[slot + 1] = 0x80;
    }
    rom.extend_from_slice(&prg);
    rom
}

fn paint_demo(console: &mut Console<IdleProcessor>) {
    let bus = console.bus_mut();
    // Tile 1: colour 1 (low plane only). Tile 2: colour 3 (both planes).
    bus.write(0x2006, 0x00);
    bus.write(0x2006, 0x10);
    let tile1 = [0xFFu8; 8].into_iter().chain([0x00; 8]);
    let tile2 = [0xFFu8; 16].into_iter();
    for plane in tile1.chain(tile2) {
        bus.write(0x2007, plane);
    }
    bus.write(0x2006, 0x20);
    bus.write(0x2006, 0x00);
    for i in 0..960u16 {
        bus.write(0x2007, if (i / 32 + i % 32) % 2 == 0 { 1 } else { 2 });
    }
    bus.write(0x2006, 0x3F);
    bus.write(0x2006, 0x00);
    for colour in [0x0F, 0x16, 0x27, 0x30] {
        bus.write(0x2007, colour);
    }
    bus.write(0x2006, 0x00);
    bus.write(0x2006, 0x00);
    bus.write(0x2001, 0x0A);
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let (bytes, demo) = match &args.rom {
        Some(path) => match std::fs::read(path) {
            Ok(b) => (b, false),
            Err(e) => {
                eprintln!("Failed to read ROM file {}: {e}", path.display());
                process::exit(1);
            }
        },
        None => (demo_ines(), true),
    };
    let cartridge = match Cartridge::from_ines_bytes(&bytes) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load cartridge: {e}");
            process::exit(1);
        }
    };

    let mut console = Console::new(
        IdleProcessor::new(),
        ConsoleConfig::with_sample_rate(args.sample_rate),
    );
    console.insert_cartridge(cartridge);
    console.reset();
    if demo {
        paint_demo(&mut console);
    }

    let mut samples = 0usize;
    for _ in 0..args.frames {
        console.run_frame();
        samples += console.drain_samples().len();
    }
    info!("ran {} frames, {} audio samples", args.frames, samples);

    let bus = console.bus();
    println!("frames: {}", bus.ppu.frame_count());
    println!("position: scanline {} dot {}", bus.ppu.scanline(), bus.ppu.dot());
    println!("audio samples: {samples}");
    println!("processor cycles: {}", console.cpu().cycles());

    #[cfg(feature = "screenshot")]
    if let Some(path) = &args.screenshot {
        if let Err(e) = famicore::screenshot::save_png(console.framebuffer(), path) {
            eprintln!("{e}");
            process::exit(1);
        }
        println!("screenshot: {}", path.display());
    }
}
