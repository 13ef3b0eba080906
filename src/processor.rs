/*!
Boundary to the external instruction processor.

The console drives a `Processor` one cycle at a time, in lock-step with the engines, and
delivers the Picture Engine's interrupt request through `nmi`. Instruction decoding lives
outside this crate.
*/

use crate::bus::Bus;

pub trait Processor {
    /// Power-on / reset sequence (typically loads PC from $FFFC).
    fn reset(&mut self, bus: &mut Bus);

    /// One processor cycle.
    fn clock(&mut self, bus: &mut Bus);

    /// Non-maskable interrupt raised by the Picture Engine at the start of vblank.
    fn nmi(&mut self, bus: &mut Bus);
}

/// A processor that never touches the bus; useful for running the engines on their own.
#[derive(Clone, Debug, Default)]
pub struct IdleProcessor {
    cycles: u64,
    nmis: u64,
}

impl IdleProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn nmi_count(&self) -> u64 {
        self.nmis
    }
}

impl Processor for IdleProcessor {
    fn reset(&mut self, _bus: &mut Bus) {
        self.cycles = 0;
        self.nmis = 0;
    }

    fn clock(&mut self, _bus: &mut Bus) {
        self.cycles += 1;
    }

    fn nmi(&mut self, _bus: &mut Bus) {
        self.nmis += 1;
    }
}
