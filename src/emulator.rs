use crate::config::FlagConfig;
use crate::grid::TileGrid;

/// Primitive inputs the environment accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Down,
    Left,
    Right,
    Up,
    A,
    B,
}

/// The environment seam: a synchronous emulator advanced in lockstep with
/// the decision loop.
pub trait Emulator {
    /// Fresh tile-code matrix for the visible playfield.
    fn snapshot(&mut self) -> TileGrid;
    /// Raw memory probe for the actuation flags.
    fn read_flag(&mut self, address: u16) -> u8;
    /// Holds the given buttons down until released.
    fn press(&mut self, buttons: &[Button]);
    fn release_all(&mut self);
    /// Runs the simulation forward; blocks until done.
    fn advance(&mut self, ticks: u32);
    fn is_over(&mut self) -> bool;
}

/// Decoded state for the jump-type handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlagState {
    pub grounded: bool,
    pub descending: bool,
}

impl FlagState {
    /// A zero airborne byte means the agent stands on something; the jump
    /// phase byte is only meaningful while airborne, so `grounded` overrides
    /// it at the call sites.
    pub fn read(emulator: &mut impl Emulator, flags: &FlagConfig) -> Self {
        let airborne = emulator.read_flag(flags.airborne_addr);
        let phase = emulator.read_flag(flags.jump_phase_addr);
        Self {
            grounded: airborne == 0,
            descending: phase >= flags.descending_threshold,
        }
    }
}
