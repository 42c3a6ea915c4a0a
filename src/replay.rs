//! Offline emulator backed by recorded frames.
//!
//! The binary and the integration tests run against this instead of a live
//! emulator. Frames play back in lockstep with the decision loop, and every
//! input the agent issues lands in a journal for later inspection; playback
//! itself is open-loop and ignores the inputs.

use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::FlagConfig;
use crate::emulator::{Button, Emulator};
use crate::grid::{AGENT_TILE, GRID_COLS, GRID_ROWS, TileGrid};

#[derive(Debug)]
pub enum ReplayError {
    Io(io::Error),
    Parse(serde_json::Error),
    Empty,
    BadFrame { index: usize },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReplayError::Io(err) => write!(formatter, "replay io error: {}", err),
            ReplayError::Parse(err) => write!(formatter, "replay parse error: {}", err),
            ReplayError::Empty => write!(formatter, "replay holds no frames"),
            ReplayError::BadFrame { index } => write!(
                formatter,
                "frame {} is not a {}x{} tile grid",
                index, GRID_ROWS, GRID_COLS
            ),
        }
    }
}

impl Error for ReplayError {}

impl From<io::Error> for ReplayError {
    fn from(err: io::Error) -> Self {
        ReplayError::Io(err)
    }
}

impl From<serde_json::Error> for ReplayError {
    fn from(err: serde_json::Error) -> Self {
        ReplayError::Parse(err)
    }
}

/// One recorded decision-cycle snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayFrame {
    pub tiles: Vec<Vec<u8>>,
    pub airborne: u8,
    pub jump_phase: u8,
    #[serde(default)]
    pub over: bool,
}

/// Inputs the agent issued, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Press(Vec<Button>),
    ReleaseAll,
    Advance(u32),
}

struct LoadedFrame {
    grid: TileGrid,
    airborne: u8,
    jump_phase: u8,
    over: bool,
}

/// Plays a frame sequence back through the `Emulator` seam; `advance` moves
/// to the next frame.
pub struct ReplayEmulator {
    frames: Vec<LoadedFrame>,
    index: usize,
    exhausted: bool,
    flags: FlagConfig,
    journal: Vec<InputEvent>,
}

impl ReplayEmulator {
    pub fn new(frames: Vec<ReplayFrame>, flags: FlagConfig) -> Result<Self, ReplayError> {
        if frames.is_empty() {
            return Err(ReplayError::Empty);
        }
        let mut loaded = Vec::with_capacity(frames.len());
        for (index, frame) in frames.iter().enumerate() {
            let grid =
                TileGrid::from_rows(&frame.tiles).ok_or(ReplayError::BadFrame { index })?;
            loaded.push(LoadedFrame {
                grid,
                airborne: frame.airborne,
                jump_phase: frame.jump_phase,
                over: frame.over,
            });
        }
        debug!(frames = loaded.len(), "replay loaded");
        Ok(Self {
            frames: loaded,
            index: 0,
            exhausted: false,
            flags,
            journal: Vec::new(),
        })
    }

    pub fn journal(&self) -> &[InputEvent] {
        &self.journal
    }

    // Index stays in range: it only moves forward while a next frame exists.
    fn current(&self) -> &LoadedFrame {
        &self.frames[self.index]
    }
}

impl Emulator for ReplayEmulator {
    fn snapshot(&mut self) -> TileGrid {
        self.current().grid.clone()
    }

    fn read_flag(&mut self, address: u16) -> u8 {
        let frame = self.current();
        if address == self.flags.airborne_addr {
            frame.airborne
        } else if address == self.flags.jump_phase_addr {
            frame.jump_phase
        } else {
            0
        }
    }

    fn press(&mut self, buttons: &[Button]) {
        self.journal.push(InputEvent::Press(buttons.to_vec()));
    }

    fn release_all(&mut self) {
        self.journal.push(InputEvent::ReleaseAll);
    }

    fn advance(&mut self, ticks: u32) {
        self.journal.push(InputEvent::Advance(ticks));
        if self.index + 1 < self.frames.len() {
            self.index += 1;
        } else {
            self.exhausted = true;
        }
    }

    fn is_over(&mut self) -> bool {
        self.exhausted || self.current().over
    }
}

/// Reads a JSON array of frames from disk.
pub fn load_frames(path: impl AsRef<Path>) -> Result<Vec<ReplayFrame>, ReplayError> {
    let contents = fs::read_to_string(path)?;
    parse_frames(&contents)
}

pub fn parse_frames(json: &str) -> Result<Vec<ReplayFrame>, ReplayError> {
    let frames: Vec<ReplayFrame> = serde_json::from_str(json)?;
    for (index, frame) in frames.iter().enumerate() {
        if TileGrid::from_rows(&frame.tiles).is_none() {
            return Err(ReplayError::BadFrame { index });
        }
    }
    Ok(frames)
}

/// Built-in session: a floor with a raised ledge, a pit crossed by a leap, a
/// raised deck, and a hostile guarding the last stretch, recorded left to
/// right.
pub fn demo_frames() -> Vec<ReplayFrame> {
    let mut terrain = TileGrid::empty();
    for col in 0..=8 {
        terrain.set(14, col, 10);
        terrain.set(15, col, 10);
    }
    for col in 15..GRID_COLS {
        terrain.set(14, col, 10);
        terrain.set(15, col, 10);
    }
    terrain.set(13, 5, 12);
    terrain.set(13, 6, 12);
    for col in 11..=14 {
        terrain.set(12, col, 10);
    }
    terrain.set(13, 17, 15);

    // Feet positions with (airborne, jump_phase) per recorded step.
    let path: [((i32, i32), (u8, u8)); 18] = [
        ((13, 2), (0, 0)),
        ((13, 3), (0, 0)),
        ((13, 4), (0, 0)),
        ((12, 5), (0, 0)),
        ((12, 6), (0, 0)),
        ((13, 7), (0, 0)),
        ((13, 8), (0, 0)),
        ((12, 9), (1, 1)),
        ((11, 10), (1, 1)),
        ((11, 11), (0, 0)),
        ((11, 12), (0, 0)),
        ((11, 13), (0, 0)),
        ((11, 14), (0, 0)),
        ((12, 15), (1, 2)),
        ((13, 15), (0, 0)),
        ((13, 16), (0, 0)),
        ((12, 17), (1, 2)),
        ((13, 18), (0, 0)),
    ];

    let mut frames = Vec::with_capacity(path.len());
    for (step, ((row, col), (airborne, jump_phase))) in path.iter().enumerate() {
        let mut grid = terrain.clone();
        grid.set(*row, *col, AGENT_TILE);
        frames.push(ReplayFrame {
            tiles: grid.to_rows(),
            airborne: *airborne,
            jump_phase: *jump_phase,
            over: step + 1 == path.len(),
        });
    }
    frames
}
