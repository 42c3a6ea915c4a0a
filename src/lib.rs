pub mod actuation;
pub mod agent;
pub mod config;
pub mod emulator;
pub mod enemy;
pub mod game;
pub mod graph;
pub mod grid;
pub mod observer;
pub mod planner;
pub mod replay;
pub mod types;

// Re-export commonly used types for convenience
pub use actuation::{Actuator, LinkStatus};
pub use agent::Agent;
pub use config::{BotConfig, FlagConfig, NavConfig};
pub use emulator::{Button, Emulator, FlagState};
pub use enemy::EnemyLocator;
pub use game::{Game, RunStats};
pub use graph::{Link, LinkKind, TraversalGraph};
pub use grid::TileGrid;
pub use observer::{AgentObserver, DefaultObserver};
pub use planner::{RoutePlanner, Step, first_link};
pub use replay::{ReplayEmulator, ReplayFrame};
pub use types::Cell;
