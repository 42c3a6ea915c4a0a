//! Turns the pursued link into button presses, one decision at a time.
//!
//! Handlers are pure: every call re-derives its output from the cells and
//! flags it is given, so the controller carries no state between cycles
//! beyond the link the caller keeps feeding back in.

use tracing::debug;

use crate::config::NavConfig;
use crate::emulator::{Button, FlagState};
use crate::graph::{Link, LinkKind};
use crate::types::Cell;

/// Whether the pursued link still needs work or its target is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    Moving,
    Done,
}

fn step_toward(from_col: i32, to_col: i32) -> Option<Button> {
    if to_col > from_col {
        Some(Button::Right)
    } else if to_col < from_col {
        Some(Button::Left)
    } else {
        None
    }
}

pub struct Actuator;

impl Actuator {
    pub fn step(
        link: &Link,
        agent: Cell,
        enemy: Option<Cell>,
        flags: FlagState,
        nav: &NavConfig,
    ) -> (LinkStatus, Vec<Button>) {
        match link.kind {
            LinkKind::Walk => Self::walk(link.to, agent, enemy, nav),
            LinkKind::Fall => Self::fall(link.to, agent),
            LinkKind::Jump => Self::jump(link.to, agent, enemy, flags),
            LinkKind::LeapOfFaith => Self::leap(link.to, agent, enemy, flags),
        }
    }

    /// Done once the column matches; the row is the terrain's business.
    fn walk(
        target: Cell,
        agent: Cell,
        enemy: Option<Cell>,
        nav: &NavConfig,
    ) -> (LinkStatus, Vec<Button>) {
        if agent.col == target.col {
            return (LinkStatus::Done, Vec::new());
        }
        if let Some(enemy) = enemy.filter(|e| (e.col - agent.col).abs() <= nav.walk_band) {
            if enemy.row == agent.row {
                // In the lane: give ground rather than trade hits.
                let away = if enemy.col >= agent.col {
                    Button::Left
                } else {
                    Button::Right
                };
                return (LinkStatus::Moving, vec![away]);
            }
            // Close but off our row: stop walking and let the next plan
            // pick a jump-capable link instead.
            return (LinkStatus::Done, Vec::new());
        }
        match step_toward(agent.col, target.col) {
            Some(dir) => (LinkStatus::Moving, vec![dir]),
            None => (LinkStatus::Done, Vec::new()),
        }
    }

    fn fall(target: Cell, agent: Cell) -> (LinkStatus, Vec<Button>) {
        if agent == target {
            return (LinkStatus::Done, Vec::new());
        }
        if agent.col == target.col {
            // Straight over the landing cell: push down to drop.
            return (LinkStatus::Moving, vec![Button::Down]);
        }
        match step_toward(agent.col, target.col) {
            Some(dir) => (LinkStatus::Moving, vec![dir]),
            None => (LinkStatus::Moving, Vec::new()),
        }
    }

    fn jump(
        target: Cell,
        agent: Cell,
        enemy: Option<Cell>,
        flags: FlagState,
    ) -> (LinkStatus, Vec<Button>) {
        if agent == target {
            return (LinkStatus::Done, Vec::new());
        }
        if let Some(threat) = Self::adjacent_threat(agent, enemy) {
            return Self::engage_adjacent(agent, threat);
        }
        let mut buttons = Vec::new();
        if let Some(dir) = step_toward(agent.col, target.col) {
            buttons.push(dir);
        }
        if agent.row > target.row && (flags.grounded || !flags.descending) {
            buttons.push(Button::A);
        }
        (LinkStatus::Moving, buttons)
    }

    /// As jump, but committed: the attack button is held through the whole
    /// approach and the jump button until the agent clears the target row.
    fn leap(
        target: Cell,
        agent: Cell,
        enemy: Option<Cell>,
        flags: FlagState,
    ) -> (LinkStatus, Vec<Button>) {
        if agent == target {
            return (LinkStatus::Done, Vec::new());
        }
        if let Some(threat) = Self::adjacent_threat(agent, enemy) {
            return Self::engage_adjacent(agent, threat);
        }
        let mut buttons = Vec::new();
        if let Some(dir) = step_toward(agent.col, target.col) {
            buttons.push(dir);
        }
        buttons.push(Button::B);
        if agent.row >= target.row && (flags.grounded || !flags.descending) {
            buttons.push(Button::A);
        }
        (LinkStatus::Moving, buttons)
    }

    /// An enemy within one cell in any direction forces a reaction, grounded
    /// or not.
    fn adjacent_threat(agent: Cell, enemy: Option<Cell>) -> Option<Cell> {
        enemy.filter(|e| agent.chebyshev(e) <= 1)
    }

    fn engage_adjacent(agent: Cell, enemy: Cell) -> (LinkStatus, Vec<Button>) {
        if agent.row >= enemy.row {
            // Level with the enemy or under it: back off airborne.
            let away = if enemy.col >= agent.col {
                Button::Left
            } else {
                Button::Right
            };
            debug!(
                enemy_row = enemy.row,
                enemy_col = enemy.col,
                "dodging adjacent enemy"
            );
            return (LinkStatus::Moving, vec![away, Button::A]);
        }
        if agent.col == enemy.col {
            // Right above it: drop onto it.
            return (LinkStatus::Moving, vec![Button::Down, Button::B]);
        }
        let toward = if enemy.col > agent.col {
            Button::Right
        } else {
            Button::Left
        };
        (LinkStatus::Moving, vec![toward, Button::B])
    }
}
