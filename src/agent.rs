use tracing::debug;

use crate::actuation::{Actuator, LinkStatus};
use crate::config::BotConfig;
use crate::emulator::{Button, Emulator, FlagState};
use crate::enemy::EnemyLocator;
use crate::graph::{Link, TraversalGraph};
use crate::planner::{RoutePlanner, first_link};

/// One full decision cycle per call: snapshot, rebuild, plan, actuate.
pub struct Agent {
    config: BotConfig,
}

impl Agent {
    pub fn new(config: BotConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    /// Runs a single decision cycle against the emulator.
    ///
    /// A fresh route's first link supersedes `previous`; with no fresh route
    /// the previous link is pursued instead, and with nothing at all the
    /// agent just keeps pushing right. Returns the link still being pursued
    /// after this cycle, or `None` once it finished, so the caller can feed
    /// the result straight back in.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn decide_and_act<E: Emulator>(
        &self,
        emulator: &mut E,
        previous: Option<Link>,
    ) -> Option<Link> {
        let grid = emulator.snapshot();
        let nav = &self.config.nav;

        let mut graph = TraversalGraph::build(&grid, nav);
        let support = grid.agent_support_cell();
        let planned = support
            .and_then(|start| RoutePlanner::plan(&mut graph, start, nav.goal_col))
            .as_deref()
            .and_then(first_link);

        let pursued = planned.or(previous);
        let (Some(agent_cell), Some(link)) = (support, pursued) else {
            debug!("nothing to pursue, holding forward");
            self.act(emulator, &[Button::Right]);
            return None;
        };

        let enemy = EnemyLocator::nearest(&grid, agent_cell, nav);
        let flags = FlagState::read(emulator, &self.config.flags);
        let (status, buttons) = Actuator::step(&link, agent_cell, enemy, flags, nav);
        debug!(?status, ?buttons, kind = ?link.kind, "actuating");
        self.act(emulator, &buttons);

        match status {
            LinkStatus::Done => None,
            LinkStatus::Moving => Some(link),
        }
    }

    /// Press, hold for the configured tick budget, release.
    fn act<E: Emulator>(&self, emulator: &mut E, buttons: &[Button]) {
        if !buttons.is_empty() {
            emulator.press(buttons);
        }
        emulator.advance(self.config.act_frequency);
        emulator.release_all();
    }
}
