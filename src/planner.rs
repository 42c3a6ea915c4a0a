//! Route selection over the traversal graph.
//!
//! Not a shortest-path search: link rewards grow with the destination column
//! and with riskier link kinds, so the planner greedily chases the rightmost
//! reachable terrain and settles for a partial route when the expansion
//! budget runs out. The graph is rebuilt every cycle, so a partial route is
//! cheap to correct one snapshot later.

use std::collections::HashSet;

use tracing::{trace, warn};

use crate::graph::{Link, LinkKind, TraversalGraph, link_weight};
use crate::types::Cell;

/// Upper bound on expansions per planning call.
pub const MAX_EXPANSIONS: usize = 50;

/// One waypoint of a planned route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub cell: Cell,
    /// Link used to arrive here; `None` for the starting cell.
    pub link: Option<Link>,
}

pub(crate) fn link_reward(kind: LinkKind, dest_col: i32) -> i32 {
    dest_col + link_weight(kind) * 2
}

pub struct RoutePlanner;

impl RoutePlanner {
    /// Expands the best-rewarded open cell once per round until the goal
    /// column is reached, nothing is left to open, or the expansion budget is
    /// spent. Returns the waypoints from `start` to the best cell found, or
    /// `None` when `start` has no node or the predecessor chain is broken.
    #[tracing::instrument(
        level = "trace",
        skip(graph),
        fields(start_row = start.row, start_col = start.col, goal_col)
    )]
    pub fn plan(graph: &mut TraversalGraph, start: Cell, goal_col: i32) -> Option<Vec<Step>> {
        if !graph.contains(&start) {
            trace!("start cell has no node");
            return None;
        }

        let mut visited: Vec<Cell> = vec![start];
        let mut visited_set: HashSet<Cell> = HashSet::from([start]);
        let mut current = start;

        if start.col >= goal_col {
            return Self::reconstruct(graph, start, current);
        }

        for round in 0..MAX_EXPANSIONS {
            let mut candidates: Vec<Cell> = Vec::new();

            for index in 0..visited.len() {
                let from = visited[index];
                let Some(node) = graph.node(&from) else { continue };
                let from_cost = node.cost;
                let links = node.links.clone();

                for link in links {
                    // Expanded cells keep the parent they were expanded
                    // with; only still-open destinations are relaxed.
                    if visited_set.contains(&link.to) {
                        continue;
                    }
                    let relaxed = from_cost + link_reward(link.kind, link.to.col);
                    if let Some(dest) = graph.node_mut(&link.to)
                        && relaxed >= dest.cost
                    {
                        dest.cost = relaxed;
                        dest.parent = Some(from);
                        dest.parent_link = Some(link);
                    }
                    candidates.push(link.to);
                }
            }

            let next = candidates
                .into_iter()
                .max_by_key(|cell| graph.node(cell).map(|n| n.cost).unwrap_or(i32::MIN));

            let Some(next) = next else {
                trace!(round, "nothing left to open");
                break;
            };

            visited.push(next);
            visited_set.insert(next);
            current = next;

            if next.col >= goal_col {
                trace!(round, expansions = visited.len() - 1, "goal column reached");
                break;
            }
        }

        Self::reconstruct(graph, start, current)
    }

    /// Walks parent links back from `terminal` to `start`.
    pub(crate) fn reconstruct(
        graph: &TraversalGraph,
        start: Cell,
        terminal: Cell,
    ) -> Option<Vec<Step>> {
        let mut steps = Vec::new();
        let mut seen: HashSet<Cell> = HashSet::new();
        let mut cursor = terminal;

        loop {
            if !seen.insert(cursor) {
                warn!(
                    row = cursor.row,
                    col = cursor.col,
                    "cycle in predecessor chain"
                );
                return None;
            }
            let node = graph.node(&cursor)?;
            steps.push(Step {
                cell: cursor,
                link: node.parent_link,
            });
            if cursor == start {
                break;
            }
            cursor = node.parent?;
        }

        steps.reverse();
        Some(steps)
    }
}

/// The immediate directive of a route: the link into its second waypoint.
pub fn first_link(path: &[Step]) -> Option<Link> {
    path.get(1).and_then(|step| step.link)
}
