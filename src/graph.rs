//! Traversability graph over one tile-grid snapshot.
//!
//! Nodes are standable cells, links are typed moves between them. The graph
//! is rebuilt from scratch every decision cycle; nothing in it survives
//! between snapshots.

use std::collections::HashMap;

use tracing::debug;

use crate::config::NavConfig;
use crate::grid::{GRID_COLS, GRID_ROWS, TileGrid};
use crate::types::Cell;

/// How a link is traversed; each kind has its own actuation behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    Walk,
    Fall,
    Jump,
    LeapOfFaith,
}

/// Planner weight per kind, ordered by risk: falling is free, committing to
/// a leap pays the most. Kept as an explicit mapping so reordering the enum
/// variants cannot silently change route scoring.
pub fn link_weight(kind: LinkKind) -> i32 {
    match kind {
        LinkKind::Fall => 0,
        LinkKind::Walk => 1,
        LinkKind::Jump => 2,
        LinkKind::LeapOfFaith => 3,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub from: Cell,
    pub to: Cell,
    pub kind: LinkKind,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Node {
    pub links: Vec<Link>,
    pub cost: i32,
    pub parent: Option<Cell>,
    pub parent_link: Option<Link>,
}

/// Jump rule: up to this many rows straight up, drifting one column.
const JUMP_ROWS: i32 = 4;
/// Leap rule window: rows either way (zero excluded) and columns either way.
const LEAP_ROWS: i32 = 2;
const LEAP_COLS: i32 = 4;

/// Solid cell with enough clear rows above it to hold the agent.
pub fn is_standable(grid: &TileGrid, cell: Cell, headroom: i32) -> bool {
    grid.is_solid_at(cell.row, cell.col) && is_clear_above(grid, cell, headroom)
}

/// The headroom half of the standable test; rows above the grid top count as
/// clear.
pub fn is_clear_above(grid: &TileGrid, cell: Cell, headroom: i32) -> bool {
    (1..=headroom).all(|d| !grid.is_solid_at(cell.row - d, cell.col))
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TraversalGraph {
    nodes: HashMap<Cell, Node>,
}

impl TraversalGraph {
    /// Evaluates every link rule for every standable cell of the snapshot.
    /// Link destinations that have no node yet get one on demand, so cells
    /// reached only by falling still end up in the graph.
    pub fn build(grid: &TileGrid, nav: &NavConfig) -> Self {
        let mut graph = TraversalGraph::default();
        for row in 0..GRID_ROWS {
            for col in 0..GRID_COLS {
                let cell = Cell::new(row, col);
                if !is_standable(grid, cell, nav.headroom) {
                    continue;
                }
                graph.ensure_node(cell);
                graph.link_walk(grid, cell, nav);
                graph.link_fall(grid, cell);
                graph.link_jump(grid, cell, nav);
                graph.link_leap(grid, cell, nav);
            }
        }
        debug!(nodes = graph.nodes.len(), "traversal graph rebuilt");
        graph
    }

    pub fn node(&self, cell: &Cell) -> Option<&Node> {
        self.nodes.get(cell)
    }

    pub(crate) fn node_mut(&mut self, cell: &Cell) -> Option<&mut Node> {
        self.nodes.get_mut(cell)
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        self.nodes.contains_key(cell)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.nodes.keys()
    }

    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.nodes.values().flat_map(|node| node.links.iter())
    }

    pub(crate) fn ensure_node(&mut self, cell: Cell) {
        self.nodes.entry(cell).or_default();
    }

    fn add_link(&mut self, from: Cell, to: Cell, kind: LinkKind) {
        self.ensure_node(to);
        if let Some(node) = self.nodes.get_mut(&from) {
            node.links.push(Link { from, to, kind });
        }
    }

    /// Same-row neighbors that are standable themselves.
    fn link_walk(&mut self, grid: &TileGrid, from: Cell, nav: &NavConfig) {
        for dc in [-1, 1] {
            let dest = Cell::new(from.row, from.col + dc);
            if is_standable(grid, dest, nav.headroom) {
                self.add_link(from, dest, LinkKind::Walk);
            }
        }
    }

    /// Step one column aside into open space, then land on the first solid
    /// cell straight below. No solid cell before the grid bottom means no
    /// link: that side is a pit.
    fn link_fall(&mut self, grid: &TileGrid, from: Cell) {
        for dc in [-1, 1] {
            let col = from.col + dc;
            if !TileGrid::in_bounds(from.row, col) || grid.is_solid_at(from.row, col) {
                continue;
            }
            for row in from.row + 1..GRID_ROWS {
                if grid.is_solid_at(row, col) {
                    self.add_link(from, Cell::new(row, col), LinkKind::Fall);
                    break;
                }
            }
        }
    }

    /// Rise up to `JUMP_ROWS` with one column of drift. The agent travels its
    /// own column first, so the source column must be clear at the
    /// destination height.
    fn link_jump(&mut self, grid: &TileGrid, from: Cell, nav: &NavConfig) {
        for dr in 1..=JUMP_ROWS {
            for dc in [-1, 1] {
                let dest = Cell::new(from.row - dr, from.col + dc);
                if !is_standable(grid, dest, nav.headroom) {
                    continue;
                }
                if !is_clear_above(grid, Cell::new(from.row - dr, from.col), nav.headroom) {
                    continue;
                }
                self.add_link(from, dest, LinkKind::Jump);
            }
        }
    }

    /// Long committed moves across the wider window. Same-row cells are left
    /// to the walk and fall rules; a leap always changes elevation.
    fn link_leap(&mut self, grid: &TileGrid, from: Cell, nav: &NavConfig) {
        for dr in -LEAP_ROWS..=LEAP_ROWS {
            if dr == 0 {
                continue;
            }
            for dc in -LEAP_COLS..=LEAP_COLS {
                let dest = Cell::new(from.row + dr, from.col + dc);
                if !is_standable(grid, dest, nav.headroom) {
                    continue;
                }
                if !is_clear_above(grid, dest, nav.headroom) {
                    continue;
                }
                self.add_link(from, dest, LinkKind::LeapOfFaith);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_span(grid: &mut TileGrid, row: i32, cols: std::ops::RangeInclusive<i32>) {
        for col in cols {
            grid.set(row, col, 10);
        }
    }

    fn links_from(graph: &TraversalGraph, cell: Cell) -> Vec<Link> {
        graph.node(&cell).map(|n| n.links.clone()).unwrap_or_default()
    }

    #[test]
    fn test_flat_platform_builds_walk_links_only() {
        let mut grid = TileGrid::empty();
        solid_span(&mut grid, 10, 5..=7);
        let graph = TraversalGraph::build(&grid, &NavConfig::default());

        assert_eq!(graph.len(), 3);
        for col in 5..=7 {
            assert!(graph.contains(&Cell::new(10, col)));
        }
        assert!(graph.links().all(|link| link.kind == LinkKind::Walk));
        assert_eq!(links_from(&graph, Cell::new(10, 5)).len(), 1);
        assert_eq!(links_from(&graph, Cell::new(10, 6)).len(), 2);
        assert_eq!(links_from(&graph, Cell::new(10, 7)).len(), 1);
    }

    #[test]
    fn test_fall_lands_on_first_solid_cell() {
        let mut grid = TileGrid::empty();
        grid.set(10, 5, 10);
        solid_span(&mut grid, 12, 6..=9);
        grid.set(14, 6, 10);
        let graph = TraversalGraph::build(&grid, &NavConfig::default());

        let falls: Vec<Link> = links_from(&graph, Cell::new(10, 5))
            .into_iter()
            .filter(|l| l.kind == LinkKind::Fall)
            .collect();
        assert_eq!(falls.len(), 1, "left side is a pit, right side lands");
        assert_eq!(falls[0].to, Cell::new(12, 6));
        // The deeper slab is shadowed by the deck above it.
        assert!(!graph.contains(&Cell::new(14, 6)));
    }

    #[test]
    fn test_jump_requires_clear_source_column() {
        let mut grid = TileGrid::empty();
        grid.set(10, 5, 10);
        grid.set(8, 6, 10);
        let graph = TraversalGraph::build(&grid, &NavConfig::default());
        assert!(
            links_from(&graph, Cell::new(10, 5))
                .iter()
                .any(|l| l.kind == LinkKind::Jump && l.to == Cell::new(8, 6))
        );

        // A block over the source column at the destination height blocks
        // the rise, even though the destination itself stays standable.
        let mut blocked = grid.clone();
        blocked.set(7, 5, 10);
        let graph = TraversalGraph::build(&blocked, &NavConfig::default());
        assert!(
            !links_from(&graph, Cell::new(10, 5))
                .iter()
                .any(|l| l.kind == LinkKind::Jump)
        );
    }

    #[test]
    fn test_leap_links_change_elevation() {
        let mut grid = TileGrid::empty();
        solid_span(&mut grid, 10, 5..=9);
        let graph = TraversalGraph::build(&grid, &NavConfig::default());
        assert!(
            graph.links().all(|l| l.kind != LinkKind::LeapOfFaith),
            "flat terrain leaps nowhere"
        );

        grid.set(8, 8, 10);
        let graph = TraversalGraph::build(&grid, &NavConfig::default());
        assert!(
            links_from(&graph, Cell::new(10, 5))
                .iter()
                .any(|l| l.kind == LinkKind::LeapOfFaith && l.to == Cell::new(8, 8))
        );
        assert!(
            links_from(&graph, Cell::new(8, 8))
                .iter()
                .any(|l| l.kind == LinkKind::LeapOfFaith && l.to == Cell::new(10, 5))
        );
    }

    #[test]
    fn test_every_link_satisfies_its_rule() {
        let nav = NavConfig::default();
        let mut grid = TileGrid::empty();
        solid_span(&mut grid, 14, 0..=9);
        solid_span(&mut grid, 15, 0..=9);
        solid_span(&mut grid, 12, 3..=4);
        grid.set(10, 7, 10);
        solid_span(&mut grid, 13, 14..=17);
        let graph = TraversalGraph::build(&grid, &nav);

        assert!(!graph.is_empty());
        for link in graph.links() {
            match link.kind {
                LinkKind::Walk | LinkKind::Jump | LinkKind::LeapOfFaith => {
                    assert!(
                        is_standable(&grid, link.to, nav.headroom),
                        "{:?} target {:?} must be standable",
                        link.kind,
                        link.to
                    );
                }
                LinkKind::Fall => {
                    assert_eq!((link.to.col - link.from.col).abs(), 1);
                    assert!(grid.is_solid_at(link.to.row, link.to.col));
                    for row in link.from.row..link.to.row {
                        assert!(
                            !grid.is_solid_at(row, link.to.col),
                            "fall column must be open down to the landing"
                        );
                    }
                }
            }
            assert!(graph.contains(&link.to), "every link target has a node");
        }
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let mut grid = TileGrid::empty();
        solid_span(&mut grid, 14, 0..=19);
        solid_span(&mut grid, 11, 4..=8);
        grid.set(9, 10, 10);
        let nav = NavConfig::default();
        assert_eq!(
            TraversalGraph::build(&grid, &nav),
            TraversalGraph::build(&grid, &nav)
        );
    }

    #[test]
    fn test_headroom_is_vacuous_at_the_top() {
        let mut grid = TileGrid::empty();
        grid.set(0, 3, 10);
        assert!(is_standable(&grid, Cell::new(0, 3), 2));

        grid.set(1, 3, 10);
        assert!(!is_standable(&grid, Cell::new(1, 3), 2));
        assert!(is_clear_above(&grid, Cell::new(3, 3), 1));
        assert!(!is_clear_above(&grid, Cell::new(2, 3), 1));
    }

    #[test]
    fn test_buried_cells_get_no_node() {
        let mut grid = TileGrid::empty();
        solid_span(&mut grid, 14, 0..=19);
        solid_span(&mut grid, 15, 0..=19);
        let graph = TraversalGraph::build(&grid, &NavConfig::default());
        assert_eq!(graph.len(), 20);
        assert!(graph.cells().all(|cell| cell.row == 14));
    }
}
