//! # Region Analysis
//!
//! 4-connected flood fill over a [`Grid`].
//!
//! A [`RegionScanner`] owns a single visited buffer for a whole sweep, so
//! partitioning a grid costs one allocation no matter how many regions it
//! contains.

use std::collections::VecDeque;

use cavern_shared::{CellState, Coord, Grid};

/// A maximal 4-connected set of same-state cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Region {
    /// State shared by every tile.
    pub state: CellState,
    /// Tiles in flood-fill order, starting at the discovery cell.
    pub tiles: Vec<Coord>,
}

impl Region {
    /// Number of tiles.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always false for regions produced by a scan.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// Reusable flood-fill state.
#[derive(Debug, Default)]
pub struct RegionScanner {
    visited: Vec<bool>,
    frontier: VecDeque<Coord>,
}

impl RegionScanner {
    /// Creates an empty scanner. Buffers grow on first use.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Partitions every cell in `state` into regions.
    ///
    /// Regions are returned in discovery order (cells scanned column by
    /// column, x outer, y inner).
    pub fn scan(&mut self, grid: &Grid, state: CellState) -> Vec<Region> {
        self.visited.clear();
        self.visited.resize(grid.len(), false);

        let mut regions = Vec::new();
        for coord in grid.coords() {
            if grid.at(coord) == Some(state) && !self.visited[Self::slot(grid, coord)] {
                regions.push(self.flood(grid, coord, state));
            }
        }
        regions
    }

    /// Breadth-first fill from `start`. Cells are marked when queued.
    fn flood(&mut self, grid: &Grid, start: Coord, state: CellState) -> Region {
        let mut tiles = Vec::new();
        self.frontier.clear();
        self.frontier.push_back(start);
        self.visited[Self::slot(grid, start)] = true;

        while let Some(tile) = self.frontier.pop_front() {
            tiles.push(tile);
            for next in tile.orthogonal_neighbors() {
                if grid.at(next) != Some(state) {
                    continue;
                }
                let slot = Self::slot(grid, next);
                if !self.visited[slot] {
                    self.visited[slot] = true;
                    self.frontier.push_back(next);
                }
            }
        }

        Region { state, tiles }
    }

    /// Visited-buffer index. Only called for in-bounds coordinates.
    #[inline]
    fn slot(grid: &Grid, coord: Coord) -> usize {
        coord.y as usize * grid.width() + coord.x as usize
    }
}
