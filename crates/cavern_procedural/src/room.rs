//! # Room Graph
//!
//! Rooms are the open regions that survive pruning. They live in an arena
//! owned by [`RoomGraph`] and refer to each other by [`RoomId`].
//!
//! ## Connectivity
//!
//! Linking happens in two phases:
//!
//! 1. Every room that has no link yet is joined to its nearest room.
//! 2. While some rooms are unreachable from the main room, the closest pair
//!    straddling the reachable/unreachable split is joined.
//!
//! Distances are squared Euclidean distances between edge tiles. Ties go to
//! the first pair found in room order, then tile order.

use std::cmp::Reverse;
use std::collections::BTreeSet;
use std::fmt;

use cavern_shared::{Coord, Grid};

use crate::error::{CaveError, CaveResult};
use crate::region::Region;

/// Index of a room inside its [`RoomGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoomId(pub usize);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "room#{}", self.0)
    }
}

/// A surviving open region.
#[derive(Clone, Debug)]
pub struct Room {
    id: RoomId,
    tiles: Vec<Coord>,
    edge_tiles: Vec<Coord>,
    connected: BTreeSet<RoomId>,
    is_main: bool,
    is_accessible: bool,
}

impl Room {
    fn new(id: RoomId, tiles: Vec<Coord>, grid: &Grid) -> Self {
        let edge_tiles = tiles
            .iter()
            .copied()
            .filter(|tile| {
                tile.orthogonal_neighbors()
                    .iter()
                    .any(|n| grid.is_solid(n.x, n.y))
            })
            .collect();

        Self {
            id,
            tiles,
            edge_tiles,
            connected: BTreeSet::new(),
            is_main: false,
            is_accessible: false,
        }
    }

    /// This room's id.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> RoomId {
        self.id
    }

    /// Every tile of the room.
    #[inline]
    #[must_use]
    pub fn tiles(&self) -> &[Coord] {
        &self.tiles
    }

    /// Tiles with at least one solid orthogonal neighbor, each listed once.
    #[inline]
    #[must_use]
    pub fn edge_tiles(&self) -> &[Coord] {
        &self.edge_tiles
    }

    /// Tile count.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.tiles.len()
    }

    /// Rooms joined to this one by a passage.
    #[must_use]
    pub fn connected(&self) -> impl Iterator<Item = RoomId> + '_ {
        self.connected.iter().copied()
    }

    /// Returns true if a passage joins this room to `other`.
    #[inline]
    #[must_use]
    pub fn is_connected(&self, other: RoomId) -> bool {
        self.connected.contains(&other)
    }

    /// Returns true for the largest room.
    #[inline]
    #[must_use]
    pub const fn is_main(&self) -> bool {
        self.is_main
    }

    /// Returns true if the main room can reach this one through passages.
    #[inline]
    #[must_use]
    pub const fn is_accessible(&self) -> bool {
        self.is_accessible
    }
}

/// A planned passage between two rooms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoomLink {
    /// Room the passage starts in.
    pub from_room: RoomId,
    /// Room the passage ends in.
    pub to_room: RoomId,
    /// Edge tile of `from_room`.
    pub from: Coord,
    /// Edge tile of `to_room`.
    pub to: Coord,
    /// Squared distance between the two tiles.
    pub distance_squared: i64,
}

/// Arena of rooms plus their passage graph.
#[derive(Clone, Debug)]
pub struct RoomGraph {
    rooms: Vec<Room>,
}

impl RoomGraph {
    /// Builds rooms from open regions of `grid`.
    ///
    /// Rooms are ordered by size, largest first; equal sizes keep region
    /// order. The first room becomes the main room. Returns `None` when
    /// there are no regions.
    #[must_use]
    pub fn from_regions(mut regions: Vec<Region>, grid: &Grid) -> Option<Self> {
        regions.sort_by_key(|region| Reverse(region.len()));

        let mut rooms: Vec<Room> = regions
            .into_iter()
            .enumerate()
            .map(|(index, region)| Room::new(RoomId(index), region.tiles, grid))
            .collect();

        let main = rooms.first_mut()?;
        main.is_main = true;
        main.is_accessible = true;

        Some(Self { rooms })
    }

    /// All rooms, main room first.
    #[inline]
    #[must_use]
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Looks up a room.
    #[inline]
    #[must_use]
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.0)
    }

    /// The largest room. `None` only for an empty graph.
    #[must_use]
    pub fn main_room(&self) -> Option<&Room> {
        self.rooms.first()
    }

    /// Number of rooms.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Always false: a graph holds at least the main room.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Returns true once every room is reachable from the main room.
    #[must_use]
    pub fn all_accessible(&self) -> bool {
        self.rooms.iter().all(Room::is_accessible)
    }

    /// Ids of rooms the main room cannot reach.
    #[must_use]
    pub fn inaccessible(&self) -> Vec<RoomId> {
        self.rooms
            .iter()
            .filter(|room| !room.is_accessible)
            .map(Room::id)
            .collect()
    }

    /// Records a passage between `a` and `b` and spreads accessibility.
    ///
    /// Returns false, leaving the graph untouched, when `a == b` or either
    /// id is not in the graph.
    pub fn connect(&mut self, a: RoomId, b: RoomId) -> bool {
        if a == b || a.0 >= self.rooms.len() || b.0 >= self.rooms.len() {
            return false;
        }

        self.rooms[a.0].connected.insert(b);
        self.rooms[b.0].connected.insert(a);

        if self.rooms[a.0].is_accessible || self.rooms[b.0].is_accessible {
            self.mark_accessible(a);
        }
        true
    }

    /// Marks `start` and everything linked to it as accessible.
    fn mark_accessible(&mut self, start: RoomId) {
        let mut worklist = vec![start];
        while let Some(id) = worklist.pop() {
            let was_accessible = std::mem::replace(&mut self.rooms[id.0].is_accessible, true);
            if was_accessible && id != start {
                continue;
            }
            let room = &self.rooms[id.0];
            worklist.extend(
                room.connected
                    .iter()
                    .copied()
                    .filter(|&next| !self.rooms[next.0].is_accessible),
            );
        }
    }

    /// Finds the closest edge-tile pair with one room from each side.
    ///
    /// Pairs where both sides are the same room, or the rooms are already
    /// linked, are skipped. Returns `None` when no candidate pair exists.
    #[must_use]
    pub fn closest_pair(&self, from: &[RoomId], to: &[RoomId]) -> Option<RoomLink> {
        let mut best: Option<RoomLink> = None;

        for &a in from {
            for &b in to {
                if let Some(link) = self.closest_between(a, b) {
                    if best.map_or(true, |best| link.distance_squared < best.distance_squared) {
                        best = Some(link);
                    }
                }
            }
        }

        best
    }

    fn closest_between(&self, a: RoomId, b: RoomId) -> Option<RoomLink> {
        let (room_a, room_b) = (self.room(a)?, self.room(b)?);
        if a == b || room_a.is_connected(b) {
            return None;
        }

        let mut best: Option<RoomLink> = None;
        for &from in &room_a.edge_tiles {
            for &to in &room_b.edge_tiles {
                let distance_squared = from.distance_squared(to);
                if best.map_or(true, |best| distance_squared < best.distance_squared) {
                    best = Some(RoomLink {
                        from_room: a,
                        to_room: b,
                        from,
                        to,
                        distance_squared,
                    });
                }
            }
        }
        best
    }

    /// Links every room to the main room and returns the passages to carve,
    /// in carving order.
    ///
    /// # Errors
    ///
    /// Returns [`CaveError::UnreachableRoom`] if some rooms stay unreachable
    /// and no candidate pair is left to join them.
    pub fn plan_passages(&mut self) -> CaveResult<Vec<RoomLink>> {
        let mut links = Vec::new();
        let all: Vec<RoomId> = self.rooms.iter().map(Room::id).collect();

        for &id in &all {
            if !self.rooms[id.0].connected.is_empty() {
                continue;
            }
            if let Some(link) = self.closest_pair(&[id], &all) {
                let linked = self.connect(link.from_room, link.to_room);
                debug_assert!(linked, "closest pair must join two distinct rooms");
                links.push(link);
            }
        }

        loop {
            let (reachable, unreachable): (Vec<RoomId>, Vec<RoomId>) =
                all.iter().copied().partition(|id| self.rooms[id.0].is_accessible);
            if unreachable.is_empty() {
                break;
            }

            match self.closest_pair(&unreachable, &reachable) {
                Some(link) => {
                    let linked = self.connect(link.from_room, link.to_room);
                    debug_assert!(linked, "closest pair must join two distinct rooms");
                    links.push(link);
                }
                None => return Err(CaveError::UnreachableRoom { rooms: unreachable }),
            }
        }

        Ok(links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::RegionScanner;
    use cavern_shared::CellState;

    fn carve_rect(grid: &mut Grid, x0: i32, y0: i32, w: i32, h: i32) {
        for x in x0..x0 + w {
            for y in y0..y0 + h {
                grid.set(x, y, CellState::Open);
            }
        }
    }

    fn graph_for(grid: &Grid) -> RoomGraph {
        let regions = RegionScanner::new().scan(grid, CellState::Open);
        RoomGraph::from_regions(regions, grid).unwrap()
    }

    #[test]
    fn test_largest_room_is_main() {
        let mut grid = Grid::filled(20, 10, CellState::Solid).unwrap();
        carve_rect(&mut grid, 1, 1, 2, 2);
        carve_rect(&mut grid, 10, 1, 5, 5);

        let graph = graph_for(&grid);
        assert_eq!(graph.len(), 2);
        assert!(graph.main_room().unwrap().is_main());
        assert!(graph.main_room().unwrap().is_accessible());
        assert_eq!(graph.main_room().unwrap().size(), 25);
        assert!(!graph.rooms()[1].is_accessible());
    }

    #[test]
    fn test_no_regions_gives_no_graph() {
        let grid = Grid::filled(5, 5, CellState::Solid).unwrap();
        assert!(RoomGraph::from_regions(Vec::new(), &grid).is_none());
    }

    #[test]
    fn test_edge_tiles_listed_once() {
        let mut grid = Grid::filled(7, 7, CellState::Solid).unwrap();
        carve_rect(&mut grid, 1, 1, 5, 5);

        let graph = graph_for(&grid);
        let room = graph.main_room().unwrap();
        assert_eq!(room.edge_tiles().len(), 16);

        let unique: BTreeSet<(i32, i32)> = room.edge_tiles().iter().map(|c| (c.x, c.y)).collect();
        assert_eq!(unique.len(), room.edge_tiles().len());
    }

    #[test]
    fn test_two_isolated_rooms_get_one_passage() {
        let mut grid = Grid::filled(20, 20, CellState::Solid).unwrap();
        carve_rect(&mut grid, 2, 2, 3, 3);
        carve_rect(&mut grid, 14, 13, 3, 3);

        let mut graph = graph_for(&grid);
        let links = graph.plan_passages().unwrap();

        assert_eq!(links.len(), 1);
        assert!(graph.all_accessible());
        assert!(graph.rooms()[0].is_connected(RoomId(1)));
        assert_eq!(links[0].from, Coord::new(4, 4));
        assert_eq!(links[0].to, Coord::new(14, 13));
    }

    #[test]
    fn test_clusters_are_bridged_in_second_phase() {
        let mut grid = Grid::filled(30, 8, CellState::Solid).unwrap();
        carve_rect(&mut grid, 1, 1, 4, 3); // 12 tiles, main
        carve_rect(&mut grid, 7, 1, 2, 2);
        carve_rect(&mut grid, 19, 1, 3, 3);
        carve_rect(&mut grid, 24, 1, 2, 2);

        let mut graph = graph_for(&grid);
        let links = graph.plan_passages().unwrap();

        assert_eq!(links.len(), 3);
        assert!(graph.all_accessible());
        // The last link crosses the gap between the clusters.
        let bridge = links[2];
        assert_eq!(bridge.distance_squared, 121);
        assert_eq!(bridge.from, Coord::new(19, 1));
        assert_eq!(bridge.to, Coord::new(8, 1));
    }

    #[test]
    fn test_accessibility_propagates_transitively() {
        let mut grid = Grid::filled(30, 5, CellState::Solid).unwrap();
        carve_rect(&mut grid, 1, 1, 5, 3);
        carve_rect(&mut grid, 10, 1, 2, 2);
        carve_rect(&mut grid, 15, 1, 2, 2);
        carve_rect(&mut grid, 20, 1, 2, 2);

        let mut graph = graph_for(&grid);
        graph.connect(RoomId(2), RoomId(3));
        graph.connect(RoomId(1), RoomId(2));
        assert_eq!(graph.inaccessible().len(), 3);

        graph.connect(RoomId(0), RoomId(1));
        assert!(graph.all_accessible());
    }

    #[test]
    fn test_connect_rejects_self_and_unknown_ids() {
        let mut grid = Grid::filled(20, 5, CellState::Solid).unwrap();
        carve_rect(&mut grid, 1, 1, 3, 3);
        carve_rect(&mut grid, 10, 1, 2, 2);

        let mut graph = graph_for(&grid);
        assert!(!graph.connect(RoomId(1), RoomId(1)));
        assert!(!graph.connect(RoomId(1), RoomId(7)));
        assert!(!graph.connect(RoomId(9), RoomId(0)));
        assert_eq!(graph.room(RoomId(1)).unwrap().connected().count(), 0);
        assert!(!graph.all_accessible());

        assert!(graph.connect(RoomId(1), RoomId(0)));
        assert!(graph.all_accessible());
    }

    #[test]
    fn test_unreachable_rooms_are_reported() {
        // Rooms without any solid neighbor have no edge tiles to link.
        let grid = Grid::filled(6, 6, CellState::Open).unwrap();
        let regions = vec![
            Region {
                state: CellState::Open,
                tiles: vec![Coord::new(1, 1), Coord::new(1, 2)],
            },
            Region {
                state: CellState::Open,
                tiles: vec![Coord::new(4, 4)],
            },
        ];

        let mut graph = RoomGraph::from_regions(regions, &grid).unwrap();
        assert_eq!(
            graph.plan_passages(),
            Err(CaveError::UnreachableRoom { rooms: vec![RoomId(1)] })
        );
    }
}
