//! # Occupancy Grid
//!
//! A dense 2D map of solid/open cells.
//!
//! ## Layout
//!
//! Cells are stored row-major (`index = y * width + x`), one byte per cell:
//! `0` = open, `1` = solid. The raw bytes are exposed so that two grids can be
//! compared bit-for-bit.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GridError, GridResult};

/// State of a single grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum CellState {
    /// Walkable floor.
    #[default]
    Open = 0,
    /// Wall, not walkable.
    Solid = 1,
}

impl CellState {
    /// Converts from the raw byte value.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidCell`] for anything other than 0 or 1.
    #[inline]
    pub const fn from_u8(value: u8) -> GridResult<Self> {
        match value {
            0 => Ok(Self::Open),
            1 => Ok(Self::Solid),
            _ => Err(GridError::InvalidCell { value }),
        }
    }

    /// Returns true for [`CellState::Solid`].
    #[inline]
    #[must_use]
    pub const fn is_solid(self) -> bool {
        matches!(self, Self::Solid)
    }

    const fn to_char(self) -> char {
        match self {
            Self::Open => '.',
            Self::Solid => '#',
        }
    }
}

/// Integer cell address.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Coord {
    /// Creates a new coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another coordinate.
    #[inline]
    #[must_use]
    pub const fn distance_squared(self, other: Self) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }

    /// The four edge-adjacent neighbors, in scan order (left, down, up, right).
    #[inline]
    #[must_use]
    pub const fn orthogonal_neighbors(self) -> [Self; 4] {
        [
            Self::new(self.x - 1, self.y),
            Self::new(self.x, self.y - 1),
            Self::new(self.x, self.y + 1),
            Self::new(self.x + 1, self.y),
        ]
    }
}

/// A dense, rectangular binary occupancy grid.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    /// One byte per cell, row-major.
    cells: Vec<u8>,
}

impl Grid {
    /// Creates a grid with every cell set to `state`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Empty`] if either dimension is zero.
    pub fn filled(width: usize, height: usize, state: CellState) -> GridResult<Self> {
        if width == 0 || height == 0 {
            return Err(GridError::Empty { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![state as u8; width * height],
        })
    }

    /// Creates a grid from rows of raw cell values. Row `i` becomes `y = i`.
    ///
    /// # Errors
    ///
    /// - [`GridError::Empty`] if there are no rows or the rows are empty
    /// - [`GridError::Ragged`] if rows differ in length
    /// - [`GridError::InvalidCell`] for values other than 0 and 1
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> GridResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        if width == 0 || height == 0 {
            return Err(GridError::Empty { width, height });
        }

        let mut cells = Vec::with_capacity(width * height);
        for (row_index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(GridError::Ragged {
                    row: row_index,
                    expected: width,
                    found: row.len(),
                });
            }
            for &value in row {
                cells.push(CellState::from_u8(value)? as u8);
            }
        }

        Ok(Self { width, height, cells })
    }

    /// Parses a map drawn with `#` (solid) and `.` (open), one line per row.
    ///
    /// Blank lines and surrounding whitespace are ignored.
    ///
    /// # Errors
    ///
    /// Same as [`Grid::from_rows`], plus [`GridError::InvalidChar`].
    pub fn from_ascii(text: &str) -> GridResult<Self> {
        let rows = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                line.chars()
                    .map(|c| match c {
                        '#' => Ok(1u8),
                        '.' => Ok(0u8),
                        other => Err(GridError::InvalidChar(other)),
                    })
                    .collect::<GridResult<Vec<u8>>>()
            })
            .collect::<GridResult<Vec<_>>>()?;
        Self::from_rows(&rows)
    }

    /// Grid width in cells.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: a grid has at least one cell.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns true if the coordinate lies inside the grid.
    #[inline]
    #[must_use]
    pub const fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    #[inline]
    const fn index(&self, x: i32, y: i32) -> usize {
        y as usize * self.width + x as usize
    }

    /// Gets the cell at `(x, y)`, or `None` outside the grid.
    #[inline]
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<CellState> {
        if self.in_bounds(x, y) {
            Some(if self.cells[self.index(x, y)] == 0 {
                CellState::Open
            } else {
                CellState::Solid
            })
        } else {
            None
        }
    }

    /// Gets the cell at a coordinate, or `None` outside the grid.
    #[inline]
    #[must_use]
    pub fn at(&self, coord: Coord) -> Option<CellState> {
        self.get(coord.x, coord.y)
    }

    /// Returns true if `(x, y)` is inside the grid and solid.
    #[inline]
    #[must_use]
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(CellState::is_solid)
    }

    /// Sets the cell at `(x, y)`. Writes outside the grid are ignored.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, state: CellState) {
        if self.in_bounds(x, y) {
            let index = self.index(x, y);
            self.cells[index] = state as u8;
        }
    }

    /// Returns true for cells on the outermost ring.
    #[inline]
    #[must_use]
    pub const fn is_edge(&self, x: i32, y: i32) -> bool {
        x == 0 || y == 0 || x as usize == self.width - 1 || y as usize == self.height - 1
    }

    /// Counts cells in the given state.
    #[must_use]
    pub fn count(&self, state: CellState) -> usize {
        let raw = state as u8;
        self.cells.iter().filter(|&&cell| cell == raw).count()
    }

    /// Iterates every coordinate, column by column (x outer, y inner).
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let (width, height) = (self.width as i32, self.height as i32);
        (0..width).flat_map(move |x| (0..height).map(move |y| Coord::new(x, y)))
    }

    /// Raw cell bytes, row-major (`0` open, `1` solid).
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.cells
    }

    /// Returns a copy embedded in a frame of `border` cells set to `frame`.
    #[must_use]
    pub fn padded(&self, border: usize, frame: CellState) -> Self {
        let width = self.width + border * 2;
        let height = self.height + border * 2;
        let mut cells = vec![frame as u8; width * height];

        for y in 0..self.height {
            let src = y * self.width;
            let dst = (y + border) * width + border;
            cells[dst..dst + self.width].copy_from_slice(&self.cells[src..src + self.width]);
        }

        Self { width, height, cells }
    }

    /// Renders the grid as `#`/`.` text, row `y = 0` first.
    #[must_use]
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.cells.chunks(self.width) {
            for &cell in row {
                out.push(if cell == 0 {
                    CellState::Open.to_char()
                } else {
                    CellState::Solid.to_char()
                });
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid {}x{}\n{}", self.width, self.height, self.to_ascii())
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_ascii())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_rejects_empty() {
        assert_eq!(
            Grid::filled(0, 5, CellState::Open),
            Err(GridError::Empty { width: 0, height: 5 })
        );
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let rows: Vec<Vec<u8>> = vec![vec![1, 1, 1], vec![1, 0]];
        assert_eq!(
            Grid::from_rows(&rows),
            Err(GridError::Ragged { row: 1, expected: 3, found: 2 })
        );
    }

    #[test]
    fn test_from_rows_rejects_bad_values() {
        let rows: Vec<Vec<u8>> = vec![vec![1, 2]];
        assert_eq!(Grid::from_rows(&rows), Err(GridError::InvalidCell { value: 2 }));
    }

    #[test]
    fn test_ascii_roundtrip_keeps_layout() {
        let text = "###\n#..\n###\n";
        let grid = Grid::from_ascii(text).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.get(1, 1), Some(CellState::Open));
        assert_eq!(grid.get(2, 1), Some(CellState::Open));
        assert_eq!(grid.get(0, 1), Some(CellState::Solid));
        assert_eq!(grid.to_ascii(), text);
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut grid = Grid::filled(2, 2, CellState::Open).unwrap();
        assert_eq!(grid.get(-1, 0), None);
        assert_eq!(grid.get(2, 0), None);
        assert!(!grid.is_solid(5, 5));
        grid.set(5, 5, CellState::Solid);
        assert_eq!(grid.count(CellState::Solid), 0);
    }

    #[test]
    fn test_padded_frames_the_interior() {
        let grid = Grid::from_ascii("..\n..").unwrap();
        let padded = grid.padded(2, CellState::Solid);
        assert_eq!(padded.width(), 6);
        assert_eq!(padded.height(), 6);
        assert_eq!(padded.count(CellState::Open), 4);
        for coord in padded.coords() {
            let inside = (2..4).contains(&coord.x) && (2..4).contains(&coord.y);
            assert_eq!(padded.at(coord) == Some(CellState::Open), inside, "at {coord:?}");
        }
    }

    #[test]
    fn test_coords_are_column_major() {
        let grid = Grid::filled(2, 3, CellState::Open).unwrap();
        let coords: Vec<Coord> = grid.coords().collect();
        assert_eq!(coords[0], Coord::new(0, 0));
        assert_eq!(coords[1], Coord::new(0, 1));
        assert_eq!(coords[3], Coord::new(1, 0));
        assert_eq!(coords.len(), 6);
    }

    #[test]
    fn test_distance_squared() {
        assert_eq!(Coord::new(0, 0).distance_squared(Coord::new(3, 4)), 25);
        assert_eq!(Coord::new(-2, 1).distance_squared(Coord::new(-2, 1)), 0);
    }
}
