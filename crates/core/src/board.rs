//! Board module - manages the game grid
//!
//! The board is a 10x22 grid where each cell can be empty or filled with a piece kind.
//! Rows 0-1 are hidden spawn headroom; rows 2-21 are visible.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..21 (top to bottom)

use crate::pieces::ActivePiece;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// The game board using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and empty
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// True iff every mino of `piece` is inside the grid and on an empty cell.
    pub fn can_place(&self, piece: &ActivePiece) -> bool {
        piece.cells().iter().all(|&(x, y)| self.is_valid(x, y))
    }

    /// Stamp `piece` into the grid.
    ///
    /// Legality is the caller's job; minos outside the grid are skipped.
    pub fn lock(&mut self, piece: &ActivePiece) {
        for (x, y) in piece.cells() {
            self.set(x, y, Some(piece.kind));
        }
    }

    /// Remove every full row, shifting the rows above down, and return how
    /// many were removed.
    ///
    /// Compacts bottom-to-top with a read and a write cursor, which leaves
    /// the same grid as removing each full row and re-checking that index.
    pub fn clear_lines(&mut self) -> u32 {
        let width = BOARD_WIDTH as usize;
        let mut cleared = 0;
        let mut write_y = BOARD_HEIGHT as usize;

        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        // Fresh empty rows at the top
        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        cleared
    }

    /// How many more rows `piece` can fall before it would collide.
    pub fn drop_distance(&self, piece: &ActivePiece) -> i8 {
        let mut distance = 0;
        while self.can_place(&piece.shifted(0, distance + 1)) {
            distance += 1;
        }
        distance
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Write the grid as color indices (0 = empty) for renderers.
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        let width = BOARD_WIDTH as usize;
        for (y, row) in out.iter_mut().enumerate() {
            for (x, slot) in row.iter_mut().enumerate() {
                *slot = self.cells[y * width + x].map_or(0, |k| k.color_index());
            }
        }
    }

    /// Fill row `y` except the listed columns (handy for building test positions).
    pub fn fill_row_except(&mut self, y: i8, holes: &[i8], kind: PieceKind) {
        for x in 0..BOARD_WIDTH as i8 {
            if !holes.contains(&x) {
                self.set(x, y, Some(kind));
            }
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
