//! Named starting layouts from the classic puzzle set.
//!
//! Boards use the human-facing cell codes: 0 empty, 1 soldier (1x1),
//! 2 horizontal (1x2), 3 vertical (2x1), 4 block (2x2). The goal is always
//! to bring the block's bottom cells onto the bottom-center exit.

use crate::board::{CELL_BLOCK, CELL_EMPTY, CELL_HORIZONTAL, CELL_SOLDIER, CELL_VERTICAL};

/// Board dimensions shared by the classic puzzle set.
pub const ROWS: usize = 5;
pub const COLS: usize = 4;

const E: u8 = CELL_EMPTY;
const S: u8 = CELL_SOLDIER;
const H: u8 = CELL_HORIZONTAL;
const V: u8 = CELL_VERTICAL;
const B: u8 = CELL_BLOCK;

/// The famous opening with a horizontal general barring the exit.
/// Solvable in 116 moves.
pub const CLASSIC: [[u8; COLS]; ROWS] = [
    [V, B, B, V],
    [V, B, B, V],
    [V, H, H, V],
    [V, S, S, V],
    [S, E, E, S],
];

/// Four soldiers lined up across the middle. Solvable in 85 moves.
pub const FRONT_LINE: [[u8; COLS]; ROWS] = [
    [V, B, B, V],
    [V, B, B, V],
    [S, S, S, S],
    [V, H, H, V],
    [V, E, E, V],
];

/// The block starts in a corner. Solvable in 60 moves.
pub const CORNER_BLOCK: [[u8; COLS]; ROWS] = [
    [B, B, V, S],
    [B, B, V, S],
    [V, H, H, V],
    [V, S, S, V],
    [S, E, E, S],
];

/// The built-in opening catalog, addressable by name from the CLI.
pub const CATALOG: &[(&str, &[[u8; COLS]; ROWS])] = &[
    ("classic", &CLASSIC),
    ("front-line", &FRONT_LINE),
    ("corner-block", &CORNER_BLOCK),
];

/// Looks up a named opening.
pub fn by_name(name: &str) -> Option<&'static [[u8; COLS]; ROWS]> {
    CATALOG
        .iter()
        .find(|(catalog_name, _)| *catalog_name == name)
        .map(|(_, grid)| *grid)
}

/// Converts a const grid into the rectangular row form the codec consumes.
pub fn to_rows<const R: usize, const C: usize>(grid: &[[u8; C]; R]) -> Vec<Vec<u8>> {
    grid.iter().map(|row| row.to_vec()).collect()
}
