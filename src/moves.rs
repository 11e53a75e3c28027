//! Legal move enumeration over packed layouts.
//!
//! A move slides one piece by exactly one cell in one of the four grid
//! directions. Footprints are rediscovered from the packed form on every
//! call; layouts whose footprints are broken never crash the generator,
//! the offending cells are simply skipped.

use crate::board::{
    cell_code, clear_cell, set_cell, Layout, PACKED_BLOCK, PACKED_EMPTY, PACKED_HORIZONTAL,
    PACKED_SOLDIER, PACKED_VERTICAL,
};

/// The four slide directions as (row delta, column delta).
const DIRECTIONS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// A piece's cells within the grid.
///
/// Fixed-size storage: no piece covers more than four cells.
#[derive(Clone, Copy)]
struct Footprint {
    cells: [(i32, i32); 4],
    len: usize,
}

impl Footprint {
    fn cells(&self) -> &[(i32, i32)] {
        &self.cells[..self.len]
    }
}

/// Determines the full footprint of the piece whose top-left cell is
/// `(row, col)`, by checking the immediate neighbors the shape requires.
///
/// Returns `None` when an expected neighbor is missing or mismatched, so
/// malformed layouts degrade to fewer moves instead of panics.
fn piece_footprint<const R: usize, const C: usize>(
    layout: Layout,
    row: i32,
    col: i32,
    code: u8,
) -> Option<Footprint> {
    let partners: &[(i32, i32)] = match code {
        PACKED_SOLDIER => &[],
        PACKED_HORIZONTAL => &[(0, 1)],
        PACKED_VERTICAL => &[(1, 0)],
        PACKED_BLOCK => &[(0, 1), (1, 0), (1, 1)],
        // unknown codes carry no moves
        _ => return None,
    };

    let mut footprint = Footprint {
        cells: [(row, col); 4],
        len: 1,
    };
    for &(dr, dc) in partners {
        let (pr, pc) = (row + dr, col + dc);
        if cell_code::<R, C>(layout, pr, pc) != code {
            return None;
        }
        footprint.cells[footprint.len] = (pr, pc);
        footprint.len += 1;
    }
    Some(footprint)
}

/// Attempts to slide a footprint one cell along `(dr, dc)`.
///
/// Legal only if every target cell is in bounds and either empty or part
/// of the moving piece itself.
fn try_slide<const R: usize, const C: usize>(
    layout: Layout,
    footprint: &Footprint,
    code: u8,
    (dr, dc): (i32, i32),
) -> Option<Layout> {
    for &(r, c) in footprint.cells() {
        let (tr, tc) = (r + dr, c + dc);
        let target = cell_code::<R, C>(layout, tr, tc);
        if target != PACKED_EMPTY && !footprint.cells().contains(&(tr, tc)) {
            // covers out-of-bounds too: the sentinel is never empty
            return None;
        }
    }

    let mut raw = layout.raw();
    for &(r, c) in footprint.cells() {
        raw = clear_cell::<R, C>(raw, r as usize, c as usize);
    }
    for &(r, c) in footprint.cells() {
        raw = set_cell::<R, C>(raw, (r + dr) as usize, (c + dc) as usize, code);
    }
    Some(Layout::from_raw(raw))
}

/// Enumerates every layout exactly one legal move away from `layout`.
///
/// Cells are scanned in row-major order and cells already attributed to an
/// identified piece are skipped, so each piece is considered once; each
/// (piece, direction) pair yields at most one successor and no two
/// returned layouts are identical.
pub fn successors<const R: usize, const C: usize>(layout: Layout) -> Vec<Layout> {
    let mut out = Vec::new();
    let mut claimed = 0u32;

    for row in 0..R as i32 {
        for col in 0..C as i32 {
            let idx = row as usize * C + col as usize;
            if claimed & (1 << idx) != 0 {
                continue;
            }
            let code = cell_code::<R, C>(layout, row, col);
            if code == PACKED_EMPTY {
                continue;
            }
            let Some(footprint) = piece_footprint::<R, C>(layout, row, col, code) else {
                continue;
            };
            for &(r, c) in footprint.cells() {
                claimed |= 1 << (r as usize * C + c as usize);
            }
            for direction in DIRECTIONS {
                if let Some(moved) = try_slide::<R, C>(layout, &footprint, code, direction) {
                    out.push(moved);
                }
            }
        }
    }
    out
}
