//! Left-right mirror symmetry reduction.
//!
//! Two layouts that are mirror images of each other are interchangeable
//! for distance caching: the goal cells sit symmetrically about the
//! vertical centerline, so every solution mirrors to an equally long one.

use crate::board::{cell_code, set_cell, Layout};

/// Reflects a layout across the vertical centerline: within every row,
/// column `c` swaps with column `C - 1 - c`.
pub fn mirror<const R: usize, const C: usize>(layout: Layout) -> Layout {
    let mut raw = 0u64;
    for r in 0..R {
        for c in 0..C {
            let code = cell_code::<R, C>(layout, r as i32, c as i32);
            raw = set_cell::<R, C>(raw, r, C - 1 - c, code);
        }
    }
    Layout::from_raw(raw)
}

/// The canonical form: the smaller of a layout and its mirror under
/// integer ordering. Idempotent.
pub fn canonical<const R: usize, const C: usize>(layout: Layout) -> Layout {
    layout.min(mirror::<R, C>(layout))
}
