//! Board representation and the packed-layout codec.
//!
//! A board is a rectangular grid of cells where each cell holds a piece
//! code. The whole board packs into a single `u64`: cell `(r, c)`
//! contributes a 3-bit group at offset `3 * (r * C + c)`. The decimal
//! rendering of that integer is the stable wire form external save systems
//! store, so the bit width, per-cell offset, and packed code values must
//! not change without a migration plan.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use thiserror::Error;

/// Bits per cell in the packed layout.
pub const CELL_BITS: u32 = 3;

/// Mask covering one packed cell.
const CODE_MASK: u64 = (1 << CELL_BITS) - 1;

/// Sentinel returned by [`cell_code`] for out-of-range coordinates.
/// Never a valid packed code.
pub const CODE_OUT_OF_BOUNDS: u8 = 0b111;

/// Cell codes used in the human-facing rectangular board form.
pub const CELL_EMPTY: u8 = 0;
pub const CELL_SOLDIER: u8 = 1;
pub const CELL_HORIZONTAL: u8 = 2;
pub const CELL_VERTICAL: u8 = 3;
pub const CELL_BLOCK: u8 = 4;

/// Packed 3-bit codes stored inside a [`Layout`].
///
/// Note the horizontal and vertical codes are swapped relative to the
/// board-facing codes above. Saved games depend on these exact values;
/// [`CODE_TABLE`] is the only place where the two numbering schemes meet,
/// and conversions must never assume the schemes agree.
pub(crate) const PACKED_EMPTY: u8 = 0;
pub(crate) const PACKED_SOLDIER: u8 = 1;
pub(crate) const PACKED_VERTICAL: u8 = 2;
pub(crate) const PACKED_HORIZONTAL: u8 = 3;
pub(crate) const PACKED_BLOCK: u8 = 4;

/// The explicit bijection between board codes (left) and packed codes
/// (right).
const CODE_TABLE: [(u8, u8); 5] = [
    (CELL_EMPTY, PACKED_EMPTY),
    (CELL_SOLDIER, PACKED_SOLDIER),
    (CELL_HORIZONTAL, PACKED_HORIZONTAL),
    (CELL_VERTICAL, PACKED_VERTICAL),
    (CELL_BLOCK, PACKED_BLOCK),
];

fn packed_from_cell(code: u8) -> Option<u8> {
    CODE_TABLE
        .iter()
        .find(|(cell, _)| *cell == code)
        .map(|(_, packed)| *packed)
}

fn cell_from_packed(code: u8) -> Option<u8> {
    CODE_TABLE
        .iter()
        .find(|(_, packed)| *packed == code)
        .map(|(cell, _)| *cell)
}

/// A full board configuration packed into one integer.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Layout(u64);

impl Layout {
    /// Wraps a raw packed value without validation; pair with
    /// [`deserialize`] when the value comes from outside the process.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw packed value.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Layout {
    /// Renders the decimal wire form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Layout {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Layout)
    }
}

/// Failures while crossing between the board and packed representations.
///
/// These always signal corrupted persisted data or a caller bug, so the
/// codec rejects hard instead of guessing.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    #[error("board has {rows} rows, expected {expected}")]
    WrongRowCount { rows: usize, expected: usize },
    #[error("row {row} has {cols} cells, expected {expected}")]
    WrongColumnCount {
        row: usize,
        cols: usize,
        expected: usize,
    },
    #[error("unknown cell code {code} at row {row}, column {col}")]
    UnknownCellCode { code: u8, row: usize, col: usize },
    #[error("incomplete piece footprint at row {row}, column {col}")]
    BrokenFootprint { row: usize, col: usize },
    #[error("unknown packed code {code} at cell index {cell}")]
    UnknownPackedCode { code: u8, cell: usize },
    #[error("stray bits beyond the last cell")]
    StrayBits,
}

/// Bit offset of cell `(row, col)` inside the packed layout.
#[inline(always)]
pub(crate) fn cell_offset<const R: usize, const C: usize>(row: usize, col: usize) -> u32 {
    const {
        assert!(R >= 2 && C >= 2, "board must be at least 2x2");
        assert!(
            R * C * CELL_BITS as usize <= 64,
            "packed layout must fit in u64"
        );
    }
    ((row * C + col) as u32) * CELL_BITS
}

/// Packed piece code at `(row, col)`, or [`CODE_OUT_OF_BOUNDS`] when the
/// coordinates fall off the board. Pure bit extraction, no validation.
#[inline(always)]
pub fn cell_code<const R: usize, const C: usize>(layout: Layout, row: i32, col: i32) -> u8 {
    if row < 0 || col < 0 || row >= R as i32 || col >= C as i32 {
        return CODE_OUT_OF_BOUNDS;
    }
    let offset = cell_offset::<R, C>(row as usize, col as usize);
    ((layout.raw() >> offset) & CODE_MASK) as u8
}

/// Returns `raw` with the cell at `(row, col)` cleared to empty.
#[inline(always)]
pub(crate) fn clear_cell<const R: usize, const C: usize>(raw: u64, row: usize, col: usize) -> u64 {
    raw & !(CODE_MASK << cell_offset::<R, C>(row, col))
}

/// Returns `raw` with the (cleared) cell at `(row, col)` set to `code`.
#[inline(always)]
pub(crate) fn set_cell<const R: usize, const C: usize>(
    raw: u64,
    row: usize,
    col: usize,
    code: u8,
) -> u64 {
    raw | ((code as u64) << cell_offset::<R, C>(row, col))
}

/// Packs a rectangular board of cell codes into a layout.
///
/// Fails when the dimensions are not exactly `R` x `C`, when any cell holds
/// an unknown code, or when a multi-cell piece does not cover its complete
/// rectangular footprint.
pub fn serialize<const R: usize, const C: usize>(rows: &[Vec<u8>]) -> Result<Layout, CodecError> {
    if rows.len() != R {
        return Err(CodecError::WrongRowCount {
            rows: rows.len(),
            expected: R,
        });
    }

    let mut packed = [0u8; 64];
    for (r, row) in rows.iter().enumerate() {
        if row.len() != C {
            return Err(CodecError::WrongColumnCount {
                row: r,
                cols: row.len(),
                expected: C,
            });
        }
        for (c, &code) in row.iter().enumerate() {
            packed[r * C + c] =
                packed_from_cell(code).ok_or(CodecError::UnknownCellCode { code, row: r, col: c })?;
        }
    }

    validate_footprints::<R, C>(&packed)?;

    let mut raw = 0u64;
    for r in 0..R {
        for c in 0..C {
            raw = set_cell::<R, C>(raw, r, c, packed[r * C + c]);
        }
    }
    Ok(Layout(raw))
}

/// Checks that every multi-cell piece covers its exact rectangular
/// footprint: a code appearing in only part of a 2x2 footprint, for
/// instance, makes the board invalid.
fn validate_footprints<const R: usize, const C: usize>(packed: &[u8; 64]) -> Result<(), CodecError> {
    let mut claimed = 0u32;
    for r in 0..R {
        for c in 0..C {
            let idx = r * C + c;
            if claimed & (1 << idx) != 0 {
                continue;
            }
            let code = packed[idx];
            let partners: &[(usize, usize)] = match code {
                PACKED_EMPTY | PACKED_SOLDIER => &[],
                PACKED_HORIZONTAL => &[(0, 1)],
                PACKED_VERTICAL => &[(1, 0)],
                PACKED_BLOCK => &[(0, 1), (1, 0), (1, 1)],
                _ => unreachable!("codes were mapped through the bijection"),
            };
            for &(dr, dc) in partners {
                let (pr, pc) = (r + dr, c + dc);
                let ok = pr < R && pc < C && packed[pr * C + pc] == code;
                if !ok {
                    return Err(CodecError::BrokenFootprint { row: r, col: c });
                }
                claimed |= 1 << (pr * C + pc);
            }
            claimed |= 1 << idx;
        }
    }
    Ok(())
}

/// Unpacks a layout back into the rectangular board form.
///
/// Fails when any 3-bit group does not match a known packed code or when
/// bits remain set beyond the last cell, both of which signal a corrupted
/// or foreign layout value.
pub fn deserialize<const R: usize, const C: usize>(
    layout: Layout,
) -> Result<Vec<Vec<u8>>, CodecError> {
    let used_bits = (R * C) as u32 * CELL_BITS;
    if used_bits < 64 && layout.raw() >> used_bits != 0 {
        return Err(CodecError::StrayBits);
    }

    let mut rows = Vec::with_capacity(R);
    for r in 0..R {
        let mut row = Vec::with_capacity(C);
        for c in 0..C {
            let code = cell_code::<R, C>(layout, r as i32, c as i32);
            let cell = cell_from_packed(code).ok_or(CodecError::UnknownPackedCode {
                code,
                cell: r * C + c,
            })?;
            row.push(cell);
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Top-left corner of the 2x2 block, scanning in row-major order.
///
/// `None` when the layout holds no block cell.
pub fn block_anchor<const R: usize, const C: usize>(layout: Layout) -> Option<(usize, usize)> {
    for r in 0..R {
        for c in 0..C {
            if cell_code::<R, C>(layout, r as i32, c as i32) == PACKED_BLOCK {
                return Some((r, c));
            }
        }
    }
    None
}

/// Columns of the two goal cells: the adjacent pair straddling the board's
/// vertical centerline.
pub const fn goal_columns<const C: usize>() -> (usize, usize) {
    (C / 2 - 1, C / 2)
}

/// Top-left corner the block must occupy for its bottom cells to sit on
/// the goal cells.
pub const fn goal_anchor<const R: usize, const C: usize>() -> (usize, usize) {
    (R - 2, C / 2 - 1)
}

/// True exactly when both goal cells on the bottom row hold the block's
/// code. Mirror-invariant because the goal columns are symmetric about the
/// vertical centerline.
pub fn is_goal<const R: usize, const C: usize>(layout: Layout) -> bool {
    let (left, right) = goal_columns::<C>();
    let bottom = (R - 1) as i32;
    cell_code::<R, C>(layout, bottom, left as i32) == PACKED_BLOCK
        && cell_code::<R, C>(layout, bottom, right as i32) == PACKED_BLOCK
}

/// Formats a layout as a human-readable grid.
///
/// Empty cells show as '.', pieces as S/H/V/B by shape, unknown packed
/// codes as '?'.
pub fn format_board<const R: usize, const C: usize>(layout: Layout) -> String {
    let mut output = String::new();
    for r in 0..R {
        for c in 0..C {
            output.push(match cell_code::<R, C>(layout, r as i32, c as i32) {
                PACKED_EMPTY => '.',
                PACKED_SOLDIER => 'S',
                PACKED_HORIZONTAL => 'H',
                PACKED_VERTICAL => 'V',
                PACKED_BLOCK => 'B',
                _ => '?',
            });
        }
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layouts::{to_rows, CLASSIC, COLS, ROWS};

    #[test]
    fn test_roundtrip_classic() {
        let layout = serialize::<ROWS, COLS>(&to_rows(&CLASSIC)).unwrap();
        let rows = deserialize::<ROWS, COLS>(layout).unwrap();
        assert_eq!(rows, to_rows(&CLASSIC));
        assert_eq!(
            serialize::<ROWS, COLS>(&rows).unwrap(),
            layout,
            "re-serializing a decoded board must reproduce the layout"
        );
    }

    #[test]
    fn test_wire_form_roundtrip() {
        let layout = serialize::<ROWS, COLS>(&to_rows(&CLASSIC)).unwrap();
        let wire = layout.to_string();
        assert_eq!(wire.parse::<Layout>().unwrap(), layout);
    }

    #[test]
    fn test_serialize_rejects_wrong_dimensions() {
        let short: Vec<Vec<u8>> = to_rows(&CLASSIC)[..4].to_vec();
        assert_eq!(
            serialize::<ROWS, COLS>(&short),
            Err(CodecError::WrongRowCount {
                rows: 4,
                expected: 5
            })
        );

        let mut ragged = to_rows(&CLASSIC);
        ragged[2].pop();
        assert_eq!(
            serialize::<ROWS, COLS>(&ragged),
            Err(CodecError::WrongColumnCount {
                row: 2,
                cols: 3,
                expected: 4
            })
        );
    }

    #[test]
    fn test_serialize_rejects_unknown_code() {
        let mut rows = to_rows(&CLASSIC);
        rows[0][0] = 9;
        assert_eq!(
            serialize::<ROWS, COLS>(&rows),
            Err(CodecError::UnknownCellCode {
                code: 9,
                row: 0,
                col: 0
            })
        );
    }

    #[test]
    fn test_serialize_rejects_partial_block() {
        // a lone block cell cannot form the 2x2 footprint
        let rows = [
            [CELL_BLOCK, CELL_EMPTY],
            [CELL_EMPTY, CELL_EMPTY],
            [CELL_EMPTY, CELL_EMPTY],
        ];
        assert_eq!(
            serialize::<3, 2>(&to_rows(&rows)),
            Err(CodecError::BrokenFootprint { row: 0, col: 0 })
        );
    }

    #[test]
    fn test_serialize_rejects_split_vertical() {
        let rows = [
            [CELL_VERTICAL, CELL_EMPTY],
            [CELL_EMPTY, CELL_VERTICAL],
            [CELL_EMPTY, CELL_VERTICAL],
        ];
        assert_eq!(
            serialize::<3, 2>(&to_rows(&rows)),
            Err(CodecError::BrokenFootprint { row: 0, col: 0 })
        );
    }

    #[test]
    fn test_deserialize_rejects_unknown_group() {
        let valid = serialize::<ROWS, COLS>(&to_rows(&CLASSIC)).unwrap();
        // overwrite the first cell's group with an unassigned code
        let corrupt = Layout::from_raw((valid.raw() & !CODE_MASK) | 0b110);
        assert_eq!(
            deserialize::<ROWS, COLS>(corrupt),
            Err(CodecError::UnknownPackedCode { code: 6, cell: 0 })
        );
    }

    #[test]
    fn test_deserialize_rejects_stray_bits() {
        let valid = serialize::<ROWS, COLS>(&to_rows(&CLASSIC)).unwrap();
        let corrupt = Layout::from_raw(valid.raw() | 1 << 63);
        assert_eq!(deserialize::<ROWS, COLS>(corrupt), Err(CodecError::StrayBits));
    }

    #[test]
    fn test_cell_code_out_of_range_sentinel() {
        let layout = serialize::<ROWS, COLS>(&to_rows(&CLASSIC)).unwrap();
        assert_eq!(cell_code::<ROWS, COLS>(layout, -1, 0), CODE_OUT_OF_BOUNDS);
        assert_eq!(cell_code::<ROWS, COLS>(layout, 0, -1), CODE_OUT_OF_BOUNDS);
        assert_eq!(cell_code::<ROWS, COLS>(layout, 5, 0), CODE_OUT_OF_BOUNDS);
        assert_eq!(cell_code::<ROWS, COLS>(layout, 0, 4), CODE_OUT_OF_BOUNDS);
    }

    #[test]
    fn test_packed_codes_swap_horizontal_and_vertical() {
        // the packed scheme stores vertical as 2 and horizontal as 3,
        // the reverse of the board-facing codes
        let horizontal = [
            [CELL_HORIZONTAL, CELL_HORIZONTAL],
            [CELL_EMPTY, CELL_EMPTY],
        ];
        let layout = serialize::<2, 2>(&to_rows(&horizontal)).unwrap();
        assert_eq!(cell_code::<2, 2>(layout, 0, 0), PACKED_HORIZONTAL);
        assert_ne!(cell_code::<2, 2>(layout, 0, 0), CELL_HORIZONTAL);

        let vertical = [
            [CELL_VERTICAL, CELL_EMPTY],
            [CELL_VERTICAL, CELL_EMPTY],
        ];
        let layout = serialize::<2, 2>(&to_rows(&vertical)).unwrap();
        assert_eq!(cell_code::<2, 2>(layout, 0, 0), PACKED_VERTICAL);
        assert_ne!(cell_code::<2, 2>(layout, 0, 0), CELL_VERTICAL);
    }

    #[test]
    fn test_goal_predicate_exact() {
        // slide a lone block over every possible anchor; only the goal
        // anchor may satisfy the predicate
        for r in 0..ROWS - 1 {
            for c in 0..COLS - 1 {
                let mut rows = vec![vec![CELL_EMPTY; COLS]; ROWS];
                rows[r][c] = CELL_BLOCK;
                rows[r][c + 1] = CELL_BLOCK;
                rows[r + 1][c] = CELL_BLOCK;
                rows[r + 1][c + 1] = CELL_BLOCK;
                let layout = serialize::<ROWS, COLS>(&rows).unwrap();
                assert_eq!(
                    is_goal::<ROWS, COLS>(layout),
                    (r, c) == goal_anchor::<ROWS, COLS>(),
                    "goal predicate wrong for anchor ({r}, {c})"
                );
            }
        }
    }

    #[test]
    fn test_block_anchor_finds_top_left() {
        let layout = serialize::<ROWS, COLS>(&to_rows(&CLASSIC)).unwrap();
        assert_eq!(block_anchor::<ROWS, COLS>(layout), Some((0, 1)));
    }

    #[test]
    fn test_format_board_classic() {
        let layout = serialize::<ROWS, COLS>(&to_rows(&CLASSIC)).unwrap();
        assert_eq!(
            format_board::<ROWS, COLS>(layout),
            "VBBV\nVBBV\nVHHV\nVSSV\nS..S\n"
        );
    }
}
