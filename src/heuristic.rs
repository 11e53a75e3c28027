//! Admissible cost-to-goal estimates for the incremental search.

use crate::board::{block_anchor, goal_anchor, Layout};
use crate::index::DistanceIndex;
use crate::symmetry::canonical;

/// Lower bound on the number of moves remaining from `layout`.
///
/// The base bound is the Manhattan distance between the block's top-left
/// corner and the goal corner; each move shifts a piece by exactly one
/// cell, so the block needs at least that many of its own moves. When the
/// index knows both the session's root-to-goal distance and this layout's
/// root distance, `goal - here` is a second lower bound: no walk
/// root -> layout -> goal can undercut the globally shortest root -> goal
/// path. The estimate is the larger of the two and stays consistent, which
/// the A* caller relies on for optimality.
pub fn estimate<const R: usize, const C: usize>(layout: Layout, index: &DistanceIndex) -> u32 {
    let manhattan = block_anchor::<R, C>(layout).map_or(0, |(row, col)| {
        let (goal_row, goal_col) = goal_anchor::<R, C>();
        (row.abs_diff(goal_row) + col.abs_diff(goal_col)) as u32
    });

    let informed = match (
        index.goal_distance(),
        index.distance(canonical::<R, C>(layout)),
    ) {
        (Some(goal), Some(here)) if goal >= here => goal - here,
        _ => 0,
    };

    manhattan.max(informed)
}
