//! Exhaustive distance index over the reachable layout graph.
//!
//! Built once per session by a breadth-first traversal that does not stop
//! at the first goal: it keeps going until the whole reachable graph is
//! mapped, so that later incremental queries can look up the exact
//! distance from the session root to any layout they encounter. The
//! classic 5x4 openings stay in the low tens of thousands of canonical
//! states, which keeps the one-time build interactive.

use log::{debug, info};
use rustc_hash::FxHashMap;

use crate::board::{is_goal, Layout};
use crate::moves::successors;
use crate::symmetry::canonical;

/// One discovered state in the traversal arena.
///
/// Nodes are immutable once pushed; predecessor links address the arena by
/// index and form a tree rooted at the traversal's start state, so path
/// reconstruction is a walk to the root.
struct SearchNode {
    layout: Layout,
    parent: Option<u32>,
    depth: u32,
}

/// Map from canonical layout to its minimum distance from the session
/// root. Mutated only during [`build`]; read-only afterwards.
pub struct DistanceIndex {
    distances: FxHashMap<u64, u32>,
    goal_distance: Option<u32>,
}

impl DistanceIndex {
    /// Minimum move count from the session root to `layout`, which must
    /// already be in canonical form. `None` for unreachable layouts.
    pub fn distance(&self, layout: Layout) -> Option<u32> {
        self.distances.get(&layout.raw()).copied()
    }

    /// Whether the canonical `layout` was reached from the session root.
    pub fn contains(&self, layout: Layout) -> bool {
        self.distances.contains_key(&layout.raw())
    }

    /// Distance from the session root to the first goal the traversal
    /// found, or `None` when no goal is reachable.
    pub fn goal_distance(&self) -> Option<u32> {
        self.goal_distance
    }

    /// Number of distinct canonical layouts reachable from the root.
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }
}

/// Everything one exhaustive traversal produces.
pub struct BuildOutcome {
    pub index: DistanceIndex,
    /// Root-to-goal layouts inclusive; empty when no goal is reachable.
    pub optimal_path: Vec<Layout>,
}

/// Explores the entire graph reachable from `initial` and records each
/// canonical layout's BFS depth.
///
/// The first time a canonical layout is reached its distance is final,
/// because breadth-first order visits states by non-decreasing depth;
/// later re-derivations are dropped. The first goal encountered is
/// remembered and its path reconstructed, but the traversal always runs
/// to exhaustion so the index covers every reachable state.
pub fn build<const R: usize, const C: usize>(initial: Layout) -> BuildOutcome {
    let mut arena = vec![SearchNode {
        layout: initial,
        parent: None,
        depth: 0,
    }];
    let mut distances = FxHashMap::default();
    distances.insert(canonical::<R, C>(initial).raw(), 0);

    let mut first_goal: Option<usize> = None;
    let mut head = 0;

    while head < arena.len() {
        let (layout, depth) = (arena[head].layout, arena[head].depth);
        if first_goal.is_none() && is_goal::<R, C>(layout) {
            debug!("first goal at depth {depth}");
            first_goal = Some(head);
        }
        for next in successors::<R, C>(layout) {
            let key = canonical::<R, C>(next).raw();
            if distances.contains_key(&key) {
                continue;
            }
            distances.insert(key, depth + 1);
            arena.push(SearchNode {
                layout: next,
                parent: Some(head as u32),
                depth: depth + 1,
            });
        }
        head += 1;
    }

    let goal_distance = first_goal.map(|idx| arena[idx].depth);
    info!(
        "mapped {} canonical layouts, goal distance {goal_distance:?}",
        distances.len()
    );

    let optimal_path = first_goal
        .map(|idx| reconstruct(&arena, idx))
        .unwrap_or_default();

    BuildOutcome {
        index: DistanceIndex {
            distances,
            goal_distance,
        },
        optimal_path,
    }
}

/// Walks predecessor links from `goal` back to the arena root and returns
/// the layouts in root-to-goal order.
fn reconstruct(arena: &[SearchNode], goal: usize) -> Vec<Layout> {
    let mut path = Vec::with_capacity(arena[goal].depth as usize + 1);
    let mut cursor = Some(goal);
    while let Some(idx) = cursor {
        path.push(arena[idx].layout);
        cursor = arena[idx].parent.map(|p| p as usize);
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::serialize;
    use crate::layouts::{to_rows, COLS, CORNER_BLOCK, FRONT_LINE, ROWS};

    #[test]
    fn test_front_line_build() {
        let initial = serialize::<ROWS, COLS>(&to_rows(&FRONT_LINE)).unwrap();
        let outcome = build::<ROWS, COLS>(initial);

        assert_eq!(outcome.index.goal_distance(), Some(85));
        assert_eq!(outcome.index.len(), 13011);
        assert_eq!(outcome.optimal_path.len(), 86);
    }

    #[test]
    fn test_corner_block_build() {
        let initial = serialize::<ROWS, COLS>(&to_rows(&CORNER_BLOCK)).unwrap();
        let outcome = build::<ROWS, COLS>(initial);

        assert_eq!(outcome.index.goal_distance(), Some(60));
        assert_eq!(outcome.index.len(), 68020);
    }

    #[test]
    fn test_optimal_path_is_a_legal_walk() {
        let initial = serialize::<ROWS, COLS>(&to_rows(&FRONT_LINE)).unwrap();
        let outcome = build::<ROWS, COLS>(initial);
        let path = &outcome.optimal_path;

        assert_eq!(path.first(), Some(&initial));
        assert!(is_goal::<ROWS, COLS>(*path.last().unwrap()));
        for pair in path.windows(2) {
            assert!(
                successors::<ROWS, COLS>(pair[0]).contains(&pair[1]),
                "path steps from {} to {} without a legal move",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_unsolvable_board_yields_empty_path() {
        // no block at all: the goal predicate can never hold
        let mut rows = vec![vec![0u8; COLS]; ROWS];
        rows[0][0] = 1; // one soldier wandering an empty board
        let initial = serialize::<ROWS, COLS>(&rows).unwrap();
        let outcome = build::<ROWS, COLS>(initial);

        assert_eq!(outcome.index.goal_distance(), None);
        assert!(outcome.optimal_path.is_empty());
        assert!(!outcome.index.is_empty());
    }

    #[test]
    fn test_distances_start_at_zero_and_step_by_one() {
        let initial = serialize::<ROWS, COLS>(&to_rows(&FRONT_LINE)).unwrap();
        let outcome = build::<ROWS, COLS>(initial);
        let canon = |l| crate::symmetry::canonical::<ROWS, COLS>(l);

        assert_eq!(outcome.index.distance(canon(initial)), Some(0));
        for (i, &layout) in outcome.optimal_path.iter().enumerate() {
            assert_eq!(
                outcome.index.distance(canon(layout)),
                Some(i as u32),
                "optimal path entry {i} has the wrong indexed distance"
            );
        }
    }
}
