//! Solve orchestration: one exhaustive solve per session, then fast
//! incremental "shortest path from here" queries.
//!
//! A `PathFinder` owns its distance index exclusively. It is built fresh
//! for every puzzle session; indices are never shared or merged, so
//! independent sessions and tests cannot interfere with each other. Both
//! the initial solve and each query are synchronous run-to-completion
//! computations; callers that need a responsive UI run them off the
//! interactive thread.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use log::{debug, warn};
use rustc_hash::FxHashMap;

use crate::board::{is_goal, Layout};
use crate::heuristic::estimate;
use crate::index::{build, DistanceIndex};
use crate::moves::successors;
use crate::symmetry::canonical;

/// Results of the one-time initial solve, kept for the finder's lifetime.
struct Session {
    index: DistanceIndex,
    optimal_path: Vec<Layout>,
}

/// Answers "shortest remaining path" queries for one puzzle session.
pub struct PathFinder<const R: usize, const C: usize> {
    session: Option<Session>,
}

impl<const R: usize, const C: usize> PathFinder<R, C> {
    pub fn new() -> Self {
        Self { session: None }
    }

    /// Runs the exhaustive solve for `initial` and returns the optimal
    /// path, inclusive of both endpoints; empty when no goal is reachable.
    ///
    /// Idempotent: a second call returns the memoized result without
    /// touching the graph again. A different initial layout needs a new
    /// `PathFinder`.
    pub fn compute_initial_solution(&mut self, initial: Layout) -> Vec<Layout> {
        if let Some(session) = &self.session {
            return session.optimal_path.clone();
        }
        let outcome = build::<R, C>(initial);
        let path = outcome.optimal_path.clone();
        self.session = Some(Session {
            index: outcome.index,
            optimal_path: outcome.optimal_path,
        });
        path
    }

    /// Shortest path from `current` to a goal, inclusive; empty when
    /// `current` cannot reach a goal.
    ///
    /// States on the cached optimal path are answered by returning its
    /// suffix, without any search. Everything else runs a single A*
    /// seeded at `current` with local cost zero — the caller may not know
    /// its absolute distance from the session root, and does not need to.
    /// Layouts the session index has never seen (stale or foreign saves)
    /// get an empty path instead of an unbounded search.
    pub fn query_shortest_path_from(&self, current: Layout) -> Vec<Layout> {
        let Some(session) = &self.session else {
            warn!("query before the initial solve; refusing");
            return Vec::new();
        };

        let key = canonical::<R, C>(current);
        if let Some(position) = session
            .optimal_path
            .iter()
            .position(|&entry| canonical::<R, C>(entry) == key)
        {
            return session.optimal_path[position..].to_vec();
        }

        if !session.index.contains(key) {
            debug!("layout {current} is unknown to this session; no path");
            return Vec::new();
        }

        shortest_path::<R, C>(current, &session.index)
    }
}

impl<const R: usize, const C: usize> Default for PathFinder<R, C> {
    fn default() -> Self {
        Self::new()
    }
}

/// One discovered state in the A* arena.
struct AstarNode {
    layout: Layout,
    parent: Option<u32>,
}

/// Single-source A* from `start`, guided by the admissible estimate.
///
/// The visited map is keyed by canonical layout and applies standard
/// dominance pruning: a rediscovered layout is skipped unless reached
/// with a strictly smaller local cost.
fn shortest_path<const R: usize, const C: usize>(
    start: Layout,
    index: &DistanceIndex,
) -> Vec<Layout> {
    let mut arena = vec![AstarNode {
        layout: start,
        parent: None,
    }];
    let mut best_cost: FxHashMap<u64, u32> = FxHashMap::default();
    best_cost.insert(canonical::<R, C>(start).raw(), 0);

    let mut open = BinaryHeap::new();
    open.push(Reverse((estimate::<R, C>(start, index), 0u32, 0usize)));

    while let Some(Reverse((_priority, cost, node))) = open.pop() {
        let layout = arena[node].layout;
        let key = canonical::<R, C>(layout).raw();
        if best_cost.get(&key).is_some_and(|&best| cost > best) {
            // a cheaper route to this layout was expanded already
            continue;
        }
        if is_goal::<R, C>(layout) {
            return reconstruct(&arena, node);
        }

        for next in successors::<R, C>(layout) {
            let next_key = canonical::<R, C>(next).raw();
            let next_cost = cost + 1;
            if best_cost
                .get(&next_key)
                .is_some_and(|&best| next_cost >= best)
            {
                continue;
            }
            best_cost.insert(next_key, next_cost);
            arena.push(AstarNode {
                layout: next,
                parent: Some(node as u32),
            });
            open.push(Reverse((
                next_cost + estimate::<R, C>(next, index),
                next_cost,
                arena.len() - 1,
            )));
        }
    }

    Vec::new()
}

/// Walks predecessor links from `goal` back to the arena root.
fn reconstruct(arena: &[AstarNode], goal: usize) -> Vec<Layout> {
    let mut path = Vec::new();
    let mut cursor = Some(goal);
    while let Some(idx) = cursor {
        path.push(arena[idx].layout);
        cursor = arena[idx].parent.map(|p| p as usize);
    }
    path.reverse();
    path
}
