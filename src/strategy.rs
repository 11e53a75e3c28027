//! Interchangeable solve strategies.
//!
//! Production traffic goes through [`SessionSolver`], which answers from a
//! [`PathFinder`] and its exhaustive index. [`FlatBfs`] is an index-free
//! baseline kept for benchmarking and as an independent cross-check; it
//! stops at the first goal and performs no mirror reduction.

use rustc_hash::FxHashSet;

use crate::board::{is_goal, Layout};
use crate::moves::successors;
use crate::pathfinder::PathFinder;
use crate::Solver;

/// The production strategy: exhaustive index build plus cached path.
pub struct SessionSolver<const R: usize, const C: usize> {
    finder: PathFinder<R, C>,
}

impl<const R: usize, const C: usize> SessionSolver<R, C> {
    pub fn new() -> Self {
        Self {
            finder: PathFinder::new(),
        }
    }

    /// The finder backing this solver, for follow-up incremental queries.
    pub fn finder(&self) -> &PathFinder<R, C> {
        &self.finder
    }
}

impl<const R: usize, const C: usize> Default for SessionSolver<R, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const R: usize, const C: usize> Solver for SessionSolver<R, C> {
    fn solve(&mut self, initial: Layout) -> Vec<Layout> {
        self.finder.compute_initial_solution(initial)
    }
}

/// Plain breadth-first search to the first goal, no symmetry reduction.
pub struct FlatBfs<const R: usize, const C: usize>;

impl<const R: usize, const C: usize> Solver for FlatBfs<R, C> {
    fn solve(&mut self, initial: Layout) -> Vec<Layout> {
        struct Node {
            layout: Layout,
            parent: Option<u32>,
        }

        let mut arena = vec![Node {
            layout: initial,
            parent: None,
        }];
        let mut seen = FxHashSet::default();
        seen.insert(initial.raw());

        let mut head = 0;
        while head < arena.len() {
            let layout = arena[head].layout;
            if is_goal::<R, C>(layout) {
                let mut path = Vec::new();
                let mut cursor = Some(head);
                while let Some(idx) = cursor {
                    path.push(arena[idx].layout);
                    cursor = arena[idx].parent.map(|p| p as usize);
                }
                path.reverse();
                return path;
            }
            for next in successors::<R, C>(layout) {
                if seen.insert(next.raw()) {
                    arena.push(Node {
                        layout: next,
                        parent: Some(head as u32),
                    });
                }
            }
            head += 1;
        }

        Vec::new()
    }
}
