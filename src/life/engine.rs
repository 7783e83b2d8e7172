//! Conway's rules on a toroidal grid
//!
//! A generation is advanced in two phases. The count phase reads the grid as
//! it stood at the start of the step and collects a [`PendingChange`] for every
//! cell that flips; the apply phase then writes those changes. No rule ever
//! sees a neighbor's already-updated state.

use super::GridState;
use rayon::prelude::*;

/// Moore neighborhood offsets `(dx, dy)`, the cell itself excluded
const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Floored-division modulo: always in `[0, modulus)`, also for negative `i`.
///
/// `modulus` must be positive.
#[inline]
pub fn wrap(i: i64, modulus: i64) -> i64 {
    i.rem_euclid(modulus)
}

/// A scheduled state change for one cell, produced and consumed within a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingChange {
    pub x: usize,
    pub y: usize,
    pub next_alive: bool,
}

/// Stateless generation stepper
pub struct LifeEngine;

impl LifeEngine {
    /// Advance `grid` by exactly one generation, returning the number of cells that changed
    pub fn step(grid: &mut GridState) -> usize {
        let changes = Self::pending_changes(grid);
        let changed = changes.len();
        Self::apply(grid, changes);
        log::debug!("generation advanced, {} cells changed", changed);
        changed
    }

    /// Advance `grid` by `generations` generations
    pub fn step_n(grid: &mut GridState, generations: usize) {
        for _ in 0..generations {
            Self::step(grid);
        }
    }

    /// Count phase: collect a change for every cell whose state flips.
    ///
    /// Purely read-only, so rows are evaluated in parallel.
    pub fn pending_changes(grid: &GridState) -> Vec<PendingChange> {
        (0..grid.height())
            .into_par_iter()
            .flat_map(|y| {
                (0..grid.width()).into_par_iter().filter_map(move |x| {
                    let neighbors = Self::count_neighbors(grid, x, y);
                    Self::next_state(grid.alive_at(x, y), neighbors)
                        .map(|next_alive| PendingChange { x, y, next_alive })
                })
            })
            .collect()
    }

    /// Apply phase: write every scheduled change. Order does not matter since
    /// no coordinate is scheduled twice.
    pub fn apply(grid: &mut GridState, changes: Vec<PendingChange>) {
        for change in changes {
            if let Err(e) = grid.set(change.x, change.y, change.next_alive) {
                log::error!("dropping pending change: {}", e);
            }
        }
    }

    /// Count living cells among the 8 wrapped neighbors of `(x, y)`.
    ///
    /// On grids narrower than 3 cells several offsets land on the same cell
    /// (or the cell itself); each offset is counted on its own.
    pub fn count_neighbors(grid: &GridState, x: usize, y: usize) -> u8 {
        let width = grid.width() as i64;
        let height = grid.height() as i64;
        let (x, y) = (x as i64, y as i64);

        NEIGHBOR_OFFSETS
            .iter()
            .filter(|&&(dx, dy)| {
                let nx = wrap(x + dx, width) as usize;
                let ny = wrap(y + dy, height) as usize;
                grid.alive_at(nx, ny)
            })
            .count() as u8
    }

    /// The state change a cell undergoes, or `None` when it keeps its state
    pub fn next_state(alive: bool, neighbors: u8) -> Option<bool> {
        match (alive, neighbors) {
            (false, 3) => Some(true),
            (true, n) if !(2..=3).contains(&n) => Some(false),
            _ => None,
        }
    }
}
