//! Well-known starting patterns

use super::engine::wrap;
use super::GridState;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    /// 2x2 still life
    Block,
    /// Period-2 oscillator, vertical phase
    Blinker,
    /// Moves one cell diagonally every 4 generations
    Glider,
    /// Period-2 oscillator made of two blocks
    Beacon,
}

impl Pattern {
    pub const ALL: [Pattern; 4] = [
        Pattern::Block,
        Pattern::Blinker,
        Pattern::Glider,
        Pattern::Beacon,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Pattern::Block => "block",
            Pattern::Blinker => "blinker",
            Pattern::Glider => "glider",
            Pattern::Beacon => "beacon",
        }
    }

    /// Living cells `(x, y)` relative to the pattern's top-left corner
    pub fn cells(self) -> &'static [(usize, usize)] {
        match self {
            Pattern::Block => &[(0, 0), (1, 0), (0, 1), (1, 1)],
            Pattern::Blinker => &[(0, 0), (0, 1), (0, 2)],
            Pattern::Glider => &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
            Pattern::Beacon => &[
                (0, 0),
                (1, 0),
                (0, 1),
                (1, 1),
                (2, 2),
                (3, 2),
                (2, 3),
                (3, 3),
            ],
        }
    }

    /// Bounding box `(width, height)`
    pub fn size(self) -> (usize, usize) {
        self.cells().iter().fold((0, 0), |(w, h), &(x, y)| {
            (w.max(x + 1), h.max(y + 1))
        })
    }

    /// Bring the pattern to life with its top-left corner at `(x, y)`,
    /// wrapping around the grid edges
    pub fn stamp(self, grid: &mut GridState, x: usize, y: usize) {
        let width = grid.width() as i64;
        let height = grid.height() as i64;
        for &(dx, dy) in self.cells() {
            let cx = wrap((x + dx) as i64, width) as usize;
            let cy = wrap((y + dy) as i64, height) as usize;
            grid.set_at(cx, cy, true);
        }
    }
}

impl std::str::FromStr for Pattern {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        Pattern::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| anyhow::anyhow!("Unknown pattern '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::life::LifeEngine;

    #[test]
    fn test_pattern_sizes() {
        assert_eq!(Pattern::Block.size(), (2, 2));
        assert_eq!(Pattern::Blinker.size(), (1, 3));
        assert_eq!(Pattern::Glider.size(), (3, 3));
        assert_eq!(Pattern::Beacon.size(), (4, 4));
    }

    #[test]
    fn test_stamp_wraps() {
        let mut grid = GridState::create(4, 4).unwrap();
        Pattern::Block.stamp(&mut grid, 3, 3);
        let mut living = grid.living_cells();
        living.sort_unstable();
        assert_eq!(living, vec![(0, 0), (0, 3), (3, 0), (3, 3)]);
    }

    #[test]
    fn test_beacon_period() {
        let mut grid = GridState::create(10, 10).unwrap();
        Pattern::Beacon.stamp(&mut grid, 3, 3);
        let start = grid.clone();

        LifeEngine::step(&mut grid);
        assert_ne!(grid, start);
        LifeEngine::step(&mut grid);
        assert_eq!(grid, start);
    }

    #[test]
    fn test_parse_pattern_name() {
        assert_eq!("Glider".parse::<Pattern>().unwrap(), Pattern::Glider);
        assert!("spaceship".parse::<Pattern>().is_err());
    }
}
