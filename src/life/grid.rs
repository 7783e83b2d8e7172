//! Dense toroidal grid state

use crate::error::{LifeError, Result};
use itertools::iproduct;
use rand::Rng;
use std::fmt;

/// Live/dead state of every cell of a `width` x `height` torus.
///
/// Accessors are strict: they never wrap. Wrap-around is applied by the
/// caller (see [`crate::life::engine::wrap`]) before lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridState {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl GridState {
    /// Create an all-dead grid
    pub fn create(width: i64, height: i64) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(LifeError::InvalidDimension { width, height });
        }
        let invalid = || LifeError::InvalidDimension { width, height };
        let w = usize::try_from(width).map_err(|_| invalid())?;
        let h = usize::try_from(height).map_err(|_| invalid())?;
        let len = Self::cell_count(w, h).ok_or_else(invalid)?;
        Ok(Self {
            width: w,
            height: h,
            cells: vec![false; len],
        })
    }

    /// Create a grid from rows of cells, indexed `rows[y][x]`
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 || height == 0 {
            return Err(LifeError::InvalidDimension {
                width: width as i64,
                height: height as i64,
            });
        }

        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(LifeError::RaggedRow {
                    row: y,
                    len: row.len(),
                    expected: width,
                });
            }
        }

        if Self::cell_count(width, height).is_none() {
            return Err(LifeError::InvalidDimension {
                width: width as i64,
                height: height as i64,
            });
        }

        Ok(Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Number of cells for the given dimensions, `None` when it cannot be allocated
    fn cell_count(width: usize, height: usize) -> Option<usize> {
        width
            .checked_mul(height)
            .filter(|&len| len <= isize::MAX as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Independently set every cell alive with probability `probability`.
    ///
    /// The grid is left untouched when the probability is rejected.
    pub fn reseed<R: Rng + ?Sized>(&mut self, probability: f64, rng: &mut R) -> Result<()> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(LifeError::InvalidProbability(probability));
        }
        for cell in self.cells.iter_mut() {
            *cell = rng.gen_bool(probability);
        }
        Ok(())
    }

    pub fn is_alive(&self, x: usize, y: usize) -> Result<bool> {
        let idx = self.checked_index(x, y)?;
        Ok(self.cells[idx])
    }

    pub fn set(&mut self, x: usize, y: usize, alive: bool) -> Result<()> {
        let idx = self.checked_index(x, y)?;
        self.cells[idx] = alive;
        Ok(())
    }

    /// Unchecked read for callers that already hold in-range coordinates
    #[inline]
    pub(crate) fn alive_at(&self, x: usize, y: usize) -> bool {
        debug_assert!(x < self.width && y < self.height);
        self.cells[self.index(x, y)]
    }

    /// Unchecked write, the counterpart of `alive_at`
    #[inline]
    pub(crate) fn set_at(&mut self, x: usize, y: usize, alive: bool) {
        debug_assert!(x < self.width && y < self.height);
        let idx = self.index(x, y);
        self.cells[idx] = alive;
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    fn checked_index(&self, x: usize, y: usize) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(LifeError::OutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.index(x, y))
    }

    /// Coordinates `(x, y)` of every living cell, row by row
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        iproduct!(0..self.height, 0..self.width)
            .filter(|&(y, x)| self.alive_at(x, y))
            .map(|(y, x)| (x, y))
            .collect()
    }

    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Check if the grid has no living cells
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| !cell)
    }

    /// Rows of cells, indexed `[y][x]`
    pub fn rows(&self) -> Vec<Vec<bool>> {
        self.cells.chunks(self.width).map(<[bool]>::to_vec).collect()
    }
}

impl fmt::Display for GridState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            for &cell in row {
                write!(f, "{}", if cell { "⬛" } else { "⬜" })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_grid_creation() {
        let grid = GridState::create(4, 3).unwrap();
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert!(grid.is_empty());
        for (x, y) in iproduct!(0..4, 0..3) {
            assert!(!grid.is_alive(x, y).unwrap());
        }
    }

    #[test]
    fn test_invalid_dimensions() {
        assert_eq!(
            GridState::create(0, 5),
            Err(LifeError::InvalidDimension { width: 0, height: 5 })
        );
        assert_eq!(
            GridState::create(5, -1),
            Err(LifeError::InvalidDimension { width: 5, height: -1 })
        );
    }

    #[test]
    fn test_oversized_dimensions() {
        assert_eq!(
            GridState::create(1 << 32, 1 << 32),
            Err(LifeError::InvalidDimension { width: 1 << 32, height: 1 << 32 })
        );
        assert!(GridState::create(i64::MAX, 2).is_err());
        assert_eq!(GridState::cell_count(usize::MAX, 2), None);
        assert_eq!(GridState::cell_count(usize::MAX / 4, 4), None);
        assert_eq!(GridState::cell_count(7, 3), Some(21));
    }

    #[test]
    fn test_accessors_are_strict() {
        let mut grid = GridState::create(3, 2).unwrap();
        grid.set(2, 1, true).unwrap();
        assert!(grid.is_alive(2, 1).unwrap());
        assert_eq!(grid.living_cells(), vec![(2, 1)]);

        assert!(matches!(grid.is_alive(3, 0), Err(LifeError::OutOfRange { .. })));
        assert!(matches!(grid.is_alive(0, 2), Err(LifeError::OutOfRange { .. })));
        assert!(matches!(grid.set(3, 1, true), Err(LifeError::OutOfRange { .. })));
        assert_eq!(grid.living_count(), 1);
    }

    #[test]
    fn test_from_rows() {
        let grid = GridState::from_rows(vec![
            vec![true, false, true],
            vec![false, true, false],
        ])
        .unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert!(grid.is_alive(2, 0).unwrap());
        assert!(grid.is_alive(1, 1).unwrap());
        assert_eq!(grid.living_count(), 3);

        assert!(GridState::from_rows(vec![]).is_err());
        assert!(matches!(
            GridState::from_rows(vec![vec![true, false], vec![true]]),
            Err(LifeError::RaggedRow { row: 1, len: 1, expected: 2 })
        ));
    }

    #[test]
    fn test_reseed_extremes() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut grid = GridState::create(13, 9).unwrap();

        grid.reseed(1.0, &mut rng).unwrap();
        assert_eq!(grid.living_count(), 13 * 9);

        grid.reseed(0.0, &mut rng).unwrap();
        assert!(grid.is_empty());
    }

    #[test]
    fn test_reseed_is_deterministic() {
        let mut a = GridState::create(20, 20).unwrap();
        let mut b = GridState::create(20, 20).unwrap();
        a.reseed(0.3, &mut StdRng::seed_from_u64(42)).unwrap();
        b.reseed(0.3, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
        assert!(!a.is_empty());
    }

    #[test]
    fn test_reseed_rejects_bad_probability() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut grid = GridState::create(2, 2).unwrap();
        grid.set(0, 0, true).unwrap();

        assert_eq!(
            grid.reseed(1.5, &mut rng),
            Err(LifeError::InvalidProbability(1.5))
        );
        assert!(grid.reseed(-0.1, &mut rng).is_err());
        assert!(grid.reseed(f64::NAN, &mut rng).is_err());
        assert_eq!(grid.living_cells(), vec![(0, 0)]);
    }
}
