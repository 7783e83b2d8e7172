//! Pattern files and grid snapshots
//!
//! Text format: one line per row, '1' for alive and '0' for dead. Blank lines
//! and surrounding whitespace are ignored.

use super::{GridState, Pattern};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Load a grid from a text pattern file
pub fn load_grid_from_file<P: AsRef<Path>>(path: P) -> Result<GridState> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read grid file: {}", path.as_ref().display()))?;

    parse_grid_from_string(&content)
        .with_context(|| format!("Failed to parse grid from file: {}", path.as_ref().display()))
}

/// Parse a grid from its text representation
pub fn parse_grid_from_string(content: &str) -> Result<GridState> {
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        anyhow::bail!("Grid file is empty or contains no valid rows");
    }

    let mut rows = Vec::with_capacity(lines.len());
    for (y, line) in lines.iter().enumerate() {
        let row = line
            .chars()
            .enumerate()
            .map(|(x, ch)| match ch {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => anyhow::bail!(
                    "Invalid character '{}' at ({}, {}). Only '0' and '1' are allowed",
                    ch,
                    x,
                    y
                ),
            })
            .collect::<Result<Vec<bool>>>()?;
        rows.push(row);
    }

    Ok(GridState::from_rows(rows)?)
}

/// Save a grid to a text pattern file, creating parent directories
pub fn save_grid_to_file<P: AsRef<Path>>(grid: &GridState, path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, grid_to_string(grid))
        .with_context(|| format!("Failed to write grid to file: {}", path.as_ref().display()))?;

    log::debug!("Saved {}x{} grid to {}", grid.width(), grid.height(), path.as_ref().display());
    Ok(())
}

/// Convert a grid to its text representation
pub fn grid_to_string(grid: &GridState) -> String {
    let mut result = String::with_capacity(grid.height() * (grid.width() + 1));
    for row in grid.rows() {
        result.extend(row.iter().map(|&cell| if cell { '1' } else { '0' }));
        result.push('\n');
    }
    result
}

/// Write one pattern file per built-in pattern into `output_dir`
pub fn create_example_grids<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    for pattern in Pattern::ALL {
        // One dead cell of margin on every side
        let (w, h) = pattern.size();
        let mut grid = GridState::create(w as i64 + 2, h as i64 + 2)?;
        pattern.stamp(&mut grid, 1, 1);
        save_grid_to_file(&grid, dir.join(format!("{}.txt", pattern.name())))?;
    }

    Ok(())
}

/// JSON view of a grid at a given generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub generation: u64,
    pub width: usize,
    pub height: usize,
    pub living: usize,
    pub rows: Vec<String>,
}

impl GridSnapshot {
    pub fn capture(grid: &GridState, generation: u64) -> Self {
        Self {
            generation,
            width: grid.width(),
            height: grid.height(),
            living: grid.living_count(),
            rows: grid_to_string(grid).lines().map(str::to_owned).collect(),
        }
    }

    /// Rebuild the grid this snapshot was taken from
    pub fn to_grid(&self) -> Result<GridState> {
        parse_grid_from_string(&self.rows.join("\n"))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_grid_from_string() {
        let grid = parse_grid_from_string("010\n101\n010\n").unwrap();

        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.living_count(), 4);
        assert!(grid.is_alive(1, 0).unwrap());
        assert!(grid.is_alive(0, 1).unwrap());
        assert!(grid.is_alive(2, 1).unwrap());
        assert!(grid.is_alive(1, 2).unwrap());
    }

    #[test]
    fn test_grid_to_string() {
        let grid = GridState::from_rows(vec![
            vec![false, true, false, false],
            vec![true, false, true, true],
        ])
        .unwrap();
        assert_eq!(grid_to_string(&grid), "0100\n1011\n");
    }

    #[test]
    fn test_file_operations() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("nested/test_grid.txt");

        let mut original = GridState::create(5, 3).unwrap();
        original.set(4, 2, true).unwrap();
        original.set(0, 1, true).unwrap();

        save_grid_to_file(&original, &file_path).unwrap();
        let loaded = load_grid_from_file(&file_path).unwrap();
        assert_eq!(original, loaded);
    }

    #[test]
    fn test_invalid_input() {
        assert!(parse_grid_from_string("010\n1X1\n010\n").is_err());
        assert!(parse_grid_from_string("010\n11\n010\n").is_err());
        assert!(parse_grid_from_string("").is_err());
        assert!(parse_grid_from_string("\n  \n").is_err());
        assert!(load_grid_from_file("/nonexistent/grid.txt").is_err());
    }

    #[test]
    fn test_create_example_grids() {
        let temp_dir = tempdir().unwrap();
        create_example_grids(temp_dir.path()).unwrap();

        for pattern in Pattern::ALL {
            let path = temp_dir.path().join(format!("{}.txt", pattern.name()));
            let grid = load_grid_from_file(&path).unwrap();
            assert_eq!(grid.living_count(), pattern.cells().len());
        }

        let glider = load_grid_from_file(temp_dir.path().join("glider.txt")).unwrap();
        assert_eq!((glider.width(), glider.height()), (5, 5));
    }

    #[test]
    fn test_snapshot_json() {
        let grid = parse_grid_from_string("0110\n0000\n").unwrap();
        let snapshot = GridSnapshot::capture(&grid, 12);
        assert_eq!(snapshot.living, 2);
        assert_eq!(snapshot.rows, vec!["0110", "0000"]);

        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\"generation\": 12"));
        let restored = GridSnapshot::from_json(&json).unwrap();
        assert_eq!(restored.to_grid().unwrap(), grid);
    }
}
