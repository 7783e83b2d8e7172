//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::life::io::grid_to_string;
use crate::life::{GridSnapshot, GridState};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Format grids for terminal output
pub struct GridFormatter;

impl GridFormatter {
    /// Format a grid in compact form
    pub fn format_grid_compact(grid: &GridState) -> String {
        let mut output = String::with_capacity(grid.height() * (grid.width() + 1));
        for row in grid.rows() {
            output.extend(row.iter().map(|&cell| if cell { '█' } else { '·' }));
            output.push('\n');
        }
        output
    }

    /// Format a grid with coordinates
    pub fn format_grid_with_coords(grid: &GridState) -> String {
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for x in 0..grid.width() {
            output.push_str(&format!("{:2}", x % 10));
        }
        output.push('\n');

        for (y, row) in grid.rows().iter().enumerate() {
            output.push_str(&format!("{:2} ", y));
            for &cell in row {
                output.push_str(if cell { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// A single animation frame with a generation header
    pub fn format_frame(grid: &GridState, generation: u64) -> String {
        format!(
            "Generation {} (Living: {})\n{}",
            generation,
            grid.living_count(),
            Self::format_grid_compact(grid)
        )
    }

    /// Save a grid at a given generation in the requested format, returning the written path
    pub fn save_generation<P: AsRef<Path>>(
        grid: &GridState,
        generation: u64,
        output_dir: P,
        format: OutputFormat,
    ) -> Result<PathBuf> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

        let (filename, content) = match format {
            OutputFormat::Text => (
                format!("generation_{:05}.txt", generation),
                grid_to_string(grid),
            ),
            OutputFormat::Json => (
                format!("generation_{:05}.json", generation),
                GridSnapshot::capture(grid, generation).to_json()?,
            ),
            OutputFormat::Visual => (
                format!("generation_{:05}_visual.txt", generation),
                format!(
                    "Generation {} (Living: {}):\n{}",
                    generation,
                    grid.living_count(),
                    Self::format_grid_with_coords(grid)
                ),
            ),
        };

        let path = output_dir.join(filename);
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::life::io::parse_grid_from_string;
    use tempfile::tempdir;

    #[test]
    fn test_grid_formatting() {
        let grid = parse_grid_from_string("101\n010\n101\n").unwrap();

        let compact = GridFormatter::format_grid_compact(&grid);
        assert_eq!(compact, "█·█\n·█·\n█·█\n");

        let with_coords = GridFormatter::format_grid_with_coords(&grid);
        assert!(with_coords.contains(" 0 1 2"));

        let frame = GridFormatter::format_frame(&grid, 4);
        assert!(frame.starts_with("Generation 4 (Living: 5)"));
    }

    #[test]
    fn test_save_generation_formats() {
        let temp_dir = tempdir().unwrap();
        let grid = parse_grid_from_string("010\n010\n").unwrap();

        let text = GridFormatter::save_generation(&grid, 3, temp_dir.path(), OutputFormat::Text).unwrap();
        assert_eq!(std::fs::read_to_string(text).unwrap(), "010\n010\n");

        let json = GridFormatter::save_generation(&grid, 3, temp_dir.path(), OutputFormat::Json).unwrap();
        let snapshot = GridSnapshot::from_json(&std::fs::read_to_string(json).unwrap()).unwrap();
        assert_eq!(snapshot.generation, 3);
        assert_eq!(snapshot.to_grid().unwrap(), grid);

        let visual = GridFormatter::save_generation(&grid, 3, temp_dir.path(), OutputFormat::Visual).unwrap();
        assert!(visual.ends_with("generation_00003_visual.txt"));
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Red);
        assert!(colored.contains("test"));
        assert!(ColorOutput::success("OK").contains("OK"));
    }
}
