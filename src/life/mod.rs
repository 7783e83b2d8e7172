//! Toroidal Game of Life core

pub mod engine;
pub mod grid;
pub mod io;
pub mod patterns;

pub use engine::{wrap, LifeEngine, PendingChange};
pub use grid::GridState;
pub use io::{create_example_grids, load_grid_from_file, save_grid_to_file, GridSnapshot};
pub use patterns::Pattern;
