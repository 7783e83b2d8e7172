//! Toroidal Game of Life
//!
//! The core is [`life::GridState`], a dense boolean grid whose edges wrap
//! around, and [`life::LifeEngine`], which advances it one generation at a
//! time with a read-all-then-write-all update. The [`host`] module drives a
//! grid on a timer the way an interactive front end would.

pub mod config;
pub mod error;
pub mod host;
pub mod life;
pub mod utils;

pub use config::Settings;
pub use error::LifeError;
pub use host::Simulation;
pub use life::{GridState, LifeEngine};
