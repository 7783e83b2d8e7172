//! Configuration management for the simulation host

pub mod settings;

pub use settings::{CliOverrides, GridConfig, OutputConfig, OutputFormat, Settings, SimulationConfig};
