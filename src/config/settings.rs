//! Configuration settings for the toroidal Life simulation

use crate::host::simulation::MIN_STEP_INTERVAL;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub grid: GridConfig,
    pub simulation: SimulationConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub width: i64,
    pub height: i64,
    /// Chance for each cell to start alive when seeding
    pub seed_probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub step_interval_ms: u64,
    /// Upper bound on generations computed per host tick, to avoid runaway catch-up
    pub max_steps_per_tick: u32,
    /// Fixed seed for the random source; drawn from entropy when absent
    #[serde(default)]
    pub rng_seed: Option<u64>,
    pub start_running: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub output_directory: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
    Visual,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid: GridConfig {
                width: 40,
                height: 40,
                seed_probability: 0.1,
            },
            simulation: SimulationConfig {
                step_interval_ms: 100,
                max_steps_per_tick: 3,
                rng_seed: None,
                start_running: true,
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                output_directory: PathBuf::from("output/generations"),
            },
        }
    }
}

impl SimulationConfig {
    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_interval_ms)
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.grid.width <= 0 || self.grid.height <= 0 {
            anyhow::bail!(
                "Grid dimensions must be positive, got {}x{}",
                self.grid.width,
                self.grid.height
            );
        }

        if !(0.0..=1.0).contains(&self.grid.seed_probability) {
            anyhow::bail!(
                "Seed probability must be within [0, 1], got {}",
                self.grid.seed_probability
            );
        }

        if self.simulation.step_interval() < MIN_STEP_INTERVAL {
            anyhow::bail!(
                "Step interval must be at least {} ms, got {}",
                MIN_STEP_INTERVAL.as_millis(),
                self.simulation.step_interval_ms
            );
        }

        if self.simulation.max_steps_per_tick == 0 {
            anyhow::bail!("Maximum steps per tick must be positive");
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(width) = cli_overrides.width {
            self.grid.width = width;
        }
        if let Some(height) = cli_overrides.height {
            self.grid.height = height;
        }
        if let Some(probability) = cli_overrides.seed_probability {
            self.grid.seed_probability = probability;
        }
        if let Some(interval) = cli_overrides.step_interval_ms {
            self.simulation.step_interval_ms = interval;
        }
        if let Some(seed) = cli_overrides.rng_seed {
            self.simulation.rng_seed = Some(seed);
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub seed_probability: Option<f64>,
    pub step_interval_ms: Option<u64>,
    pub rng_seed: Option<u64>,
    pub output_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        settings.validate().unwrap();
        assert_eq!(settings.simulation.step_interval(), Duration::from_millis(100));
        assert_eq!(settings.simulation.max_steps_per_tick, 3);
    }

    #[test]
    fn test_yaml_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config/default.yaml");

        let mut settings = Settings::default();
        settings.simulation.rng_seed = Some(1234);
        settings.output.format = OutputFormat::Json;
        settings.to_file(&path).unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_seed_defaults_to_none() {
        let yaml = "
grid:
  width: 8
  height: 6
  seed_probability: 0.5
simulation:
  step_interval_ms: 50
  max_steps_per_tick: 2
  start_running: false
output:
  format: visual
  output_directory: out
";
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.simulation.rng_seed, None);
        assert_eq!(settings.output.format, OutputFormat::Visual);
        settings.validate().unwrap();
    }

    #[test]
    fn test_validation_failures() {
        let mut settings = Settings::default();
        settings.grid.width = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.grid.seed_probability = 1.01;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.simulation.max_steps_per_tick = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.simulation.step_interval_ms = 20;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_merge_with_cli() {
        let mut settings = Settings::default();
        settings.merge_with_cli(&CliOverrides {
            width: Some(12),
            rng_seed: Some(5),
            ..Default::default()
        });
        assert_eq!(settings.grid.width, 12);
        assert_eq!(settings.grid.height, 40);
        assert_eq!(settings.simulation.rng_seed, Some(5));
    }
}
