//! Simulation host: owns the grid and decides when it advances

use super::StepClock;
use crate::config::Settings;
use crate::error::LifeError;
use crate::life::{GridState, LifeEngine};
use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

/// Shortest step interval accepted at runtime
pub const MIN_STEP_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Stopped,
}

/// A running Life simulation driven by host ticks
pub struct Simulation {
    grid: GridState,
    rng: StdRng,
    clock: StepClock,
    seed_probability: f64,
    generation: u64,
    state: RunState,
    /// Whether the simulation was running when focus was lost
    was_running: bool,
}

impl Simulation {
    /// Build a randomly seeded simulation from validated settings
    pub fn new(settings: &Settings) -> Result<Self> {
        settings.validate()?;

        let seed = settings.simulation.rng_seed.unwrap_or_else(rand::random);
        log::info!(
            "Seeding {}x{} grid with p={} (rng seed {})",
            settings.grid.width,
            settings.grid.height,
            settings.grid.seed_probability,
            seed
        );

        let mut rng = StdRng::seed_from_u64(seed);
        let mut grid = GridState::create(settings.grid.width, settings.grid.height)
            .context("Failed to create grid")?;
        grid.reseed(settings.grid.seed_probability, &mut rng)?;

        let state = if settings.simulation.start_running {
            RunState::Running
        } else {
            RunState::Stopped
        };

        Ok(Self {
            grid,
            rng,
            clock: StepClock::new(
                settings.simulation.step_interval(),
                settings.simulation.max_steps_per_tick,
            ),
            seed_probability: settings.grid.seed_probability,
            generation: 0,
            state,
            was_running: false,
        })
    }

    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn start(&mut self) {
        self.state = RunState::Running;
    }

    pub fn stop(&mut self) {
        self.state = RunState::Stopped;
    }

    pub fn toggle(&mut self) {
        match self.state {
            RunState::Running => self.stop(),
            RunState::Stopped => self.start(),
        }
        log::info!("Simulation {:?} at generation {}", self.state, self.generation);
    }

    /// Feed elapsed host time and advance as many generations as are due.
    ///
    /// Nothing accumulates while stopped.
    pub fn tick(&mut self, elapsed: Duration) -> u32 {
        if !self.is_running() {
            return 0;
        }
        let steps = self.clock.advance(elapsed);
        for _ in 0..steps {
            self.advance();
        }
        steps
    }

    /// Advance one generation by hand; only allowed while stopped
    pub fn manual_advance(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.advance();
        true
    }

    /// Focus lost: pause, remembering whether we were running
    pub fn suspend(&mut self) {
        self.was_running = self.is_running();
        self.stop();
    }

    /// Focus regained: resume if we were running before.
    ///
    /// Time spent unfocused never reaches the clock since ticks are ignored
    /// while stopped; the sub-interval backlog from before the suspend is kept.
    pub fn resume(&mut self) {
        if self.was_running {
            self.start();
        }
        self.was_running = false;
    }

    /// Apply new speed and seed settings: stops the simulation, then on valid
    /// input resets the generation counter and reseeds the grid.
    ///
    /// On rejection the simulation stays stopped and keeps its old settings.
    pub fn set_params(&mut self, interval: Duration, probability: f64) -> Result<(), LifeError> {
        self.stop();

        if interval < MIN_STEP_INTERVAL {
            return Err(LifeError::InvalidInterval {
                millis: interval.as_millis(),
                min_millis: MIN_STEP_INTERVAL.as_millis(),
            });
        }
        if !(0.0..=1.0).contains(&probability) {
            return Err(LifeError::InvalidProbability(probability));
        }

        self.clock.set_interval(interval);
        self.reseed(probability)?;
        log::info!("Step interval set to {:?}", interval);
        Ok(())
    }

    pub fn step_interval(&self) -> Duration {
        self.clock.interval()
    }

    pub fn seed_probability(&self) -> f64 {
        self.seed_probability
    }

    /// Re-randomize every cell with probability `probability`
    pub fn reseed(&mut self, probability: f64) -> Result<(), LifeError> {
        self.grid.reseed(probability, &mut self.rng)?;
        self.seed_probability = probability;
        self.generation = 0;
        log::info!("Reseeded with p={}, {} cells alive", probability, self.grid.living_count());
        Ok(())
    }

    /// Re-randomize with the current seed probability
    pub fn reseed_default(&mut self) {
        let probability = self.seed_probability;
        // Stored probability has already been validated
        if let Err(e) = self.reseed(probability) {
            log::error!("Reseed failed: {}", e);
        }
    }

    pub fn set_seed_probability(&mut self, probability: f64) -> Result<(), LifeError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(LifeError::InvalidProbability(probability));
        }
        self.seed_probability = probability;
        Ok(())
    }

    /// Replace the grid with a freshly seeded one of the given size
    pub fn resize(&mut self, width: i64, height: i64) -> Result<(), LifeError> {
        let mut grid = GridState::create(width, height)?;
        grid.reseed(self.seed_probability, &mut self.rng)?;
        self.load_grid(grid);
        Ok(())
    }

    /// Replace the grid wholesale, e.g. with a loaded pattern
    pub fn load_grid(&mut self, grid: GridState) {
        log::debug!("Loaded {}x{} grid", grid.width(), grid.height());
        self.grid = grid;
        self.generation = 0;
        self.clock.reset();
    }

    fn advance(&mut self) {
        LifeEngine::step(&mut self.grid);
        self.generation += 1;
    }
}
