//! Host-side driving of the simulation: timing, run state and focus handling

pub mod clock;
pub mod simulation;

pub use clock::StepClock;
pub use simulation::{RunState, Simulation};
