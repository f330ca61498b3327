//! Tick-driven simulation engine: state machine plus cooperative scheduler.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────┐
//! │                 SimulationRunner                   │
//! │     owns timing, pacing, and render-hook I/O       │
//! │                                                    │
//! │        ┌──────────────────────────────────┐        │
//! │        │        SimulationMachine         │        │
//! │        │   synchronous, deterministic,    │        │
//! │        │   one prisoner-step per tick     │        │
//! │        └──────────────────────────────────┘        │
//! └────────────────────────────────────────────────────┘
//!            ▲ RunnerHandle: pause / resume / step / cancel
//!            ▲ Controls: live delay + display toggles
//! ```
//!
//! The machine mutates entity state and nothing else; the runner performs
//! all I/O (timers, yields, the render hook) and resolves the run's
//! [`Outcome`](parole_core::Outcome) exactly once. Exactly one prisoner acts
//! per tick, suspension happens only at tick boundaries, and every render
//! reflects the state of the immediately preceding tick.

mod config;
mod machine;
mod pacing;
mod scheduler;

pub use config::{ConfigError, Controls, SimulationConfig, MAX_POPULATION, MIN_POPULATION};
pub use machine::{Phase, SimulationMachine};
pub use pacing::{PacingPolicy, RenderThrottle, TickGap, MAX_RENDER_FPS};
pub use scheduler::{RunnerHandle, SimulationRunner};
