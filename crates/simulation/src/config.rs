//! Run configuration and live host controls.

use parole_core::{StrategyKind, UnknownStrategy};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Smallest allowed population.
pub const MIN_POPULATION: usize = 1;

/// Largest allowed population.
pub const MAX_POPULATION: usize = 2000;

/// Errors rejecting a run configuration at construction.
///
/// A runner is only ever built from a validated config, so an invalid run
/// can never start.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Population outside `MIN_POPULATION..=MAX_POPULATION`.
    #[error("population size {0} out of bounds ({MIN_POPULATION}..={MAX_POPULATION})")]
    PopulationOutOfBounds(usize),

    /// Strategy identifier did not parse.
    #[error(transparent)]
    UnknownStrategy(#[from] UnknownStrategy),

    /// A supplied permutation does not cover the configured population.
    #[error("permutation covers {actual} drawers, expected {expected}")]
    PermutationLength {
        /// Configured population.
        expected: usize,
        /// Length of the supplied permutation.
        actual: usize,
    },
}

/// Live, host-mutable knobs shared with a running scheduler.
///
/// The host keeps one side of the `Arc` and may change values at any time
/// mid-run; the scheduler polls them at tick and render boundaries. Plain
/// atomics suffice: no invariant spans more than one field.
#[derive(Debug)]
pub struct Controls {
    /// Inter-tick delay in milliseconds. Zero means "as fast as possible".
    delay_ms: AtomicU64,
    /// Lay drawers out by cycle slot instead of physical position.
    group_by_cycle: AtomicBool,
    /// Tint drawers with their cycle color.
    color_by_cycle: AtomicBool,
}

impl Controls {
    /// Controls starting at the given inter-tick delay, toggles off.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay_ms: AtomicU64::new(delay.as_millis() as u64),
            group_by_cycle: AtomicBool::new(false),
            color_by_cycle: AtomicBool::new(false),
        }
    }

    /// Current inter-tick delay.
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms.load(Ordering::Relaxed))
    }

    /// Change the inter-tick delay; picked up at the next tick boundary.
    pub fn set_delay(&self, delay: Duration) {
        self.delay_ms.store(delay.as_millis() as u64, Ordering::Relaxed);
    }

    /// Whether drawers should be laid out by cycle slot.
    pub fn group_by_cycle(&self) -> bool {
        self.group_by_cycle.load(Ordering::Relaxed)
    }

    /// Toggle cycle-grouped layout.
    pub fn set_group_by_cycle(&self, on: bool) {
        self.group_by_cycle.store(on, Ordering::Relaxed);
    }

    /// Whether drawers should be tinted by cycle.
    pub fn color_by_cycle(&self) -> bool {
        self.color_by_cycle.load(Ordering::Relaxed)
    }

    /// Toggle cycle coloring.
    pub fn set_color_by_cycle(&self, on: bool) {
        self.color_by_cycle.store(on, Ordering::Relaxed);
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

/// Validated configuration for one simulation run.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    population: usize,
    strategy: StrategyKind,
    seed: Option<u64>,
    controls: Arc<Controls>,
}

impl SimulationConfig {
    /// Create a configuration, rejecting out-of-bounds populations.
    pub fn new(population: usize, strategy: StrategyKind) -> Result<Self, ConfigError> {
        if !(MIN_POPULATION..=MAX_POPULATION).contains(&population) {
            return Err(ConfigError::PopulationOutOfBounds(population));
        }
        Ok(Self {
            population,
            strategy,
            seed: None,
            controls: Arc::new(Controls::default()),
        })
    }

    /// Create a configuration from a strategy identifier string.
    pub fn from_name(population: usize, strategy: &str) -> Result<Self, ConfigError> {
        Self::new(population, strategy.parse()?)
    }

    /// Fix the RNG seed so the permutation and the random strategy's picks
    /// are reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Share an existing controls handle (e.g. one UI slider steering
    /// consecutive runs).
    pub fn with_controls(mut self, controls: Arc<Controls>) -> Self {
        self.controls = controls;
        self
    }

    /// Number of prisoners (and drawers).
    pub fn population(&self) -> usize {
        self.population
    }

    /// Selected strategy.
    pub fn strategy(&self) -> StrategyKind {
        self.strategy
    }

    /// Configured seed, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// The live controls handle.
    pub fn controls(&self) -> &Arc<Controls> {
        &self.controls
    }

    /// Maximum drawers a prisoner may open: half the population, rounded up
    /// so a lone prisoner still gets one attempt.
    pub fn attempt_limit(&self) -> usize {
        self.population.div_ceil(2)
    }
}
