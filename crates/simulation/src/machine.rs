//! The tick-driven simulation state machine.
//!
//! Synchronous, deterministic, and free of I/O: given the same permutation,
//! strategy, and RNG seed, a sequence of ticks always produces the same
//! transitions. The scheduler owns all timing and rendering.
//!
//! One tick advances the acting prisoner by exactly one step. Opening a
//! drawer and evaluating its content are separate ticks by design: a find
//! registers on the tick *after* the drawer was opened, which paces the
//! animation one drawer per frame. This off-by-one is intentional; do not
//! collapse the two steps.

use crate::config::{ConfigError, SimulationConfig};
use parole_core::{Outcome, Strategy, TickSnapshot};
use parole_types::{CycleLayout, Drawer, Permutation, Prisoner, PrisonerId, PrisonerStatus};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Global run phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// At least one prisoner can still act.
    Running,
    /// Every prisoner walked out free.
    Succeeded,
    /// Some prisoner exhausted their attempts; the cohort fails together.
    Failed,
}

impl Phase {
    /// True once no further tick can change the run.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Phase::Running)
    }

    /// The outcome a terminal phase resolves to.
    pub fn outcome(self) -> Option<Outcome> {
        match self {
            Phase::Running => None,
            Phase::Succeeded => Some(Outcome::Success),
            Phase::Failed => Some(Outcome::Failure),
        }
    }
}

/// Owns the prisoners, the cupboard, the strategy, and the cycle metadata
/// for exactly one run.
///
/// All entities are created together at construction and discarded with the
/// machine; nothing survives across runs.
pub struct SimulationMachine {
    drawers: Vec<Drawer>,
    prisoners: Vec<Prisoner>,
    strategy: Box<dyn Strategy>,
    /// Computed once from the initial permutation, which never changes.
    layout: CycleLayout,
    attempt_limit: usize,
    phase: Phase,
    tick: u64,
    rng: ChaCha8Rng,
}

impl SimulationMachine {
    /// Build a machine with a freshly drawn permutation.
    pub fn new(config: &SimulationConfig) -> Self {
        let mut rng = match config.seed() {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let permutation = Permutation::random(config.population(), &mut rng);
        Self::build(config, permutation, rng)
    }

    /// Build a machine over a fixed permutation.
    ///
    /// Used for deterministic scenarios and replays; the permutation must
    /// cover exactly the configured population.
    pub fn with_permutation(
        config: &SimulationConfig,
        permutation: Permutation,
    ) -> Result<Self, ConfigError> {
        if permutation.len() != config.population() {
            return Err(ConfigError::PermutationLength {
                expected: config.population(),
                actual: permutation.len(),
            });
        }
        let rng = match config.seed() {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Ok(Self::build(config, permutation, rng))
    }

    fn build(config: &SimulationConfig, permutation: Permutation, rng: ChaCha8Rng) -> Self {
        Self {
            drawers: Drawer::roster(&permutation),
            prisoners: (0..config.population())
                .map(|id| Prisoner::new(PrisonerId(id)))
                .collect(),
            strategy: config.strategy().build(),
            layout: CycleLayout::new(&permutation),
            attempt_limit: config.attempt_limit(),
            phase: Phase::Running,
            tick: 0,
            rng,
        }
    }

    /// Advance the simulation by one tick.
    ///
    /// A terminal machine ignores further ticks and keeps reporting its
    /// final phase.
    pub fn tick(&mut self) -> Phase {
        if self.phase.is_terminal() {
            return self.phase;
        }
        self.tick += 1;

        // With nobody left to act the tick is a no-op; the evaluation below
        // settles the final phase.
        if let Some(index) = self.acting_or_promote() {
            self.advance_prisoner(index);
        }

        self.phase = self.evaluate();
        self.phase
    }

    /// The prisoner who should act this tick: the one already looking, or
    /// the next waiting prisoner by ascending id, promoted into a new turn.
    fn acting_or_promote(&mut self) -> Option<usize> {
        if let Some(index) = self
            .prisoners
            .iter()
            .position(|p| p.status() == PrisonerStatus::Looking)
        {
            return Some(index);
        }

        let index = self
            .prisoners
            .iter()
            .position(|p| p.status() == PrisonerStatus::Prison)?;

        // New turn: the cupboard closes for the next prisoner.
        for drawer in &mut self.drawers {
            drawer.reset_seen();
        }
        self.prisoners[index].begin_looking();
        debug!(prisoner = %self.prisoners[index].id(), "turn started");
        Some(index)
    }

    /// One step for the acting prisoner: evaluate the previously opened
    /// drawer, fail on exhausted attempts, or open the next drawer.
    fn advance_prisoner(&mut self, index: usize) {
        let prisoner = &self.prisoners[index];

        if let Some(last) = prisoner.last_opened() {
            if self.drawers[last.index()].number() == prisoner.id() {
                let opened = prisoner.opened_count();
                self.prisoners[index].release();
                debug!(
                    prisoner = %self.prisoners[index].id(),
                    opened,
                    "prisoner found their number"
                );
                return;
            }
        }

        if prisoner.opened_count() >= self.attempt_limit {
            self.prisoners[index].fail();
            debug!(
                prisoner = %self.prisoners[index].id(),
                attempts = self.attempt_limit,
                "prisoner out of attempts"
            );
            return;
        }

        match self
            .strategy
            .select(&self.drawers, &self.prisoners[index], &mut self.rng)
        {
            Some(next) => {
                self.drawers[next.index()].mark_seen();
                self.prisoners[index].record_open(next);
            }
            None => {
                // Cupboard exhausted: nothing left to open.
                self.prisoners[index].fail();
            }
        }
    }

    /// Settle the global phase: any failure sinks the whole cohort; success
    /// requires every prisoner free.
    fn evaluate(&self) -> Phase {
        if self
            .prisoners
            .iter()
            .any(|p| p.status() == PrisonerStatus::Failed)
        {
            return Phase::Failed;
        }
        if self
            .prisoners
            .iter()
            .all(|p| p.status() == PrisonerStatus::Free)
        {
            return Phase::Succeeded;
        }
        Phase::Running
    }

    /// Current global phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Ticks executed so far.
    pub fn ticks(&self) -> u64 {
        self.tick
    }

    /// Number of prisoners (and drawers).
    pub fn population(&self) -> usize {
        self.prisoners.len()
    }

    /// Maximum drawers one prisoner may open.
    pub fn attempt_limit(&self) -> usize {
        self.attempt_limit
    }

    /// Name of the strategy in play.
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Cycle metadata for the run's permutation.
    pub fn layout(&self) -> &CycleLayout {
        &self.layout
    }

    /// The cupboard, in physical order.
    pub fn drawers(&self) -> &[Drawer] {
        &self.drawers
    }

    /// The prisoner roster, in id order.
    pub fn prisoners(&self) -> &[Prisoner] {
        &self.prisoners
    }

    /// Project the current state for the render hook.
    pub fn snapshot(&self, group_by_cycle: bool, color_by_cycle: bool) -> TickSnapshot {
        TickSnapshot::capture(
            self.tick,
            &self.drawers,
            &self.prisoners,
            &self.layout,
            group_by_cycle,
            color_by_cycle,
        )
    }
}
