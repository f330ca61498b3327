//! Drawer-selection strategies.
//!
//! A strategy answers one question: which drawer should the acting prisoner
//! open next? It is consulted only while the prisoner has attempts remaining
//! and their previously opened drawer (if any) did not contain their number.

use parole_types::{Drawer, DrawerId, Prisoner};
use rand::seq::SliceRandom;
use rand::RngCore;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Raised when parsing an unrecognized strategy identifier.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown strategy: {0}")]
pub struct UnknownStrategy(pub String);

/// Identifier for a built-in strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    /// Follow the permutation cycle containing the prisoner's own number.
    Optimal,
    /// Open unseen drawers uniformly at random.
    Random,
}

impl StrategyKind {
    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::Optimal => "optimal",
            StrategyKind::Random => "random",
        }
    }

    /// Instantiate the strategy behind this identifier.
    pub fn build(self) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Optimal => Box::new(OptimalStrategy),
            StrategyKind::Random => Box::new(RandomStrategy),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "optimal" => Ok(StrategyKind::Optimal),
            "random" => Ok(StrategyKind::Random),
            _ => Err(UnknownStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Picks the next drawer for the acting prisoner.
///
/// Implementations are stateless pure selectors: they never mutate the
/// cupboard or the prisoner, and any randomness comes from the generator the
/// machine passes in, so seeded runs stay reproducible.
pub trait Strategy: Send {
    /// Name for logs and reports.
    fn name(&self) -> &'static str;

    /// Select the next drawer to open.
    ///
    /// Returns `None` only when every drawer has already been seen this
    /// turn, which cannot happen while the prisoner has attempts remaining.
    fn select(
        &self,
        drawers: &[Drawer],
        prisoner: &Prisoner,
        rng: &mut dyn RngCore,
    ) -> Option<DrawerId>;
}

/// Follow the cycle containing the prisoner's own number.
///
/// The prisoner opens the drawer labelled with their own number first, then
/// keeps opening the drawer labelled with the number just found. Because the
/// permutation is fixed, the walk deterministically traverses the cycle that
/// contains the prisoner's number; it succeeds iff that cycle fits within
/// the attempt limit.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptimalStrategy;

impl Strategy for OptimalStrategy {
    fn name(&self) -> &'static str {
        "optimal"
    }

    fn select(
        &self,
        drawers: &[Drawer],
        prisoner: &Prisoner,
        _rng: &mut dyn RngCore,
    ) -> Option<DrawerId> {
        let next = match prisoner.last_opened() {
            None => prisoner.id().labelled_drawer(),
            Some(last) => drawers[last.index()].number().labelled_drawer(),
        };
        Some(next)
    }
}

/// Open unseen drawers uniformly at random.
///
/// Never re-selects a drawer already seen during the same turn.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomStrategy;

impl Strategy for RandomStrategy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn select(
        &self,
        drawers: &[Drawer],
        _prisoner: &Prisoner,
        rng: &mut dyn RngCore,
    ) -> Option<DrawerId> {
        let unseen: Vec<DrawerId> = drawers
            .iter()
            .filter(|drawer| !drawer.is_seen())
            .map(Drawer::id)
            .collect();
        unseen.choose(rng).copied()
    }
}
