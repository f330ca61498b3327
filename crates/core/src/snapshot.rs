//! Read-only per-tick projections for render collaborators.
//!
//! There is exactly one authoritative state machine per run; everything a
//! collaborator sees is a detached copy derived from it after a tick. The
//! engine never reads a snapshot back, so views can never diverge from the
//! machine the way parallel per-view state would.

use parole_types::{CycleLayout, Drawer, DrawerId, Prisoner, PrisonerId, PrisonerStatus};

/// One drawer as a render collaborator may see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawerView {
    /// Physical position in the cupboard.
    pub id: DrawerId,
    /// The hidden number, exposed only while the drawer is open this turn.
    pub number: Option<PrisonerId>,
    /// Whether the acting prisoner has opened this drawer this turn.
    pub is_seen: bool,
    /// Display color of the drawer's cycle.
    pub cycle_color: &'static str,
    /// Position in the cycle-grouped alternate layout.
    pub cycle_slot: usize,
}

/// One prisoner as a render collaborator may see them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrisonerView {
    /// The prisoner's number.
    pub id: PrisonerId,
    /// Current status.
    pub status: PrisonerStatus,
    /// Drawers opened during their turn so far.
    pub opened_count: usize,
}

/// Population counts per status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCounts {
    /// Prisoners still waiting in their cells.
    pub waiting: usize,
    /// Prisoners currently at the cupboard (0 or 1).
    pub looking: usize,
    /// Prisoners who found their number.
    pub free: usize,
    /// Prisoners who exhausted their attempts.
    pub failed: usize,
}

impl StatusCounts {
    /// Count a prisoner roster by status.
    pub fn tally(prisoners: &[Prisoner]) -> Self {
        let mut counts = StatusCounts::default();
        for prisoner in prisoners {
            match prisoner.status() {
                PrisonerStatus::Prison => counts.waiting += 1,
                PrisonerStatus::Looking => counts.looking += 1,
                PrisonerStatus::Free => counts.free += 1,
                PrisonerStatus::Failed => counts.failed += 1,
            }
        }
        counts
    }

    /// Total population.
    pub fn total(&self) -> usize {
        self.waiting + self.looking + self.free + self.failed
    }
}

/// Immutable state snapshot handed to the render hook after a tick.
#[derive(Debug, Clone)]
pub struct TickSnapshot {
    /// The tick that produced this state.
    pub tick: u64,
    /// All drawers in physical order.
    pub drawers: Vec<DrawerView>,
    /// All prisoners in id order.
    pub prisoners: Vec<PrisonerView>,
    /// Population counts per status.
    pub counts: StatusCounts,
    /// Host wants drawers laid out by cycle slot rather than position.
    pub group_by_cycle: bool,
    /// Host wants drawers tinted with their cycle color.
    pub color_by_cycle: bool,
}

impl TickSnapshot {
    /// Project engine state into a detached snapshot.
    pub fn capture(
        tick: u64,
        drawers: &[Drawer],
        prisoners: &[Prisoner],
        layout: &CycleLayout,
        group_by_cycle: bool,
        color_by_cycle: bool,
    ) -> Self {
        let drawers = drawers
            .iter()
            .map(|drawer| DrawerView {
                id: drawer.id(),
                number: drawer.is_seen().then(|| drawer.number()),
                is_seen: drawer.is_seen(),
                cycle_color: layout.color(drawer.id()),
                cycle_slot: layout.placement(drawer.id()).slot,
            })
            .collect();

        let counts = StatusCounts::tally(prisoners);
        let prisoners = prisoners
            .iter()
            .map(|prisoner| PrisonerView {
                id: prisoner.id(),
                status: prisoner.status(),
                opened_count: prisoner.opened_count(),
            })
            .collect();

        Self {
            tick,
            drawers,
            prisoners,
            counts,
            group_by_cycle,
            color_by_cycle,
        }
    }

    /// Prisoners currently in the given status, in id order.
    pub fn prisoners_with(&self, status: PrisonerStatus) -> impl Iterator<Item = &PrisonerView> {
        self.prisoners.iter().filter(move |p| p.status == status)
    }
}
