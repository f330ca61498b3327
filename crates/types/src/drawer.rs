//! Drawer entities.

use crate::{DrawerId, Permutation, PrisonerId};

/// A numbered drawer hiding one prisoner identity.
///
/// `id` and `number` are fixed at creation; `is_seen` tracks whether the
/// currently acting prisoner has opened this drawer during their turn and is
/// reset for the whole roster whenever a new turn begins.
#[derive(Debug, Clone)]
pub struct Drawer {
    id: DrawerId,
    number: PrisonerId,
    seen: bool,
}

impl Drawer {
    /// Create a closed drawer hiding `number`.
    pub fn new(id: DrawerId, number: PrisonerId) -> Self {
        Self {
            id,
            number,
            seen: false,
        }
    }

    /// Build the full cupboard from a hidden assignment.
    pub fn roster(permutation: &Permutation) -> Vec<Drawer> {
        (0..permutation.len())
            .map(|position| Drawer::new(DrawerId(position), PrisonerId(permutation.image(position))))
            .collect()
    }

    /// The drawer's physical position.
    pub fn id(&self) -> DrawerId {
        self.id
    }

    /// The prisoner number hidden inside.
    pub fn number(&self) -> PrisonerId {
        self.number
    }

    /// Whether the acting prisoner has opened this drawer this turn.
    pub fn is_seen(&self) -> bool {
        self.seen
    }

    /// Record that the acting prisoner opened this drawer.
    pub fn mark_seen(&mut self) {
        self.seen = true;
    }

    /// Close the drawer again for the next prisoner's turn.
    pub fn reset_seen(&mut self) {
        self.seen = false;
    }
}
