//! Domain-specific identifier types.

use std::fmt;

/// Drawer identifier: the drawer's physical position in the cupboard.
///
/// Stable for the lifetime of a run; drawers are never reordered, only
/// displayed in an alternate cycle-grouped layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DrawerId(pub usize);

impl DrawerId {
    /// Index into a drawer roster.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for DrawerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Drawer({})", self.0)
    }
}

/// Prisoner identifier: also the number the prisoner must find.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrisonerId(pub usize);

impl PrisonerId {
    /// The drawer whose label carries this number.
    ///
    /// Drawer labels and prisoner numbers share the same `0..N` space; the
    /// optimal strategy leans on this bridge to walk permutation cycles.
    pub fn labelled_drawer(self) -> DrawerId {
        DrawerId(self.0)
    }
}

impl fmt::Display for PrisonerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Prisoner({})", self.0)
    }
}
