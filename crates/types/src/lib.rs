//! Domain types for the hundred-prisoners simulation.
//!
//! Passive data holders and pure algorithms only: the drawer and prisoner
//! entities, the validated permutation hidden inside the cupboard, and the
//! cycle decomposition used to group and color drawers for display.
//!
//! Nothing in this crate performs I/O or keeps time. All mutation ordering
//! (turns, ticks, termination) lives in `parole-simulation`.

mod cycles;
mod drawer;
mod identifiers;
mod palette;
mod permutation;
mod prisoner;

pub use cycles::{decompose, CycleLayout, CyclePlacement};
pub use drawer::Drawer;
pub use identifiers::{DrawerId, PrisonerId};
pub use palette::{cycle_color, CYCLE_COLORS};
pub use permutation::{Permutation, PermutationError};
pub use prisoner::{Prisoner, PrisonerStatus};
