//! Seams between the simulation engine and its collaborators.
//!
//! This crate keeps the engine honest about I/O, in the same way the rest of
//! the workspace separates state machines from runners:
//!
//! - **Strategies** are stateless pure selectors ([`Strategy`]); any
//!   randomness comes from a generator passed in by the machine.
//! - **Rendering** goes through the [`RenderSink`] hook; the engine owns no
//!   pixels and hands collaborators detached [`TickSnapshot`] projections.
//! - **Hosts** observe a run only through those snapshots and the final
//!   [`Outcome`].

mod outcome;
mod sink;
mod snapshot;
mod strategy;

pub use outcome::Outcome;
pub use sink::{NullRenderSink, RenderSink};
pub use snapshot::{DrawerView, PrisonerView, StatusCounts, TickSnapshot};
pub use strategy::{OptimalStrategy, RandomStrategy, Strategy, StrategyKind, UnknownStrategy};
