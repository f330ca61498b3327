//! The render hook.

use crate::TickSnapshot;

/// Receives throttled state snapshots from the scheduler.
///
/// The engine draws nothing itself; a collaborator owning the actual surface
/// implements this trait. The scheduler invokes it synchronously within the
/// tick, so at most one render is in flight at a time, and every call
/// reflects the state produced by the immediately preceding tick.
///
/// Sink failures are the collaborator's problem: the trait is infallible by
/// contract and the engine does not catch panics from it.
pub trait RenderSink: Send {
    /// Present a snapshot.
    fn render(&mut self, snapshot: &TickSnapshot);

    /// Release the rendering surface.
    ///
    /// Invoked when a run is cancelled so the surface does not keep showing
    /// a dead simulation.
    fn clear(&mut self);
}

/// A sink that draws nothing. The default for headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderSink;

impl RenderSink for NullRenderSink {
    fn render(&mut self, _snapshot: &TickSnapshot) {}

    fn clear(&mut self) {}
}
