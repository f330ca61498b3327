//! Render collaborators for headless hosts.

use parole_core::{RenderSink, TickSnapshot};
use tracing::debug;

/// Renders frames as structured log lines.
///
/// Stands in for a drawing surface when the host is a terminal. Frames
/// arrive already throttled by the scheduler, so this logs at most a few
/// dozen lines per second regardless of tick rate.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogRenderSink;

impl RenderSink for LogRenderSink {
    fn render(&mut self, snapshot: &TickSnapshot) {
        debug!(
            tick = snapshot.tick,
            waiting = snapshot.counts.waiting,
            looking = snapshot.counts.looking,
            free = snapshot.counts.free,
            failed = snapshot.counts.failed,
            "frame"
        );
    }

    fn clear(&mut self) {
        debug!("surface cleared");
    }
}
