//! Long-running host for the prisoners-problem simulation.
//!
//! The engine resolves one run at a time; this crate is the host loop around
//! it: run a configuration repeatedly, tally success/failure totals across
//! runs, and report aggregate statistics (success rate, ticks-per-run
//! distribution). The `parole-sim` binary is a thin clap wrapper around
//! [`Campaign`].
//!
//! # Example
//!
//! ```ignore
//! use parole_simulation::SimulationConfig;
//! use parole_simulator::Campaign;
//!
//! let config = SimulationConfig::from_name(100, "optimal")?.with_seed(1);
//! let report = Campaign::new(config, 10_000).run().await;
//!
//! println!("success rate: {:.2}%", report.tally().success_rate() * 100.0);
//! ```

mod campaign;
mod render;
mod tally;

pub use campaign::{Campaign, CampaignReport};
pub use render::LogRenderSink;
pub use tally::Tally;
