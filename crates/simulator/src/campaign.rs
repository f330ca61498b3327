//! Repeated-run campaigns with aggregate statistics.

use crate::Tally;
use hdrhistogram::Histogram;
use parole_core::{NullRenderSink, RenderSink};
use parole_simulation::{SimulationConfig, SimulationRunner};
use tracing::{debug, info, warn};

/// Aggregate results of a campaign.
pub struct CampaignReport {
    tally: Tally,
    /// Ticks per decided run.
    ticks: Histogram<u64>,
}

impl CampaignReport {
    fn new() -> Self {
        Self {
            tally: Tally::new(),
            ticks: Histogram::new(3).expect("3 significant figures is always valid"),
        }
    }

    fn record(&mut self, ticks: u64) {
        if let Err(err) = self.ticks.record(ticks) {
            warn!(ticks, %err, "dropping tick sample");
        }
    }

    /// Outcome totals.
    pub fn tally(&self) -> Tally {
        self.tally
    }

    /// Median ticks per decided run.
    pub fn median_ticks(&self) -> u64 {
        self.ticks.value_at_quantile(0.5)
    }

    /// 99th-percentile ticks per decided run.
    pub fn p99_ticks(&self) -> u64 {
        self.ticks.value_at_quantile(0.99)
    }

    /// Slowest decided run, in ticks.
    pub fn max_ticks(&self) -> u64 {
        self.ticks.max()
    }

    /// Print a human-readable summary to stdout.
    pub fn print(&self) {
        println!("runs:         {}", self.tally.total);
        println!("successes:    {}", self.tally.success);
        println!("failures:     {}", self.tally.failure);
        println!(
            "success rate: {:.2}%",
            self.tally.success_rate() * 100.0
        );
        if self.tally.total > 0 {
            println!(
                "ticks/run:    p50 {}  p99 {}  max {}",
                self.median_ticks(),
                self.p99_ticks(),
                self.max_ticks()
            );
        }
    }
}

/// Runs one configuration repeatedly and aggregates the results.
///
/// Runs are strictly sequential: exactly one simulation instance exists at
/// a time, matching the engine's single-run design.
pub struct Campaign {
    config: SimulationConfig,
    runs: u64,
}

impl Campaign {
    /// A campaign of `runs` repetitions of `config`.
    pub fn new(config: SimulationConfig, runs: u64) -> Self {
        Self { config, runs }
    }

    /// Run the whole campaign headless.
    pub async fn run(&self) -> CampaignReport {
        self.run_with(|| Box::new(NullRenderSink)).await
    }

    /// Run the whole campaign, building a fresh render sink per run.
    ///
    /// When the campaign was seeded, each run derives its own seed from the
    /// base seed and the run index, so a campaign is reproducible while its
    /// runs still draw distinct permutations.
    pub async fn run_with<F>(&self, mut make_sink: F) -> CampaignReport
    where
        F: FnMut() -> Box<dyn RenderSink>,
    {
        info!(
            population = self.config.population(),
            strategy = %self.config.strategy(),
            runs = self.runs,
            "campaign started"
        );

        let mut report = CampaignReport::new();
        for index in 0..self.runs {
            let config = match self.config.seed() {
                Some(seed) => self.config.clone().with_seed(seed.wrapping_add(index)),
                None => self.config.clone(),
            };

            let runner = SimulationRunner::new(&config, make_sink());
            let handle = runner.handle();
            let outcome = runner.run().await;

            if report.tally.record(outcome) {
                report.record(handle.ticks());
            }
            debug!(run = index, %outcome, ticks = handle.ticks(), "run recorded");
        }

        info!(
            successes = report.tally.success,
            failures = report.tally.failure,
            "campaign finished"
        );
        report
    }
}
