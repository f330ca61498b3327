//! The cooperative scheduler driving tick loops over time.
//!
//! `SimulationRunner` owns a [`SimulationMachine`] and performs all the I/O
//! the machine is not allowed to do: timers, yields, and the render hook.
//! Hosts steer a live run through a cloneable [`RunnerHandle`]; every
//! control takes effect at a tick boundary, never mid-tick.
//!
//! The future returned by [`SimulationRunner::run`] is the run's outcome
//! channel. A future resolves at most once, so double resolution is
//! impossible by construction; cancelling an already-finished run only
//! flips a flag nobody reads again.

use crate::config::{Controls, SimulationConfig};
use crate::machine::SimulationMachine;
use crate::pacing::{PacingPolicy, RenderThrottle, TickGap};
use parole_core::{NullRenderSink, Outcome, RenderSink};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Notify;
use tracing::{debug, info};

/// Flags shared between a running scheduler and its handles.
#[derive(Debug, Default)]
struct RunState {
    paused: AtomicBool,
    cancelled: AtomicBool,
    /// Pending single-tick requests issued while paused.
    step_credits: AtomicU64,
    /// Mirror of the machine's tick counter for host display.
    ticks: AtomicU64,
    wake: Notify,
}

/// Cloneable remote control for a live run.
///
/// All operations are safe to call at any time, from any task, any number
/// of times; they only flip atomics and wake the scheduler.
#[derive(Debug, Clone)]
pub struct RunnerHandle {
    state: Arc<RunState>,
}

impl RunnerHandle {
    /// Stop scheduling ticks once the current one completes. Idempotent.
    pub fn pause(&self) {
        self.state.paused.store(true, Ordering::SeqCst);
    }

    /// Resume tick scheduling. A no-op when not paused.
    pub fn resume(&self) {
        if self.state.paused.swap(false, Ordering::SeqCst) {
            self.state.wake.notify_one();
        }
    }

    /// While paused, execute exactly one tick and stay paused.
    ///
    /// Ignored when the run is not paused. Does not resolve the outcome
    /// unless that single tick happens to terminate the simulation.
    pub fn step(&self) {
        if self.state.paused.load(Ordering::SeqCst) {
            self.state.step_credits.fetch_add(1, Ordering::SeqCst);
            self.state.wake.notify_one();
        }
    }

    /// Stop the run permanently.
    ///
    /// The outcome resolves to [`Outcome::Cancelled`] if it has not resolved
    /// already; no further ticks execute afterwards.
    pub fn cancel(&self) {
        self.state.cancelled.store(true, Ordering::SeqCst);
        self.state.wake.notify_one();
    }

    /// Ticks executed so far.
    pub fn ticks(&self) -> u64 {
        self.state.ticks.load(Ordering::SeqCst)
    }

    /// Whether tick scheduling is currently paused.
    pub fn is_paused(&self) -> bool {
        self.state.paused.load(Ordering::SeqCst)
    }

    /// Whether the run has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.load(Ordering::SeqCst)
    }
}

/// Drives one simulation from its first tick to its outcome.
pub struct SimulationRunner {
    machine: SimulationMachine,
    controls: Arc<Controls>,
    render: Box<dyn RenderSink>,
    throttle: RenderThrottle,
    pacing: PacingPolicy,
    state: Arc<RunState>,
}

impl SimulationRunner {
    /// Build a runner with a freshly drawn permutation.
    pub fn new(config: &SimulationConfig, render: Box<dyn RenderSink>) -> Self {
        Self::from_machine(SimulationMachine::new(config), config.controls().clone(), render)
    }

    /// Build a runner that renders nowhere.
    pub fn headless(config: &SimulationConfig) -> Self {
        Self::new(config, Box::new(NullRenderSink))
    }

    /// Build a runner around an existing machine (fixed permutations,
    /// replays, tests).
    pub fn from_machine(
        machine: SimulationMachine,
        controls: Arc<Controls>,
        render: Box<dyn RenderSink>,
    ) -> Self {
        let pacing = PacingPolicy::for_population(machine.population());
        Self {
            machine,
            controls,
            render,
            throttle: RenderThrottle::default(),
            pacing,
            state: Arc::new(RunState::default()),
        }
    }

    /// A remote control for this run. Clone freely.
    pub fn handle(&self) -> RunnerHandle {
        RunnerHandle {
            state: Arc::clone(&self.state),
        }
    }

    /// Run to termination or cancellation.
    ///
    /// The returned future is the outcome channel: it resolves exactly once,
    /// on the tick that terminates the simulation or as soon as cancellation
    /// is observed. On cancellation the render surface is cleared.
    pub async fn run(mut self) -> Outcome {
        info!(
            population = self.machine.population(),
            strategy = self.machine.strategy_name(),
            attempt_limit = self.machine.attempt_limit(),
            "run started"
        );

        let outcome = loop {
            // Cancellation wins over everything, including pending steps.
            if self.state.cancelled.load(Ordering::SeqCst) {
                self.render.clear();
                debug!(ticks = self.machine.ticks(), "run cancelled");
                break Outcome::Cancelled;
            }

            if self.state.paused.load(Ordering::SeqCst) && !self.take_step_credit() {
                let wake = self.state.wake.notified();
                if self.parked() {
                    wake.await;
                }
                continue;
            }

            let phase = self.machine.tick();
            self.state
                .ticks
                .store(self.machine.ticks(), Ordering::SeqCst);

            self.maybe_render();

            if let Some(outcome) = phase.outcome() {
                break outcome;
            }

            match self.pacing.gap(self.machine.ticks(), self.controls.delay()) {
                TickGap::Sleep(delay) => tokio::time::sleep(delay).await,
                TickGap::Yield => tokio::task::yield_now().await,
            }
        };

        info!(%outcome, ticks = self.machine.ticks(), "run finished");
        outcome
    }

    /// Whether the scheduler should keep waiting: paused, not cancelled,
    /// and no step pending. Rechecked after registering for a wake-up so a
    /// control arriving in between is never missed.
    fn parked(&self) -> bool {
        self.state.paused.load(Ordering::SeqCst)
            && !self.state.cancelled.load(Ordering::SeqCst)
            && self.state.step_credits.load(Ordering::SeqCst) == 0
    }

    /// Consume one pending step request, if any.
    fn take_step_credit(&self) -> bool {
        self.state
            .step_credits
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |credits| {
                credits.checked_sub(1)
            })
            .is_ok()
    }

    /// Invoke the render hook if the throttle allows it. The snapshot is
    /// only built when it will actually be rendered.
    fn maybe_render(&mut self) {
        if !self.throttle.should_render(Instant::now()) {
            return;
        }
        let snapshot = self.machine.snapshot(
            self.controls.group_by_cycle(),
            self.controls.color_by_cycle(),
        );
        self.render.render(&snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parole_core::{StrategyKind, TickSnapshot};
    use parole_types::{Permutation, PrisonerStatus};
    use std::time::Duration;

    /// Render sink that records invocations for assertions.
    #[derive(Clone, Default)]
    struct RecordingSink {
        frames: Arc<AtomicU64>,
        cleared: Arc<AtomicBool>,
    }

    impl RenderSink for RecordingSink {
        fn render(&mut self, _snapshot: &TickSnapshot) {
            self.frames.fetch_add(1, Ordering::SeqCst);
        }

        fn clear(&mut self) {
            self.cleared.store(true, Ordering::SeqCst);
        }
    }

    fn fixed_runner(values: &[usize], strategy: StrategyKind) -> SimulationRunner {
        let config = SimulationConfig::new(values.len(), strategy)
            .unwrap()
            .with_seed(3);
        let permutation = Permutation::from_vec(values.to_vec()).unwrap();
        let machine = SimulationMachine::with_permutation(&config, permutation).unwrap();
        SimulationRunner::from_machine(
            machine,
            config.controls().clone(),
            Box::new(NullRenderSink),
        )
    }

    async fn wait_until(mut condition: impl FnMut() -> bool) {
        for _ in 0..500 {
            if condition() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        panic!("condition not reached within 1s");
    }

    #[tokio::test]
    async fn test_run_resolves_success() {
        let runner = fixed_runner(&[1, 0, 3, 2], StrategyKind::Optimal);
        let handle = runner.handle();

        let outcome = runner.run().await;

        assert_eq!(outcome, Outcome::Success);
        assert_eq!(handle.ticks(), 12);
    }

    #[tokio::test]
    async fn test_run_resolves_failure() {
        let runner = fixed_runner(&[1, 2, 3, 0], StrategyKind::Optimal);

        assert_eq!(runner.run().await, Outcome::Failure);
    }

    #[tokio::test]
    async fn test_cancel_resolves_cancelled_and_clears_surface() {
        let config = SimulationConfig::new(500, StrategyKind::Optimal)
            .unwrap()
            .with_seed(11);
        config.controls().set_delay(Duration::from_millis(2));
        let sink = RecordingSink::default();
        let cleared = sink.cleared.clone();
        let runner = SimulationRunner::new(&config, Box::new(sink));
        let handle = runner.handle();

        let task = tokio::spawn(runner.run());
        wait_until(|| handle.ticks() > 0).await;
        handle.cancel();

        assert_eq!(task.await.unwrap(), Outcome::Cancelled);
        assert!(cleared.load(Ordering::SeqCst), "cancel must clear the sink");

        // No further ticks are observable after cancellation.
        let ticks = handle.ticks();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(handle.ticks(), ticks);
    }

    #[tokio::test]
    async fn test_cancel_after_completion_is_a_noop() {
        let runner = fixed_runner(&[0], StrategyKind::Optimal);
        let handle = runner.handle();

        assert_eq!(runner.run().await, Outcome::Success);

        // The outcome already resolved; cancelling afterwards must neither
        // panic nor produce a second resolution.
        handle.cancel();
        handle.cancel();
        assert!(handle.is_cancelled());
    }

    #[tokio::test]
    async fn test_pause_is_idempotent_and_step_ticks_exactly_once() {
        let runner = fixed_runner(&[1, 0, 3, 2], StrategyKind::Optimal);
        let handle = runner.handle();

        handle.pause();
        handle.pause(); // double pause == single pause
        let task = tokio::spawn(runner.run());

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(handle.ticks(), 0, "paused runner must not tick");

        handle.step();
        wait_until(|| handle.ticks() == 1).await;
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(handle.ticks(), 1, "step must execute exactly one tick");
        assert!(handle.is_paused());

        handle.cancel();
        assert_eq!(task.await.unwrap(), Outcome::Cancelled);
    }

    #[tokio::test]
    async fn test_resume_continues_to_outcome() {
        let runner = fixed_runner(&[1, 0, 3, 2], StrategyKind::Optimal);
        let handle = runner.handle();

        handle.pause();
        let task = tokio::spawn(runner.run());
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(handle.ticks(), 0);

        handle.resume();
        handle.resume(); // no-op when already running

        assert_eq!(task.await.unwrap(), Outcome::Success);
        assert_eq!(handle.ticks(), 12);
    }

    #[tokio::test]
    async fn test_step_resolves_outcome_on_terminal_tick() {
        // The lone prisoner finishes in two ticks; stepping twice while
        // paused must resolve the run.
        let runner = fixed_runner(&[0], StrategyKind::Optimal);
        let handle = runner.handle();

        handle.pause();
        let mut task = tokio::spawn(runner.run());

        handle.step();
        wait_until(|| handle.ticks() == 1).await;
        let pending = tokio::time::timeout(Duration::from_millis(20), &mut task).await;
        assert!(pending.is_err(), "one step must not resolve a two-tick run");

        handle.step();
        let outcome = tokio::time::timeout(Duration::from_secs(1), &mut task)
            .await
            .expect("second step terminates the run")
            .unwrap();
        assert_eq!(outcome, Outcome::Success);
    }

    #[tokio::test]
    async fn test_step_while_running_is_ignored() {
        let runner = fixed_runner(&[1, 0, 3, 2], StrategyKind::Optimal);
        let handle = runner.handle();

        handle.step(); // not paused: must not bank a credit
        handle.pause();
        let task = tokio::spawn(runner.run());

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(handle.ticks(), 0, "banked step must not leak into pause");

        handle.cancel();
        assert_eq!(task.await.unwrap(), Outcome::Cancelled);
    }

    #[tokio::test]
    async fn test_snapshots_expose_status_groups_and_cycle_metadata() {
        /// Sink asserting snapshot invariants on every frame.
        struct CheckingSink {
            frames: Arc<AtomicU64>,
            population: usize,
        }

        impl RenderSink for CheckingSink {
            fn render(&mut self, snapshot: &TickSnapshot) {
                self.frames.fetch_add(1, Ordering::SeqCst);
                assert_eq!(snapshot.counts.total(), self.population);
                assert!(snapshot.counts.looking <= 1);
                assert_eq!(
                    snapshot.prisoners_with(PrisonerStatus::Prison).count(),
                    snapshot.counts.waiting
                );

                // Slots are a permutation of drawer positions.
                let mut slots: Vec<usize> =
                    snapshot.drawers.iter().map(|d| d.cycle_slot).collect();
                slots.sort_unstable();
                let expected: Vec<usize> = (0..self.population).collect();
                assert_eq!(slots, expected);

                for drawer in &snapshot.drawers {
                    assert_eq!(drawer.number.is_some(), drawer.is_seen);
                    assert!(!drawer.cycle_color.is_empty());
                }
            }

            fn clear(&mut self) {}
        }

        let frames = Arc::new(AtomicU64::new(0));
        let sink = CheckingSink {
            frames: frames.clone(),
            population: 4,
        };
        let config = SimulationConfig::new(4, StrategyKind::Optimal)
            .unwrap()
            .with_seed(17);
        let machine = SimulationMachine::with_permutation(
            &config,
            Permutation::from_vec(vec![1, 0, 3, 2]).unwrap(),
        )
        .unwrap();
        let runner =
            SimulationRunner::from_machine(machine, config.controls().clone(), Box::new(sink));

        assert_eq!(runner.run().await, Outcome::Success);
        assert!(frames.load(Ordering::SeqCst) >= 1, "at least one frame");
    }

    #[tokio::test]
    async fn test_renders_are_throttled_on_fast_runs() {
        // A long zero-delay run finishes in far less wall-clock time than
        // one render interval, so only the first frame can pass.
        let config = SimulationConfig::new(1000, StrategyKind::Optimal)
            .unwrap()
            .with_seed(2);
        let sink = RecordingSink::default();
        let frames = sink.frames.clone();
        let runner = SimulationRunner::new(&config, Box::new(sink));
        let handle = runner.handle();

        let outcome = runner.run().await;
        assert!(outcome.is_decided());

        let rendered = frames.load(Ordering::SeqCst);
        assert!(rendered >= 1, "first tick must render");
        assert!(
            rendered * 10 < handle.ticks(),
            "{} renders over {} ticks is unthrottled",
            rendered,
            handle.ticks()
        );
    }
}
