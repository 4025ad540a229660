//! Integration tests for the simulation loop.

use rtl_harness::common::{ClockSignal, Result, SimError};
use rtl_harness::config::{CoverageConfig, GeneralConfig};
use rtl_harness::dut::DeviceModel;
use rtl_harness::sim::{LoopState, SimulationContext, SimulationLoop};

/// Model that records every interaction and finishes after a fixed number
/// of evaluations.
#[derive(Default)]
struct RecordingModel {
    finish_after: usize,
    clock: ClockSignal,
    clock_writes: Vec<ClockSignal>,
    eval_clocks: Vec<ClockSignal>,
    eval_times: Vec<u64>,
    finalize_calls: usize,
    fail_at: Option<usize>,
}

impl RecordingModel {
    fn finishing_after(evaluations: usize) -> Self {
        Self {
            finish_after: evaluations,
            ..Default::default()
        }
    }
}

impl DeviceModel for RecordingModel {
    fn name(&self) -> &str {
        "recording"
    }

    fn set_clock(&mut self, level: ClockSignal) {
        self.clock = level;
        self.clock_writes.push(level);
    }

    fn evaluate(&mut self, ctx: &mut SimulationContext) -> Result<()> {
        self.eval_clocks.push(self.clock);
        self.eval_times.push(ctx.time());
        if self.fail_at == Some(self.eval_times.len()) {
            return Err(SimError::assertion(ctx.time(), "injected failure"));
        }
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        self.finalize_calls += 1;
        Ok(())
    }

    fn finished(&self) -> bool {
        self.eval_times.len() >= self.finish_after
    }
}

fn context() -> SimulationContext {
    let coverage = CoverageConfig { enabled: false };
    SimulationContext::initialize(&GeneralConfig::default(), &coverage, Vec::new()).unwrap()
}

/// Tests that a new loop starts running with the clock driven low.
#[test]
fn test_loop_starts_running_with_clock_low() {
    let sim = SimulationLoop::new(context(), RecordingModel::finishing_after(4));

    assert_eq!(sim.state(), LoopState::Running);
    assert_eq!(sim.clock_level(), ClockSignal::Low);
    assert_eq!(sim.model().clock_writes, vec![ClockSignal::Low]);
    assert_eq!(sim.context().time(), 0);
}

/// Tests that the clock strictly alternates and the first tick drives high.
#[test]
fn test_clock_alternates_every_tick() {
    let mut sim = SimulationLoop::new(context(), RecordingModel::finishing_after(9));
    sim.run().unwrap();

    let clocks = &sim.model().eval_clocks;
    assert_eq!(clocks.len(), 9);
    assert_eq!(clocks[0], ClockSignal::High);
    for pair in clocks.windows(2) {
        assert_ne!(pair[0], pair[1]);
    }
}

/// Tests that every evaluation sees time advanced by exactly one.
#[test]
fn test_time_advances_by_one_per_tick() {
    let mut sim = SimulationLoop::new(context(), RecordingModel::finishing_after(25));
    sim.run().unwrap();

    let expected: Vec<u64> = (1..=25).collect();
    assert_eq!(sim.model().eval_times, expected);
    assert_eq!(sim.context().time(), 25);
}

/// Tests the 100-evaluation scenario end to end.
#[test]
fn test_hundred_evaluation_run() {
    let mut sim = SimulationLoop::new(context(), RecordingModel::finishing_after(100));
    let stats = sim.run().unwrap();

    assert_eq!(stats.ticks, 100);
    assert_eq!(stats.cycles, 50);
    assert_eq!(stats.sim_time, 100);
    assert!(stats.finished);
    assert_eq!(sim.context().time(), 100);
    assert_eq!(sim.model().finalize_calls, 1);

    for (i, level) in sim.model().eval_clocks.iter().enumerate() {
        let expected = if i % 2 == 0 {
            ClockSignal::High
        } else {
            ClockSignal::Low
        };
        assert_eq!(*level, expected, "tick {}", i + 1);
    }
}

/// Tests that nothing happens after the stop, however often step is called.
#[test]
fn test_no_work_after_stop() {
    let mut sim = SimulationLoop::new(context(), RecordingModel::finishing_after(3));
    sim.run().unwrap();

    for _ in 0..10 {
        assert_eq!(sim.step().unwrap(), LoopState::Stopped);
    }

    let model = sim.model();
    assert_eq!(model.eval_times.len(), 3);
    assert_eq!(model.clock_writes.len(), 4);
    assert_eq!(model.finalize_calls, 1);
    assert_eq!(sim.context().time(), 3);
    assert_eq!(sim.clock().edges(), 3);
}

/// Tests that the stop check happens before the tick's work.
#[test]
fn test_stop_checked_before_tick() {
    let mut sim = SimulationLoop::new(context(), RecordingModel::finishing_after(2));

    assert_eq!(sim.step().unwrap(), LoopState::Running);
    assert_eq!(sim.step().unwrap(), LoopState::Running);
    assert_eq!(sim.model().finalize_calls, 0);

    // Model is finished now; the next step shuts down without ticking.
    assert_eq!(sim.step().unwrap(), LoopState::Stopped);
    assert_eq!(sim.context().time(), 2);
    assert_eq!(sim.model().eval_times.len(), 2);
    assert_eq!(sim.model().finalize_calls, 1);
}

/// Tests finishing on the very first evaluation.
#[test]
fn test_finish_on_first_evaluation() {
    let mut sim = SimulationLoop::new(context(), RecordingModel::finishing_after(1));
    let stats = sim.run().unwrap();

    assert_eq!(stats.ticks, 1);
    assert_eq!(sim.model().finalize_calls, 1);
    assert_eq!(sim.context().time(), 1);
}

/// Tests a model that is finished before the first tick.
#[test]
fn test_finished_before_first_tick() {
    let mut sim = SimulationLoop::new(context(), RecordingModel::finishing_after(0));
    let stats = sim.run().unwrap();

    assert_eq!(stats.ticks, 0);
    assert!(sim.model().eval_times.is_empty());
    assert_eq!(sim.model().finalize_calls, 1);
    assert_eq!(sim.context().time(), 0);
}

/// Tests that an evaluation failure aborts the run without finalizing.
#[test]
fn test_evaluate_error_is_fatal() {
    let model = RecordingModel {
        finish_after: 10,
        fail_at: Some(4),
        ..Default::default()
    };
    let mut sim = SimulationLoop::new(context(), model);

    match sim.run() {
        Err(SimError::Assertion { time, message }) => {
            assert_eq!(time, 4);
            assert_eq!(message, "injected failure");
        }
        other => panic!("expected assertion failure, got {:?}", other.map(|s| s.ticks)),
    }
    assert_eq!(sim.state(), LoopState::Running);
    assert_eq!(sim.model().finalize_calls, 0);
}

/// Tests that the optional tick bound aborts a design that never finishes.
#[test]
fn test_tick_limit() {
    let mut sim = SimulationLoop::new(context(), RecordingModel::finishing_after(usize::MAX))
        .with_max_ticks(Some(16));

    match sim.run() {
        Err(SimError::TickLimitExceeded { limit }) => assert_eq!(limit, 16),
        other => panic!("expected tick limit, got {:?}", other.map(|s| s.ticks)),
    }
    assert_eq!(sim.context().time(), 16);
    assert_eq!(sim.model().finalize_calls, 0);
}

/// Tests that a bound larger than the run has no effect.
#[test]
fn test_tick_limit_not_reached() {
    let mut sim = SimulationLoop::new(context(), RecordingModel::finishing_after(8))
        .with_max_ticks(Some(8));

    let stats = sim.run().unwrap();
    assert_eq!(stats.ticks, 8);
    assert_eq!(sim.model().finalize_calls, 1);
}

/// Tests that boxed trait objects drive the loop like concrete models.
#[test]
fn test_boxed_model() {
    let model: Box<dyn DeviceModel> = Box::new(RecordingModel::finishing_after(6));
    let mut sim = SimulationLoop::new(context(), model);
    let stats = sim.run().unwrap();

    assert_eq!(stats.ticks, 6);
    assert_eq!(stats.model, "recording");
    assert!(sim.model().finished());
}

/// Tests that independent runs in one process do not share state.
#[test]
fn test_independent_runs() {
    let mut first = SimulationLoop::new(context(), RecordingModel::finishing_after(5));
    let mut second = SimulationLoop::new(context(), RecordingModel::finishing_after(11));

    first.run().unwrap();
    second.run().unwrap();

    let (ctx_a, model_a) = first.into_parts();
    let (ctx_b, model_b) = second.into_parts();
    assert_eq!(ctx_a.time(), 5);
    assert_eq!(ctx_b.time(), 11);
    assert_eq!(model_a.finalize_calls, 1);
    assert_eq!(model_b.finalize_calls, 1);
}
