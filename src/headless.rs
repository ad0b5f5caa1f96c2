//! In-memory stand-ins for the terminal: a virtual clock, a scripted input
//! queue and a presenter that records every call. They back `--headless`
//! runs and the test suite.

use std::cell::Cell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::algorithm::{AlgorithmDescriptor, AlgorithmId};
use crate::config::Settings;
use crate::error::Result;
use crate::playback::{Command, InputSource};
use crate::presenter::{BarState, ControlsEnabled, Presenter};
use crate::scheduler::Clock;
use crate::stats::StatsSnapshot;
use crate::visualizer::Visualizer;

/// Shared handle on a [`VirtualClock`]'s elapsed time.
#[derive(Clone, Debug, Default)]
pub struct VirtualTime(Rc<Cell<Duration>>);

impl VirtualTime {
    pub fn elapsed(&self) -> Duration {
        self.0.get()
    }

    pub fn advance(&self, by: Duration) {
        self.0.set(self.0.get() + by);
    }
}

/// A clock whose `sleep` returns at once after moving time forward.
#[derive(Clone, Debug)]
pub struct VirtualClock {
    origin: Instant,
    time: VirtualTime,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            time: VirtualTime::default(),
        }
    }

    pub fn time(&self) -> VirtualTime {
        self.time.clone()
    }
}

impl Default for VirtualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for VirtualClock {
    fn now(&self) -> Instant {
        self.origin + self.time.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        self.time.advance(duration);
    }
}

/// Commands released in order, each once virtual time reaches its due time.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    queue: VecDeque<(Duration, Command)>,
    time: Option<VirtualTime>,
}

impl ScriptedInput {
    /// Every command is due immediately.
    pub fn new(commands: Vec<Command>) -> Self {
        Self {
            queue: commands.into_iter().map(|c| (Duration::ZERO, c)).collect(),
            time: None,
        }
    }

    pub fn timed(time: VirtualTime, commands: Vec<(Duration, Command)>) -> Self {
        Self {
            queue: commands.into(),
            time: Some(time),
        }
    }
}

impl InputSource for ScriptedInput {
    /// A blocking poll on virtual time: waiting for a command that is not yet
    /// due moves the clock forward, by at most `timeout`.
    fn poll(&mut self, timeout: Duration) -> Result<Option<Command>> {
        let Some(&(due, command)) = self.queue.front() else {
            return Ok(None);
        };
        let now = self.time.as_ref().map(VirtualTime::elapsed).unwrap_or_default();
        if due <= now {
            self.queue.pop_front();
            return Ok(Some(command));
        }
        if let Some(time) = &self.time {
            let wait = (due - now).min(timeout);
            time.advance(wait);
            if due <= now + wait {
                self.queue.pop_front();
                return Ok(Some(command));
            }
        }
        Ok(None)
    }

    fn is_exhausted(&self) -> bool {
        self.queue.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PresenterEvent {
    RenderAll(Vec<u32>),
    Bar { index: usize, value: u32 },
    State { index: usize, state: BarState },
    ClearStates,
    Progress(f64),
    Statistics(StatsSnapshot),
    Controls(ControlsEnabled),
    Algorithm(&'static str),
    ArraySize(usize),
    Speed(u8),
}

/// Keeps the latest view state plus a timestamped log of every call.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    time: Option<VirtualTime>,
    events: Vec<(Duration, PresenterEvent)>,
    values: Vec<u32>,
    states: Vec<BarState>,
    progress: f64,
    statistics: StatsSnapshot,
    controls: Option<ControlsEnabled>,
    algorithm: Option<&'static str>,
    array_size: Option<usize>,
    speed: Option<u8>,
    presents: usize,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamps every recorded event with the given virtual time.
    pub fn with_time(time: VirtualTime) -> Self {
        Self {
            time: Some(time),
            ..Self::default()
        }
    }

    fn record(&mut self, event: PresenterEvent) {
        let at = self.time.as_ref().map(VirtualTime::elapsed).unwrap_or_default();
        self.events.push((at, event));
    }

    pub fn events(&self) -> &[(Duration, PresenterEvent)] {
        &self.events
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    pub fn states(&self) -> &[BarState] {
        &self.states
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn statistics(&self) -> StatsSnapshot {
        self.statistics
    }

    pub fn controls(&self) -> Option<ControlsEnabled> {
        self.controls
    }

    pub fn algorithm(&self) -> Option<&'static str> {
        self.algorithm
    }

    pub fn array_size(&self) -> Option<usize> {
        self.array_size
    }

    pub fn speed(&self) -> Option<u8> {
        self.speed
    }

    pub fn presents(&self) -> usize {
        self.presents
    }

    /// Every single-bar render as `(index, value)`, in order.
    pub fn values_rendered(&self) -> Vec<(usize, u32)> {
        self.events
            .iter()
            .filter_map(|(_, event)| match event {
                PresenterEvent::Bar { index, value } => Some((*index, *value)),
                _ => None,
            })
            .collect()
    }

    /// Virtual times at which a bar changed height.
    pub fn mutation_times(&self) -> Vec<Duration> {
        self.events
            .iter()
            .filter(|(_, event)| matches!(event, PresenterEvent::Bar { .. }))
            .map(|(at, _)| *at)
            .collect()
    }

    pub fn progress_history(&self) -> Vec<f64> {
        self.events
            .iter()
            .filter_map(|(_, event)| match event {
                PresenterEvent::Progress(fraction) => Some(*fraction),
                _ => None,
            })
            .collect()
    }

    pub fn statistics_history(&self) -> Vec<StatsSnapshot> {
        self.events
            .iter()
            .filter_map(|(_, event)| match event {
                PresenterEvent::Statistics(stats) => Some(*stats),
                _ => None,
            })
            .collect()
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }
}

impl Presenter for RecordingPresenter {
    fn render_all_bars(&mut self, values: &[u32]) -> Result<()> {
        self.values = values.to_vec();
        self.states = vec![BarState::None; values.len()];
        self.record(PresenterEvent::RenderAll(values.to_vec()));
        Ok(())
    }

    fn render_bar(&mut self, index: usize, value: u32) -> Result<()> {
        if let Some(slot) = self.values.get_mut(index) {
            *slot = value;
        }
        self.record(PresenterEvent::Bar { index, value });
        Ok(())
    }

    fn set_bar_state(&mut self, index: usize, state: BarState) -> Result<()> {
        if let Some(slot) = self.states.get_mut(index) {
            *slot = state;
        }
        self.record(PresenterEvent::State { index, state });
        Ok(())
    }

    fn clear_bar_states(&mut self) -> Result<()> {
        self.states.iter_mut().for_each(|state| *state = BarState::None);
        self.record(PresenterEvent::ClearStates);
        Ok(())
    }

    fn set_progress(&mut self, fraction: f64) -> Result<()> {
        self.progress = fraction;
        self.record(PresenterEvent::Progress(fraction));
        Ok(())
    }

    fn set_statistics(&mut self, stats: StatsSnapshot) -> Result<()> {
        self.statistics = stats;
        self.record(PresenterEvent::Statistics(stats));
        Ok(())
    }

    fn set_controls(&mut self, controls: ControlsEnabled) -> Result<()> {
        self.controls = Some(controls);
        self.record(PresenterEvent::Controls(controls));
        Ok(())
    }

    fn set_algorithm_info(&mut self, descriptor: &'static AlgorithmDescriptor) -> Result<()> {
        self.algorithm = Some(descriptor.name);
        self.record(PresenterEvent::Algorithm(descriptor.name));
        Ok(())
    }

    fn set_array_size(&mut self, size: usize) -> Result<()> {
        self.array_size = Some(size);
        self.record(PresenterEvent::ArraySize(size));
        Ok(())
    }

    fn set_speed(&mut self, speed: u8) -> Result<()> {
        self.speed = Some(speed);
        self.record(PresenterEvent::Speed(speed));
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.presents += 1;
        Ok(())
    }
}

/// Outcome of a single unattended sort.
#[derive(Debug)]
pub struct HeadlessReport {
    pub algorithm: AlgorithmId,
    pub input: Vec<u32>,
    pub output: Vec<u32>,
    pub stats: StatsSnapshot,
    pub steps: u64,
}

impl HeadlessReport {
    pub fn is_sorted(&self) -> bool {
        self.output.windows(2).all(|pair| pair[0] <= pair[1])
    }
}

impl fmt::Display for HeadlessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let descriptor = self.algorithm.descriptor();
        writeln!(f, "{} ({} values)", descriptor.name, self.input.len())?;
        writeln!(
            f,
            "time: best {} / average {} / worst {}, space {}",
            descriptor.best, descriptor.average, descriptor.worst, descriptor.space
        )?;
        writeln!(f, "input:  {:?}", self.input)?;
        writeln!(f, "output: {:?}", self.output)?;
        writeln!(
            f,
            "comparisons: {}  swaps: {}  array accesses: {}  steps: {}",
            self.stats.comparisons, self.stats.swaps, self.stats.array_accesses, self.steps
        )?;
        write!(f, "simulated time: {}ms", self.stats.elapsed_ms)
    }
}

/// Sorts one generated array on virtual time and reports the result.
pub fn run(settings: &Settings) -> Result<HeadlessReport> {
    let input = ScriptedInput::new(vec![Command::Play]);
    let mut visualizer = Visualizer::new(settings, RecordingPresenter::new(), input, VirtualClock::new())?;
    let before = visualizer.values().to_vec();

    visualizer.run()?;

    Ok(HeadlessReport {
        algorithm: visualizer.algorithm(),
        input: before,
        output: visualizer.values().to_vec(),
        stats: visualizer.statistics(),
        steps: visualizer.steps(),
    })
}
