use log::{debug, info};

use crate::algorithm::AlgorithmId;
use crate::config::{clamp_array_size, resize_by, speed_by, Settings, POLL_INTERVAL, SORTED_SWEEP_DELAY};
use crate::error::Result;
use crate::model::ArrayModel;
use crate::playback::{Command, InputSource, PlaybackState};
use crate::presenter::{BarState, ControlsEnabled, Presenter};
use crate::scheduler::{Clock, StepScheduler};
use crate::sorting_algorithms;
use crate::stats::{Statistics, StatsSnapshot};
use crate::tracer::StepTracer;

/// Playback controller. Owns the array, the counters and the scheduler, and
/// runs at most one sort at a time.
pub struct Visualizer<P, I, C> {
    presenter: P,
    scheduler: StepScheduler<I, C>,
    stats: Statistics,
    array: ArrayModel,
    algorithm: AlgorithmId,
    array_size: usize,
}

impl<P, I, C> Visualizer<P, I, C>
where
    P: Presenter,
    I: InputSource,
    C: Clock,
{
    pub fn new(settings: &Settings, presenter: P, input: I, clock: C) -> Result<Self> {
        let mut visualizer = Visualizer {
            presenter,
            scheduler: StepScheduler::new(input, clock, settings.speed),
            stats: Statistics::new(),
            array: ArrayModel::new(settings.seed),
            algorithm: settings.algorithm,
            array_size: clamp_array_size(settings.array_size),
        };
        let speed = visualizer.scheduler.speed();
        visualizer
            .presenter
            .set_algorithm_info(visualizer.algorithm.descriptor())?;
        visualizer.presenter.set_speed(speed)?;
        visualizer.generate_array()?;
        visualizer
            .presenter
            .set_controls(ControlsEnabled::for_state(PlaybackState::Idle))?;
        visualizer.presenter.present()?;
        Ok(visualizer)
    }

    pub fn state(&self) -> PlaybackState {
        self.scheduler.state()
    }

    pub fn is_sorting(&self) -> bool {
        self.scheduler.state().is_active()
    }

    pub fn algorithm(&self) -> AlgorithmId {
        self.algorithm
    }

    pub fn array_size(&self) -> usize {
        self.array_size
    }

    pub fn speed(&self) -> u8 {
        self.scheduler.speed()
    }

    pub fn values(&self) -> &[u32] {
        self.array.values()
    }

    pub fn statistics(&self) -> StatsSnapshot {
        self.stats.snapshot(self.scheduler.now())
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Engine steps taken by the current or most recent run.
    pub fn steps(&self) -> u64 {
        self.scheduler.steps()
    }

    pub fn quit_requested(&self) -> bool {
        self.scheduler.quit_requested()
    }

    pub fn select_algorithm(&mut self, algorithm: AlgorithmId) -> Result<()> {
        if self.is_sorting() {
            debug!("not switching to {} during a sort", algorithm);
            return Ok(());
        }
        info!("selected {}", algorithm);
        self.algorithm = algorithm;
        self.presenter.set_algorithm_info(algorithm.descriptor())?;
        self.reset()
    }

    pub fn set_array_size(&mut self, size: usize) -> Result<()> {
        if self.is_sorting() {
            debug!("not resizing during a sort");
            return Ok(());
        }
        self.array_size = clamp_array_size(size);
        self.generate_array()
    }

    /// Refills the array with fresh random bars and zeroes the counters.
    pub fn generate_array(&mut self) -> Result<()> {
        if self.is_sorting() {
            debug!("not regenerating during a sort");
            return Ok(());
        }
        self.array.regenerate(self.array_size);
        self.show_new_array()
    }

    /// Sorts the given values next instead of a random array.
    pub fn load_values(&mut self, values: Vec<u32>) -> Result<()> {
        if self.is_sorting() {
            return Ok(());
        }
        self.array_size = values.len();
        self.array.replace(values);
        self.show_new_array()
    }

    fn show_new_array(&mut self) -> Result<()> {
        debug!("new array of {} values", self.array.len());
        self.presenter.render_all_bars(self.array.values())?;
        self.presenter.set_array_size(self.array_size)?;
        self.reset_statistics()?;
        self.presenter.present()
    }

    fn reset_statistics(&mut self) -> Result<()> {
        self.stats.reset();
        self.presenter.set_statistics(self.stats.snapshot(self.scheduler.now()))?;
        self.presenter.set_progress(0.0)
    }

    pub fn set_speed(&mut self, speed: u8) -> Result<()> {
        let speed = self.scheduler.set_speed(speed);
        self.presenter.set_speed(speed)?;
        self.presenter.present()
    }

    /// Starts a sort when idle, resumes one when paused. Returns once the sort
    /// has finished or was reset.
    pub fn play(&mut self) -> Result<()> {
        match self.scheduler.state() {
            PlaybackState::Playing => return Ok(()),
            PlaybackState::Paused => return self.set_playback(PlaybackState::Playing),
            PlaybackState::Idle => {}
        }

        info!("{} on {} values", self.algorithm, self.array.len());
        self.stats.start(self.scheduler.now());
        self.scheduler.reset_steps();
        self.set_playback(PlaybackState::Playing)?;

        match self.run_sort() {
            Ok(()) => {
                self.stats.finish(self.scheduler.now());
                let summary = self.statistics();
                info!(
                    "{} done: {} comparisons, {} swaps, {} accesses in {}ms",
                    self.algorithm,
                    summary.comparisons,
                    summary.swaps,
                    summary.array_accesses,
                    summary.elapsed_ms
                );
                self.presenter.set_statistics(summary)?;
                self.set_playback(PlaybackState::Idle)
            }
            Err(err) if err.is_stopped() => {
                debug!("{} cancelled: {}", self.algorithm, err);
                self.reset()
            }
            Err(err) => {
                self.scheduler.set_state(PlaybackState::Idle);
                Err(err)
            }
        }
    }

    pub fn pause(&mut self) -> Result<()> {
        if self.scheduler.state() == PlaybackState::Playing {
            self.set_playback(PlaybackState::Paused)?;
        }
        Ok(())
    }

    /// Forces the idle state, clears every highlight and zeroes the counters.
    pub fn reset(&mut self) -> Result<()> {
        self.scheduler.set_state(PlaybackState::Idle);
        self.presenter.clear_bar_states()?;
        self.reset_statistics()?;
        self.presenter
            .set_controls(ControlsEnabled::for_state(PlaybackState::Idle))?;
        self.presenter.present()
    }

    pub fn dispatch(&mut self, command: Command) -> Result<()> {
        match command {
            Command::SelectAlgorithm(algorithm) => self.select_algorithm(algorithm),
            Command::SetArraySize(size) => self.set_array_size(size),
            Command::ResizeBy(delta) => self.set_array_size(resize_by(self.array_size, delta)),
            Command::SetSpeed(speed) => self.set_speed(speed),
            Command::SpeedBy(delta) => self.set_speed(speed_by(self.scheduler.speed(), delta)),
            Command::Play => self.play(),
            Command::Pause => self.pause(),
            Command::TogglePlayback => match self.scheduler.state() {
                PlaybackState::Playing => self.pause(),
                _ => self.play(),
            },
            Command::Reset => self.reset(),
            Command::Regenerate => self.generate_array(),
            Command::Quit => {
                self.scheduler.request_quit();
                Ok(())
            }
        }
    }

    /// Idle event loop: dispatches commands until quit or the input runs dry.
    pub fn run(&mut self) -> Result<()> {
        while !self.scheduler.quit_requested() {
            match self.scheduler.next_command(POLL_INTERVAL)? {
                Some(command) => self.dispatch(command)?,
                None if self.scheduler.input_exhausted() => break,
                None => {}
            }
        }
        Ok(())
    }

    fn set_playback(&mut self, state: PlaybackState) -> Result<()> {
        self.scheduler.set_state(state);
        self.presenter.set_controls(ControlsEnabled::for_state(state))?;
        self.presenter.present()
    }

    fn run_sort(&mut self) -> Result<()> {
        let mut tracer = StepTracer::new(&mut self.presenter, &mut self.scheduler, &mut self.stats);
        sorting_algorithms::run(self.algorithm, self.array.values_mut(), &mut tracer)?;
        self.mark_all_sorted()
    }

    /// Paced left-to-right confirmation sweep once the engine is done.
    fn mark_all_sorted(&mut self) -> Result<()> {
        for index in 0..self.array.len() {
            self.presenter.set_bar_state(index, BarState::Sorted)?;
            self.scheduler
                .await_fixed(&mut self.presenter, SORTED_SWEEP_DELAY)?;
        }
        self.presenter.set_progress(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{RecordingPresenter, ScriptedInput, VirtualClock};

    type TestVisualizer = Visualizer<RecordingPresenter, ScriptedInput, VirtualClock>;

    fn visualizer(commands: Vec<Command>) -> TestVisualizer {
        let settings = Settings {
            array_size: 10,
            seed: Some(11),
            ..Settings::default()
        };
        Visualizer::new(&settings, RecordingPresenter::new(), ScriptedInput::new(commands), VirtualClock::new())
            .unwrap()
    }

    #[test]
    fn starts_idle_with_a_fresh_array() {
        let visualizer = visualizer(Vec::new());
        assert_eq!(visualizer.state(), PlaybackState::Idle);
        assert_eq!(visualizer.values().len(), 10);
        assert_eq!(visualizer.presenter().values(), visualizer.values());
        assert_eq!(visualizer.presenter().algorithm(), Some("Bubble Sort"));
        assert_eq!(visualizer.presenter().speed(), Some(5));
        assert_eq!(
            visualizer.presenter().controls(),
            Some(ControlsEnabled::for_state(PlaybackState::Idle))
        );
    }

    #[test]
    fn play_runs_to_completion_and_returns_to_idle() {
        let mut visualizer = visualizer(Vec::new());
        visualizer.load_values(vec![5, 3, 8, 1]).unwrap();
        visualizer.play().unwrap();

        assert_eq!(visualizer.values(), &[1, 3, 5, 8]);
        assert_eq!(visualizer.state(), PlaybackState::Idle);
        let stats = visualizer.statistics();
        assert_eq!(stats.comparisons, 6);
        assert_eq!(stats.swaps, 4);
        assert_eq!(stats.array_accesses, 6 * 2 + 4 * 2);
        assert_eq!(visualizer.steps(), 6 + 4);
        assert!(visualizer.presenter().states().iter().all(|s| *s == BarState::Sorted));
        assert_eq!(visualizer.presenter().progress(), 1.0);
        assert_eq!(visualizer.presenter().values(), &[1, 3, 5, 8]);
    }

    #[test]
    fn elapsed_counts_steps_and_sweep() {
        let mut visualizer = visualizer(Vec::new());
        visualizer.load_values(vec![2, 1]).unwrap();
        visualizer.play().unwrap();
        // one comparison and one swap at speed 5, then two sweep steps
        assert_eq!(visualizer.statistics().elapsed_ms, 90 + 90 + 30 + 30);
    }

    #[test]
    fn selection_and_generation_reset_counters() {
        let mut visualizer = visualizer(Vec::new());
        visualizer.play().unwrap();
        assert!(visualizer.statistics().comparisons > 0);

        visualizer.generate_array().unwrap();
        assert_eq!(visualizer.statistics(), StatsSnapshot::default());

        visualizer.play().unwrap();
        visualizer.select_algorithm(AlgorithmId::Merge).unwrap();
        assert_eq!(visualizer.algorithm(), AlgorithmId::Merge);
        assert_eq!(visualizer.statistics(), StatsSnapshot::default());
        assert_eq!(visualizer.presenter().algorithm(), Some("Merge Sort"));
        assert!(visualizer.presenter().states().iter().all(|s| *s == BarState::None));
    }

    #[test]
    fn pause_is_ignored_when_idle() {
        let mut visualizer = visualizer(Vec::new());
        visualizer.pause().unwrap();
        assert_eq!(visualizer.state(), PlaybackState::Idle);
    }

    #[test]
    fn resize_regenerates_with_clamped_size() {
        let mut visualizer = visualizer(Vec::new());
        visualizer.dispatch(Command::ResizeBy(5)).unwrap();
        assert_eq!(visualizer.values().len(), 15);
        visualizer.dispatch(Command::SetArraySize(1)).unwrap();
        assert_eq!(visualizer.values().len(), crate::config::MIN_ARRAY_SIZE);
        assert_eq!(visualizer.presenter().array_size(), Some(crate::config::MIN_ARRAY_SIZE));
    }

    #[test]
    fn run_loop_stops_on_quit() {
        let mut visualizer = visualizer(vec![Command::SpeedBy(3), Command::Quit, Command::Play]);
        visualizer.run().unwrap();
        assert!(visualizer.quit_requested());
        assert_eq!(visualizer.speed(), 8);
        // nothing was sorted, the play after quit never ran
        assert_eq!(visualizer.statistics().comparisons, 0);
    }
}
