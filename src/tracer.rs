use crate::error::Result;
use crate::playback::InputSource;
use crate::presenter::{BarState, Presenter};
use crate::scheduler::{Clock, StepScheduler};
use crate::sorting_algorithms::SortTracer;
use crate::stats::Statistics;

/// Drives a live run: every event updates the counters and the presenter,
/// then waits on the scheduler.
pub struct StepTracer<'a, P, I, C> {
    presenter: &'a mut P,
    scheduler: &'a mut StepScheduler<I, C>,
    stats: &'a mut Statistics,
    progress: f64,
}

impl<'a, P, I, C> StepTracer<'a, P, I, C>
where
    P: Presenter,
    I: InputSource,
    C: Clock,
{
    pub fn new(
        presenter: &'a mut P,
        scheduler: &'a mut StepScheduler<I, C>,
        stats: &'a mut Statistics,
    ) -> Self {
        Self {
            presenter,
            scheduler,
            stats,
            progress: 0.0,
        }
    }

    fn highlight(&mut self, indices: &[usize], state: BarState) -> Result<()> {
        self.presenter.clear_bar_states()?;
        for &index in indices {
            self.presenter.set_bar_state(index, state)?;
        }
        Ok(())
    }

    fn publish_stats(&mut self) -> Result<()> {
        let snapshot = self.stats.snapshot(self.scheduler.now());
        self.presenter.set_statistics(snapshot)
    }
}

impl<P, I, C> SortTracer for StepTracer<'_, P, I, C>
where
    P: Presenter,
    I: InputSource,
    C: Clock,
{
    fn compare(&mut self, _values: &[u32], i: usize, j: usize) -> Result<()> {
        self.highlight(&[i, j], BarState::Comparing)?;
        self.stats.record_comparison(2);
        self.publish_stats()?;
        self.scheduler.await_step(self.presenter)
    }

    fn pivot(&mut self, _values: &[u32], index: usize) -> Result<()> {
        self.highlight(&[index], BarState::Pivot)?;
        self.stats.record_access(1);
        self.publish_stats()?;
        self.scheduler.await_step(self.presenter)
    }

    fn swap(&mut self, values: &mut [u32], i: usize, j: usize) -> Result<()> {
        self.highlight(&[i, j], BarState::Swapping)?;
        self.scheduler.await_step(self.presenter)?;

        values.swap(i, j);
        self.stats.record_swap(2);
        self.presenter.render_bar(i, values[i])?;
        self.presenter.render_bar(j, values[j])?;
        self.publish_stats()
    }

    fn write(&mut self, values: &mut [u32], index: usize, value: u32) -> Result<()> {
        values[index] = value;
        self.stats.record_access(1);
        self.presenter.render_bar(index, value)?;
        self.publish_stats()?;
        self.highlight(&[index], BarState::Swapping)?;
        self.scheduler.await_step(self.presenter)
    }

    fn write_quiet(&mut self, values: &mut [u32], index: usize, value: u32) -> Result<()> {
        values[index] = value;
        self.presenter.render_bar(index, value)
    }

    fn progress(&mut self, fraction: f64) -> Result<()> {
        let fraction = fraction.clamp(0.0, 1.0);
        if fraction > self.progress {
            self.progress = fraction;
            self.presenter.set_progress(fraction)?;
        }
        Ok(())
    }
}

/// Counts operations without pacing or drawing anything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OpCounter {
    pub comparisons: u64,
    pub swaps: u64,
    pub writes: u64,
}

impl SortTracer for OpCounter {
    fn compare(&mut self, _values: &[u32], _i: usize, _j: usize) -> Result<()> {
        self.comparisons += 1;
        Ok(())
    }

    fn pivot(&mut self, _values: &[u32], _index: usize) -> Result<()> {
        Ok(())
    }

    fn swap(&mut self, values: &mut [u32], i: usize, j: usize) -> Result<()> {
        values.swap(i, j);
        self.swaps += 1;
        Ok(())
    }

    fn write(&mut self, values: &mut [u32], index: usize, value: u32) -> Result<()> {
        values[index] = value;
        self.writes += 1;
        Ok(())
    }

    fn write_quiet(&mut self, values: &mut [u32], index: usize, value: u32) -> Result<()> {
        values[index] = value;
        Ok(())
    }

    fn progress(&mut self, _fraction: f64) -> Result<()> {
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TraceEvent {
    Compare(usize, usize),
    Pivot(usize),
    Swap(usize, usize),
    Write(usize, u32),
    Progress(f64),
}

/// Records the exact event sequence an engine produces.
#[derive(Clone, Debug, Default)]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn comparisons(&self) -> usize {
        self.count(|event| matches!(event, TraceEvent::Compare(..)))
    }

    pub fn swaps(&self) -> usize {
        self.count(|event| matches!(event, TraceEvent::Swap(..)))
    }

    pub fn progress_history(&self) -> Vec<f64> {
        self.events
            .iter()
            .filter_map(|event| match event {
                TraceEvent::Progress(fraction) => Some(*fraction),
                _ => None,
            })
            .collect()
    }

    fn count(&self, predicate: impl Fn(&TraceEvent) -> bool) -> usize {
        self.events.iter().filter(|event| predicate(event)).count()
    }
}

impl SortTracer for TraceLog {
    fn compare(&mut self, _values: &[u32], i: usize, j: usize) -> Result<()> {
        self.events.push(TraceEvent::Compare(i, j));
        Ok(())
    }

    fn pivot(&mut self, _values: &[u32], index: usize) -> Result<()> {
        self.events.push(TraceEvent::Pivot(index));
        Ok(())
    }

    fn swap(&mut self, values: &mut [u32], i: usize, j: usize) -> Result<()> {
        values.swap(i, j);
        self.events.push(TraceEvent::Swap(i, j));
        Ok(())
    }

    fn write(&mut self, values: &mut [u32], index: usize, value: u32) -> Result<()> {
        values[index] = value;
        self.events.push(TraceEvent::Write(index, value));
        Ok(())
    }

    fn write_quiet(&mut self, values: &mut [u32], index: usize, value: u32) -> Result<()> {
        values[index] = value;
        Ok(())
    }

    fn progress(&mut self, fraction: f64) -> Result<()> {
        self.events.push(TraceEvent::Progress(fraction));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{RecordingPresenter, ScriptedInput, VirtualClock};
    use crate::playback::PlaybackState;

    #[test]
    fn swap_waits_before_committing() {
        let mut presenter = RecordingPresenter::new();
        let mut scheduler = StepScheduler::new(ScriptedInput::new(Vec::new()), VirtualClock::new(), 10);
        scheduler.set_state(PlaybackState::Playing);
        let mut stats = Statistics::new();
        let mut values = vec![2, 1];
        presenter.render_all_bars(&values).unwrap();

        let mut tracer = StepTracer::new(&mut presenter, &mut scheduler, &mut stats);
        tracer.compare(&values, 0, 1).unwrap();
        tracer.swap(&mut values, 0, 1).unwrap();

        assert_eq!(values, vec![1, 2]);
        assert_eq!(stats.comparisons(), 1);
        assert_eq!(stats.swaps(), 1);
        assert_eq!(stats.array_accesses(), 4);
        assert_eq!(presenter.values_rendered(), vec![(0, 1), (1, 2)]);
        assert_eq!(presenter.states()[..2], [BarState::Swapping, BarState::Swapping]);
    }

    #[test]
    fn cancelled_swap_leaves_values_alone() {
        let mut presenter = RecordingPresenter::new();
        let mut scheduler = StepScheduler::new(
            ScriptedInput::new(vec![crate::playback::Command::Reset]),
            VirtualClock::new(),
            5,
        );
        scheduler.set_state(PlaybackState::Playing);
        let mut stats = Statistics::new();
        let mut values = vec![2, 1];

        let mut tracer = StepTracer::new(&mut presenter, &mut scheduler, &mut stats);
        assert!(tracer.swap(&mut values, 0, 1).unwrap_err().is_stopped());
        assert_eq!(values, vec![2, 1]);
        assert_eq!(stats.swaps(), 0);
    }

    #[test]
    fn progress_never_moves_backwards() {
        let mut presenter = RecordingPresenter::new();
        let mut scheduler = StepScheduler::new(ScriptedInput::new(Vec::new()), VirtualClock::new(), 5);
        let mut stats = Statistics::new();

        let mut tracer = StepTracer::new(&mut presenter, &mut scheduler, &mut stats);
        for fraction in [0.2, 0.1, 0.5, 1.5] {
            tracer.progress(fraction).unwrap();
        }
        assert_eq!(presenter.progress_history(), vec![0.2, 0.5, 1.0]);
    }
}
