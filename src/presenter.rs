use crate::algorithm::AlgorithmDescriptor;
use crate::error::Result;
use crate::playback::PlaybackState;
use crate::stats::StatsSnapshot;

/// Visual class of a single bar. A bar has exactly one; the latest call wins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BarState {
    #[default]
    None,
    Comparing,
    Swapping,
    Pivot,
    Sorted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlsEnabled {
    pub play: bool,
    pub pause: bool,
    pub reset: bool,
}

impl ControlsEnabled {
    pub fn for_state(state: PlaybackState) -> Self {
        match state {
            PlaybackState::Playing => Self {
                play: false,
                pause: true,
                reset: true,
            },
            PlaybackState::Paused | PlaybackState::Idle => Self {
                play: true,
                pause: false,
                reset: true,
            },
        }
    }
}

/// Index-addressed view of the chart. Implementations may buffer every call
/// and draw only when [`Presenter::present`] is invoked, which happens right
/// before each wait.
pub trait Presenter {
    fn render_all_bars(&mut self, values: &[u32]) -> Result<()>;
    fn render_bar(&mut self, index: usize, value: u32) -> Result<()>;
    fn set_bar_state(&mut self, index: usize, state: BarState) -> Result<()>;
    fn clear_bar_states(&mut self) -> Result<()>;
    fn set_progress(&mut self, fraction: f64) -> Result<()>;
    fn set_statistics(&mut self, stats: StatsSnapshot) -> Result<()>;
    fn set_controls(&mut self, controls: ControlsEnabled) -> Result<()>;
    fn set_algorithm_info(&mut self, descriptor: &'static AlgorithmDescriptor) -> Result<()>;
    fn set_array_size(&mut self, size: usize) -> Result<()>;
    fn set_speed(&mut self, speed: u8) -> Result<()>;

    fn present(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controls_follow_playback_state() {
        let playing = ControlsEnabled::for_state(PlaybackState::Playing);
        assert!(!playing.play && playing.pause && playing.reset);

        for state in [PlaybackState::Idle, PlaybackState::Paused] {
            let controls = ControlsEnabled::for_state(state);
            assert!(controls.play && !controls.pause && controls.reset);
        }
    }
}
