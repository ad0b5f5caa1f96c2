use std::time::Duration;

use crate::algorithm::AlgorithmId;
use crate::error::Result;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
    Paused,
}

impl PlaybackState {
    /// A sort is in flight, whether it is currently advancing or not.
    pub fn is_active(&self) -> bool {
        !matches!(self, PlaybackState::Idle)
    }
}

/// User input delivered to the controller, or to the scheduler while a sort
/// is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    SelectAlgorithm(AlgorithmId),
    SetArraySize(usize),
    ResizeBy(isize),
    SetSpeed(u8),
    SpeedBy(i8),
    Play,
    Pause,
    TogglePlayback,
    Reset,
    Regenerate,
    Quit,
}

pub trait InputSource {
    /// Waits at most `timeout` for the next command.
    fn poll(&mut self, timeout: Duration) -> Result<Option<Command>>;

    /// No command will ever arrive again.
    fn is_exhausted(&self) -> bool {
        false
    }
}
