use std::thread;
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::config::{clamp_speed, speed_by, step_delay, POLL_INTERVAL};
use crate::error::{Result, VisualizerError};
use crate::playback::{Command, InputSource, PlaybackState};
use crate::presenter::{ControlsEnabled, Presenter};

pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&mut self, duration: Duration);
}

/// Wall clock used by the terminal front end.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// The only place a running sort waits. Every visible step blocks here, and
/// input is read here while a sort is in flight, so a pause lands on the next
/// step boundary and a reset is seen within one poll interval.
pub struct StepScheduler<I, C> {
    input: I,
    clock: C,
    state: PlaybackState,
    speed: u8,
    quit_requested: bool,
    steps: u64,
}

impl<I: InputSource, C: Clock> StepScheduler<I, C> {
    pub fn new(input: I, clock: C, speed: u8) -> Self {
        Self {
            input,
            clock,
            state: PlaybackState::Idle,
            speed: clamp_speed(speed),
            quit_requested: false,
            steps: 0,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn set_state(&mut self, state: PlaybackState) {
        self.state = state;
    }

    pub fn speed(&self) -> u8 {
        self.speed
    }

    /// Returns the clamped speed actually applied.
    pub fn set_speed(&mut self, speed: u8) -> u8 {
        self.speed = clamp_speed(speed);
        self.speed
    }

    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    pub fn input_exhausted(&self) -> bool {
        self.input.is_exhausted()
    }

    /// Blocks for the next command while no sort is running.
    pub fn next_command(&mut self, timeout: Duration) -> Result<Option<Command>> {
        self.input.poll(timeout)
    }

    /// Paced engine steps completed since the last [`reset_steps`](Self::reset_steps).
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn reset_steps(&mut self) {
        self.steps = 0;
    }

    /// Waits out one step at the current speed.
    pub fn await_step<P: Presenter>(&mut self, presenter: &mut P) -> Result<()> {
        self.wait(presenter, None)?;
        self.steps += 1;
        Ok(())
    }

    /// Waits a fixed duration, still honouring pause and reset.
    pub fn await_fixed<P: Presenter>(&mut self, presenter: &mut P, delay: Duration) -> Result<()> {
        self.wait(presenter, Some(delay))
    }

    fn wait<P: Presenter>(&mut self, presenter: &mut P, delay: Option<Duration>) -> Result<()> {
        presenter.present()?;
        self.gate(presenter)?;

        // the speed is read once the gate opens, so a change made while
        // paused applies to this very step
        let mut remaining = delay.unwrap_or_else(|| step_delay(self.speed));
        while !remaining.is_zero() {
            let slice = remaining.min(POLL_INTERVAL);
            self.clock.sleep(slice);
            remaining -= slice;
            self.drain(presenter)?;
            if self.state == PlaybackState::Idle {
                return Err(VisualizerError::AnimationStopped);
            }
        }
        Ok(())
    }

    /// Holds the caller while paused, polling every [`POLL_INTERVAL`].
    fn gate<P: Presenter>(&mut self, presenter: &mut P) -> Result<()> {
        loop {
            self.drain(presenter)?;
            match self.state {
                PlaybackState::Idle => return Err(VisualizerError::AnimationStopped),
                PlaybackState::Playing => return Ok(()),
                PlaybackState::Paused if self.input.is_exhausted() => {
                    warn!("paused with no input left, stopping the run");
                    self.state = PlaybackState::Idle;
                    return Err(VisualizerError::AnimationStopped);
                }
                PlaybackState::Paused => self.clock.sleep(POLL_INTERVAL),
            }
        }
    }

    /// Applies every pending command, stopping early once the run is over so
    /// anything queued behind a reset is left for the idle loop.
    fn drain<P: Presenter>(&mut self, presenter: &mut P) -> Result<()> {
        while self.state.is_active() {
            let Some(command) = self.input.poll(Duration::ZERO)? else {
                break;
            };
            self.apply(command, presenter)?;
        }
        Ok(())
    }

    fn apply<P: Presenter>(&mut self, command: Command, presenter: &mut P) -> Result<()> {
        match command {
            Command::Play => self.transition(PlaybackState::Paused, PlaybackState::Playing, presenter),
            Command::Pause => self.transition(PlaybackState::Playing, PlaybackState::Paused, presenter),
            Command::TogglePlayback => match self.state {
                PlaybackState::Playing => {
                    self.transition(PlaybackState::Playing, PlaybackState::Paused, presenter)
                }
                _ => self.transition(PlaybackState::Paused, PlaybackState::Playing, presenter),
            },
            Command::Reset => {
                debug!("reset requested mid-run");
                self.state = PlaybackState::Idle;
                Ok(())
            }
            Command::Quit => {
                debug!("quit requested mid-run");
                self.quit_requested = true;
                self.state = PlaybackState::Idle;
                Ok(())
            }
            Command::SetSpeed(speed) => {
                let speed = self.set_speed(speed);
                presenter.set_speed(speed)
            }
            Command::SpeedBy(delta) => {
                let speed = self.set_speed(speed_by(self.speed, delta));
                presenter.set_speed(speed)
            }
            other => {
                debug!("ignoring {:?} while a sort is running", other);
                Ok(())
            }
        }
    }

    fn transition<P: Presenter>(
        &mut self,
        from: PlaybackState,
        to: PlaybackState,
        presenter: &mut P,
    ) -> Result<()> {
        if self.state != from {
            return Ok(());
        }
        debug!("playback {:?} -> {:?}", from, to);
        self.state = to;
        presenter.set_controls(ControlsEnabled::for_state(to))?;
        presenter.present()
    }
}
