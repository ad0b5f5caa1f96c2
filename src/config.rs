use std::ops::Range;
use std::time::Duration;

use crate::algorithm::AlgorithmId;
use crate::error::{Result, VisualizerError};

pub const DEFAULT_ARRAY_SIZE: usize = 50;
pub const MIN_ARRAY_SIZE: usize = 5;
pub const MAX_ARRAY_SIZE: usize = 100;
pub const ARRAY_SIZE_STEP: usize = 5;

pub const DEFAULT_SPEED: u8 = 5;
pub const MIN_SPEED: u8 = 1;
pub const MAX_SPEED: u8 = 10;

/// Bar heights are drawn uniformly from this range.
pub const VALUE_RANGE: Range<u32> = 10..360;

pub const POLL_INTERVAL: Duration = Duration::from_millis(50);
pub const SORTED_SWEEP_DELAY: Duration = Duration::from_millis(30);
pub const MIN_STEP_DELAY_MS: u64 = 10;
pub const STEP_DELAY_UNIT_MS: u64 = 15;

pub const USAGE: &str = "\
usage: sortviz [options]

  --algorithm <id>   bubble | selection | insertion | merge | quick (default bubble)
  --size <n>         number of bars, 5-100 (default 50)
  --speed <n>        playback speed, 1-10 (default 5)
  --seed <u64>       seed for array generation
  --headless         sort once without a terminal and print a summary
  --audio            play a tone per step (needs the `audio` feature)
  --help             show this message

keys: 1-5 algorithm, space play/pause, p play, s pause, r reset, g new array,
      left/right size, down/up speed, q quit";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub algorithm: AlgorithmId,
    pub array_size: usize,
    pub speed: u8,
    pub seed: Option<u64>,
    pub headless: bool,
    pub audio: bool,
    pub help: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            algorithm: AlgorithmId::Bubble,
            array_size: DEFAULT_ARRAY_SIZE,
            speed: DEFAULT_SPEED,
            seed: None,
            headless: false,
            audio: false,
            help: false,
        }
    }
}

impl Settings {
    /// Parses command line arguments, not including the program name.
    /// Numbers outside their range are clamped.
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut settings = Settings::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) => (flag.to_string(), Some(value.to_string())),
                None => (arg.clone(), None),
            };
            match flag.as_str() {
                "--headless" => settings.headless = true,
                "--audio" => settings.audio = true,
                "-h" | "--help" => settings.help = true,
                "--algorithm" => {
                    let value = inline.or_else(|| args.next()).ok_or_else(|| invalid("algorithm", ""))?;
                    settings.algorithm = value.parse()?;
                }
                "--size" => {
                    let value = inline.or_else(|| args.next()).unwrap_or_default();
                    let size: usize = value.parse().map_err(|_| invalid("size", &value))?;
                    settings.array_size = clamp_array_size(size);
                }
                "--speed" => {
                    let value = inline.or_else(|| args.next()).unwrap_or_default();
                    let speed: u64 = value.parse().map_err(|_| invalid("speed", &value))?;
                    settings.speed = clamp_speed(speed.min(u8::MAX as u64) as u8);
                }
                "--seed" => {
                    let value = inline.or_else(|| args.next()).unwrap_or_default();
                    let seed = value.parse().map_err(|_| invalid("seed", &value))?;
                    settings.seed = Some(seed);
                }
                _ => {
                    return Err(VisualizerError::InvalidSetting {
                        name: "argument",
                        value: arg,
                    })
                }
            }
        }
        Ok(settings)
    }
}

fn invalid(name: &'static str, value: &str) -> VisualizerError {
    VisualizerError::InvalidSetting {
        name,
        value: value.to_string(),
    }
}

pub fn clamp_array_size(size: usize) -> usize {
    size.clamp(MIN_ARRAY_SIZE, MAX_ARRAY_SIZE)
}

pub fn clamp_speed(speed: u8) -> u8 {
    speed.clamp(MIN_SPEED, MAX_SPEED)
}

pub fn resize_by(size: usize, delta: isize) -> usize {
    clamp_array_size(size.saturating_add_signed(delta))
}

pub fn speed_by(speed: u8, delta: i8) -> u8 {
    clamp_speed(speed.saturating_add_signed(delta))
}

/// Pause between two visible steps: `max(10, (11 - speed) * 15)` ms.
pub fn step_delay(speed: u8) -> Duration {
    let slowness = 11u64.saturating_sub(clamp_speed(speed) as u64);
    Duration::from_millis((slowness * STEP_DELAY_UNIT_MS).max(MIN_STEP_DELAY_MS))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_without_arguments() {
        let settings = Settings::from_args(Vec::new()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.array_size, 50);
        assert_eq!(settings.speed, 5);
    }

    #[test]
    fn parses_all_flags() {
        let settings = Settings::from_args(args(&[
            "--algorithm",
            "quick",
            "--size=20",
            "--speed",
            "9",
            "--seed",
            "42",
            "--headless",
        ]))
        .unwrap();
        assert_eq!(settings.algorithm, AlgorithmId::Quick);
        assert_eq!(settings.array_size, 20);
        assert_eq!(settings.speed, 9);
        assert_eq!(settings.seed, Some(42));
        assert!(settings.headless);
        assert!(!settings.audio);
    }

    #[test]
    fn clamps_out_of_range_numbers() {
        let settings = Settings::from_args(args(&["--size", "1000", "--speed", "0"])).unwrap();
        assert_eq!(settings.array_size, MAX_ARRAY_SIZE);
        assert_eq!(settings.speed, MIN_SPEED);
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            Settings::from_args(args(&["--size", "many"])),
            Err(VisualizerError::InvalidSetting { name: "size", .. })
        ));
        assert!(matches!(
            Settings::from_args(args(&["--speed"])),
            Err(VisualizerError::InvalidSetting { name: "speed", .. })
        ));
        assert!(matches!(
            Settings::from_args(args(&["--fast"])),
            Err(VisualizerError::InvalidSetting { name: "argument", .. })
        ));
        assert!(matches!(
            Settings::from_args(args(&["--algorithm", "bogo"])),
            Err(VisualizerError::UnknownAlgorithm(_))
        ));
    }

    #[test]
    fn relative_adjustments_stay_in_bounds() {
        assert_eq!(resize_by(50, 5), 55);
        assert_eq!(resize_by(100, 5), MAX_ARRAY_SIZE);
        assert_eq!(resize_by(5, -5), MIN_ARRAY_SIZE);
        assert_eq!(speed_by(5, 1), 6);
        assert_eq!(speed_by(10, 1), MAX_SPEED);
        assert_eq!(speed_by(1, -1), MIN_SPEED);
    }

    #[test]
    fn step_delay_follows_speed() {
        assert_eq!(step_delay(1), Duration::from_millis(150));
        assert_eq!(step_delay(5), Duration::from_millis(90));
        assert_eq!(step_delay(10), Duration::from_millis(15));
        // out of range speeds are clamped before the formula applies
        assert_eq!(step_delay(200), Duration::from_millis(15));
    }
}
