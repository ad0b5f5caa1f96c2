use std::fmt;
use std::io;

#[derive(Debug)]
pub enum VisualizerError {
    /// Raised by the step scheduler once playback has been reset. Unwinds the
    /// active sort and is swallowed by the controller.
    AnimationStopped,
    UnknownAlgorithm(String),
    InvalidSetting { name: &'static str, value: String },
    Io(io::Error),
    Audio(String),
}

pub type Result<T> = std::result::Result<T, VisualizerError>;

impl VisualizerError {
    pub fn is_stopped(&self) -> bool {
        matches!(self, Self::AnimationStopped)
    }
}

impl fmt::Display for VisualizerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AnimationStopped => write!(f, "Animation stopped"),
            Self::UnknownAlgorithm(input) => write!(f, "{} is not a known algorithm.", input),
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid value {:?} for --{}", value, name)
            }
            Self::Io(err) => write!(f, "terminal error: {}", err),
            Self::Audio(msg) => write!(f, "audio error: {}", msg),
        }
    }
}

impl std::error::Error for VisualizerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for VisualizerError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}
