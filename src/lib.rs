pub mod algorithm;
pub mod audio;
pub mod config;
pub mod error;
pub mod headless;
pub mod model;
pub mod playback;
pub mod presenter;
pub mod scheduler;
pub mod sorting_algorithms;
pub mod sorting_graph;
pub mod stats;
pub mod terminal;
pub mod tracer;
pub mod visualizer;

pub use algorithm::{AlgorithmDescriptor, AlgorithmId};
pub use config::Settings;
pub use error::{Result, VisualizerError};
pub use playback::{Command, InputSource, PlaybackState};
pub use presenter::{BarState, ControlsEnabled, Presenter};
pub use scheduler::{Clock, StepScheduler, SystemClock};
pub use stats::{Statistics, StatsSnapshot};
pub use visualizer::Visualizer;
