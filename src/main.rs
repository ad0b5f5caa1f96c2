use std::env;
use std::io;

use env_logger::Env;
use log::{info, warn};

use sortviz::config::{Settings, USAGE};
use sortviz::headless;
use sortviz::sorting_graph::SortGraph;
use sortviz::terminal::{TerminalGuard, TerminalInput};
use sortviz::{SystemClock, Visualizer};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let settings = Settings::from_args(env::args().skip(1))?;
    if settings.help {
        println!("{}", USAGE);
        return Ok(());
    }

    if settings.headless {
        let report = headless::run(&settings)?;
        println!("{}", report);
        return Ok(());
    }

    let graph = SortGraph::new(io::stdout());

    #[cfg(feature = "audio")]
    let (graph, tone_output) = if settings.audio {
        match sortviz::audio::AudioDevice::new() {
            Ok(device) => {
                let output = device.play_audio_live();
                (graph.with_audio(output.sender.clone()), Some(output))
            }
            Err(err) => {
                warn!("{}, continuing without sound", err);
                (graph, None)
            }
        }
    } else {
        (graph, None)
    };

    #[cfg(not(feature = "audio"))]
    if settings.audio {
        warn!("built without the audio feature, continuing without sound");
    }

    info!("starting with {} and {} values", settings.algorithm, settings.array_size);
    let outcome = {
        let _guard = TerminalGuard::enter()?;
        Visualizer::new(&settings, graph, TerminalInput, SystemClock).and_then(|mut visualizer| visualizer.run())
    };

    #[cfg(feature = "audio")]
    if let Some(output) = tone_output {
        output.stop();
    }

    outcome?;
    Ok(())
}
