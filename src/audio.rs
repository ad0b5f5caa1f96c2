/// Highest pitch, played for the tallest possible bar.
pub const MAX_FREQUENCY: f32 = 880.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AudioSignal {
    Tone(f32),
    Silence,
}

/// Pitch for a bar, proportional to its height.
pub fn tone_for(value: u32, max_height: u32) -> f32 {
    MAX_FREQUENCY * (value as f32 / max_height.max(1) as f32)
}

#[cfg(feature = "audio")]
pub use device::{AudioDevice, ToneOutput};

#[cfg(feature = "audio")]
mod device {
    use std::sync::mpsc::{self, Receiver, Sender};
    use std::thread::{self, JoinHandle};

    use cpal::{
        traits::{DeviceTrait, HostTrait, StreamTrait},
        Device, FromSample, Sample, StreamConfig,
    };
    use log::{error, info};

    use super::AudioSignal;
    use crate::error::{Result, VisualizerError};

    pub struct AudioDevice {
        pub device: Device,
        pub config: StreamConfig,
    }

    /// A live output stream fed through `sender`. The stream lives on its own
    /// thread until [`ToneOutput::stop`].
    pub struct ToneOutput {
        pub sender: Sender<AudioSignal>,
        handle: JoinHandle<()>,
    }

    impl ToneOutput {
        pub fn stop(self) {
            self.sender.send(AudioSignal::Silence).unwrap_or_default();
            self.handle.thread().unpark();
            if self.handle.join().is_err() {
                error!("audio thread panicked");
            }
        }
    }

    fn audio_error(err: impl std::fmt::Display) -> VisualizerError {
        VisualizerError::Audio(err.to_string())
    }

    impl AudioDevice {
        pub fn new() -> Result<Self> {
            let host = cpal::default_host();
            let device = host
                .default_output_device()
                .ok_or_else(|| audio_error("no default output device found"))?;
            let mut config: StreamConfig = device.default_output_config().map_err(audio_error)?.into();
            config.buffer_size = cpal::BufferSize::Fixed(128);

            info!(
                "audio output {} at {} Hz",
                device.name().unwrap_or_else(|_| "unknown".to_string()),
                config.sample_rate.0
            );
            Ok(Self { device, config })
        }

        pub fn play_audio_live(&self) -> ToneOutput {
            let (tx, rx): (Sender<AudioSignal>, Receiver<AudioSignal>) = mpsc::channel();
            let config = self.config.clone();
            let device = self.device.clone();

            let handle = thread::spawn(move || {
                let sample_rate = config.sample_rate.0 as f32;
                let channels = config.channels as usize;
                let mut frequency = 0.0f32;
                let mut phase = 0.0f32;
                let err_fn = |err| error!("an error occurred on stream: {}", err);

                let stream = device.build_output_stream(
                    &config,
                    move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                        while let Ok(signal) = rx.try_recv() {
                            frequency = match signal {
                                AudioSignal::Tone(f) => f,
                                AudioSignal::Silence => 0.0,
                            };
                        }
                        // keep the phase across tone changes to avoid clicks
                        let increment = frequency * 2.0 * std::f32::consts::PI / sample_rate;
                        write_data(data, channels, &mut || {
                            if frequency == 0.0 {
                                return 0.0;
                            }
                            let primary_wave = phase.sin();
                            let harmonic_wave = (phase * 2.0).sin() * 0.5;
                            phase = (phase + increment) % (2.0 * std::f32::consts::PI);
                            (primary_wave + harmonic_wave) * 0.3
                        });
                    },
                    err_fn,
                    None,
                );

                match stream.map_err(audio_error).and_then(|s| s.play().map_err(audio_error).map(|_| s)) {
                    Ok(_stream) => {
                        // Keep thread alive to play audio
                        thread::park();
                    }
                    Err(err) => error!("{}", err),
                }
            });

            ToneOutput { sender: tx, handle }
        }
    }

    fn write_data<T>(output: &mut [T], channels: usize, next_sample: &mut dyn FnMut() -> f32)
    where
        T: Sample + FromSample<f32>,
    {
        for frame in output.chunks_mut(channels) {
            let value: T = T::from_sample(next_sample());
            for sample in frame.iter_mut() {
                *sample = value;
            }
        }
    }
}
