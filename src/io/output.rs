use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    FromSample, Sample, SampleFormat, SizedSample,
};
use tracing::{error, info};

use crate::{
    engine::AudioContext,
    error::SynthError,
    synth::{MessageReceiver, MonoSynth},
    MAX_BLOCK_SIZE,
};

/// Anything that can fill a mono buffer from the audio callback.
pub trait AudioSource: Send + 'static {
    fn render(&mut self, out: &mut [f32]);
}

impl AudioSource for AudioContext {
    fn render(&mut self, out: &mut [f32]) {
        AudioContext::render(self, out);
    }
}

impl<R: MessageReceiver + Send + 'static> AudioSource for MonoSynth<R> {
    fn render(&mut self, out: &mut [f32]) {
        MonoSynth::render(self, out);
    }
}

fn device_error(err: impl std::fmt::Display) -> SynthError {
    SynthError::Device(err.to_string())
}

/// The host's default output device and its preferred stream format.
pub struct OutputDevice {
    device: cpal::Device,
    config: cpal::SupportedStreamConfig,
}

impl OutputDevice {
    pub fn open_default() -> Result<Self, SynthError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| SynthError::Device("no default output device available".into()))?;
        let config = device.default_output_config().map_err(device_error)?;

        Ok(Self { device, config })
    }

    pub fn name(&self) -> String {
        self.device.name().unwrap_or_else(|_| "unknown".into())
    }

    pub fn sample_rate(&self) -> f32 {
        self.config.sample_rate().0 as f32
    }

    pub fn channels(&self) -> usize {
        self.config.channels() as usize
    }

    /// Start streaming `source` to the device. Audio stops when the returned
    /// stream is dropped.
    pub fn play(self, source: impl AudioSource) -> Result<PlaybackStream, SynthError> {
        let config: cpal::StreamConfig = self.config.config();

        let stream = match self.config.sample_format() {
            SampleFormat::F32 => build_stream::<f32>(&self.device, &config, source)?,
            SampleFormat::I16 => build_stream::<i16>(&self.device, &config, source)?,
            SampleFormat::U16 => build_stream::<u16>(&self.device, &config, source)?,
            other => {
                return Err(SynthError::Device(format!(
                    "unsupported device sample format: {other:?}"
                )))
            }
        };
        stream.play().map_err(device_error)?;

        info!(
            device = %self.name(),
            sample_rate = self.sample_rate(),
            channels = self.channels(),
            "output stream started"
        );

        Ok(PlaybackStream { _stream: stream })
    }
}

/// Keeps the device stream alive.
pub struct PlaybackStream {
    _stream: cpal::Stream,
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    mut source: impl AudioSource,
) -> Result<cpal::Stream, SynthError>
where
    T: Sample + SizedSample + FromSample<f32> + Send + 'static,
{
    let channels = config.channels as usize;
    let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

    device
        .build_output_stream(
            config,
            move |data: &mut [T], _| {
                for chunk in data.chunks_mut(MAX_BLOCK_SIZE * channels) {
                    let frames = chunk.len() / channels;
                    let block = &mut render_buf[..frames];
                    source.render(block);

                    // Copy to output (mono to all channels)
                    for (frame, &s) in chunk.chunks_mut(channels).zip(block.iter()) {
                        let v = T::from_sample(s.clamp(-1.0, 1.0));
                        frame.fill(v);
                    }
                }
            },
            |err| error!(%err, "output stream error"),
            None,
        )
        .map_err(device_error)
}
