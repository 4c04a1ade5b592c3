//! The synthesis loop.
//!
//! Every native tick runs, in order: repeat, arpeggio, frequency slide, vibrato,
//! duty sweep, envelope, flanger/high-pass sweeps, then [`OVERSAMPLING`] sub-samples
//! of oscillator → low-pass → high-pass → flanger.
//! Native ticks are averaged down to the output rate and quantized.

// Operation order is part of the output, keep the arithmetic unfused.
#![allow(clippy::suboptimal_flops, clippy::imprecise_flops)]

use crate::{
    Bps, NATIVE_SAMPLE_RATE, OVERSAMPLING,
    envelope::Envelope,
    filter::{HighPass, LowPass},
    flanger::Flanger,
    oscillator::Oscillator,
    params::{FLOAT_FIELD_NAMES, Params, WaveType},
    result::{FormatResult, SynthError, SynthResult},
    rng::NoiseSource,
    wave::Wav,
};

/// Native sample clock tick
pub type Tick = u32;

/// Rendering options that aren't part of a sound's parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOpts {
    /// Scales every sample before the sound's own gain is applied
    pub master_volume: f64,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self { master_volume: 1.0 }
    }
}

/// Quantized output of a render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// PCM data. Unsigned bytes for 8 bit, signed little endian pairs for 16 bit.
    pub samples: Vec<u8>,
    /// How many samples had to be clamped to the representable range
    pub clipped: usize,
    /// Bits per sample of `samples`
    pub bps: Bps,
    /// Sample rate the sound was rendered for
    pub sample_rate: u32,
}

impl Rendered {
    /// Number of samples (not bytes)
    #[must_use]
    pub const fn sample_count(&self) -> usize {
        self.samples.len() / self.bps.bytes()
    }
    /// Samples as floats in `-1.0..1.0`, for playback sinks that take float buffers
    #[must_use]
    pub fn to_f32(&self) -> Vec<f32> {
        match self.bps {
            Bps::B8 => self
                .samples
                .iter()
                .map(|&b| 2.0 * f32::from(b) / 256.0 - 1.0)
                .collect(),
            Bps::B16 => self
                .samples
                .chunks_exact(2)
                .map(|pair| f32::from(i16::from_le_bytes([pair[0], pair[1]])) / 32768.0)
                .collect(),
        }
    }
    /// Wrap the samples into a WAV container
    pub fn into_wav(self) -> FormatResult<Wav> {
        Wav::with_bps(self.samples, self.sample_rate, self.bps)
    }
}

/// The part of the state that the repeat mechanism restores
#[derive(Debug, Clone, Copy)]
struct Pitch {
    period: f64,
    period_max: f64,
    cutoff: bool,
    period_mult: f64,
    period_mult_slide: f64,
    duty: f64,
    duty_slide: f64,
    arp_mult: f64,
    arp_time: Tick,
}

/// Ticks until an event for a normalized speed parameter
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn speed_to_ticks(speed: f64) -> Tick {
    ((1.0 - speed).powi(2) * 20_000.0 + 32.0).trunc() as Tick
}

impl Pitch {
    fn new(params: &Params) -> Self {
        let arp_mult = if params.arp_mod >= 0.0 {
            1.0 - params.arp_mod.powi(2) * 0.9
        } else {
            1.0 + params.arp_mod.powi(2) * 10.0
        };
        Self {
            period: 100.0 / (params.base_freq * params.base_freq + 0.001),
            period_max: 100.0 / (params.freq_limit * params.freq_limit + 0.001),
            cutoff: params.freq_limit > 0.0,
            period_mult: 1.0 - params.freq_ramp.powf(3.0) * 0.01,
            period_mult_slide: -params.freq_dramp.powf(3.0) * 0.000_001,
            duty: 0.5 - params.duty * 0.5,
            duty_slide: -params.duty_ramp * 0.000_05,
            arp_mult,
            arp_time: if params.arp_speed == 1.0 {
                0
            } else {
                speed_to_ticks(params.arp_speed)
            },
        }
    }
}

/// Synthesizer state for one render.
///
/// Owned by a single render, never shared.
#[derive(Debug)]
pub struct Synth {
    bps: Bps,
    sample_rate: u32,
    /// Native ticks averaged into one output sample
    summands: u32,
    master_volume: f64,
    gain: f64,
    initial: Pitch,
    pitch: Pitch,
    repeat_time: Tick,
    since_repeat: Tick,
    vib_phase: f64,
    vib_speed: f64,
    vib_amp: f64,
    env: Envelope,
    osc: Oscillator,
    lpf: LowPass,
    hpf: HighPass,
    flanger: Flanger,
    tick: Tick,
    acc: f64,
    acc_count: u32,
}

impl Synth {
    /// Set up a render.
    ///
    /// The noise table is filled from `rng` right away, regardless of the waveform.
    pub fn new(params: &Params, opts: &RenderOpts, rng: &mut impl NoiseSource) -> SynthResult<Self> {
        check_finite(params, opts)?;
        let wave = params.wave()?;
        let bps = Bps::from_bits(params.sample_bits)
            .ok_or(SynthError::SampleBits(params.sample_bits))?;
        if !(1..=NATIVE_SAMPLE_RATE).contains(&params.sample_rate) {
            return Err(SynthError::SampleRate(params.sample_rate));
        }
        let env = Envelope::new(params);
        if env.is_empty() {
            return Err(SynthError::EmptyEnvelope);
        }
        let pitch = Pitch::new(params);
        tracing::trace!(?wave, ?bps, envelope = ?env.lengths(), "synth ready");
        Ok(Self {
            bps,
            sample_rate: params.sample_rate,
            summands: NATIVE_SAMPLE_RATE / params.sample_rate,
            master_volume: opts.master_volume,
            gain: params.sound_vol.exp() - 1.0,
            initial: pitch,
            pitch,
            repeat_time: if params.repeat_speed == 0.0 {
                0
            } else {
                speed_to_ticks(params.repeat_speed)
            },
            since_repeat: 0,
            vib_phase: 0.0,
            vib_speed: params.vib_speed.powi(2) * 0.01,
            vib_amp: params.vib_strength * 0.5,
            env,
            osc: Oscillator::new(wave, rng),
            lpf: LowPass::new(params),
            hpf: HighPass::new(params),
            flanger: Flanger::new(params),
            tick: 0,
            acc: 0.0,
            acc_count: 0,
        })
    }
    /// Native ticks processed so far
    #[must_use]
    pub const fn ticks(&self) -> Tick {
        self.tick
    }
    /// Run one native tick.
    ///
    /// Returns the sum of the oversampled sub-samples, or `None` when the sound is over.
    pub fn tick(&mut self, rng: &mut impl NoiseSource) -> Option<f64> {
        if self.repeat_time != 0 {
            self.since_repeat += 1;
            if self.since_repeat >= self.repeat_time {
                self.since_repeat = 0;
                self.pitch = self.initial;
            }
        }

        let p = &mut self.pitch;
        // Arpeggio: a single pitch jump
        if p.arp_time != 0 && self.tick >= p.arp_time {
            p.arp_time = 0;
            p.period *= p.arp_mult;
        }

        p.period_mult += p.period_mult_slide;
        p.period *= p.period_mult;
        if p.period > p.period_max {
            p.period = p.period_max;
            if p.cutoff {
                return None;
            }
        }

        let mut fperiod = p.period;
        if self.vib_amp > 0.0 {
            self.vib_phase += self.vib_speed;
            fperiod = p.period * (1.0 + self.vib_phase.sin() * self.vib_amp);
        }
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let period = (fperiod.trunc() as u32).max(OVERSAMPLING);

        p.duty = (p.duty + p.duty_slide).clamp(0.0, 0.5);
        let duty = p.duty;

        let env_vol = self.env.step()?;

        self.flanger.sweep();
        self.hpf.sweep();

        let mut sum = 0.0;
        for _ in 0..OVERSAMPLING {
            let mut sub = self.osc.next(period, duty, rng);
            sub = self.lpf.process(sub);
            sub = self.hpf.process(sub);
            sub = self.flanger.process(sub);
            sum += sub * env_vol;
        }
        self.tick += 1;
        Some(sum)
    }
    /// Produce the next output sample (not yet quantized).
    ///
    /// Averages as many native ticks as the output sample rate requires.
    /// A trailing group that's cut short by the end of the sound is dropped.
    pub fn next_sample(&mut self, rng: &mut impl NoiseSource) -> Option<f64> {
        loop {
            self.acc += self.tick(rng)?;
            self.acc_count += 1;
            if self.acc_count >= self.summands {
                let sample = self.acc / f64::from(self.summands);
                self.acc = 0.0;
                self.acc_count = 0;
                return Some(sample / f64::from(OVERSAMPLING) * self.master_volume * self.gain);
            }
        }
    }
    /// Run the whole sound
    pub fn render(mut self, rng: &mut impl NoiseSource) -> Rendered {
        let mut samples = Vec::new();
        let mut clipped = 0;
        while let Some(sample) = self.next_sample(rng) {
            if quantize(sample, self.bps, &mut samples) {
                clipped += 1;
            }
        }
        let rendered = Rendered {
            samples,
            clipped,
            bps: self.bps,
            sample_rate: self.sample_rate,
        };
        tracing::debug!(
            ticks = self.tick,
            samples = rendered.sample_count(),
            "render finished"
        );
        if clipped != 0 {
            tracing::warn!(clipped, "samples clipped during render");
        }
        rendered
    }
}

/// Fails with the name of the first NaN or infinite input
fn check_finite(params: &Params, opts: &RenderOpts) -> SynthResult {
    let fields = params.float_fields();
    let named = fields
        .iter()
        .zip(FLOAT_FIELD_NAMES)
        .chain([
            (&params.sound_vol, "sound_vol"),
            (&opts.master_volume, "master_volume"),
        ]);
    for (value, name) in named {
        if !value.is_finite() {
            return Err(SynthError::NonFinite(name));
        }
    }
    Ok(())
}

/// Append `sample` to `out` at the given bit depth.
///
/// Returns whether the sample had to be clamped.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn quantize(sample: f64, bps: Bps, out: &mut Vec<u8>) -> bool {
    match bps {
        Bps::B8 => {
            // [-1, 1) to [0, 256), rounding toward zero
            let v = ((sample + 1.0) * 128.0).trunc();
            let (v, clipped) = if v > 255.0 {
                (255.0, true)
            } else if v < 0.0 {
                (0.0, true)
            } else {
                (v, false)
            };
            out.push(v as u8);
            clipped
        }
        Bps::B16 => {
            // [-1, 1) to [-32768, 32768), rounding toward zero
            let v = (sample * 32768.0).trunc();
            let (v, clipped) = if v > 32767.0 {
                (32767.0, true)
            } else if v < -32768.0 {
                (-32768.0, true)
            } else {
                (v, false)
            };
            out.extend_from_slice(&(v as i16).to_le_bytes());
            clipped
        }
    }
}

/// Render a sound with default options.
///
/// `rng` feeds the noise table, the same seed gives the same output.
pub fn render(params: &Params, rng: &mut impl NoiseSource) -> SynthResult<Rendered> {
    render_with(params, &RenderOpts::default(), rng)
}

/// Render a sound with explicit options
pub fn render_with(
    params: &Params,
    opts: &RenderOpts,
    rng: &mut impl NoiseSource,
) -> SynthResult<Rendered> {
    Ok(Synth::new(params, opts, rng)?.render(rng))
}
