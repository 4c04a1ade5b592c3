use crate::{
    NATIVE_SAMPLE_RATE, base58,
    float_bits::{bits_to_float, float_to_bits},
    io::exact_reader,
    result::{DecodeError, DecodeResult, SynthError, SynthResult},
};

/// Base waveform shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum WaveType {
    /// Square wave, shaped by the duty cycle
    Square = 0,
    /// Rising/falling ramp, split at the duty cycle
    Sawtooth = 1,
    /// Sine wave
    Sine = 2,
    /// Random steps refreshed every period
    Noise = 3,
}

impl WaveType {
    /// Look up a wave type by its token id
    #[must_use]
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Self::Square),
            1 => Some(Self::Sawtooth),
            2 => Some(Self::Sine),
            3 => Some(Self::Noise),
            _ => None,
        }
    }
    /// Token id of this wave type
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }
}

/// Number of float parameters stored in a token
pub const FLOAT_FIELDS: usize = 22;

/// Length of a decoded token: the wave type byte followed by [`FLOAT_FIELDS`] 32 bit floats.
pub const TOKEN_LEN: usize = 1 + FLOAT_FIELDS * 4;

/// Names of the float parameters, in token order.
pub const FLOAT_FIELD_NAMES: [&str; FLOAT_FIELDS] = [
    "env_attack",
    "env_sustain",
    "env_punch",
    "env_decay",
    "base_freq",
    "freq_limit",
    "freq_ramp",
    "freq_dramp",
    "vib_strength",
    "vib_speed",
    "arp_mod",
    "arp_speed",
    "duty",
    "duty_ramp",
    "repeat_speed",
    "pha_offset",
    "pha_ramp",
    "lpf_freq",
    "lpf_ramp",
    "lpf_resonance",
    "hpf_freq",
    "hpf_ramp",
];

/// Which float parameters are signed (`-1..=1`) rather than `0..=1`, in token order.
const SIGNED: [bool; FLOAT_FIELDS] = [
    false, false, false, false, // envelope
    false, false, true, true, // tone
    false, false, // vibrato
    true, false, // arpeggio
    false, true,  // duty
    false, // repeat
    true, true, // flanger
    false, true, false, // low-pass
    false, true, // high-pass
];

/// Everything needed to synthesize one sound.
///
/// Shaping parameters are normalized to `0..=1`, except the ones documented as signed,
/// which are on `-1..=1`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Params {
    /// Raw [`WaveType`] id. Kept raw so that foreign ids survive decoding.
    pub wave_type: u8,

    /// Attack time
    pub env_attack: f64,
    /// Sustain time
    pub env_sustain: f64,
    /// Sustain punch (volume boost at the start of sustain)
    pub env_punch: f64,
    /// Decay time
    pub env_decay: f64,

    /// Start frequency
    pub base_freq: f64,
    /// Minimum frequency. Sliding below it ends the sound.
    pub freq_limit: f64,
    /// Frequency slide (signed)
    pub freq_ramp: f64,
    /// Frequency slide acceleration (signed)
    pub freq_dramp: f64,

    /// Vibrato depth
    pub vib_strength: f64,
    /// Vibrato speed
    pub vib_speed: f64,

    /// Pitch jump amount (signed)
    pub arp_mod: f64,
    /// How soon the pitch jump happens
    pub arp_speed: f64,

    /// Square/sawtooth duty
    pub duty: f64,
    /// Duty sweep (signed)
    pub duty_ramp: f64,

    /// Pitch repeat speed. 0 doesn't repeat.
    pub repeat_speed: f64,

    /// Flanger offset (signed)
    pub pha_offset: f64,
    /// Flanger sweep (signed)
    pub pha_ramp: f64,

    /// Low-pass cutoff. 1 disables the low-pass filter.
    pub lpf_freq: f64,
    /// Low-pass cutoff sweep (signed)
    pub lpf_ramp: f64,
    /// Low-pass resonance
    pub lpf_resonance: f64,
    /// High-pass cutoff
    pub hpf_freq: f64,
    /// High-pass cutoff sweep (signed)
    pub hpf_ramp: f64,

    /// Output gain, applied as `exp(sound_vol) - 1`
    pub sound_vol: f64,
    /// Output sample rate in Hz, at most [`NATIVE_SAMPLE_RATE`]
    pub sample_rate: u32,
    /// Output bits per sample, 8 or 16
    pub sample_bits: u16,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            wave_type: WaveType::Square.id(),
            env_attack: 0.0,
            env_sustain: 0.3,
            env_punch: 0.0,
            env_decay: 0.4,
            base_freq: 0.3,
            freq_limit: 0.0,
            freq_ramp: 0.0,
            freq_dramp: 0.0,
            vib_strength: 0.0,
            vib_speed: 0.0,
            arp_mod: 0.0,
            arp_speed: 0.0,
            duty: 0.0,
            duty_ramp: 0.0,
            repeat_speed: 0.0,
            pha_offset: 0.0,
            pha_ramp: 0.0,
            lpf_freq: 1.0,
            lpf_ramp: 0.0,
            lpf_resonance: 0.0,
            hpf_freq: 0.0,
            hpf_ramp: 0.0,
            sound_vol: 0.5,
            sample_rate: NATIVE_SAMPLE_RATE,
            sample_bits: 8,
        }
    }
}

impl Params {
    /// The wave type, if the id is a known one
    pub const fn wave(&self) -> SynthResult<WaveType> {
        match WaveType::from_id(self.wave_type) {
            Some(wave) => Ok(wave),
            None => Err(SynthError::UnknownWaveform(self.wave_type)),
        }
    }
    /// Float parameters in token order
    #[must_use]
    pub const fn float_fields(&self) -> [f64; FLOAT_FIELDS] {
        [
            self.env_attack,
            self.env_sustain,
            self.env_punch,
            self.env_decay,
            self.base_freq,
            self.freq_limit,
            self.freq_ramp,
            self.freq_dramp,
            self.vib_strength,
            self.vib_speed,
            self.arp_mod,
            self.arp_speed,
            self.duty,
            self.duty_ramp,
            self.repeat_speed,
            self.pha_offset,
            self.pha_ramp,
            self.lpf_freq,
            self.lpf_ramp,
            self.lpf_resonance,
            self.hpf_freq,
            self.hpf_ramp,
        ]
    }
    /// Mutable float parameters in token order
    pub const fn float_fields_mut(&mut self) -> [&mut f64; FLOAT_FIELDS] {
        [
            &mut self.env_attack,
            &mut self.env_sustain,
            &mut self.env_punch,
            &mut self.env_decay,
            &mut self.base_freq,
            &mut self.freq_limit,
            &mut self.freq_ramp,
            &mut self.freq_dramp,
            &mut self.vib_strength,
            &mut self.vib_speed,
            &mut self.arp_mod,
            &mut self.arp_speed,
            &mut self.duty,
            &mut self.duty_ramp,
            &mut self.repeat_speed,
            &mut self.pha_offset,
            &mut self.pha_ramp,
            &mut self.lpf_freq,
            &mut self.lpf_ramp,
            &mut self.lpf_resonance,
            &mut self.hpf_freq,
            &mut self.hpf_ramp,
        ]
    }
    /// Names of float parameters that lie outside of their nominal range.
    ///
    /// Out of range values still render (they just might sound odd).
    #[must_use]
    pub fn out_of_range(&self) -> Vec<&'static str> {
        self.float_fields()
            .iter()
            .zip(SIGNED)
            .zip(FLOAT_FIELD_NAMES)
            .filter_map(|((&value, signed), name)| {
                let min = if signed { -1.0 } else { 0.0 };
                (!(min..=1.0).contains(&value)).then_some(name)
            })
            .collect()
    }
    /// Read parameters from the binary token layout.
    ///
    /// Fields that aren't part of the layout (volume, sample rate, bit depth) get default values.
    pub fn from_bytes(bytes: &[u8]) -> DecodeResult<Self> {
        let mut rd = exact_reader(bytes, TOKEN_LEN)?;
        let length_err = |_| DecodeError::Length {
            expected: TOKEN_LEN,
            found: bytes.len(),
        };
        let mut params = Self {
            wave_type: rd.next().map_err(length_err)?,
            ..Self::default()
        };
        for field in params.float_fields_mut() {
            *field = bits_to_float(rd.next().map_err(length_err)?);
        }
        Ok(params)
    }
    /// Write parameters in the binary token layout
    #[must_use]
    pub fn to_bytes(&self) -> [u8; TOKEN_LEN] {
        let mut out = [0; TOKEN_LEN];
        out[0] = self.wave_type;
        for (chunk, value) in out[1..].chunks_exact_mut(4).zip(self.float_fields()) {
            chunk.copy_from_slice(&float_to_bits(value).to_le_bytes());
        }
        out
    }
    /// Decode a base58 parameter token.
    ///
    /// A leading `#` (as found in URL fragments) is ignored.
    pub fn from_b58(token: &str) -> DecodeResult<Self> {
        let token = token.strip_prefix('#').unwrap_or(token);
        Self::from_bytes(&base58::decode(token)?)
    }
    /// Encode as a base58 parameter token
    #[must_use]
    pub fn to_b58(&self) -> String {
        base58::encode(&self.to_bytes())
    }
}

impl std::str::FromStr for Params {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_b58(s)
    }
}
