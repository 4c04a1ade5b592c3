#![doc = include_str!("../README.md")]
// When we return an error type, the possible errors are encoded within it.
#![allow(clippy::missing_errors_doc)]

pub mod base58;
mod envelope;
mod filter;
pub mod float_bits;
mod flanger;
mod io;
mod oscillator;
mod params;
mod result;
mod rng;
mod synth;
mod wave;

pub use {
    params::{FLOAT_FIELD_NAMES, FLOAT_FIELDS, Params, TOKEN_LEN, WaveType},
    result::{
        DecodeError, DecodeResult, Error, FormatError, FormatResult, SynthError, SynthResult,
    },
    rng::{NoiseSource, SinRng},
    synth::{RenderOpts, Rendered, Synth, Tick, render, render_with},
    wave::{WAV_HEADER_LEN, Wav, WavHeader},
};

/// Bits per sample
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum Bps {
    /// 8 bits per sample (unsigned, 128 is silence)
    #[default]
    B8 = 8,
    /// 16 bits per sample (signed, little endian)
    B16 = 16,
}

impl Bps {
    /// Bytes taken up by one sample
    #[must_use]
    pub const fn bytes(self) -> usize {
        self as usize / 8
    }
    /// Interpret a raw bit depth, if it's one we support
    #[must_use]
    pub const fn from_bits(bits: u16) -> Option<Self> {
        match bits {
            8 => Some(Self::B8),
            16 => Some(Self::B16),
            _ => None,
        }
    }
}

/// The sample rate the synthesizer internally works with.
///
/// Lower output rates are produced by averaging whole groups of native samples.
pub const NATIVE_SAMPLE_RATE: u32 = 44_100;

/// How many sub-samples are computed (and averaged) per native sample
pub const OVERSAMPLING: u32 = 8;

/// Render a sound and wrap it into a WAV container in one go.
///
/// Uses the bit depth and sample rate stored in `params`.
pub fn generate(params: &Params, rng: &mut impl NoiseSource) -> Result<Wav, Error> {
    Ok(render(params, rng)?.into_wav()?)
}

#[cfg(target_endian = "big")]
const _: () = panic!("Only little endian architectures are supported currently.");
