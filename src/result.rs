use thiserror::Error;

/// Error that can happen when decoding a parameter token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The token contains a character outside of the base58 alphabet.
    #[error("Invalid base58 character {ch:?} at position {pos}")]
    InvalidChar {
        /// The offending character
        ch: char,
        /// Character index in the token
        pos: usize,
    },
    /// The token decoded to the wrong amount of bytes.
    ///
    /// The layout is fixed, so both short and long tokens are rejected.
    #[error("Token decoded to {found} bytes, expected {expected}")]
    Length {
        /// Bytes the parameter layout requires
        expected: usize,
        /// Bytes the token actually decoded to
        found: usize,
    },
}

/// Error that can happen when rendering a sound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SynthError {
    /// Wave type id doesn't map to a known waveform
    #[error("Unknown waveform id: {0}")]
    UnknownWaveform(u8),
    /// Only 8 and 16 bit output is supported
    #[error("Unsupported sample bit depth: {0} (should be 8 or 16)")]
    SampleBits(u16),
    /// The sample rate must be between 1 and 44100
    #[error("Unsupported sample rate: {0} (should be between 1 and 44100)")]
    SampleRate(u32),
    /// Attack, sustain and decay are all zero length, there is nothing to render.
    #[error("All envelope stages have zero length")]
    EmptyEnvelope,
    /// A parameter is NaN or infinite. Holds the parameter's name.
    #[error("Parameter {0} is not a finite number")]
    NonFinite(&'static str),
}

/// Error that can happen when building or reading a WAV container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Only 8 and 16 bit PCM is supported
    #[error("Unsupported bits per sample: {0} (should be 8 or 16)")]
    BitsPerSample(u16),
    /// The payload doesn't fit into the 32 bit size fields
    #[error("PCM payload too large: {0} bytes")]
    TooLarge(usize),
    /// Input ends before the header or the sample data does
    #[error("Truncated WAV data")]
    Truncated,
    /// A chunk tag or fixed header field has an unexpected value
    #[error("Invalid header field: {0}")]
    InvalidHeader(&'static str),
}

/// Any error that can happen on the way from token to container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// See [`DecodeError`]
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// See [`SynthError`]
    #[error(transparent)]
    Synth(#[from] SynthError),
    /// See [`FormatError`]
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Result of attempting to decode a parameter token
pub type DecodeResult<T = ()> = Result<T, DecodeError>;

/// Result of attempting to render a sound
pub type SynthResult<T = ()> = Result<T, SynthError>;

/// Result of attempting to build or read a WAV container
pub type FormatResult<T = ()> = Result<T, FormatError>;
