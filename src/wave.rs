//! Minimal mono PCM RIFF/WAVE container

use {
    crate::{
        Bps,
        io::Reader,
        result::{FormatError, FormatResult},
    },
    base64::Engine as _,
};

/// Size of the canonical header that precedes the sample data
pub const WAV_HEADER_LEN: usize = 44;

const PCM_FORMAT: u16 = 1;
const MONO: u16 = 1;
const FMT_CHUNK_LEN: u32 = 16;
/// Header bytes counted by the RIFF chunk size (everything after its own size field)
const RIFF_OVERHEAD: u32 = 36;

/// The 44 byte canonical WAV header, laid out exactly like on disk
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, bytemuck::AnyBitPattern, bytemuck::NoUninit)]
pub struct WavHeader {
    /// `RIFF`
    pub riff: [u8; 4],
    /// Bytes following this field
    pub chunk_size: u32,
    /// `WAVE`
    pub wave: [u8; 4],
    /// `fmt `
    pub fmt: [u8; 4],
    /// Length of the format chunk, always 16 for PCM
    pub fmt_size: u32,
    /// 1 for integer PCM
    pub audio_format: u16,
    /// Always mono
    pub channels: u16,
    /// Samples per second
    pub sample_rate: u32,
    /// `sample_rate * block_align`
    pub byte_rate: u32,
    /// Bytes per sample frame
    pub block_align: u16,
    /// 8 or 16
    pub bits_per_sample: u16,
    /// `data`
    pub data: [u8; 4],
    /// Length of the sample data in bytes
    pub data_size: u32,
}

const _: () = assert!(size_of::<WavHeader>() == WAV_HEADER_LEN);

impl WavHeader {
    fn new(data_size: u32, sample_rate: u32, bps: Bps) -> Self {
        let bits = bps as u16;
        let block_align = bits / 8;
        Self {
            riff: *b"RIFF",
            chunk_size: RIFF_OVERHEAD + data_size,
            wave: *b"WAVE",
            fmt: *b"fmt ",
            fmt_size: FMT_CHUNK_LEN,
            audio_format: PCM_FORMAT,
            channels: MONO,
            sample_rate,
            byte_rate: sample_rate.saturating_mul(u32::from(block_align)),
            block_align,
            bits_per_sample: bits,
            data: *b"data",
            data_size,
        }
    }
}

/// Mono PCM sound ready to be written out as a WAV file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wav {
    pcm: Vec<u8>,
    sample_rate: u32,
    bps: Bps,
}

impl Wav {
    /// Wrap raw PCM bytes.
    ///
    /// `bits` has to be 8 or 16.
    pub fn new(pcm: Vec<u8>, sample_rate: u32, bits: u16) -> FormatResult<Self> {
        let bps = Bps::from_bits(bits).ok_or(FormatError::BitsPerSample(bits))?;
        Self::with_bps(pcm, sample_rate, bps)
    }
    /// Wrap raw PCM bytes of a known bit depth
    pub fn with_bps(pcm: Vec<u8>, sample_rate: u32, bps: Bps) -> FormatResult<Self> {
        // The RIFF chunk size has to fit too
        if !u32::try_from(pcm.len()).is_ok_and(|len| len <= u32::MAX - RIFF_OVERHEAD) {
            return Err(FormatError::TooLarge(pcm.len()));
        }
        Ok(Self {
            pcm,
            sample_rate,
            bps,
        })
    }
    /// Raw sample bytes
    #[must_use]
    pub fn pcm(&self) -> &[u8] {
        &self.pcm
    }
    /// Samples per second
    #[must_use]
    pub const fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
    /// Bits per sample
    #[must_use]
    pub const fn bps(&self) -> Bps {
        self.bps
    }
    /// Header describing this sound
    #[expect(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn header(&self) -> WavHeader {
        // Length checked on construction
        WavHeader::new(self.pcm.len() as u32, self.sample_rate, self.bps)
    }
    /// The complete file: header followed by the samples
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(WAV_HEADER_LEN + self.pcm.len());
        out.extend_from_slice(bytemuck::bytes_of(&self.header()));
        out.extend_from_slice(&self.pcm);
        out
    }
    /// The complete file as a `data:` URI, playable by browsers as is
    #[must_use]
    pub fn data_uri(&self) -> String {
        let mut uri = String::from("data:audio/wav;base64,");
        base64::engine::general_purpose::STANDARD.encode_string(self.to_bytes(), &mut uri);
        uri
    }
    /// Read back a file in the canonical layout written by [`Self::to_bytes`].
    ///
    /// Bytes after the data chunk are ignored.
    pub fn parse(data: &[u8]) -> FormatResult<Self> {
        let mut rd = Reader::new(data);
        let hdr: WavHeader = rd.next()?;
        if hdr.riff != *b"RIFF" || hdr.wave != *b"WAVE" {
            return Err(FormatError::InvalidHeader("not a RIFF/WAVE file"));
        }
        if hdr.fmt != *b"fmt " || hdr.fmt_size != FMT_CHUNK_LEN {
            return Err(FormatError::InvalidHeader("unexpected format chunk"));
        }
        if hdr.audio_format != PCM_FORMAT {
            return Err(FormatError::InvalidHeader("not integer PCM"));
        }
        if hdr.channels != MONO {
            return Err(FormatError::InvalidHeader("not mono"));
        }
        let bps = Bps::from_bits(hdr.bits_per_sample)
            .ok_or(FormatError::BitsPerSample(hdr.bits_per_sample))?;
        if hdr.data != *b"data" {
            return Err(FormatError::InvalidHeader("missing data chunk"));
        }
        let len = hdr.data_size as usize;
        if rd.remaining() < len {
            return Err(FormatError::Truncated);
        }
        let pcm = data[rd.cur..rd.cur + len].to_vec();
        tracing::trace!(len, sample_rate = hdr.sample_rate, ?bps, "parsed wav");
        Self::with_bps(pcm, hdr.sample_rate, bps)
    }
}
