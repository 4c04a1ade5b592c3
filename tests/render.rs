//! End-to-end rendering from tokens and default parameters

use sfxcow::{
    Bps, Error, FormatError, Params, SinRng, SynthError, WAV_HEADER_LEN, Wav, WaveType,
};

const NOISE_TOKEN: &str = "7BMHBGGaSzarJeS7MiiRhykUpKV4wWpEZpdYH6pVwK37AGbh35bGS4Kq3LtjMFVd39pHRstQSpE3yrKF9C9e5qHfo5y753MhNFdGb8dMPboFMHdoAh23ywBAX";
const REPEAT_TOKEN: &str = "12TTcYkj3oge3fiLF85vp5Wk6eVCSUs42gWSdefSWWJqa1juWJbyMbMJFVS4Mo546WdpoSAVAc8Qf8S3L8baXW13MTA8ojab2F4c1TsRUT29GFxaDLRYtNn3cH";
const SQUARE_TOKEN: &str = "11111HH1xzWQ2n9NjPoeata2U7iAjRb4HNmh3T61D1hPrHyvEZ4AmJwMLG8p7eMPMyEgQby4atBXLYT1BSQ8JWC6sU8tzXLhiJdp2mz9pZPhmfzNKn9Kp4Ss";

fn u32_at(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes(bytes[at..at + 4].try_into().unwrap())
}

fn u16_at(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes(bytes[at..at + 2].try_into().unwrap())
}

#[test]
fn default_scenario() {
    let wav = sfxcow::generate(&Params::default(), &mut SinRng::new(0)).unwrap();
    let bytes = wav.to_bytes();
    let data_size = bytes.len() - WAV_HEADER_LEN;
    assert_eq!(data_size, 25_002);
    assert_eq!(&bytes[0..4], b"RIFF");
    assert_eq!(u32_at(&bytes, 4) as usize, 36 + data_size);
    assert_eq!(&bytes[8..16], b"WAVEfmt ");
    assert_eq!(u32_at(&bytes, 16), 16);
    assert_eq!(u16_at(&bytes, 20), 1);
    assert_eq!(u16_at(&bytes, 22), 1);
    assert_eq!(u32_at(&bytes, 24), 44_100);
    assert_eq!(u32_at(&bytes, 28), 44_100);
    assert_eq!(u16_at(&bytes, 32), 1);
    assert_eq!(u16_at(&bytes, 34), 8);
    assert_eq!(&bytes[36..40], b"data");
    assert_eq!(u32_at(&bytes, 40) as usize, data_size);
    assert_eq!(bytes[WAV_HEADER_LEN], 211);
    assert_eq!(Wav::parse(&bytes).unwrap(), wav);
}

#[test]
fn same_seed_same_bytes() {
    let params = Params::from_b58(NOISE_TOKEN).unwrap();
    let a = sfxcow::generate(&params, &mut SinRng::new(0)).unwrap();
    let b = sfxcow::generate(&params, &mut SinRng::new(0)).unwrap();
    assert_eq!(a.to_bytes(), b.to_bytes());
    assert_eq!(a.data_uri(), b.data_uri());
}

#[test]
fn token_render_lengths() {
    for (token, wave, len) in [
        (NOISE_TOKEN, WaveType::Noise, 16_647),
        (REPEAT_TOKEN, WaveType::Square, 53_493),
        (SQUARE_TOKEN, WaveType::Square, 116_897),
    ] {
        let params = Params::from_b58(token).unwrap();
        assert_eq!(params.wave(), Ok(wave));
        let rendered = sfxcow::render(&params, &mut SinRng::new(0)).unwrap();
        assert_eq!(rendered.samples.len(), len);
        assert!(rendered.clipped <= len);
        // Seed only changes the noise, not the length
        let other = sfxcow::render(&params, &mut SinRng::new(1)).unwrap();
        assert_eq!(other.samples.len(), len);
    }
}

#[test]
fn noise_token_clips() {
    let params = Params::from_b58(NOISE_TOKEN).unwrap();
    let rendered = sfxcow::render(&params, &mut SinRng::new(0)).unwrap();
    assert!(rendered.clipped > 0);
}

#[test]
fn out_of_range_token_still_renders() {
    let params = Params::from_b58(REPEAT_TOKEN).unwrap();
    assert!(params.out_of_range().contains(&"env_decay"));
    assert!(sfxcow::generate(&params, &mut SinRng::new(0)).is_ok());
}

#[test]
fn sixteen_bit_wav() {
    let params = Params {
        sample_bits: 16,
        ..Params::default()
    };
    let wav = sfxcow::generate(&params, &mut SinRng::new(0)).unwrap();
    assert_eq!(wav.bps(), Bps::B16);
    let hdr = wav.header();
    assert_eq!(hdr.data_size, 50_004);
    assert_eq!(hdr.byte_rate, 88_200);
    assert_eq!(hdr.block_align, 2);
}

#[test]
fn lower_sample_rate() {
    let params = Params {
        sample_rate: 22_050,
        ..Params::default()
    };
    let wav = sfxcow::generate(&params, &mut SinRng::new(0)).unwrap();
    assert_eq!(wav.pcm().len(), 12_501);
    assert_eq!(wav.header().sample_rate, 22_050);
    assert_eq!(wav.header().byte_rate, 22_050);
}

#[test]
fn render_terminates_within_envelope() {
    // The longest possible envelope, with every sweep pushed to its limit
    let params = Params {
        env_attack: 1.0,
        env_sustain: 1.0,
        env_decay: 1.0,
        freq_ramp: 1.0,
        freq_dramp: 1.0,
        pha_ramp: 1.0,
        lpf_ramp: 1.0,
        hpf_ramp: 1.0,
        repeat_speed: 1.0,
        ..Params::default()
    };
    let rendered = sfxcow::render(&params, &mut SinRng::new(0)).unwrap();
    assert!(rendered.samples.len() <= 3 * 100_001);
}

#[test]
fn errors_surface_through_generate() {
    let mut rng = SinRng::new(0);
    let bad_wave = Params {
        wave_type: 9,
        ..Params::default()
    };
    assert_eq!(
        sfxcow::generate(&bad_wave, &mut rng),
        Err(Error::Synth(SynthError::UnknownWaveform(9)))
    );
    let bad_bits = Params {
        sample_bits: 12,
        ..Params::default()
    };
    assert_eq!(
        sfxcow::generate(&bad_bits, &mut rng),
        Err(Error::Synth(SynthError::SampleBits(12)))
    );
    let nan_cutoff = Params {
        lpf_freq: f64::NAN,
        ..Params::default()
    };
    assert_eq!(
        sfxcow::generate(&nan_cutoff, &mut rng),
        Err(Error::Synth(SynthError::NonFinite("lpf_freq")))
    );
    assert_eq!(
        Wav::new(Vec::new(), 44_100, 12),
        Err(FormatError::BitsPerSample(12))
    );
    assert!(matches!(
        "not a token".parse::<Params>(),
        Err(sfxcow::DecodeError::InvalidChar { ch: ' ', pos: 3 })
    ));
}
