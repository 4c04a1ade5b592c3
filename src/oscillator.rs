use crate::{params::WaveType, rng::NoiseSource};

const NOISE_LEN: usize = 32;

/// Phase-counting oscillator.
///
/// The phase advances one step per sub-sample and wraps at the current period,
/// so the pitch can change from one tick to the next without discontinuities in phase.
#[derive(Debug, Clone)]
pub struct Oscillator {
    wave: WaveType,
    phase: u32,
    noise: [f64; NOISE_LEN],
}

impl Oscillator {
    pub fn new(wave: WaveType, rng: &mut impl NoiseSource) -> Self {
        let mut this = Self {
            wave,
            phase: 0,
            noise: [0.0; NOISE_LEN],
        };
        this.refill_noise(rng);
        this
    }
    fn refill_noise(&mut self, rng: &mut impl NoiseSource) {
        for slot in &mut self.noise {
            *slot = rng.range(1.0, 2.0);
        }
    }
    /// Produce the next sub-sample.
    ///
    /// `period` is in sub-samples and must not be zero.
    /// `duty` is the fraction of the period spent high, `0.0..=0.5`.
    #[allow(clippy::suboptimal_flops)]
    pub fn next(&mut self, period: u32, duty: f64, rng: &mut impl NoiseSource) -> f64 {
        self.phase += 1;
        if self.phase >= period {
            self.phase %= period;
            if self.wave == WaveType::Noise {
                self.refill_noise(rng);
            }
        }
        let fp = f64::from(self.phase) / f64::from(period);
        match self.wave {
            WaveType::Square => {
                if fp < duty {
                    0.5
                } else {
                    -0.5
                }
            }
            WaveType::Sawtooth => {
                if fp < duty {
                    -1.0 + 2.0 * fp / duty
                } else {
                    1.0 - 2.0 * (fp - duty) / (1.0 - duty)
                }
            }
            WaveType::Sine => (fp * std::f64::consts::TAU).sin(),
            WaveType::Noise => {
                #[expect(clippy::cast_possible_truncation)]
                let idx = (u64::from(self.phase) * NOISE_LEN as u64 / u64::from(period)) as usize;
                self.noise[idx]
            }
        }
    }
}
