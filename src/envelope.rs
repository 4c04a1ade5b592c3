use crate::{params::Params, synth::Tick};

/// Envelope stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Attack = 0,
    Sustain,
    Decay,
}

impl Stage {
    const fn next(self) -> Option<Self> {
        match self {
            Self::Attack => Some(Self::Sustain),
            Self::Sustain => Some(Self::Decay),
            Self::Decay => None,
        }
    }
}

/// Volume envelope: linear attack, punchy sustain, linear decay
#[derive(Debug, Clone)]
pub struct Envelope {
    lengths: [Tick; 3],
    punch: f64,
    stage: Stage,
    elapsed: Tick,
}

/// Stage length in ticks for a normalized time parameter
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn stage_len(time: f64) -> Tick {
    (time * time * 100_000.0).trunc() as Tick
}

impl Envelope {
    pub fn new(params: &Params) -> Self {
        Self {
            lengths: [
                stage_len(params.env_attack),
                stage_len(params.env_sustain),
                stage_len(params.env_decay),
            ],
            punch: params.env_punch,
            stage: Stage::Attack,
            elapsed: 0,
        }
    }
    pub const fn lengths(&self) -> [Tick; 3] {
        self.lengths
    }
    /// Every stage is zero length, the envelope can't produce anything
    pub fn is_empty(&self) -> bool {
        self.lengths.iter().all(|&len| len == 0)
    }
    const fn len(&self, stage: Stage) -> Tick {
        self.lengths[stage as usize]
    }
    /// Advance by one tick and return the volume for it.
    ///
    /// Returns `None` once the decay stage is over.
    /// Zero length stages are skipped over without producing a tick.
    #[allow(clippy::suboptimal_flops)]
    pub fn step(&mut self) -> Option<f64> {
        self.elapsed += 1;
        if self.elapsed > self.len(self.stage) {
            self.elapsed = 0;
            let mut stage = self.stage.next()?;
            while self.len(stage) == 0 {
                stage = stage.next()?;
            }
            self.stage = stage;
        }
        // The current stage is never zero length here
        let frac = f64::from(self.elapsed) / f64::from(self.len(self.stage));
        Some(match self.stage {
            Stage::Attack => frac,
            Stage::Sustain => (1.0 - frac) * 2.0 * self.punch + 1.0,
            Stage::Decay => 1.0 - frac,
        })
    }
    #[cfg(test)]
    pub const fn stage(&self) -> Stage {
        self.stage
    }
}
