//! One pole filters with sweepable cutoffs.
//!
//! Cutoff coefficients are swept multiplicatively and clamped to a stable range
//! on every step, so a sweep can never run away into NaN or infinity.

// Operation order is part of the output, keep the arithmetic unfused.
#![allow(clippy::suboptimal_flops)]

use crate::params::Params;

const LPF_MAX_W: f64 = 0.1;
const HPF_MIN_W: f64 = 0.000_01;
const HPF_MAX_W: f64 = 0.1;
const MAX_DAMPING: f64 = 0.8;

/// Resonant low-pass filter.
///
/// Swept once per sub-sample.
#[derive(Debug, Clone)]
pub struct LowPass {
    enabled: bool,
    w: f64,
    w_slide: f64,
    damping: f64,
    pos: f64,
    vel: f64,
}

impl LowPass {
    pub fn new(params: &Params) -> Self {
        let w = params.lpf_freq.powf(3.0) * 0.1;
        let damping = 5.0 / (1.0 + params.lpf_resonance.powi(2) * 20.0) * (0.01 + w);
        Self {
            // Fully open cutoff means no filtering at all
            enabled: params.lpf_freq != 1.0,
            w,
            w_slide: 1.0 + params.lpf_ramp * 0.0001,
            damping: damping.min(MAX_DAMPING),
            pos: 0.0,
            vel: 0.0,
        }
    }
    /// Sweep the cutoff and filter one sub-sample
    pub fn process(&mut self, input: f64) -> f64 {
        self.w = (self.w * self.w_slide).clamp(0.0, LPF_MAX_W);
        if self.enabled {
            self.vel += (input - self.pos) * self.w;
            self.vel -= self.vel * self.damping;
        } else {
            self.pos = input;
            self.vel = 0.0;
        }
        self.pos += self.vel;
        self.pos
    }
}

/// Leaky differentiator high-pass filter.
///
/// Swept once per tick.
#[derive(Debug, Clone)]
pub struct HighPass {
    w: f64,
    w_slide: f64,
    last_input: f64,
    acc: f64,
}

impl HighPass {
    pub fn new(params: &Params) -> Self {
        Self {
            w: params.hpf_freq.powi(2) * 0.1,
            w_slide: 1.0 + params.hpf_ramp * 0.0003,
            last_input: 0.0,
            acc: 0.0,
        }
    }
    /// Advance the cutoff sweep by one tick
    pub fn sweep(&mut self) {
        if self.w_slide != 0.0 {
            self.w = (self.w * self.w_slide).clamp(HPF_MIN_W, HPF_MAX_W);
        }
    }
    pub fn process(&mut self, input: f64) -> f64 {
        self.acc += input - self.last_input;
        self.last_input = input;
        self.acc -= self.acc * self.w;
        self.acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(f: impl FnOnce(&mut Params)) -> Params {
        let mut p = Params::default();
        f(&mut p);
        p
    }

    #[test]
    fn open_lowpass_passes_through() {
        let mut lp = LowPass::new(&Params::default());
        for x in [0.5, -0.5, 0.25, 1.5] {
            assert_eq!(lp.process(x), x);
        }
    }

    #[test]
    fn lowpass_settles_on_dc() {
        let mut lp = LowPass::new(&params(|p| p.lpf_freq = 0.5));
        let mut out = 0.0;
        for _ in 0..100_000 {
            out = lp.process(1.0);
        }
        assert!((out - 1.0).abs() < 1e-3, "{out}");
    }

    #[test]
    fn lowpass_sweep_is_clamped() {
        let mut lp = LowPass::new(&params(|p| {
            p.lpf_freq = 0.9;
            p.lpf_ramp = 1.0;
        }));
        for _ in 0..100_000 {
            let out = lp.process(1.0);
            assert!(out.is_finite());
        }
        assert!(lp.w <= LPF_MAX_W);
        let mut lp = LowPass::new(&params(|p| {
            p.lpf_freq = 0.9;
            p.lpf_ramp = -1.0;
        }));
        for _ in 0..200_000 {
            lp.process(1.0);
        }
        assert!(lp.w >= 0.0 && lp.w < 1e-6);
    }

    #[test]
    fn damping_is_capped() {
        let lp = LowPass::new(&params(|p| p.lpf_freq = 0.99));
        assert!(lp.damping <= MAX_DAMPING);
    }

    #[test]
    fn highpass_blocks_dc() {
        let mut hp = HighPass::new(&params(|p| p.hpf_freq = 0.5));
        let mut out = 1.0;
        for _ in 0..10_000 {
            hp.sweep();
            out = hp.process(1.0);
        }
        assert!(out.abs() < 1e-6, "{out}");
    }

    #[test]
    fn highpass_sweep_clamps_both_ways() {
        let mut hp = HighPass::new(&Params::default());
        hp.sweep();
        // Even a zero cutoff is lifted to the minimum once it sweeps
        assert_eq!(hp.w, HPF_MIN_W);
        let mut hp = HighPass::new(&params(|p| {
            p.hpf_freq = 0.9;
            p.hpf_ramp = 1.0;
        }));
        for _ in 0..10_000 {
            hp.sweep();
        }
        assert_eq!(hp.w, HPF_MAX_W);
    }
}
