use crate::params::Params;

const BUF_LEN: usize = 1024;
const MAX_OFFSET: usize = BUF_LEN - 1;

/// Short delay line mixed back into the dry signal
#[derive(Debug)]
pub struct Flanger {
    offset: f64,
    offset_slide: f64,
    /// Delay in sub-samples for the current tick
    delay: usize,
    write_pos: usize,
    buf: Box<[f64; BUF_LEN]>,
}

/// Square a parameter but keep its sign
fn signed_square(x: f64) -> f64 {
    let sq = x.powi(2);
    if x < 0.0 { -sq } else { sq }
}

impl Flanger {
    pub fn new(params: &Params) -> Self {
        Self {
            offset: signed_square(params.pha_offset) * 1020.0,
            offset_slide: signed_square(params.pha_ramp),
            delay: 0,
            write_pos: 0,
            buf: Box::new([0.0; BUF_LEN]),
        }
    }
    /// Advance the offset sweep by one tick
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn sweep(&mut self) {
        self.offset += self.offset_slide;
        // Rounds toward zero. Saturating cast, huge offsets end up at the maximum anyway
        self.delay = (self.offset.trunc().abs() as usize).min(MAX_OFFSET);
    }
    pub fn process(&mut self, input: f64) -> f64 {
        self.buf[self.write_pos] = input;
        let read_pos = (self.write_pos + BUF_LEN - self.delay) % BUF_LEN;
        let out = input + self.buf[read_pos];
        self.write_pos = (self.write_pos + 1) % BUF_LEN;
        out
    }
}
