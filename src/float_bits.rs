//! Single precision float packing used by parameter tokens.
//!
//! Tokens store each parameter as a 32 bit pattern with the usual
//! sign / 8 bit exponent (bias 127) / 23 bit mantissa split.
//! Subnormals are scaled by `mantissa / 2^22` with exponent −126, which is what
//! every existing token was written with, so [`float_to_bits`] packs the same way.

const EXP_MASK: u32 = 0xFF;
const MANTISSA_MASK: u32 = 0x7F_FFFF;
const EXP_BIAS: i32 = 127;
const MIN_NORMAL_EXP: i32 = -126;
const MAX_NORMAL_EXP: i32 = 127;
/// Mantissa written for NaN. Any non-zero mantissa would do.
const NAN_MANTISSA: u32 = 0x1337;

const fn assemble(sign: u32, exponent: u32, mantissa: u32) -> u32 {
    (sign << 31) | (exponent << 23) | mantissa
}

/// Unpack a token float bit pattern.
#[must_use]
#[expect(clippy::cast_possible_wrap)]
pub fn bits_to_float(bits: u32) -> f64 {
    let sign = if bits & 0x8000_0000 != 0 { -1.0 } else { 1.0 };
    let exp_field = (bits >> 23) & EXP_MASK;
    let mantissa = bits & MANTISSA_MASK;

    let (significand, exponent) = match exp_field {
        EXP_MASK => {
            return if mantissa == 0 {
                sign * f64::INFINITY
            } else {
                f64::NAN
            };
        }
        0 => {
            if mantissa == 0 {
                return sign * 0.0;
            }
            (f64::from(mantissa) / f64::from(1u32 << 22), MIN_NORMAL_EXP)
        }
        _ => (
            f64::from(mantissa | (1 << 23)) / f64::from(1u32 << 23),
            exp_field as i32 - EXP_BIAS,
        ),
    };
    sign * significand * 2f64.powi(exponent)
}

/// Pack a value into a token float bit pattern.
///
/// Rounds to the nearest representable value (ties to even).
/// Magnitudes beyond the single precision range become infinity.
#[must_use]
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn float_to_bits(value: f64) -> u32 {
    if value.is_nan() {
        return assemble(0, EXP_MASK, NAN_MANTISSA);
    }
    let sign = u32::from(value.is_sign_negative());
    let mag = value.abs();
    if mag == 0.0 {
        return assemble(sign, 0, 0);
    }
    if mag.is_infinite() {
        return assemble(sign, EXP_MASK, 0);
    }
    // Exact binary exponent of a normal f64. f64 subnormals are far below what we can represent.
    let exponent = ((mag.to_bits() >> 52) & 0x7FF) as i32 - 1023;
    if exponent > MAX_NORMAL_EXP {
        return assemble(sign, EXP_MASK, 0);
    }
    if exponent >= MIN_NORMAL_EXP {
        let frac = mag / 2f64.powi(exponent) - 1.0;
        let mantissa = (frac * f64::from(1u32 << 23)).round_ties_even() as u32;
        // A mantissa that rounded up to 2^23 carries into the exponent (possibly into infinity)
        let biased = assemble(0, (exponent + EXP_BIAS) as u32, 0) + mantissa;
        return (sign << 31) | biased;
    }
    // Below 2^-126, so this stays under 2^22
    let mantissa = (mag * 2f64.powi(22 - MIN_NORMAL_EXP)).round_ties_even() as u32;
    assemble(sign, 0, mantissa)
}
