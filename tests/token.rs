//! Token codec properties

use {
    proptest::prelude::*,
    sfxcow::{FLOAT_FIELDS, Params, TOKEN_LEN, base58, float_bits},
};

fn params_strategy() -> impl Strategy<Value = Params> {
    (
        0u8..4,
        prop::array::uniform22(-1.0f32..=1.0),
    )
        .prop_map(|(wave_type, floats)| {
            let mut params = Params {
                wave_type,
                ..Params::default()
            };
            for (field, value) in params.float_fields_mut().into_iter().zip(floats) {
                *field = f64::from(value);
            }
            params
        })
}

proptest! {
    #[test]
    fn params_survive_token(params in params_strategy()) {
        let token = params.to_b58();
        let back = Params::from_b58(&token).unwrap();
        prop_assert_eq!(back.to_b58(), token);
        prop_assert_eq!(back, params);
    }

    #[test]
    fn bytes_survive_base58(bytes in prop::collection::vec(any::<u8>(), 0..128)) {
        prop_assert_eq!(base58::decode(&base58::encode(&bytes)).unwrap(), bytes);
    }

    #[test]
    fn normal_bits_survive(sign in any::<bool>(), exp in 1u32..255, mantissa in 0u32..(1 << 23)) {
        let bits = (u32::from(sign) << 31) | (exp << 23) | mantissa;
        prop_assert_eq!(float_bits::float_to_bits(float_bits::bits_to_float(bits)), bits);
    }

    #[test]
    fn subnormal_bits_survive(mantissa in 1u32..(1 << 22)) {
        prop_assert_eq!(float_bits::float_to_bits(float_bits::bits_to_float(mantissa)), mantissa);
    }

    #[test]
    fn any_token_bytes_decode(wave in any::<u8>(), floats in prop::array::uniform22(any::<u32>())) {
        let mut bytes = vec![wave];
        for bits in floats {
            bytes.extend_from_slice(&bits.to_le_bytes());
        }
        prop_assert_eq!(bytes.len(), TOKEN_LEN);
        let params = Params::from_bytes(&bytes).unwrap();
        prop_assert_eq!(params.wave_type, wave);
        prop_assert_eq!(params.float_fields().len(), FLOAT_FIELDS);
    }
}
