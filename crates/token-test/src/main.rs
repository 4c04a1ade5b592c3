//! Test binary for token round-tripping

use std::process::ExitCode;

fn main() -> ExitCode {
    let token = std::env::args().nth(1).expect("Need a parameter token as arg");
    let params = match sfxcow::Params::from_b58(&token) {
        Ok(params) => params,
        Err(e) => {
            eprintln!("Decode failed: {e}");
            return ExitCode::FAILURE;
        }
    };
    let encoded = params.to_b58();
    let again = sfxcow::Params::from_b58(&encoded).expect("Re-decoding own output");
    // Compare the encoded form, NaN fields never compare equal
    if again.to_bytes() != params.to_bytes() {
        eprintln!("Parameter mismatch after round trip.");
        return ExitCode::FAILURE;
    }
    if encoded != token.strip_prefix('#').unwrap_or(&token) {
        eprintln!("Token mismatch.\n in: {token}\nout: {encoded}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
