//! Regression testing utilities for sfxcow
//!
//! Renders a fixed set of sounds and compares the PCM against a known good dump.

use {
    anstyle::AnsiColor,
    clap::Parser,
    sfxcow::{Params, SinRng},
    std::{
        error::Error,
        io::{self},
        path::PathBuf,
    },
};

/// Tokens rendered by the regression dump, one per waveform
const TOKENS: [&str; 3] = [
    "7BMHBGGaSzarJeS7MiiRhykUpKV4wWpEZpdYH6pVwK37AGbh35bGS4Kq3LtjMFVd39pHRstQSpE3yrKF9C9e5qHfo5y753MhNFdGb8dMPboFMHdoAh23ywBAX",
    "12TTcYkj3oge3fiLF85vp5Wk6eVCSUs42gWSdefSWWJqa1juWJbyMbMJFVS4Mo546WdpoSAVAc8Qf8S3L8baXW13MTA8ojab2F4c1TsRUT29GFxaDLRYtNn3cH",
    "11111HH1xzWQ2n9NjPoeata2U7iAjRb4HNmh3T61D1hPrHyvEZ4AmJwMLG8p7eMPMyEgQby4atBXLYT1BSQ8JWC6sU8tzXLhiJdp2mz9pZPhmfzNKn9Kp4Ss",
];

#[derive(clap::Parser)]
enum Args {
    DumpPcm { out_path: PathBuf },
    ComparePcm,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    if let Err(e) = std::fs::create_dir_all(basedir()) {
        eprintln!("Error: Failed to create test dir: {e}");
    }
    match args {
        Args::DumpPcm { out_path } => dump_pcm_file(out_path)?,
        Args::ComparePcm => cmp_pcm()?,
    }
    Ok(())
}

/// Every token rendered at both bit depths, concatenated
fn dump_pcm_buf() -> Result<Vec<u8>, Box<dyn Error>> {
    let mut out = Vec::new();
    for token in TOKENS {
        let mut params = Params::from_b58(token)?;
        for bits in [8, 16] {
            params.sample_bits = bits;
            let rendered = sfxcow::render(&params, &mut SinRng::new(0))?;
            out.extend_from_slice(&rendered.samples);
        }
    }
    Ok(out)
}

fn dump_pcm_file(out_path: PathBuf) -> Result<(), Box<dyn Error>> {
    std::fs::write(out_path, dump_pcm_buf()?)?;
    Ok(())
}

fn basedir() -> PathBuf {
    std::env::temp_dir().join("sfxcow-test")
}

fn cmp_pcm() -> Result<(), Box<dyn Error>> {
    let path = basedir().join("clean.pcm");
    if !path.exists() {
        return Err(format!("Need clean file at '{}'", path.display()).into());
    }
    let clean = std::fs::read(path)?;
    let dirty = dump_pcm_buf()?;
    if clean == dirty {
        pass("PCM matches");
    } else {
        let first_diff = clean.iter().zip(&dirty).position(|(a, b)| a != b);
        fail(&format!(
            "PCM mismatch (clean {} bytes, new {} bytes, first difference at {first_diff:?})",
            clean.len(),
            dirty.len()
        ));
        return Err(io::Error::other("PCM mismatch").into());
    }
    Ok(())
}

fn pass(msg: &str) {
    let style = anstyle::Style::new()
        .fg_color(Some(anstyle::Color::Ansi(AnsiColor::Green)))
        .bold();
    eprintln!("{style}[PASS]{style:#} {msg}");
}

fn fail(msg: &str) {
    let style = anstyle::Style::new()
        .fg_color(Some(anstyle::Color::Ansi(AnsiColor::Red)))
        .bold();
    eprintln!("{style}[FAIL]{style:#} {msg}");
}
