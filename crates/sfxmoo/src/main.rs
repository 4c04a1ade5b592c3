//! Command line sound effect renderer
#![forbid(unsafe_code)]

use {
    clap::Parser,
    sfxcow::{Params, RenderOpts, SinRng},
    std::{
        io::{IsTerminal, Write as _},
        path::PathBuf,
    },
    tracing_subscriber::EnvFilter,
};

#[derive(clap::Parser)]
struct Args {
    /// Base58 parameter token (a leading `#` is fine)
    token: String,
    /// Seed for the noise generator
    #[arg(short, long, default_value = "0")]
    seed: u32,
    /// Write the WAV file here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Print the sound as a `data:` URI instead
    #[arg(long, conflicts_with_all = ["output", "raw"])]
    data_uri: bool,
    /// Write bare PCM samples without the WAV header
    #[arg(long)]
    raw: bool,
    /// Output sample rate (at most 44100)
    #[arg(short = 'r', long)]
    sample_rate: Option<u32>,
    /// Output bits per sample (8 or 16)
    #[arg(short, long)]
    bits: Option<u16>,
    /// Sound volume, overriding the default of 0.5
    #[arg(long)]
    volume: Option<f64>,
    /// Master volume multiplier
    #[arg(short, long, default_value = "1.0")]
    master_volume: f64,
    /// Print the decoded parameters as JSON and exit
    #[arg(long)]
    dump_params: bool,
}

fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
    let args = Args::parse();
    let mut stderr = std::io::stderr().lock();
    let mut params = match Params::from_b58(&args.token) {
        Ok(params) => params,
        Err(e) => {
            writeln!(stderr, "Failed to decode token: {e}")?;
            return Err(std::io::Error::other("Token decode error"));
        }
    };
    if let Some(rate) = args.sample_rate {
        params.sample_rate = rate;
    }
    if let Some(bits) = args.bits {
        params.sample_bits = bits;
    }
    if let Some(vol) = args.volume {
        params.sound_vol = vol;
    }
    for name in params.out_of_range() {
        tracing::warn!(name, "parameter out of its nominal range");
    }
    if args.dump_params {
        let json = serde_json::to_string_pretty(&params).map_err(std::io::Error::other)?;
        println!("{json}");
        return Ok(());
    }
    let opts = RenderOpts {
        master_volume: args.master_volume,
    };
    let rendered = match sfxcow::render_with(&params, &opts, &mut SinRng::new(args.seed)) {
        Ok(rendered) => rendered,
        Err(e) => {
            writeln!(stderr, "Failed to render: {e}")?;
            return Err(std::io::Error::other("Render error"));
        }
    };
    tracing::info!(
        samples = rendered.sample_count(),
        clipped = rendered.clipped,
        "rendered"
    );
    let bytes = if args.raw {
        rendered.samples
    } else {
        let wav = match rendered.into_wav() {
            Ok(wav) => wav,
            Err(e) => {
                writeln!(stderr, "Failed to build WAV: {e}")?;
                return Err(std::io::Error::other("WAV error"));
            }
        };
        if args.data_uri {
            println!("{}", wav.data_uri());
            return Ok(());
        }
        wav.to_bytes()
    };
    match args.output {
        Some(path) => std::fs::write(&path, bytes)?,
        None => {
            let mut writer = std::io::stdout().lock();
            if writer.is_terminal() {
                writeln!(
                    stderr,
                    "You don't want to write sample data to a terminal. Use -o or --data-uri."
                )?;
                return Err(std::io::Error::other(
                    "Attempting to write sample data to terminal",
                ));
            }
            writer.write_all(&bytes)?;
        }
    }
    Ok(())
}
