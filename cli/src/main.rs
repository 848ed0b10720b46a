mod server;

use clap::{Parser, Subcommand};
use fskwave_core::{seeded_rng, Decoder, Encoder, PREAMBLE, SAMPLES_PER_BIT};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fskwave")]
#[command(about = "Binary FSK audio modem: text to WAV and back")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode text to a WAV audio file
    Encode {
        /// Text to encode (omit when using --input)
        #[arg(value_name = "TEXT", required_unless_present = "input")]
        text: Option<String>,

        /// Read the text from a file instead
        #[arg(short, long, value_name = "INPUT.TXT", conflicts_with = "text")]
        input: Option<PathBuf>,

        /// Output WAV file
        #[arg(short, long, value_name = "OUTPUT.WAV")]
        output: PathBuf,

        /// Gaussian noise level in [0, 1] (std dev as a fraction of tone amplitude)
        #[arg(short, long, default_value_t = 0.0)]
        noise_level: f32,

        /// Seed for reproducible noise
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Decode a WAV audio file back to text
    Decode {
        /// Input WAV file
        #[arg(value_name = "INPUT.WAV")]
        input: PathBuf,

        /// Write the text to a file instead of stdout
        #[arg(short, long, value_name = "OUTPUT.TXT")]
        output: Option<PathBuf>,

        /// Pass the audio through the noise model before demodulating
        #[arg(long)]
        add_noise: bool,

        /// Seed for reproducible noise
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Serve encode/decode over HTTP
    Serve {
        /// Address to listen on
        #[arg(short, long, env = "FSKWAVE_BIND", default_value = "127.0.0.1:8000")]
        bind: SocketAddr,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode {
            text,
            input,
            output,
            noise_level,
            seed,
        } => {
            let text = match (text, input) {
                (_, Some(path)) => std::fs::read_to_string(path)?,
                (Some(text), None) => text,
                (None, None) => return Err("no text given".into()),
            };
            encode_command(&text, &output, noise_level, seed)?
        }
        Commands::Decode {
            input,
            output,
            add_noise,
            seed,
        } => decode_command(&input, output.as_deref(), add_noise, seed)?,
        Commands::Serve { bind } => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(bind))?;
        }
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn encode_command(
    text: &str,
    output_path: &Path,
    noise_level: f32,
    seed: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let encoder = Encoder::new()?;
    let wav = match seed {
        Some(seed) => encoder.encode_with_rng(text, noise_level, &mut seeded_rng(seed))?,
        None => encoder.encode(text, noise_level)?,
    };

    let bits = PREAMBLE.len() + text.chars().count() * 8;
    println!(
        "Encoded {} characters ({} bits, {} samples, noise level {})",
        text.chars().count(),
        bits,
        bits * SAMPLES_PER_BIT,
        noise_level
    );

    std::fs::write(output_path, &wav)?;
    println!("Wrote {} bytes to {}", wav.len(), output_path.display());
    Ok(())
}

fn decode_command(
    input_path: &Path,
    output_path: Option<&Path>,
    add_noise: bool,
    seed: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let wav = std::fs::read(input_path)?;
    tracing::info!("Read {} bytes from {}", wav.len(), input_path.display());

    let mut decoder = Decoder::new()?;
    let text = match seed {
        Some(seed) => decoder.decode_with_rng(&wav, add_noise, &mut seeded_rng(seed))?,
        None => decoder.decode(&wav, add_noise)?,
    };

    match output_path {
        Some(path) => {
            std::fs::write(path, text.as_bytes())?;
            println!("Decoded {} characters to {}", text.chars().count(), path.display());
        }
        None => println!("{}", text),
    }

    Ok(())
}
