//! CLI for fractalcrypt: encode text to bits and watch them orbit.

mod commands;
mod tui;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "fractalcrypt")]
#[command(about = "fractalcrypt: turn text into bits and watch them breathe")]
#[command(version = fractalcrypt_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode text as 8-digit binary groups
    Encrypt {
        /// Text to encode
        text: String,

        /// Iteration count (clamped to 1..=20; accepted but not yet used)
        #[arg(long, default_value = "5", allow_negative_numbers = true)]
        iterations: i64,

        /// Seed (clamped to 1..=1000; accepted but not yet used)
        #[arg(long, default_value = "42", allow_negative_numbers = true)]
        seed: i64,
    },

    /// Decode 8-digit binary groups back to text
    Decrypt {
        /// Binary digits to decode; a trailing partial group is ignored
        binary: String,

        /// Iteration count (clamped to 1..=20; accepted but not yet used)
        #[arg(long, default_value = "5", allow_negative_numbers = true)]
        iterations: i64,

        /// Seed (clamped to 1..=1000; accepted but not yet used)
        #[arg(long, default_value = "42", allow_negative_numbers = true)]
        seed: i64,
    },

    /// Dump the point layout of an input as JSON
    Layout {
        /// Text to encode, or binary digits with --binary
        input: String,

        /// Treat the input as binary digits instead of text
        #[arg(long)]
        binary: bool,

        /// Surface width in pixels
        #[arg(long, default_value = "800")]
        width: f64,

        /// Surface height in pixels
        #[arg(long, default_value = "600")]
        height: f64,

        /// Fixed RNG seed for point phases (random if omitted)
        #[arg(long)]
        phase_seed: Option<u64>,

        /// Write JSON to a file instead of stdout
        #[arg(long)]
        output: Option<String>,
    },

    /// Live animated ring in the terminal (TUI)
    Animate {
        /// Text to encrypt, or binary to decrypt with --decrypt
        input: String,

        /// Run the decrypt entry point instead of encrypt
        #[arg(long)]
        decrypt: bool,

        /// Target frames per second
        #[arg(long, default_value = "30")]
        fps: f64,

        /// Draw the sliding perspective grid
        #[arg(long)]
        grid: bool,

        /// Draw scanlines and vignette (strokes and arcs only in a terminal)
        #[arg(long)]
        effects: bool,

        /// Add hash-noise drift to point motion
        #[arg(long)]
        drift: bool,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Encrypt {
            text,
            iterations,
            seed,
        } => commands::codec::run_encrypt(&text, iterations, seed),
        Commands::Decrypt {
            binary,
            iterations,
            seed,
        } => commands::codec::run_decrypt(&binary, iterations, seed),
        Commands::Layout {
            input,
            binary,
            width,
            height,
            phase_seed,
            output,
        } => commands::layout::run(commands::layout::LayoutCommandConfig {
            input: &input,
            is_binary: binary,
            width,
            height,
            phase_seed,
            output_path: output.as_deref(),
        }),
        Commands::Animate {
            input,
            decrypt,
            fps,
            grid,
            effects,
            drift,
        } => commands::animate::run(commands::animate::AnimateCommandConfig {
            input: &input,
            decrypt,
            fps,
            grid,
            post_effects: effects,
            fractal_drift: drift,
        }),
    }
}
