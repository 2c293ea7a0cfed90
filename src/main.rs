//! stegobmp - hide files inside 24-bit uncompressed bitmaps.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use stegobmp::config::{CipherAlgorithm, CipherConfig, CipherMode};
use stegobmp::{pipeline, StegoMethod};

#[derive(Parser)]
#[command(name = "stegobmp")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "LSB steganography for 24-bit uncompressed bitmaps",
    long_about = "Hides an arbitrary file inside the pixel data of a BMP carrier, \
                  optionally encrypting the payload with a password."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hide a file inside a carrier bitmap
    Embed {
        /// File to hide
        #[arg(long = "in")]
        input: PathBuf,

        /// Carrier bitmap (24bpp, uncompressed)
        #[arg(short = 'p', long = "carrier")]
        carrier: PathBuf,

        /// Output bitmap with the embedded payload
        #[arg(long = "out")]
        output: PathBuf,

        /// Steganography method: LSB1, LSB4 or LSBI
        #[arg(long = "steg")]
        method: StegoMethod,

        /// Encryption algorithm: aes128, aes192, aes256 or 3des
        #[arg(short = 'a', requires = "pass")]
        algorithm: Option<CipherAlgorithm>,

        /// Cipher mode: ecb, cbc, cfb or ofb
        #[arg(short = 'm', requires = "pass")]
        mode: Option<CipherMode>,

        /// Password; providing one enables encryption
        #[arg(long = "pass")]
        pass: Option<String>,
    },

    /// Recover a hidden file from a bitmap
    Extract {
        /// Bitmap carrying the payload
        #[arg(short = 'p', long = "carrier")]
        carrier: PathBuf,

        /// Output path for the recovered file
        #[arg(long = "out")]
        output: PathBuf,

        /// Steganography method: LSB1, LSB4 or LSBI
        #[arg(long = "steg")]
        method: StegoMethod,

        /// Encryption algorithm: aes128, aes192, aes256 or 3des
        #[arg(short = 'a', requires = "pass")]
        algorithm: Option<CipherAlgorithm>,

        /// Cipher mode: ecb, cbc, cfb or ofb
        #[arg(short = 'm', requires = "pass")]
        mode: Option<CipherMode>,

        /// Password used when the payload was embedded
        #[arg(long = "pass")]
        pass: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Embed {
            input,
            carrier,
            output,
            method,
            algorithm,
            mode,
            pass,
        } => cmd_embed(&input, &carrier, &output, method, cipher_config(algorithm, mode, pass)),

        Commands::Extract {
            carrier,
            output,
            method,
            algorithm,
            mode,
            pass,
        } => cmd_extract(&carrier, &output, method, cipher_config(algorithm, mode, pass)),
    }
}

/// A password turns encryption on; algorithm and mode fall back to the
/// defaults (AES-128, CBC) when not given.
fn cipher_config(
    algorithm: Option<CipherAlgorithm>,
    mode: Option<CipherMode>,
    pass: Option<String>,
) -> Option<CipherConfig> {
    pass.map(|password| {
        CipherConfig::new(
            algorithm.unwrap_or_default(),
            mode.unwrap_or_default(),
            password,
        )
    })
}

fn cmd_embed(
    input: &PathBuf,
    carrier: &PathBuf,
    output: &PathBuf,
    method: StegoMethod,
    cipher: Option<CipherConfig>,
) -> anyhow::Result<()> {
    let report = pipeline::embed(input, carrier, output, method, cipher.as_ref())
        .with_context(|| format!("embedding '{}' into '{}'", input.display(), carrier.display()))?;

    println!("Embedded '{}' into '{}'", input.display(), output.display());
    println!("  Method:     {}", method);
    println!(
        "  Payload:    {} of {} bytes of capacity",
        report.embedded_bytes, report.capacity_bytes
    );
    println!("  Extension:  {}", report.extension);
    match &cipher {
        Some(config) => println!("  Encryption: {}", config.describe()),
        None => println!("  Encryption: none"),
    }

    Ok(())
}

fn cmd_extract(
    carrier: &PathBuf,
    output: &PathBuf,
    method: StegoMethod,
    cipher: Option<CipherConfig>,
) -> anyhow::Result<()> {
    let report = pipeline::extract(carrier, output, method, cipher.as_ref())
        .with_context(|| format!("extracting from '{}'", carrier.display()))?;

    println!("Extracted '{}'", output.display());
    println!("  Method:     {}", method);
    println!("  Recovered:  {} bytes", report.recovered_bytes);
    println!("  Extension:  {}", report.extension);
    match &cipher {
        Some(config) => println!("  Decryption: {}", config.describe()),
        None => println!("  Decryption: none"),
    }

    Ok(())
}
