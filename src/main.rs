use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rhuff::{
    compress, decompress,
    files::{compressed_name, decompressed_name, FileInfo, SizeComparison},
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    // Command to execute
    #[command(subcommand)]
    command: Commands,

    /// Log filter, e.g. "debug" or "rhuff=trace"
    #[arg(long, global = true, env = "RHUFF_LOG", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compress a file, writing <INPUT>.huff unless an output is given
    Compress {
        /// Path of the input file
        #[arg(short, long)]
        input: PathBuf,

        /// Path of the output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Decompress a file, stripping the .huff extension unless an output is given
    Decompress {
        /// Path of the input file
        #[arg(short, long)]
        input: PathBuf,

        /// Path of the output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show the size of a file
    Info { file: PathBuf },
    /// Compare the sizes of two files
    Compare { first: PathBuf, second: PathBuf },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_new(&args.log_level)
        .with_context(|| format!("invalid log filter \"{}\"", args.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Commands::Compress { input, output } => {
            let output = output.unwrap_or_else(|| compressed_name(&input));
            compress(&input, &output).context("Error during compression")?;

            let results = SizeComparison::new(&input, &output)?;
            println!("Compression Results:");
            println!("Original size: {} bytes", results.first.size);
            println!("Compressed size: {} bytes", results.second.size);
            if let Some(ratio) = results.ratio() {
                println!("Compression ratio: {:.2}%", ratio);
            }
            println!("Space saved: {} bytes", results.saved());
        }
        Commands::Decompress { input, output } => {
            let output = output.unwrap_or_else(|| decompressed_name(&input));
            decompress(&input, &output).context("Error during decompression")?;
            println!("Decompressed to {}", output.display());
        }
        Commands::Info { file } => {
            println!("{}", FileInfo::new(&file)?);
        }
        Commands::Compare { first, second } => {
            println!("{}", SizeComparison::new(&first, &second)?);
        }
    }

    Ok(())
}
