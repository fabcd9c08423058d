//! wad-cli - Command-line interface for wadlib
//!
//! A command-line tool for compressing and decompressing files using the
//! WAD format from the Ratchet & Clank PS2 games.

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use wadlib::{compress, decompress, validate_magic, WadHeader};

#[derive(Parser)]
#[command(name = "wad-cli")]
#[command(about = "A CLI tool for WAD compression and decompression")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file into a WAD stream
    Compress {
        /// Input file to compress
        input: PathBuf,

        /// Output compressed file
        output: PathBuf,

        /// Number of compression worker threads
        #[arg(short, long, default_value_t = 1)]
        threads: usize,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,
    },

    /// Decompress a WAD stream
    Decompress {
        /// Input compressed file
        input: PathBuf,

        /// Output decompressed file
        output: PathBuf,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,
    },

    /// Get information about a WAD file
    Info {
        /// Compressed file to analyze
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compress {
            input,
            output,
            threads,
            force,
        } => compress_file(&input, &output, threads, force, cli.verbose, cli.quiet),
        Commands::Decompress {
            input,
            output,
            force,
        } => decompress_file(&input, &output, force, cli.verbose, cli.quiet),
        Commands::Info { input } => show_file_info(&input, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new(2);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message(message);
    pb
}

fn compress_file(
    input: &PathBuf,
    output: &PathBuf,
    threads: usize,
    force: bool,
    verbose: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }
    if output.exists() && !force {
        return Err(format!(
            "Output file '{}' already exists. Use --force to overwrite",
            output.display()
        )
        .into());
    }

    if verbose {
        println!(
            "Compressing '{}' to '{}' with {} thread(s)",
            input.display(),
            output.display(),
            threads
        );
    }

    let start_time = Instant::now();

    let input_data = fs::read(input)?;
    let input_size = input_data.len();

    if verbose {
        println!("Input size: {} bytes", input_size);
    }

    // Show a progress bar for large files
    let progress = if !quiet && input_size > 1024 * 1024 {
        Some(spinner("Compressing..."))
    } else {
        None
    };

    if let Some(ref pb) = progress {
        pb.inc(1);
    }

    let compressed_data =
        compress(&input_data, threads).map_err(|e| format!("Compression failed: {}", e))?;

    if let Some(ref pb) = progress {
        pb.inc(1);
        pb.finish_with_message("Compression complete");
    }

    fs::write(output, &compressed_data)?;

    let compression_time = start_time.elapsed();
    let output_size = compressed_data.len();
    let compression_ratio = (output_size as f64 / input_size.max(1) as f64) * 100.0;

    if !quiet {
        println!("✓ Compression successful!");
        println!("  Input:  {} bytes", input_size);
        println!("  Output: {} bytes", output_size);
        println!("  Ratio:  {:.1}%", compression_ratio);
        println!("  Time:   {:.2?}", compression_time);

        if compression_ratio > 100.0 {
            println!("  Note: File expanded during compression (common for small/random data)");
        }
    }

    Ok(())
}

fn decompress_file(
    input: &PathBuf,
    output: &PathBuf,
    force: bool,
    verbose: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }
    if output.exists() && !force {
        return Err(format!(
            "Output file '{}' already exists. Use --force to overwrite",
            output.display()
        )
        .into());
    }

    if verbose {
        println!(
            "Decompressing '{}' to '{}'",
            input.display(),
            output.display()
        );
    }

    let start_time = Instant::now();

    let compressed_data = fs::read(input)?;
    let input_size = compressed_data.len();

    if verbose {
        println!("Compressed size: {} bytes", input_size);
    }

    let progress = if !quiet && input_size > 1024 * 1024 {
        Some(spinner("Decompressing..."))
    } else {
        None
    };

    if let Some(ref pb) = progress {
        pb.inc(1);
    }

    let decompressed_data =
        decompress(&compressed_data).map_err(|e| format!("Decompression failed: {}", e))?;

    if let Some(ref pb) = progress {
        pb.inc(1);
        pb.finish_with_message("Decompression complete");
    }

    fs::write(output, &decompressed_data)?;

    let decompression_time = start_time.elapsed();
    let output_size = decompressed_data.len();
    let compression_ratio = (input_size as f64 / output_size.max(1) as f64) * 100.0;

    if !quiet {
        println!("✓ Decompression successful!");
        println!("  Input:  {} bytes", input_size);
        println!("  Output: {} bytes", output_size);
        println!("  Ratio:  {:.1}%", compression_ratio);
        println!("  Time:   {:.2?}", decompression_time);
    }

    Ok(())
}

fn show_file_info(input: &PathBuf, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }

    let data = fs::read(input)?;
    let file_size = data.len();

    println!("WAD File Information:");
    println!("  File: {}", input.display());
    println!("  Size: {} bytes", file_size);

    if !validate_magic(&data) {
        println!("  Status: ✗ Not a WAD file (bad magic)");
        return Ok(());
    }

    let header = WadHeader::parse(&data)?;
    println!("  Declared Size: {} bytes", header.total_size);
    if header.total_size as usize != file_size {
        println!(
            "  Note: declared size differs from file size by {} bytes",
            file_size as i64 - header.total_size as i64
        );
    }

    if verbose {
        println!(
            "  Header bytes: {:02x?}",
            &data[..data.len().min(0x10)]
        );
    }

    match decompress(&data) {
        Ok(decompressed) => {
            let decompressed_size = decompressed.len();
            let compression_ratio = (file_size as f64 / decompressed_size.max(1) as f64) * 100.0;
            println!("  Decompressed Size: {} bytes", decompressed_size);
            println!("  Compression Ratio: {:.1}%", compression_ratio);
            println!("  Status: ✓ Valid WAD file");
        }
        Err(e) => {
            println!("  Status: ✗ Invalid or corrupted WAD file");
            if verbose {
                println!("  Error: {}", e);
            }
        }
    }

    Ok(())
}
