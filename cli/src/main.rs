//! stl2h - convert ASCII STL models to fixed-point C header arrays.
//!
//! Command-line front end over the `stl2h` library: argument handling,
//! logging setup, the overwrite confirmation prompt, and exit-code mapping.

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{debug, info};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use stl2h::HeaderOptions;

/// Convert a 3D mesh saved as STL format (ASCII) to a fixed-point C header.
#[derive(Debug, Parser)]
#[command(name = "stl2h", version)]
struct Cli {
    /// 3D mesh in STL file format
    #[arg(short, long)]
    input: PathBuf,

    /// Output filename of the converted data
    #[arg(short, long)]
    output: PathBuf,

    /// Scale ratio applied to vertex coordinates
    #[arg(short, long, default_value_t = 1.0)]
    scale: f64,

    /// Save face normals (normals are always written; accepted for compatibility)
    #[arg(short, long)]
    normals: bool,

    /// Answer yes to all requests
    #[arg(short, long)]
    yes: bool,

    /// Print the generated header to stdout
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if cli.input == cli.output {
        eprintln!("error: input and output files are the same");
        return ExitCode::from(2);
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let output = confirm_output(cli.output.clone(), cli.yes)?;

    let invocation = std::env::args().collect::<Vec<_>>().join(" ");
    let options = HeaderOptions {
        scale: cli.scale,
        invocation,
    };

    if cli.normals {
        debug!("face normals are always written; --normals has no effect");
    }

    info!("converting {}", cli.input.display());
    let summary = stl2h::convert(&cli.input, &output, &options)
        .with_context(|| format!("converting {}", cli.input.display()))?;

    info!("vertices: {}", summary.unique_vertices);
    info!("triangles: {}", summary.triangles);
    info!("saved output file: {}", output.display());

    if cli.verbose {
        print!("{}", summary.header);
    }
    Ok(())
}

/// One round of the overwrite prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prompt {
    /// The target exists and the user has not decided yet.
    Ask,
    /// Overwriting was approved, or the target does not exist.
    Confirmed,
    /// The user declined; a replacement name is needed.
    NeedNewName,
}

/// Resolve the final output path, asking before overwriting an existing file.
///
/// Loops until the chosen path either does not exist or the overwrite is
/// confirmed. An empty replacement name falls back to `temp.h`.
fn confirm_output(mut path: PathBuf, assume_yes: bool) -> Result<PathBuf> {
    if assume_yes {
        return Ok(path);
    }

    let mut state = if path.exists() {
        Prompt::Ask
    } else {
        Prompt::Confirmed
    };

    loop {
        match state {
            Prompt::Confirmed => return Ok(path),
            Prompt::Ask => {
                eprint!(
                    "output file \"{}\" already exists, overwrite? [y/n] ",
                    path.display()
                );
                io::stderr().flush()?;
                state = match read_answer()?.trim() {
                    "y" | "Y" => Prompt::Confirmed,
                    "n" | "N" => Prompt::NeedNewName,
                    _ => Prompt::Ask,
                };
            }
            Prompt::NeedNewName => {
                eprint!("enter new output file name: ");
                io::stderr().flush()?;
                let name = read_answer()?;
                let name = name.trim();
                path = if name.is_empty() {
                    PathBuf::from("temp.h")
                } else {
                    PathBuf::from(name)
                };
                state = if path.exists() {
                    Prompt::Ask
                } else {
                    Prompt::Confirmed
                };
            }
        }
    }
}

fn read_answer() -> Result<String> {
    let mut line = String::new();
    let n = io::stdin()
        .read_line(&mut line)
        .context("reading answer from stdin")?;
    if n == 0 {
        bail!("output file exists and no answer was given (use --yes to overwrite)");
    }
    Ok(line)
}
