// txome: Spliced transcriptome construction and reference index caching.
//
// Copyright 2025 Tommi Mäklin [tommi@maklin.fi].
//
// Copyrights in this project are retained by contributors. No copyright assignment
// is required to contribute to this project.
//
// Except as otherwise noted (below and/or in individual files), this
// project is licensed under the Apache License, Version 2.0
// <LICENSE-APACHE> or <http://www.apache.org/licenses/LICENSE-2.0> or
// the MIT license, <LICENSE-MIT> or <http://opensource.org/licenses/MIT>,
// at your option.
//
use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use clap::CommandFactory;
use clap::Parser;

use txome::cache::Outcome;
use txome::ReferenceIndex;

mod cli;

type E = Box<dyn std::error::Error>;

/// Initializes the logger with verbosity given in `log_max_level`.
fn init_log(log_max_level: usize) {
    stderrlog::new()
    .module(module_path!())
    .quiet(false)
    .verbosity(log_max_level)
    .timestamp(stderrlog::Timestamp::Off)
    .init()
    .unwrap();
}

/// Opens `out_file` for writing or falls back to stdout.
fn open_output(out_file: &Option<PathBuf>) -> Result<Box<dyn Write>, E> {
    match out_file {
        Some(path) => {
            let f = File::create(path).map_err(|e| {
                log::error!("Error creating output file '{}'", path.display());
                e
            })?;
            Ok(Box::new(BufWriter::new(f)))
        },
        None => Ok(Box::new(BufWriter::new(std::io::stdout()))),
    }
}

fn load_index(
    reference: &Path,
    gtf: Option<&Path>,
    out_index: &Path,
) -> Result<ReferenceIndex, E> {
    let (index, outcome) = match gtf {
        Some(gtf) => txome::load_or_generate_transcriptome(reference, gtf, out_index)?,
        None => txome::load_or_generate(reference, out_index)?,
    };

    match outcome {
        Outcome::Reused => log::info!("Loaded {} index from '{}'", index.mode(), out_index.display()),
        Outcome::Rebuilt(reason) => log::info!("Built {} index ({})", index.mode(), reason),
    }

    Ok(index)
}

fn run(command: &cli::Commands) -> Result<(), E> {
    match command {
        // Index
        cli::Commands::Index {
            reference,
            out_index,
            gtf,
            verbose,
        } => {
            init_log(if *verbose { 2 } else { 1 });
            let index = load_index(reference, gtf.as_deref(), out_index)?;
            log::info!("Index has {} sequences", index.num_sequences_forward());
        },

        // Headers
        cli::Commands::Headers {
            reference,
            out_index,
            gtf,
            verbose,
        } => {
            init_log(if *verbose { 2 } else { 1 });
            let index = load_index(reference, gtf.as_deref(), out_index)?;

            let mut conn_out = BufWriter::new(std::io::stdout());
            conn_out.write_all(index.generate_sam_headers()?.as_bytes())?;
            conn_out.flush()?;
        },

        // Splice
        cli::Commands::Splice {
            reference,
            gtf,
            out_file,
            verbose,
        } => {
            init_log(if *verbose { 2 } else { 1 });
            let mut conn_out = open_output(out_file)?;
            txome::splice(reference, gtf, &mut conn_out)?;
        },

        // Regions
        cli::Commands::Regions {
            gtf,
            out_file,
            verbose,
        } => {
            init_log(if *verbose { 2 } else { 1 });
            let mut conn_in = File::open(gtf).map_err(|e| {
                log::error!("Error opening annotation file '{}'", gtf.display());
                e
            })?;
            let mut conn_out = open_output(out_file)?;
            txome::regions(&mut conn_in, &mut conn_out)?;
        },
    }

    Ok(())
}

fn main() {
    let cli = cli::Cli::parse();

    // Subcommands:
    match &cli.command {
        Some(command) => {
            if let Err(e) = run(command) {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => {
            let _ = cli::Cli::command().print_help();
        },
    }
}
