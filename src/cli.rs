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
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    // Load or build the reference index
    Index {
        // Genome in fasta or fastq format
        #[arg(short = 'r', long = "reference", required = true)]
        reference: PathBuf,

        // Persisted index path
        #[arg(short = 'o', long = "output", required = true)]
        out_index: PathBuf,

        // GTF annotation, builds a transcriptome index if given
        #[arg(long = "gtf", required = false)]
        gtf: Option<PathBuf>,

        // Verbosity
        #[arg(long = "verbose", default_value_t = false)]
        verbose: bool,
    },

    // Load or build the reference index and print the SAM @SQ lines
    Headers {
        // Genome in fasta or fastq format
        #[arg(short = 'r', long = "reference", required = true)]
        reference: PathBuf,

        // Persisted index path
        #[arg(short = 'o', long = "output", required = true)]
        out_index: PathBuf,

        // GTF annotation, builds a transcriptome index if given
        #[arg(long = "gtf", required = false)]
        gtf: Option<PathBuf>,

        // Verbosity
        #[arg(long = "verbose", default_value_t = false)]
        verbose: bool,
    },

    // Write the spliced transcripts in fasta format
    Splice {
        // Genome in fasta or fastq format
        #[arg(short = 'r', long = "reference", required = true)]
        reference: PathBuf,

        // GTF annotation
        #[arg(long = "gtf", required = true)]
        gtf: PathBuf,

        // Output file path, defaults to stdout
        #[arg(short = 'o', long = "output", required = false)]
        out_file: Option<PathBuf>,

        // Verbosity
        #[arg(long = "verbose", default_value_t = false)]
        verbose: bool,
    },

    // Write the merged exon regions in bed format
    Regions {
        // GTF annotation
        #[arg(group = "input", required = true, help = "Input GTF file")]
        gtf: PathBuf,

        // Output file path, defaults to stdout
        #[arg(short = 'o', long = "output", required = false)]
        out_file: Option<PathBuf>,

        // Verbosity
        #[arg(long = "verbose", default_value_t = false)]
        verbose: bool,
    },
}
