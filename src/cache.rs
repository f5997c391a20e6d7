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

//! Load a persisted [ReferenceIndex] or build and store a new one.
//!
//! A persisted index is a cache keyed by the index mode, the
//! [format version](crate::headers::file::INDEX_FORMAT_VERSION) and the
//! [fingerprints](SourceFingerprint) of the input files. The decision to reuse
//! or rebuild is made in two steps:
//!
//!   1. [probe] reads whatever is at the index path into a [CacheState].
//!   2. [decide] compares the state against the requested mode and the
//!      current inputs and returns a [Decision].
//!
//! A persisted index that cannot be read, was built in the other mode, or was
//! built from different inputs is never an error. It is rebuilt and
//! overwritten. Errors reading the reference or the annotation are fatal.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use txome::cache::{load_or_generate_transcriptome, Outcome};
//!
//! let (index, outcome) = load_or_generate_transcriptome("genome.fa", "genes.gtf", "genome.fa.idx").unwrap();
//!
//! if let Outcome::Rebuilt(reason) = outcome {
//!     eprintln!("index was rebuilt: {}", reason);
//! }
//! print!("{}", index.generate_sam_headers().unwrap());
//! ```
//!

use std::path::Path;

use crate::index::Mode;
use crate::index::ReferenceIndex;
use crate::index::SourceFingerprint;
use crate::parser::read_annotation_file;

type E = Box<dyn std::error::Error>;

/// What was found at the index path.
#[derive(Debug)]
pub enum CacheState {
    Missing,
    Loaded(ReferenceIndex),
    Unreadable(String),
}

/// Why a persisted index is not reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RebuildReason {
    Missing,
    Incompatible(String),
    ModeMismatch { found: Mode },
    SourcesChanged,
}

impl std::fmt::Display for RebuildReason {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            RebuildReason::Missing => write!(f, "no index file"),
            RebuildReason::Incompatible(reason) => write!(f, "{}", reason),
            RebuildReason::ModeMismatch { found } => write!(f, "index was built in {} mode", found),
            RebuildReason::SourcesChanged => write!(f, "input files have changed since the index was built"),
        }
    }
}

#[derive(Debug)]
pub enum Decision {
    Reuse(ReferenceIndex),
    Rebuild(RebuildReason),
}

/// Whether [load_or_generate] or [load_or_generate_transcriptome] reused the
/// persisted index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Reused,
    Rebuilt(RebuildReason),
}

/// Try to read the persisted index at `path`.
pub fn probe<P: AsRef<Path>>(
    path: P,
) -> CacheState {
    if !path.as_ref().exists() {
        return CacheState::Missing
    }
    match ReferenceIndex::load_from_file(path.as_ref()) {
        Ok(index) => CacheState::Loaded(index),
        Err(e) => CacheState::Unreadable(e.to_string()),
    }
}

/// Decide whether the probed index can serve `mode` for inputs with
/// fingerprints `sources`.
///
/// ## Usage
///
/// ```rust
/// use txome::cache::{decide, CacheState, Decision, RebuildReason};
/// use txome::index::Mode;
///
/// let got = decide(CacheState::Missing, Mode::Genome, &[]);
///
/// assert!(matches!(got, Decision::Rebuild(RebuildReason::Missing)));
/// ```
///
pub fn decide(
    state: CacheState,
    mode: Mode,
    sources: &[SourceFingerprint],
) -> Decision {
    match state {
        CacheState::Missing => Decision::Rebuild(RebuildReason::Missing),
        CacheState::Unreadable(reason) => Decision::Rebuild(RebuildReason::Incompatible(reason)),
        CacheState::Loaded(index) => {
            if index.mode() != mode {
                Decision::Rebuild(RebuildReason::ModeMismatch { found: index.mode() })
            } else if index.sources() != sources {
                Decision::Rebuild(RebuildReason::SourcesChanged)
            } else {
                Decision::Reuse(index)
            }
        },
    }
}

fn log_rebuild(reason: &RebuildReason) {
    match reason {
        RebuildReason::Missing => log::info!("Index not found, building it"),
        _ => log::warn!("Rebuilding index: {}", reason),
    }
}

/// Load a genome index from `out_index` or build it from `reference`.
///
/// A rebuilt index is stored at `out_index`, replacing the old file.
pub fn load_or_generate<P: AsRef<Path>, Q: AsRef<Path>>(
    reference: P,
    out_index: Q,
) -> Result<(ReferenceIndex, Outcome), E> {
    let sources = vec![SourceFingerprint::from_path(&reference)?];

    log::info!("Checking index file '{}'", out_index.as_ref().display());
    match decide(probe(&out_index), Mode::Genome, &sources) {
        Decision::Reuse(index) => {
            log::info!("Reusing index with {} sequences", index.num_sequences_forward());
            Ok((index, Outcome::Reused))
        },
        Decision::Rebuild(reason) => {
            log_rebuild(&reason);
            let mut index = ReferenceIndex::new();
            index.generate_from_file(&reference)?;

            log::info!("Storing index to file '{}'", out_index.as_ref().display());
            index.store_to_file(&out_index)?;
            Ok((index, Outcome::Rebuilt(reason)))
        },
    }
}

/// Load a transcriptome index from `out_index` or build it from
/// `reference` and `gtf`.
///
/// The annotation is parsed on every call. When the persisted index is reused
/// the genome is read again to fill the genome length table.
///
/// Terminates with [EmptyTranscriptome](crate::splice::EmptyTranscriptome) if a
/// rebuild splices no transcripts.
pub fn load_or_generate_transcriptome<P: AsRef<Path>, Q: AsRef<Path>, R: AsRef<Path>>(
    reference: P,
    gtf: Q,
    out_index: R,
) -> Result<(ReferenceIndex, Outcome), E> {
    log::info!("Loading annotation from file '{}'", gtf.as_ref().display());
    let annotation = read_annotation_file(&gtf)?;
    log::info!("Annotation has {} transcripts", annotation.n_transcripts());

    let sources = vec![SourceFingerprint::from_path(&reference)?, SourceFingerprint::from_path(&gtf)?];

    log::info!("Checking index file '{}'", out_index.as_ref().display());
    match decide(probe(&out_index), Mode::Transcriptome, &sources) {
        Decision::Reuse(mut index) => {
            log::info!("Reusing index with {} transcripts", index.num_sequences_forward());
            index.set_annotation(annotation);
            index.load_genome_lengths(&reference)?;
            Ok((index, Outcome::Reused))
        },
        Decision::Rebuild(reason) => {
            log_rebuild(&reason);
            let mut index = ReferenceIndex::new();
            index.set_annotation(annotation);
            index.generate_transcriptome(&reference, &gtf)?;

            log::info!("Storing index to file '{}'", out_index.as_ref().display());
            index.store_to_file(&out_index)?;
            Ok((index, Outcome::Rebuilt(reason)))
        },
    }
}
