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

//! txome is a library and a command-line client for:
//!
//!   - Reading exons from a [GTF](https://mart.ensembl.org/info/website/upload/gff.html) annotation.
//!   - Merging the exons of each transcript into disjoint regions.
//!   - Splicing transcript sequences out of a genome, reverse complementing
//!     transcripts on the minus strand.
//!   - Building a reference index over either the genome or the spliced
//!     transcriptome and reusing a persisted copy when it is still valid.
//!   - Formatting the `@SQ` lines of a
//!     [SAM](https://samtools.github.io/hts-specs/SAMv1.pdf) header for the
//!     index.
//!
//! ## Usage
//!
//! ### Command line
//!
//! The txome CLI supports the following subcommands:
//!   - `txome index` load or build the index for a genome, or for the
//!     transcriptome when `--gtf` is given.
//!   - `txome headers` same as `index`, then print the SAM `@SQ` lines.
//!   - `txome splice` write the spliced transcripts in fasta format.
//!   - `txome regions` write the merged exon regions in bed format.
//!
//! ### Rust API
//!
//! The cache controller is in [cache]: [load_or_generate] for genome indexes
//! and [load_or_generate_transcriptome] for transcriptome indexes. Both
//! return the ready [ReferenceIndex] and an [Outcome](cache::Outcome) telling
//! whether the persisted copy was reused.
//!
//! The building blocks are available separately:
//!
//!   - [read_annotation](parser::read_annotation): takes a [Read] containing GTF data and returns an [Annotation].
//!   - [merge_exons](annotation::regions::merge_exons): merges the exons of a single transcript.
//!   - [make_transcripts](splice::make_transcripts): splices the transcripts in an [Annotation] from a [SequenceCollection].
//!   - [GenomeLengths]: table of genome sequence lengths by full and trimmed name.
//!   - [write_fasta](printer::fasta::write_fasta) and [sam_header_text](printer::sam::sam_header_text) format the results.
//!
//! The functions [splice()] and [regions()] below chain these together for
//! processing whole files.
//!
//! ## Index file format
//!
//! A persisted index starts with a 32 byte [header](headers) followed by a
//! gzip-compressed payload, see [store](index::store).
//!

use std::io::Read;
use std::io::Write;
use std::path::Path;

pub mod annotation;
pub mod cache;
pub mod compression;
pub mod genome;
pub mod headers;
pub mod index;
pub mod parser;
pub mod printer;
pub mod sequence;
pub mod splice;

pub use annotation::Annotation;
pub use annotation::Exon;
pub use annotation::Region;
pub use annotation::Strand;
pub use cache::load_or_generate;
pub use cache::load_or_generate_transcriptome;
pub use genome::GenomeLengths;
pub use index::Mode;
pub use index::ReferenceIndex;
pub use sequence::SequenceCollection;
pub use sequence::SequenceRecord;

type E = Box<dyn std::error::Error>;

/// Splice the transcripts in `gtf` from the genome in `reference` and write
/// them to `conn` in fasta format.
///
/// Returns the number of transcripts written. Transcripts are numbered from 1.
///
/// Terminates with [EmptyTranscriptome](splice::EmptyTranscriptome) if no
/// transcript could be spliced.
///
pub fn splice<P: AsRef<Path>, Q: AsRef<Path>, W: Write>(
    reference: P,
    gtf: Q,
    conn: &mut W,
) -> Result<usize, E> {
    log::info!("Loading annotation from file '{}'", gtf.as_ref().display());
    let annotation = parser::read_annotation_file(&gtf)?;

    log::info!("Loading the genomic sequences");
    let genome = SequenceCollection::from_fastx_file(&reference)?;

    log::info!("Constructing the transcriptome sequences");
    let mut ids = splice::IdGenerator::default();
    let transcripts = splice::make_transcripts(&annotation, &genome, &mut ids);
    log::info!("In total, there are {} transcripts", transcripts.len());

    if transcripts.is_empty() {
        return Err(Box::new(splice::EmptyTranscriptome{}))
    }

    printer::fasta::write_fasta(&transcripts, conn)?;
    Ok(transcripts.len())
}

/// Read GTF data from `conn_in` and write the merged regions of every
/// transcript to `conn_out` in bed format.
///
/// ## Usage
///
/// ```rust
/// use std::io::Cursor;
///
/// let mut gtf: Vec<u8> = b"chr1\tsrc\texon\t300\t400\t.\t-\t.\ttranscript_id \"T1\";\n".to_vec();
/// gtf.append(&mut b"chr1\tsrc\texon\t100\t300\t.\t-\t.\ttranscript_id \"T1\";\n".to_vec());
///
/// let mut output: Vec<u8> = Vec::new();
/// txome::regions(&mut Cursor::new(gtf), &mut output).unwrap();
///
/// assert_eq!(output, b"chr1\t99\t400\tT1_chr1\t0\t-\n".to_vec());
/// ```
///
pub fn regions<R: Read, W: Write>(
    conn_in: &mut R,
    conn_out: &mut W,
) -> Result<(), E> {
    let annotation = parser::read_annotation(conn_in)?;
    log::info!("Annotation has {} transcripts", annotation.n_transcripts());
    printer::regions::write_regions(&annotation, conn_out)
}
