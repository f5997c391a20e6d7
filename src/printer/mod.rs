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

//! Plain text output.
//!
//! - [sam] formats the `@SQ` lines of a SAM header for an index.
//! - [fasta] writes spliced transcripts, or any other [SequenceCollection](crate::sequence::SequenceCollection), as FASTA.
//! - [regions] writes the merged exon regions of an annotation as BED.
//!
//! ## Usage
//!
//! ### Print spliced transcripts
//!
//! ```rust
//! use txome::annotation::{Annotation, Exon, Strand};
//! use txome::printer::fasta::write_fasta;
//! use txome::sequence::{SequenceCollection, SequenceRecord};
//! use txome::splice::{make_transcripts, IdGenerator};
//!
//! let genome: SequenceCollection = vec![
//!     SequenceRecord::new(0, "chr1", b"AAAACCCCGGGGTTTT".to_vec()),
//! ].into_iter().collect();
//!
//! let mut annotation = Annotation::new();
//! annotation.add_exon("chr1", "T1", Strand::Reverse, Exon::new(5, 8));
//! annotation.add_exon("chr1", "T1", Strand::Reverse, Exon::new(1, 2));
//! annotation.finalize();
//!
//! let transcripts = make_transcripts(&annotation, &genome, &mut IdGenerator::default());
//!
//! let mut output: Vec<u8> = Vec::new();
//! write_fasta(&transcripts, &mut output).unwrap();
//!
//! assert_eq!(output, b">T1_chr1\nGGGGTT\n".to_vec());
//! ```
//!

pub mod fasta;
pub mod regions;
pub mod sam;
