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

//! Reference index built from a genome or from a spliced transcriptome.
//!
//! A [ReferenceIndex] holds the sequences a mapper indexes, their headers and
//! lengths, and a flag telling whether they are genome sequences or spliced
//! transcripts. The index also remembers [fingerprints](SourceFingerprint) of
//! the files it was built from so that a persisted copy can be checked
//! against the current inputs, see [cache](crate::cache).
//!
//! In transcriptome mode the parsed [Annotation] and the
//! [genome lengths](GenomeLengths) are attached to the index as well. They are
//! not persisted and are rebuilt on every run.
//!

pub mod store;

use std::path::Path;
use std::time::UNIX_EPOCH;

use bincode::{Encode, Decode};

use crate::annotation::Annotation;
use crate::genome::GenomeLengths;
use crate::parser::read_annotation_file;
use crate::printer::sam::sam_header_text;
use crate::sequence::trim_to_first_space;
use crate::sequence::SequenceCollection;
use crate::splice::make_transcripts;
use crate::splice::EmptyTranscriptome;
use crate::splice::IdGenerator;

type E = Box<dyn std::error::Error>;

/// Which kind of sequences an index was built over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Genome,
    Transcriptome,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Mode::Genome => write!(f, "genome"),
            Mode::Transcriptome => write!(f, "transcriptome"),
        }
    }
}

/// Identity of an input file, taken from its size and modification time.
#[derive(Encode, Decode, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceFingerprint {
    pub len: u64,
    pub modified_secs: u64,
    pub modified_nanos: u32,
}

impl SourceFingerprint {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Self, E> {
        let metadata = std::fs::metadata(path.as_ref()).map_err(|e| {
            log::error!("Error reading metadata of '{}'", path.as_ref().display());
            e
        })?;
        let modified = metadata.modified()?.duration_since(UNIX_EPOCH).unwrap_or_default();
        Ok(SourceFingerprint {
            len: metadata.len(),
            modified_secs: modified.as_secs(),
            modified_nanos: modified.subsec_nanos(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceIndex {
    headers: Vec<String>,
    sequences: Vec<Vec<u8>>,
    is_transcriptome: bool,
    sources: Vec<SourceFingerprint>,

    annotation: Annotation,
    genome_lengths: GenomeLengths,
}

impl ReferenceIndex {
    pub fn new() -> Self {
        ReferenceIndex::default()
    }

    pub(crate) fn from_parts(
        headers: Vec<String>,
        sequences: Vec<Vec<u8>>,
        is_transcriptome: bool,
        sources: Vec<SourceFingerprint>,
    ) -> Self {
        ReferenceIndex {
            headers, sequences, is_transcriptome, sources,
            annotation: Annotation::default(),
            genome_lengths: GenomeLengths::default(),
        }
    }

    /// Index the sequences in `sequences`, replacing any previous contents.
    ///
    /// Does not change the mode flag or the source fingerprints.
    pub fn generate_from_sequences(
        &mut self,
        sequences: SequenceCollection,
    ) {
        self.headers.clear();
        self.sequences.clear();
        sequences.into_iter().for_each(|record| {
            self.headers.push(record.header);
            self.sequences.push(record.data);
        });
        log::debug!("Indexed {} sequences", self.headers.len());
    }

    /// Build a genome index from the fastX file `reference`.
    pub fn generate_from_file<P: AsRef<Path>>(
        &mut self,
        reference: P,
    ) -> Result<(), E> {
        log::info!("Loading reference from file '{}'", reference.as_ref().display());
        let sources = vec![SourceFingerprint::from_path(&reference)?];
        let sequences = SequenceCollection::from_fastx_file(&reference)?;

        self.is_transcriptome = false;
        self.sources = sources;
        self.generate_from_sequences(sequences);

        Ok(())
    }

    /// Parse the GTF file `gtf` into the attached annotation.
    ///
    /// Clears the previous annotation and resets the mode flag to genome.
    pub fn load_annotation<P: AsRef<Path>>(
        &mut self,
        gtf: P,
    ) -> Result<(), E> {
        self.annotation.clear();
        self.is_transcriptome = false;

        log::info!("Loading annotation from file '{}'", gtf.as_ref().display());
        self.annotation = read_annotation_file(gtf)?;
        log::info!("Annotation has {} transcripts", self.annotation.n_transcripts());

        Ok(())
    }

    pub fn set_annotation(&mut self, annotation: Annotation) {
        self.annotation = annotation;
    }

    /// Build a transcriptome index from the genome in `reference` and the
    /// annotation in `gtf`.
    ///
    /// Terminates with [EmptyTranscriptome] if no transcript could be spliced.
    pub fn generate_transcriptome_from_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &mut self,
        reference: P,
        gtf: Q,
    ) -> Result<(), E> {
        self.load_annotation(&gtf)?;
        self.generate_transcriptome(reference, gtf)
    }

    /// Splice the attached annotation against the genome in `reference` and
    /// index the transcripts.
    ///
    /// `gtf` must be the file the attached annotation was read from, its
    /// fingerprint is stored with the index.
    pub fn generate_transcriptome<P: AsRef<Path>, Q: AsRef<Path>>(
        &mut self,
        reference: P,
        gtf: Q,
    ) -> Result<(), E> {
        let sources = vec![SourceFingerprint::from_path(&reference)?, SourceFingerprint::from_path(&gtf)?];

        log::info!("Loading the genomic sequences");
        let genome = SequenceCollection::from_fastx_file(&reference)?;

        log::info!("Constructing the transcriptome sequences");
        let mut ids = IdGenerator::default();
        let transcripts = make_transcripts(&self.annotation, &genome, &mut ids);
        log::info!("In total, there are {} transcripts", transcripts.len());

        if transcripts.is_empty() {
            return Err(Box::new(EmptyTranscriptome{}))
        }

        self.genome_lengths = GenomeLengths::from_sequences(&genome);
        self.is_transcriptome = true;
        self.sources = sources;
        self.generate_from_sequences(transcripts);

        Ok(())
    }

    /// Rebuild the genome length table from the genome in `reference`.
    pub fn load_genome_lengths<P: AsRef<Path>>(
        &mut self,
        reference: P,
    ) -> Result<(), E> {
        log::info!("Loading the genomic sequences");
        let genome = SequenceCollection::from_fastx_file(&reference)?;
        self.genome_lengths = GenomeLengths::from_sequences(&genome);
        Ok(())
    }

    /// Format the `@SQ` lines of a SAM header for this index.
    ///
    /// A genome index lists its own sequences. A transcriptome index lists
    /// the chromosomes of the genome it was spliced from, as transcript
    /// alignments are reported in genome coordinates. Either way there is one
    /// `@SQ` line per sequence.
    ///
    /// Terminates with a [SamHeaderError](crate::printer::sam::SamHeaderError)
    /// if two sequences have the same name after trimming.
    pub fn generate_sam_headers(
        &self,
    ) -> Result<String, E> {
        if self.is_transcriptome {
            sam_header_text(self.genome_lengths.references())
        } else {
            sam_header_text(self.headers.iter().zip(self.sequences.iter()).map(|(header, seq)| {
                (trim_to_first_space(header), seq.len() as u64)
            }))
        }
    }

    pub fn is_transcriptome(&self) -> bool {
        self.is_transcriptome
    }

    pub fn mode(&self) -> Mode {
        if self.is_transcriptome { Mode::Transcriptome } else { Mode::Genome }
    }

    pub fn num_sequences_forward(&self) -> usize {
        self.headers.len()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn sequences(&self) -> &[Vec<u8>] {
        &self.sequences
    }

    pub fn reference_lengths(&self) -> Vec<u64> {
        self.sequences.iter().map(|seq| seq.len() as u64).collect()
    }

    pub fn sources(&self) -> &[SourceFingerprint] {
        &self.sources
    }

    pub fn annotation(&self) -> &Annotation {
        &self.annotation
    }

    pub fn genome_lengths(&self) -> &GenomeLengths {
        &self.genome_lengths
    }
}
