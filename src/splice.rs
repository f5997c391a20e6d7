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

//! Transcript splicer.
//!
//! Concatenates the exons of each annotated transcript from its chromosome
//! and reverse complements transcripts on the `-` strand. See
//! [make_transcripts].
//!

use crate::annotation::Annotation;
use crate::annotation::Exon;
use crate::sequence::SequenceCollection;
use crate::sequence::SequenceRecord;

#[derive(Debug, Clone)]
pub struct EmptyTranscriptome;

impl std::fmt::Display for EmptyTranscriptome {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "no transcript sequences could be constructed from the annotation")
    }
}

impl std::error::Error for EmptyTranscriptome {}

/// Hands out increasing sequence identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub fn new(first: u64) -> Self {
        IdGenerator { next: first }
    }

    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Default for IdGenerator {
    /// Starts from 1.
    fn default() -> Self {
        IdGenerator::new(1)
    }
}

/// Concatenate `exons` from `chromosome`.
///
/// Exon coordinates are 1-based and inclusive. An exon that starts after its
/// end adds no bases. If any exon starts at 0 or ends past the end of
/// `chromosome`, nothing can be spliced and the result is empty.
///
/// ## Usage
///
/// ```rust
/// use txome::annotation::Exon;
/// use txome::splice::splice_exons;
///
/// let chromosome = b"AAAACCCCGGGGTTTT";
/// let exons = vec![Exon::new(1, 2), Exon::new(9, 12)];
///
/// assert_eq!(splice_exons(chromosome, &exons), b"AAGGGG".to_vec());
/// assert_eq!(splice_exons(chromosome, &[Exon::new(1, 4), Exon::new(10, 8)]), b"AAAA".to_vec());
/// assert!(splice_exons(chromosome, &[Exon::new(10, 17)]).is_empty());
/// ```
///
pub fn splice_exons(
    chromosome: &[u8],
    exons: &[Exon],
) -> Vec<u8> {
    let in_range = exons.iter().all(|exon| {
        exon.start > 0 && exon.end <= chromosome.len() as u64
    });
    if !in_range {
        return Vec::new()
    }

    let total: u64 = exons.iter().map(|exon| (exon.end + 1).saturating_sub(exon.start)).sum();
    let mut spliced: Vec<u8> = Vec::with_capacity(total as usize);
    exons.iter().filter(|exon| exon.start <= exon.end).for_each(|exon| {
        spliced.extend_from_slice(&chromosome[(exon.start - 1) as usize..exon.end as usize]);
    });
    spliced
}

/// Splice every annotated transcript found on the chromosomes in `genome`.
///
/// Chromosomes are matched by their header trimmed to the first whitespace
/// and visited in `genome` order; the transcripts of a chromosome are visited
/// in annotation order. Each spliced transcript gets the next id from `ids`
/// and its transcript key as header. Transcripts on the `-` strand are
/// reverse complemented.
///
/// Transcripts that splice to an empty sequence are left out. Chromosomes
/// without transcripts are skipped.
///
/// ## Usage
///
/// ```rust
/// use txome::annotation::{Annotation, Exon, Strand};
/// use txome::sequence::{SequenceCollection, SequenceRecord};
/// use txome::splice::{make_transcripts, IdGenerator};
///
/// let genome: SequenceCollection = vec![
///     SequenceRecord::new(0, "chr1 test", b"AAAACCCCGGGGTTTT".to_vec()),
/// ].into_iter().collect();
///
/// let mut annotation = Annotation::new();
/// annotation.add_exon("chr1", "T1", Strand::Forward, Exon::new(1, 4));
/// annotation.add_exon("chr1", "T2", Strand::Reverse, Exon::new(1, 4));
/// annotation.finalize();
///
/// let mut ids = IdGenerator::default();
/// let transcripts = make_transcripts(&annotation, &genome, &mut ids);
///
/// assert_eq!(transcripts.len(), 2);
/// assert_eq!(transcripts.get(0).unwrap().header, "T1_chr1");
/// assert_eq!(transcripts.get(0).unwrap().data, b"AAAA".to_vec());
/// assert_eq!(transcripts.get(1).unwrap().id, 2);
/// assert_eq!(transcripts.get(1).unwrap().data, b"TTTT".to_vec());
/// ```
///
pub fn make_transcripts(
    annotation: &Annotation,
    genome: &SequenceCollection,
    ids: &mut IdGenerator,
) -> SequenceCollection {
    let mut transcripts = SequenceCollection::new();

    for chromosome in genome.iter() {
        let Some(on_chromosome) = annotation.transcripts_on(chromosome.name()) else {
            continue
        };

        for (key, strand) in on_chromosome {
            let Some(exons) = annotation.exons(key) else {
                continue
            };

            let data = splice_exons(&chromosome.data, exons);
            if data.is_empty() {
                log::debug!("Dropping transcript {} with an empty spliced sequence", key);
                continue
            }

            let mut record = SequenceRecord::new(ids.next_id(), key, data);
            if strand.is_reverse() {
                record.reverse_complement();
            }
            transcripts.push(record);
        }
    }

    transcripts
}
