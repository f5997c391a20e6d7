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

//! Transcript and exon model built from a gene annotation.
//!
//! An [Annotation] holds three mappings filled in by the
//! [annotation parser](crate::parser):
//!
//!   - chromosome name -> transcripts on that chromosome (in first-seen order),
//!   - transcript key -> originating chromosome and [Strand],
//!   - transcript key -> [exons](Exon), sorted by start coordinate once parsing
//!     has finished.
//!
//! Merged [regions](Region) are derived from the exons by
//! [make_regions](regions::make_regions) when the annotation is finalized.
//!
//! Transcript keys are the raw `transcript_id` suffixed with `_` and the
//! chromosome name, see [transcript_key]. The same raw identifier on two
//! chromosomes therefore yields two separate transcripts.
//!

pub mod regions;

use std::collections::HashMap;

/// Orientation of a transcript relative to the reference chromosome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Strand {
    /// `+`
    #[default]
    Forward,
    /// `-`, spliced sequences are reverse complemented.
    Reverse,
    /// Anything else found in the strand column, eg. `.`.
    Unknown,
}

impl Strand {
    pub fn from_byte(c: u8) -> Self {
        match c {
            b'+' => Strand::Forward,
            b'-' => Strand::Reverse,
            _ => Strand::Unknown,
        }
    }

    /// Reads the strand from the first character of a GTF strand column.
    pub fn from_field(field: &str) -> Self {
        field.bytes().next().map_or(Strand::Unknown, Strand::from_byte)
    }

    pub fn is_reverse(&self) -> bool {
        *self == Strand::Reverse
    }
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Strand::Forward => write!(f, "+"),
            Strand::Reverse => write!(f, "-"),
            Strand::Unknown => write!(f, "."),
        }
    }
}

/// Genomic interval of one exon, 1-based with both ends inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Exon {
    pub start: u64,
    pub end: u64,
}

impl Exon {
    pub fn new(start: u64, end: u64) -> Self {
        Exon { start, end }
    }
}

/// Merged, non-overlapping interval covering one or more exons.
///
/// Same coordinate convention as [Exon].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Region {
    pub start: u64,
    pub end: u64,
}

impl Region {
    pub fn new(start: u64, end: u64) -> Self {
        Region { start, end }
    }
}

/// Builds the key identifying a transcript in an [Annotation].
///
/// ## Usage
///
/// ```rust
/// use txome::annotation::transcript_key;
///
/// assert_eq!(transcript_key("ENST00000456328", "chr1"), "ENST00000456328_chr1");
/// ```
///
pub fn transcript_key(raw_id: &str, chromosome: &str) -> String {
    format!("{}_{}", raw_id, chromosome)
}

/// Exon-level view of a gene annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotation {
    chromosome_to_transcripts: HashMap<String, Vec<(String, Strand)>>,
    transcript_to_chromosome: HashMap<String, (String, Strand)>,
    transcript_to_exons: HashMap<String, Vec<Exon>>,
    transcript_to_regions: HashMap<String, Vec<Region>>,
}

impl Annotation {
    pub fn new() -> Self {
        Annotation::default()
    }

    /// Appends an exon to the transcript `raw_id` on `chromosome`.
    ///
    /// The chromosome and strand of a transcript are recorded the first time
    /// its key is seen. Later exons for the same key only extend the exon
    /// list, a differing strand on a later row is ignored.
    ///
    /// Returns the transcript key.
    pub fn add_exon(
        &mut self,
        chromosome: &str,
        raw_id: &str,
        strand: Strand,
        exon: Exon,
    ) -> String {
        let key = transcript_key(raw_id, chromosome);
        let exons = self.transcript_to_exons.entry(key.clone()).or_default();
        if exons.is_empty() {
            self.chromosome_to_transcripts
                .entry(chromosome.to_string())
                .or_default()
                .push((key.clone(), strand));
            self.transcript_to_chromosome
                .insert(key.clone(), (chromosome.to_string(), strand));
        }
        exons.push(exon);
        key
    }

    /// Sorts every exon list by start coordinate and derives the regions.
    ///
    /// Must be called once all exons have been added.
    pub fn finalize(&mut self) {
        self.transcript_to_exons.values_mut().for_each(|exons| {
            exons.sort_by_key(|exon| exon.start);
        });
        self.transcript_to_regions = regions::make_regions(&self.transcript_to_exons);
    }

    pub fn clear(&mut self) {
        self.chromosome_to_transcripts.clear();
        self.transcript_to_chromosome.clear();
        self.transcript_to_exons.clear();
        self.transcript_to_regions.clear();
    }

    /// Transcripts on `chromosome` in the order they first appeared.
    pub fn transcripts_on(&self, chromosome: &str) -> Option<&[(String, Strand)]> {
        self.chromosome_to_transcripts.get(chromosome).map(|x| x.as_slice())
    }

    pub fn location(&self, key: &str) -> Option<&(String, Strand)> {
        self.transcript_to_chromosome.get(key)
    }

    pub fn exons(&self, key: &str) -> Option<&[Exon]> {
        self.transcript_to_exons.get(key).map(|x| x.as_slice())
    }

    pub fn regions(&self, key: &str) -> Option<&[Region]> {
        self.transcript_to_regions.get(key).map(|x| x.as_slice())
    }

    pub fn chromosome_to_transcripts(&self) -> &HashMap<String, Vec<(String, Strand)>> {
        &self.chromosome_to_transcripts
    }

    pub fn transcript_to_chromosome(&self) -> &HashMap<String, (String, Strand)> {
        &self.transcript_to_chromosome
    }

    pub fn transcript_to_exons(&self) -> &HashMap<String, Vec<Exon>> {
        &self.transcript_to_exons
    }

    pub fn transcript_to_regions(&self) -> &HashMap<String, Vec<Region>> {
        &self.transcript_to_regions
    }

    pub fn n_transcripts(&self) -> usize {
        self.transcript_to_exons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transcript_to_exons.is_empty()
    }
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn strand_from_field() {
        use super::Strand;

        assert_eq!(Strand::from_field("+"), Strand::Forward);
        assert_eq!(Strand::from_field("-"), Strand::Reverse);
        assert_eq!(Strand::from_field("."), Strand::Unknown);
        assert_eq!(Strand::from_field(""), Strand::Unknown);
        assert!(Strand::from_field("-").is_reverse());
        assert!(!Strand::from_field("+").is_reverse());
    }

    #[test]
    fn add_exon_records_location_once() {
        use super::{Annotation, Exon, Strand};

        let mut annotation = Annotation::new();
        annotation.add_exon("chr1", "T1", Strand::Reverse, Exon::new(300, 400));
        annotation.add_exon("chr1", "T1", Strand::Forward, Exon::new(100, 200));
        annotation.add_exon("chr1", "T2", Strand::Forward, Exon::new(50, 60));

        let expected = vec![("T1_chr1".to_string(), Strand::Reverse), ("T2_chr1".to_string(), Strand::Forward)];
        assert_eq!(annotation.transcripts_on("chr1").unwrap(), expected.as_slice());
        assert_eq!(annotation.location("T1_chr1").unwrap(), &("chr1".to_string(), Strand::Reverse));
        assert_eq!(annotation.exons("T1_chr1").unwrap().len(), 2);
        assert_eq!(annotation.n_transcripts(), 2);
    }

    #[test]
    fn same_raw_id_on_two_chromosomes() {
        use super::{Annotation, Exon, Strand};

        let mut annotation = Annotation::new();
        annotation.add_exon("chr1", "T1", Strand::Forward, Exon::new(1, 10));
        annotation.add_exon("chr2", "T1", Strand::Reverse, Exon::new(5, 15));
        annotation.finalize();

        assert_eq!(annotation.n_transcripts(), 2);
        assert_eq!(annotation.location("T1_chr1").unwrap().0, "chr1");
        assert_eq!(annotation.location("T1_chr2").unwrap().0, "chr2");
        assert_eq!(annotation.exons("T1_chr2").unwrap(), &[Exon::new(5, 15)]);
    }

    #[test]
    fn finalize_sorts_exons_and_makes_regions() {
        use super::{Annotation, Exon, Region, Strand};

        let mut annotation = Annotation::new();
        annotation.add_exon("chr1", "T1", Strand::Forward, Exon::new(300, 400));
        annotation.add_exon("chr1", "T1", Strand::Forward, Exon::new(100, 200));
        annotation.add_exon("chr1", "T1", Strand::Forward, Exon::new(150, 250));
        annotation.finalize();

        assert_eq!(annotation.exons("T1_chr1").unwrap(), &[Exon::new(100, 200), Exon::new(150, 250), Exon::new(300, 400)]);
        assert_eq!(annotation.regions("T1_chr1").unwrap(), &[Region::new(100, 250), Region::new(300, 400)]);
    }

    #[test]
    fn clear_empties_all_mappings() {
        use super::{Annotation, Exon, Strand};

        let mut annotation = Annotation::new();
        annotation.add_exon("chr1", "T1", Strand::Forward, Exon::new(1, 10));
        annotation.finalize();
        annotation.clear();

        assert!(annotation.is_empty());
        assert!(annotation.transcripts_on("chr1").is_none());
        assert!(annotation.regions("T1_chr1").is_none());
        assert!(annotation.transcript_to_chromosome().is_empty());
    }
}
