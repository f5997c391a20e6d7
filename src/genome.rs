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

//! Lengths of the genome sequences a transcriptome was spliced from.
//!
//! SAM output from a transcriptome index refers to the original chromosomes,
//! so their names and lengths are kept next to the index.
//!

use indexmap::map::IndexMap;

use crate::sequence::trim_to_first_space;
use crate::sequence::SequenceCollection;

/// Sequence name -> sequence length, in genome order.
///
/// Every sequence is present under both its full header and its header
/// trimmed to the first whitespace. The full headers are also kept once per
/// sequence, see [references](GenomeLengths::references).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GenomeLengths {
    lengths: IndexMap<String, u64>,
    references: Vec<(String, u64)>,
}

impl GenomeLengths {
    pub fn new() -> Self {
        GenomeLengths::default()
    }

    /// Build the table from raw genome sequences.
    ///
    /// ## Usage
    ///
    /// ```rust
    /// use txome::genome::GenomeLengths;
    /// use txome::sequence::{SequenceCollection, SequenceRecord};
    ///
    /// let genome: SequenceCollection = vec![
    ///     SequenceRecord::new(0, "chr1 primary", b"ACGTACGT".to_vec()),
    ///     SequenceRecord::new(1, "chrM", b"ACG".to_vec()),
    /// ].into_iter().collect();
    ///
    /// let lengths = GenomeLengths::from_sequences(&genome);
    ///
    /// assert_eq!(lengths.get("chr1 primary"), Some(8));
    /// assert_eq!(lengths.get("chr1"), Some(8));
    /// assert_eq!(lengths.get("chrM"), Some(3));
    /// assert_eq!(lengths.len(), 3);
    /// ```
    ///
    pub fn from_sequences(
        sequences: &SequenceCollection,
    ) -> Self {
        let mut lengths = GenomeLengths::new();
        sequences.iter().for_each(|record| {
            lengths.insert(&record.header, record.len() as u64);
        });
        lengths
    }

    /// Insert `header` and its trimmed form.
    pub fn insert(&mut self, header: &str, len: u64) {
        self.references.push((header.to_string(), len));
        self.lengths.insert(header.to_string(), len);
        self.lengths.insert(trim_to_first_space(header).to_string(), len);
    }

    pub fn get(&self, name: &str) -> Option<u64> {
        self.lengths.get(name).copied()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.lengths.iter().map(|(name, len)| (name.as_str(), *len))
    }

    /// One entry per inserted sequence with its full header, in genome order.
    pub fn references(&self) -> impl Iterator<Item = (&str, u64)> {
        self.references.iter().map(|(name, len)| (name.as_str(), *len))
    }

    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }

    pub fn clear(&mut self) {
        self.lengths.clear();
        self.references.clear();
    }
}
