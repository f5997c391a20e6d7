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

//! In-memory nucleotide sequences.
//!
//! [SequenceCollection] is read from fastX files with
//! [needletail](https://docs.rs/needletail) and is used both for the genome
//! and for the spliced transcripts derived from it.
//!

use std::path::Path;

use needletail::parse_fastx_file;
use needletail::sequence::complement;

type E = Box<dyn std::error::Error>;

/// Returns `header` up to, not including, the first whitespace character.
///
/// ## Usage
///
/// ```rust
/// use txome::sequence::trim_to_first_space;
///
/// assert_eq!(trim_to_first_space("chr1 AC:CM000663.2 gi:568336023"), "chr1");
/// assert_eq!(trim_to_first_space("chrM"), "chrM");
/// ```
///
pub fn trim_to_first_space(header: &str) -> &str {
    header.split(char::is_whitespace).next().unwrap_or(header)
}

/// A named nucleotide sequence.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SequenceRecord {
    /// Numeric identifier, unique within a collection.
    pub id: u64,
    /// Full header line without the leading `>` or `@`.
    pub header: String,
    /// Bases, one byte per base.
    pub data: Vec<u8>,
}

impl SequenceRecord {
    pub fn new(id: u64, header: &str, data: Vec<u8>) -> Self {
        SequenceRecord { id, header: header.to_string(), data }
    }

    /// Header trimmed to its first whitespace-delimited token.
    pub fn name(&self) -> &str {
        trim_to_first_space(&self.header)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Reverse complement the bases in place.
    ///
    /// IUPAC codes are complemented, case is preserved.
    pub fn reverse_complement(&mut self) {
        self.data.reverse();
        self.data.iter_mut().for_each(|nt| *nt = complement(*nt));
    }
}

/// Ordered collection of [SequenceRecord]s.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SequenceCollection {
    records: Vec<SequenceRecord>,
}

impl SequenceCollection {
    pub fn new() -> Self {
        SequenceCollection::default()
    }

    /// Read every record in a fasta or fastq file, optionally gzipped.
    ///
    /// Records are numbered from 0 in file order.
    pub fn from_fastx_file<P: AsRef<Path>>(
        path: P,
    ) -> Result<Self, E> {
        let mut reader = parse_fastx_file(path.as_ref()).map_err(|e| {
            log::error!("Error opening sequence file '{}'", path.as_ref().display());
            e
        })?;

        let mut records: Vec<SequenceRecord> = Vec::new();
        while let Some(record) = reader.next() {
            let record = record?;
            let header = String::from_utf8_lossy(record.id());
            records.push(SequenceRecord::new(records.len() as u64, &header, record.seq().to_vec()));
        }

        Ok(SequenceCollection { records })
    }

    /// Append a record, the collection takes ownership.
    pub fn push(&mut self, record: SequenceRecord) {
        self.records.push(record);
    }

    pub fn get(&self, idx: usize) -> Option<&SequenceRecord> {
        self.records.get(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SequenceRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[SequenceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl FromIterator<SequenceRecord> for SequenceCollection {
    fn from_iter<I: IntoIterator<Item = SequenceRecord>>(iter: I) -> Self {
        SequenceCollection { records: iter.into_iter().collect() }
    }
}

impl IntoIterator for SequenceCollection {
    type Item = SequenceRecord;
    type IntoIter = std::vec::IntoIter<SequenceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a SequenceCollection {
    type Item = &'a SequenceRecord;
    type IntoIter = std::slice::Iter<'a, SequenceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
