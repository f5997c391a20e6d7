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
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;

use bincode::decode_from_slice;
use bincode::encode_to_vec;

use crate::compression::gzwrapper::deflate_bytes;
use crate::compression::gzwrapper::inflate_bytes;
use crate::headers::file::encode_file_header;
use crate::headers::file::read_file_header;
use crate::headers::file::FileHeader;
use crate::headers::file::INDEX_FORMAT_VERSION;
use crate::headers::file::INDEX_MAGIC;
use crate::index::ReferenceIndex;
use crate::index::SourceFingerprint;

type E = Box<dyn std::error::Error>;

type Payload = (Vec<SourceFingerprint>, Vec<String>, Vec<Vec<u8>>);

/// A persisted index that cannot be used by this version.
#[derive(Debug, Clone)]
pub struct IncompatibleIndex {
    pub reason: String,
}

impl std::fmt::Display for IncompatibleIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "incompatible index: {}", self.reason)
    }
}

impl std::error::Error for IncompatibleIndex {}

fn incompatible(reason: String) -> E {
    Box::new(IncompatibleIndex { reason })
}

/// Write `index` to something that implements [Write].
///
/// Only the indexed sequences, their headers, the mode flag and the source
/// fingerprints are written.
///
/// ## Usage
///
/// ```rust
/// use txome::index::ReferenceIndex;
/// use txome::index::store::{read_index, write_index};
/// use txome::sequence::{SequenceCollection, SequenceRecord};
/// use std::io::{Cursor, Seek};
///
/// let sequences: SequenceCollection = vec![
///     SequenceRecord::new(0, "chr1", b"ACGTACGT".to_vec()),
/// ].into_iter().collect();
///
/// let mut index = ReferenceIndex::new();
/// index.generate_from_sequences(sequences);
///
/// let mut bytes: Cursor<Vec<u8>> = Cursor::new(Vec::new());
/// write_index(&index, &mut bytes).unwrap();
///
/// bytes.rewind().unwrap();
/// let got = read_index(&mut bytes).unwrap();
///
/// assert_eq!(got.headers(), index.headers());
/// assert!(!got.is_transcriptome());
/// ```
///
pub fn write_index<W: Write>(
    index: &ReferenceIndex,
    conn: &mut W,
) -> Result<(), E> {
    let payload = encode_to_vec(
        (index.sources(), index.headers(), index.sequences()),
        bincode::config::standard(),
    )?;
    let deflated = deflate_bytes(&payload)?;

    let header = FileHeader::new(index.is_transcriptome(), deflated.len() as u64, index.num_sequences_forward() as u64);
    conn.write_all(&encode_file_header(&header)?)?;
    conn.write_all(&deflated)?;
    conn.flush()?;

    Ok(())
}

/// Read an index from something that implements [Read].
///
/// Terminates with [IncompatibleIndex] if the data was not written by
/// [write_index] with the current [INDEX_FORMAT_VERSION] or is truncated.
pub fn read_index<R: Read>(
    conn: &mut R,
) -> Result<ReferenceIndex, E> {
    let header = read_file_header(conn).map_err(|e| incompatible(format!("unreadable header ({})", e)))?;
    if header.magic != INDEX_MAGIC {
        return Err(incompatible("not a txome index".to_string()))
    }
    if header.version != INDEX_FORMAT_VERSION {
        return Err(incompatible(format!("format version {}, expected {}", header.version, INDEX_FORMAT_VERSION)))
    }

    let mut deflated: Vec<u8> = Vec::new();
    conn.by_ref().take(header.payload_len).read_to_end(&mut deflated)?;
    if deflated.len() as u64 != header.payload_len {
        return Err(incompatible(format!("payload truncated at {} of {} bytes", deflated.len(), header.payload_len)))
    }

    let payload = inflate_bytes(&deflated).map_err(|e| incompatible(format!("corrupt payload ({})", e)))?;
    let (sources, headers, sequences): Payload = decode_from_slice(&payload, bincode::config::standard())
        .map_err(|e| incompatible(format!("corrupt payload ({})", e)))?.0;

    if headers.len() != sequences.len() || headers.len() as u64 != header.n_sequences {
        return Err(incompatible(format!("expected {} sequences, found {}", header.n_sequences, headers.len())))
    }

    Ok(ReferenceIndex::from_parts(headers, sequences, header.is_transcriptome != 0, sources))
}

impl ReferenceIndex {
    /// Persist the index to `path`, overwriting any existing file.
    pub fn store_to_file<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<(), E> {
        let f = File::create(path.as_ref()).map_err(|e| {
            log::error!("Error creating index file '{}'", path.as_ref().display());
            e
        })?;
        let mut conn = BufWriter::new(f);
        write_index(self, &mut conn)
    }

    /// Read a persisted index from `path`.
    ///
    /// The annotation and genome lengths of the returned index are empty.
    pub fn load_from_file<P: AsRef<Path>>(
        path: P,
    ) -> Result<Self, E> {
        let f = File::open(path.as_ref())?;
        let mut conn = BufReader::new(f);
        read_index(&mut conn)
    }
}

// Tests
#[cfg(test)]
mod tests {
    use crate::index::ReferenceIndex;
    use crate::index::SourceFingerprint;

    fn mock_index(is_transcriptome: bool) -> ReferenceIndex {
        let headers = vec!["T1_chr1".to_string(), "T2_chr1".to_string()];
        let sequences = vec![b"ACGTTGCA".to_vec(), b"GGGA".to_vec()];
        let sources = vec![SourceFingerprint { len: 120, modified_secs: 1700000000, modified_nanos: 5 }];
        ReferenceIndex::from_parts(headers, sequences, is_transcriptome, sources)
    }

    #[test]
    fn write_and_read_keeps_mode() {
        use super::{read_index, write_index};
        use std::io::{Cursor, Seek};

        for is_transcriptome in [false, true] {
            let index = mock_index(is_transcriptome);
            let mut bytes: Cursor<Vec<u8>> = Cursor::new(Vec::new());
            write_index(&index, &mut bytes).unwrap();
            bytes.rewind().unwrap();

            let got = read_index(&mut bytes).unwrap();

            assert_eq!(got.is_transcriptome(), is_transcriptome);
            assert_eq!(got, index);
        }
    }

    #[test]
    fn store_and_load_file() {
        use crate::index::Mode;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ref.idx");
        let index = mock_index(true);

        index.store_to_file(&path).unwrap();
        let got = ReferenceIndex::load_from_file(&path).unwrap();

        assert_eq!(got.mode(), Mode::Transcriptome);
        assert_eq!(got.reference_lengths(), vec![8, 4]);
        assert_eq!(got.sources(), index.sources());
    }

    #[test]
    fn read_index_wrong_magic() {
        use super::{read_index, IncompatibleIndex};
        use std::io::Cursor;

        let mut bytes = Cursor::new(vec![0_u8; 64]);
        let got = read_index(&mut bytes);

        assert!(got.unwrap_err().downcast_ref::<IncompatibleIndex>().is_some());
    }

    #[test]
    fn read_index_old_version() {
        use super::{read_index, write_index, IncompatibleIndex};
        use std::io::Cursor;

        let mut bytes: Vec<u8> = Vec::new();
        write_index(&mock_index(false), &mut bytes).unwrap();
        // version is the u32 after the 8 byte magic
        bytes[8] = 0;

        let got = read_index(&mut Cursor::new(bytes));

        let err = got.unwrap_err();
        let err = err.downcast_ref::<IncompatibleIndex>().unwrap();
        assert!(err.reason.contains("format version 0"));
    }

    #[test]
    fn read_index_truncated() {
        use super::{read_index, write_index, IncompatibleIndex};
        use std::io::Cursor;

        let mut bytes: Vec<u8> = Vec::new();
        write_index(&mock_index(false), &mut bytes).unwrap();
        bytes.truncate(bytes.len() - 3);

        let got = read_index(&mut Cursor::new(bytes));

        assert!(got.unwrap_err().downcast_ref::<IncompatibleIndex>().is_some());
    }

    #[test]
    fn read_index_short_file() {
        use super::{read_index, IncompatibleIndex};
        use std::io::Cursor;

        let got = read_index(&mut Cursor::new(b"TXOME".to_vec()));

        assert!(got.unwrap_err().downcast_ref::<IncompatibleIndex>().is_some());
    }
}
