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
use std::io::Read;

use bincode::{Encode, Decode};
use bincode::encode_into_std_write;
use bincode::decode_from_slice;

type E = Box<dyn std::error::Error>;

/// `TXOMEIDX` as a little-endian u64.
pub const INDEX_MAGIC: u64 = u64::from_le_bytes(*b"TXOMEIDX");

/// Bumped whenever the persisted layout or the transcript key scheme changes.
pub const INDEX_FORMAT_VERSION: u32 = 1;

/// Encoded size of a [FileHeader].
pub const FILE_HEADER_LEN: usize = 32;

/// Fixed-size header at the start of a persisted index.
///
/// Encoded with [bincode] using fixed int encoding, always 32 bytes.
#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    /// Must equal [INDEX_MAGIC].
    pub magic: u64,
    /// Must equal [INDEX_FORMAT_VERSION] for the index to be usable.
    pub version: u32,
    /// 1 if the index was built over spliced transcripts, 0 for a genome.
    pub is_transcriptome: u32,
    /// Length of the compressed payload following the header (bytes).
    pub payload_len: u64,
    /// Number of sequences in the payload.
    pub n_sequences: u64,
}

impl FileHeader {
    pub fn new(is_transcriptome: bool, payload_len: u64, n_sequences: u64) -> Self {
        FileHeader {
            magic: INDEX_MAGIC,
            version: INDEX_FORMAT_VERSION,
            is_transcriptome: is_transcriptome as u32,
            payload_len,
            n_sequences,
        }
    }
}

pub fn encode_file_header(
    header: &FileHeader,
) -> Result<Vec<u8>, E> {
    let mut bytes: Vec<u8> = Vec::new();
    let nbytes = encode_into_std_write(
        header,
        &mut bytes,
        bincode::config::standard().with_fixed_int_encoding(),
    )?;
    assert_eq!(nbytes, FILE_HEADER_LEN);
    Ok(bytes)
}

pub fn decode_file_header(
    header_bytes: &[u8],
) -> Result<FileHeader, E> {
    Ok(decode_from_slice(header_bytes, bincode::config::standard().with_fixed_int_encoding())?.0)
}

pub fn read_file_header<R: Read>(
    conn: &mut R,
) -> Result<FileHeader, E> {
    let mut header_bytes: [u8; FILE_HEADER_LEN] = [0_u8; FILE_HEADER_LEN];
    conn.read_exact(&mut header_bytes)?;
    let res = decode_file_header(&header_bytes)?;
    Ok(res)
}
