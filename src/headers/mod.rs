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

//! File header used in the persisted index.
//!
//! ## FileHeader
//!
//! A [FileHeader](file::FileHeader) must contain this information:
//!
//! - Magic number identifying the file as a txome index.
//! - Format version.
//! - Whether the index was built from a genome or from spliced transcripts.
//! - Length of the compressed payload (bytes).
//! - Number of indexed sequences.
//!
//! An encoded FileHeader is always 32 bytes long and appears at the start of a
//! valid index file. A header with the wrong magic number or version makes the
//! whole file unusable; the index is then rebuilt rather than read.
//!
//! ## Payload
//!
//! The header is followed by a gzip-compressed [bincode] payload with the
//! source fingerprints, the sequence headers and the sequences themselves, see
//! [store](crate::index::store).
//!

pub mod file;
