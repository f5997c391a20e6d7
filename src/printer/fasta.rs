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
use std::io::Write;

use crate::sequence::SequenceCollection;
use crate::sequence::SequenceRecord;

type E = Box<dyn std::error::Error>;

/// Bases per line in FASTA output.
pub const LINE_WIDTH: usize = 80;

/// Format a single record in FASTA format
///
/// Writes the header line and the bases wrapped to `line_width` characters
/// per line to `conn`.
///
pub fn format_fasta_record<W: Write>(
    record: &SequenceRecord,
    line_width: usize,
    conn: &mut W,
) -> Result<(), E> {
    conn.write_all(b">")?;
    conn.write_all(record.header.as_bytes())?;
    conn.write_all(b"\n")?;
    for line in record.data.chunks(line_width.max(1)) {
        conn.write_all(line)?;
        conn.write_all(b"\n")?;
    }
    Ok(())
}

/// Write every record in `sequences` with [LINE_WIDTH] bases per line.
pub fn write_fasta<W: Write>(
    sequences: &SequenceCollection,
    conn: &mut W,
) -> Result<(), E> {
    for record in sequences.iter() {
        format_fasta_record(record, LINE_WIDTH, conn)?;
    }
    conn.flush()?;
    Ok(())
}
