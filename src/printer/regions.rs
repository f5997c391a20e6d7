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

use crate::annotation::Annotation;

type E = Box<dyn std::error::Error>;

/// Write the merged regions of every transcript in `annotation` as BED6.
///
/// Each line has the chromosome, the 0-based start and exclusive end of the
/// region, the transcript key, a score of 0 and the strand. Transcripts are
/// written in key order.
///
/// ## Usage
///
/// ```rust
/// use txome::annotation::{Annotation, Exon, Strand};
/// use txome::printer::regions::write_regions;
///
/// let mut annotation = Annotation::new();
/// annotation.add_exon("chr1", "T1", Strand::Forward, Exon::new(100, 200));
/// annotation.add_exon("chr1", "T1", Strand::Forward, Exon::new(150, 250));
/// annotation.add_exon("chr1", "T1", Strand::Forward, Exon::new(300, 400));
/// annotation.finalize();
///
/// let mut output: Vec<u8> = Vec::new();
/// write_regions(&annotation, &mut output).unwrap();
///
/// assert_eq!(output, b"chr1\t99\t250\tT1_chr1\t0\t+\nchr1\t299\t400\tT1_chr1\t0\t+\n".to_vec());
/// ```
///
pub fn write_regions<W: Write>(
    annotation: &Annotation,
    conn: &mut W,
) -> Result<(), E> {
    let mut keys: Vec<&String> = annotation.transcript_to_regions().keys().collect();
    keys.sort();

    for key in keys {
        let Some((chromosome, strand)) = annotation.location(key) else {
            continue
        };
        for region in annotation.regions(key).unwrap_or_default() {
            writeln!(conn, "{}\t{}\t{}\t{}\t0\t{}", chromosome, region.start.saturating_sub(1), region.end, key, strand)?;
        }
    }
    conn.flush()?;

    Ok(())
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn write_regions_sorted_by_transcript() {
        use super::write_regions;
        use crate::annotation::{Annotation, Exon, Strand};

        let mut annotation = Annotation::new();
        annotation.add_exon("chr2", "B", Strand::Reverse, Exon::new(10, 20));
        annotation.add_exon("chr1", "A", Strand::Forward, Exon::new(1, 5));
        annotation.add_exon("chr1", "A", Strand::Forward, Exon::new(3, 9));
        annotation.finalize();

        let mut got: Vec<u8> = Vec::new();
        write_regions(&annotation, &mut got).unwrap();

        let expected = b"chr1\t0\t9\tA_chr1\t0\t+\nchr2\t9\t20\tB_chr2\t0\t-\n".to_vec();
        assert_eq!(got, expected);
    }
}
